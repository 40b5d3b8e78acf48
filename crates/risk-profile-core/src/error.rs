use thiserror::Error;

use crate::reference::ReferenceTable;
use crate::types::Points;

/// Why a reference table could not be used.
///
/// Kept per table inside [`crate::reference::ReferenceData`] so that one bad
/// file degrades only the steps that depend on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableIssue {
    #[error("required data file not found: `{path}`")]
    NotFound { path: String },

    #[error("could not read `{file}`: {reason}")]
    Unreadable { file: String, reason: String },

    #[error("missing '{column}' column")]
    MissingColumn { column: String },

    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum RiskProfileError {
    #[error("{table} is unavailable: {issue}")]
    Unavailable {
        table: ReferenceTable,
        #[source]
        issue: TableIssue,
    },

    #[error("No portfolio mapping for time horizon score '{0}'.")]
    TimeHorizonNotMapped(Points),

    #[error("No portfolio mapping found for risk tolerance score '{0}'.")]
    RiskToleranceNotMapped(Points),

    #[error("No portfolio type mapped for time horizon score '{time_horizon}' and risk tolerance score '{risk_tolerance}'.")]
    EmptyCell {
        time_horizon: Points,
        risk_tolerance: Points,
    },

    #[error("Portfolio details not found for type '{0}'.")]
    PortfolioTypeNotFound(String),
}

impl RiskProfileError {
    /// True for exact-match failures in the matrix or catalog.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            RiskProfileError::TimeHorizonNotMapped(_)
                | RiskProfileError::RiskToleranceNotMapped(_)
                | RiskProfileError::EmptyCell { .. }
                | RiskProfileError::PortfolioTypeNotFound(_)
        )
    }

    pub(crate) fn unavailable(table: ReferenceTable, issue: &TableIssue) -> Self {
        RiskProfileError::Unavailable {
            table,
            issue: issue.clone(),
        }
    }
}

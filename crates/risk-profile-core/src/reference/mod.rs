//! Reference tables: plans, the risk profile matrix, and the portfolio catalog.
//!
//! Tables are loaded once and read many times. Each table carries its own
//! load outcome so that a missing or malformed file only disables the steps
//! that depend on it.

pub mod catalog;
#[cfg(feature = "loader")]
pub mod loader;
pub mod matrix;
pub mod plans;

use serde::{Deserialize, Serialize};

pub use catalog::{
    normalize_type_name, AssetWeights, PortfolioCatalog, PortfolioTypeRow, ReturnRow, ReturnStats,
};
pub use matrix::PortfolioMatrix;
pub use plans::{PlanDetail, PlanRow, PlanTable};

use crate::error::{RiskProfileError, TableIssue};
use crate::RiskProfileResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceTable {
    Plans,
    RiskMatrix,
    PortfolioCatalog,
}

impl ReferenceTable {
    pub const ALL: [ReferenceTable; 3] = [
        ReferenceTable::Plans,
        ReferenceTable::RiskMatrix,
        ReferenceTable::PortfolioCatalog,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ReferenceTable::Plans => "question_7.csv",
            ReferenceTable::RiskMatrix => "Risk_profile_matrix.csv",
            ReferenceTable::PortfolioCatalog => "Portfolio_type.csv",
        }
    }
}

impl std::fmt::Display for ReferenceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// The three reference tables, each either loaded or unavailable.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub plans: Result<PlanTable, TableIssue>,
    pub matrix: Result<PortfolioMatrix, TableIssue>,
    pub catalog: Result<PortfolioCatalog, TableIssue>,
}

impl ReferenceData {
    pub fn new(
        plans: Result<PlanTable, TableIssue>,
        matrix: Result<PortfolioMatrix, TableIssue>,
        catalog: Result<PortfolioCatalog, TableIssue>,
    ) -> Self {
        ReferenceData {
            plans,
            matrix,
            catalog,
        }
    }

    pub fn plans(&self) -> Result<&PlanTable, &TableIssue> {
        self.plans.as_ref()
    }

    pub fn matrix(&self) -> RiskProfileResult<&PortfolioMatrix> {
        self.matrix
            .as_ref()
            .map_err(|issue| RiskProfileError::unavailable(ReferenceTable::RiskMatrix, issue))
    }

    pub fn catalog(&self) -> RiskProfileResult<&PortfolioCatalog> {
        self.catalog
            .as_ref()
            .map_err(|issue| RiskProfileError::unavailable(ReferenceTable::PortfolioCatalog, issue))
    }

    /// Tables that failed to load, in [`ReferenceTable::ALL`] order.
    pub fn issues(&self) -> Vec<(ReferenceTable, &TableIssue)> {
        let mut issues = Vec::new();
        if let Err(issue) = &self.plans {
            issues.push((ReferenceTable::Plans, issue));
        }
        if let Err(issue) = &self.matrix {
            issues.push((ReferenceTable::RiskMatrix, issue));
        }
        if let Err(issue) = &self.catalog {
            issues.push((ReferenceTable::PortfolioCatalog, issue));
        }
        issues
    }
}

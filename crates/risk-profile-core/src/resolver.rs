//! Portfolio resolution from the two scores.
//!
//! Below [`SHORT_HORIZON_THRESHOLD`] the answer is a fixed allocation and no
//! table is consulted. Otherwise the matrix cell for the exact score pair
//! names a portfolio type, which must exist in the catalog.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RiskProfileError;
use crate::reference::{
    normalize_type_name, AssetWeights, PortfolioCatalog, PortfolioMatrix, ReferenceData,
    ReturnStats,
};
use crate::types::Points;
use crate::RiskProfileResult;

/// Time-horizon scores below this get the fixed short-horizon allocation.
pub const SHORT_HORIZON_THRESHOLD: Points = 3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The hardcoded allocation for very short time horizons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedAllocation {
    pub short_term_bonds: Decimal,
    pub cash_investments: Decimal,
    pub note: String,
}

impl FixedAllocation {
    pub fn short_horizon() -> Self {
        FixedAllocation {
            short_term_bonds: dec!(40),
            cash_investments: dec!(60),
            note: "A score of less than 3 indicates a very short investment time horizon. \
                   For such a short time horizon, a relatively low-risk portfolio of 40% \
                   short-term bonds (average maturity of five years or less) and 60% cash \
                   investments is suggested, as stock investments may be significantly more \
                   volatile in the short term."
                .to_string(),
        }
    }
}

/// A resolved catalog row. Fields are as read, except the type name, which
/// is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioProfile {
    pub portfolio_type: String,
    pub investor_type: Option<String>,
    pub returns: Option<ReturnStats>,
    pub weights: Option<AssetWeights>,
}

impl PortfolioProfile {
    /// First letter upper-cased, the rest lower-cased.
    pub fn display_name(&self) -> String {
        capitalize(&self.portfolio_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    ShortHorizon(FixedAllocation),
    Portfolio(PortfolioProfile),
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Resolve the recommended portfolio for a score pair.
pub fn resolve(
    time_horizon: Points,
    risk_tolerance: Points,
    matrix: &PortfolioMatrix,
    catalog: &PortfolioCatalog,
) -> RiskProfileResult<Recommendation> {
    if time_horizon < SHORT_HORIZON_THRESHOLD {
        return Ok(Recommendation::ShortHorizon(FixedAllocation::short_horizon()));
    }

    let cell = matrix.lookup(time_horizon, risk_tolerance)?;
    let portfolio_type = normalize_type_name(cell);
    debug!(time_horizon, risk_tolerance, %portfolio_type, "matrix cell resolved");

    let row = catalog
        .get(&portfolio_type)
        .ok_or_else(|| RiskProfileError::PortfolioTypeNotFound(portfolio_type.clone()))?;

    Ok(Recommendation::Portfolio(PortfolioProfile {
        portfolio_type,
        investor_type: row.investor_type.clone(),
        returns: row.returns.clone(),
        weights: row.weights.clone(),
    }))
}

impl ReferenceData {
    /// [`resolve`] against the loaded tables. An unavailable matrix or
    /// catalog halts resolution.
    pub fn resolve(
        &self,
        time_horizon: Points,
        risk_tolerance: Points,
    ) -> RiskProfileResult<Recommendation> {
        if time_horizon < SHORT_HORIZON_THRESHOLD {
            return Ok(Recommendation::ShortHorizon(FixedAllocation::short_horizon()));
        }
        resolve(time_horizon, risk_tolerance, self.matrix()?, self.catalog()?)
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

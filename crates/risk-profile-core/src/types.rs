use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Questionnaire points. Whole numbers only.
pub type Points = i32;

/// Percentages as they appear in the catalog (6.2 = 6.2%). Never as fractions.
pub type Percent = Decimal;

/// The five asset classes carried by every portfolio type, in catalog column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    LargeCapEquity,
    SmallCapEquity,
    InternationalEquity,
    FixedIncome,
    CashInvestments,
}

impl AssetClass {
    pub const ALL: [AssetClass; 5] = [
        AssetClass::LargeCapEquity,
        AssetClass::SmallCapEquity,
        AssetClass::InternationalEquity,
        AssetClass::FixedIncome,
        AssetClass::CashInvestments,
    ];

    /// Column name in the portfolio catalog.
    pub fn column(self) -> &'static str {
        match self {
            AssetClass::LargeCapEquity => "large_cap_equity",
            AssetClass::SmallCapEquity => "small_cap_equity",
            AssetClass::InternationalEquity => "international_equity",
            AssetClass::FixedIncome => "fixed_income",
            AssetClass::CashInvestments => "cash_investments",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssetClass::LargeCapEquity => "Large cap equity",
            AssetClass::SmallCapEquity => "Small cap equity",
            AssetClass::InternationalEquity => "International equity",
            AssetClass::FixedIncome => "Fixed income",
            AssetClass::CashInvestments => "Cash investments",
        }
    }

    pub fn definition(self) -> &'static str {
        match self {
            AssetClass::LargeCapEquity => "companies with market capitalization > $10B",
            AssetClass::SmallCapEquity => "companies with market capitalization about $250M-$2B",
            AssetClass::InternationalEquity => "stocks purchased outside the U.S. market",
            AssetClass::FixedIncome => {
                "securities paying fixed interest/dividends until maturity"
            }
            AssetClass::CashInvestments => {
                "short-term obligations (usually < 90 days) offering lower returns"
            }
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
        },
    }
}

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{AssetClass, Percent};

/// Matrix cells and catalog keys are compared trimmed and lowercased.
pub fn normalize_type_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Historical return figures, as percentages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnStats {
    pub average_annual_return: Option<Percent>,
    pub best_year: Option<Percent>,
    pub worst_year: Option<Percent>,
}

/// A labelled return figure for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRow {
    pub label: String,
    pub value: Option<Percent>,
}

impl ReturnStats {
    pub const COLUMNS: [&'static str; 3] = ["average_annual_return", "best_year", "worst_year"];

    pub fn rows(&self) -> Vec<ReturnRow> {
        [
            ("Average annual return", self.average_annual_return),
            ("Best year", self.best_year),
            ("Worst year", self.worst_year),
        ]
        .into_iter()
        .map(|(label, value)| ReturnRow {
            label: label.to_string(),
            value,
        })
        .collect()
    }
}

/// Asset-class weights exactly as read. Not validated to sum to 100.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetWeights {
    pub large_cap_equity: Option<Decimal>,
    pub small_cap_equity: Option<Decimal>,
    pub international_equity: Option<Decimal>,
    pub fixed_income: Option<Decimal>,
    pub cash_investments: Option<Decimal>,
}

impl AssetWeights {
    /// Weights in [`AssetClass::ALL`] order.
    pub fn from_values(values: [Decimal; 5]) -> Self {
        let [large, small, intl, fixed, cash] = values;
        AssetWeights {
            large_cap_equity: Some(large),
            small_cap_equity: Some(small),
            international_equity: Some(intl),
            fixed_income: Some(fixed),
            cash_investments: Some(cash),
        }
    }

    pub fn get(&self, class: AssetClass) -> Option<Decimal> {
        match class {
            AssetClass::LargeCapEquity => self.large_cap_equity,
            AssetClass::SmallCapEquity => self.small_cap_equity,
            AssetClass::InternationalEquity => self.international_equity,
            AssetClass::FixedIncome => self.fixed_income,
            AssetClass::CashInvestments => self.cash_investments,
        }
    }

    pub fn set(&mut self, class: AssetClass, value: Option<Decimal>) {
        let slot = match class {
            AssetClass::LargeCapEquity => &mut self.large_cap_equity,
            AssetClass::SmallCapEquity => &mut self.small_cap_equity,
            AssetClass::InternationalEquity => &mut self.international_equity,
            AssetClass::FixedIncome => &mut self.fixed_income,
            AssetClass::CashInvestments => &mut self.cash_investments,
        };
        *slot = value;
    }
}

/// One portfolio type from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioTypeRow {
    /// Key as written in the file.
    pub type_name: String,
    pub investor_type: Option<String>,
    /// Present only when the catalog carries all three return columns.
    pub returns: Option<ReturnStats>,
    /// Present only when the catalog carries all five weight columns.
    pub weights: Option<AssetWeights>,
}

impl PortfolioTypeRow {
    pub fn new(type_name: impl Into<String>) -> Self {
        PortfolioTypeRow {
            type_name: type_name.into(),
            investor_type: None,
            returns: None,
            weights: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.investor_type = Some(description.into());
        self
    }

    pub fn with_returns(mut self, returns: ReturnStats) -> Self {
        self.returns = Some(returns);
        self
    }

    pub fn with_weights(mut self, weights: AssetWeights) -> Self {
        self.weights = Some(weights);
        self
    }
}

/// Portfolio types keyed case-insensitively by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortfolioCatalog {
    rows: Vec<PortfolioTypeRow>,
    index: HashMap<String, usize>,
}

impl PortfolioCatalog {
    /// Duplicate names keep the first row.
    pub fn new(rows: Vec<PortfolioTypeRow>) -> Self {
        let mut index = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            index.entry(normalize_type_name(&row.type_name)).or_insert(i);
        }
        PortfolioCatalog { rows, index }
    }

    pub fn rows(&self) -> &[PortfolioTypeRow] {
        &self.rows
    }

    pub fn get(&self, type_name: &str) -> Option<&PortfolioTypeRow> {
        self.index
            .get(&normalize_type_name(type_name))
            .and_then(|&i| self.rows.get(i))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.get(type_name).is_some()
    }
}

//! Display-ready weight breakdowns.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::reference::AssetWeights;
use crate::resolver::FixedAllocation;
use crate::types::AssetClass;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub asset_class: String,
    pub weight: u32,
}

/// Missing, invalid and negative weights become 0; fractions are truncated.
pub fn coerce_weight(value: Option<Decimal>) -> u32 {
    value
        .filter(|v| v.is_sign_positive())
        .and_then(|v| v.trunc().to_u32())
        .unwrap_or(0)
}

/// Five entries sorted by weight, heaviest first. Equal weights keep
/// catalog column order.
pub fn compose(weights: &AssetWeights) -> Vec<WeightEntry> {
    let entries = AssetClass::ALL
        .iter()
        .map(|class| WeightEntry {
            asset_class: class.label().to_string(),
            weight: coerce_weight(weights.get(*class)),
        })
        .collect();
    sort_descending(entries)
}

impl FixedAllocation {
    pub fn composition(&self) -> Vec<WeightEntry> {
        sort_descending(vec![
            WeightEntry {
                asset_class: "Short-term bonds".to_string(),
                weight: coerce_weight(Some(self.short_term_bonds)),
            },
            WeightEntry {
                asset_class: AssetClass::CashInvestments.label().to_string(),
                weight: coerce_weight(Some(self.cash_investments)),
            },
        ])
    }
}

fn sort_descending(mut entries: Vec<WeightEntry>) -> Vec<WeightEntry> {
    // stable
    entries.sort_by(|a, b| b.weight.cmp(&a.weight));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn labels(entries: &[WeightEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.asset_class.as_str()).collect()
    }

    #[test]
    fn test_ties_keep_column_order() {
        let weights = AssetWeights::from_values([dec!(20), dec!(20), dec!(20), dec!(20), dec!(20)]);
        let entries = compose(&weights);
        assert_eq!(
            labels(&entries),
            vec![
                "Large cap equity",
                "Small cap equity",
                "International equity",
                "Fixed income",
                "Cash investments",
            ]
        );
    }

    #[test]
    fn test_sorted_descending_with_partial_ties() {
        let weights = AssetWeights::from_values([dec!(35), dec!(15), dec!(15), dec!(30), dec!(5)]);
        let entries = compose(&weights);
        assert_eq!(
            labels(&entries),
            vec![
                "Large cap equity",
                "Fixed income",
                "Small cap equity",
                "International equity",
                "Cash investments",
            ]
        );
    }

    #[test]
    fn test_coercion() {
        assert_eq!(coerce_weight(Some(dec!(12.9))), 12);
        assert_eq!(coerce_weight(Some(dec!(-5))), 0);
        assert_eq!(coerce_weight(None), 0);
    }

    #[test]
    fn test_missing_weights_sink_to_bottom() {
        let mut weights = AssetWeights::from_values([dec!(0), dec!(10), dec!(0), dec!(50), dec!(40)]);
        weights.large_cap_equity = None;
        let entries = compose(&weights);
        assert_eq!(entries[0].weight, 50);
        assert_eq!(entries[3].asset_class, "Large cap equity");
        assert_eq!(entries[3].weight, 0);
        assert_eq!(entries[4].asset_class, "International equity");
    }

    #[test]
    fn test_fixed_allocation_composition() {
        let entries = FixedAllocation::short_horizon().composition();
        assert_eq!(
            entries,
            vec![
                WeightEntry {
                    asset_class: "Cash investments".into(),
                    weight: 60
                },
                WeightEntry {
                    asset_class: "Short-term bonds".into(),
                    weight: 40
                },
            ]
        );
    }
}

use clap::Args;
use serde::Serialize;
use serde_json::Value;

use risk_profile_core::composition::{compose, WeightEntry};
use risk_profile_core::reference::ReferenceData;
use risk_profile_core::resolver::Recommendation;
use risk_profile_core::types::Points;

/// Arguments for a direct matrix lookup
#[derive(Args)]
pub struct ResolveArgs {
    /// Time horizon score
    #[arg(long)]
    pub time_horizon: Points,

    /// Risk tolerance score
    #[arg(long, allow_hyphen_values = true)]
    pub risk_tolerance: Points,
}

#[derive(Debug, Serialize)]
struct ResolveOutput {
    time_horizon_score: Points,
    risk_tolerance_score: Points,
    portfolio_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendation: Option<Recommendation>,
    composition: Vec<WeightEntry>,
    /// Set when no portfolio could be resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// A miss or an unavailable table is reported in the output, not as an error.
pub fn run_resolve(
    args: ResolveArgs,
    reference: &ReferenceData,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut output = ResolveOutput {
        time_horizon_score: args.time_horizon,
        risk_tolerance_score: args.risk_tolerance,
        portfolio_type: None,
        recommendation: None,
        composition: Vec::new(),
        message: None,
    };

    match reference.resolve(args.time_horizon, args.risk_tolerance) {
        Ok(recommendation) => {
            match &recommendation {
                Recommendation::Portfolio(profile) => {
                    output.portfolio_type = Some(profile.portfolio_type.clone());
                    output.composition = profile.weights.as_ref().map(compose).unwrap_or_default();
                }
                Recommendation::ShortHorizon(allocation) => {
                    output.composition = allocation.composition();
                }
            }
            output.recommendation = Some(recommendation);
        }
        Err(e) => output.message = Some(e.to_string()),
    }

    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_profile_core::reference::{PortfolioCatalog, PortfolioMatrix, PortfolioTypeRow};

    fn reference() -> ReferenceData {
        ReferenceData::new(
            Ok(Default::default()),
            Ok(PortfolioMatrix::from_cells([(5, 20, "Growth")])),
            Ok(PortfolioCatalog::new(vec![PortfolioTypeRow::new("growth")])),
        )
    }

    #[test]
    fn test_resolved_portfolio() {
        let args = ResolveArgs {
            time_horizon: 5,
            risk_tolerance: 20,
        };
        let value = run_resolve(args, &reference()).unwrap();
        assert_eq!(value["portfolio_type"], "growth");
        assert_eq!(value["recommendation"]["kind"], "portfolio");
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_miss_is_reported_not_raised() {
        let args = ResolveArgs {
            time_horizon: 5,
            risk_tolerance: 41,
        };
        let value = run_resolve(args, &reference()).unwrap();
        assert!(value["portfolio_type"].is_null());
        assert_eq!(
            value["message"],
            "No portfolio mapping found for risk tolerance score '41'."
        );
    }

    #[test]
    fn test_short_horizon_composition() {
        let args = ResolveArgs {
            time_horizon: 2,
            risk_tolerance: 0,
        };
        let value = run_resolve(args, &reference()).unwrap();
        assert_eq!(value["recommendation"]["kind"], "short_horizon");
        assert_eq!(value["composition"][0]["weight"], 60);
    }
}

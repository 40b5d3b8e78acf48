//! One full questionnaire evaluation.
//!
//! Every failure is terminal for the evaluation but never an error: the
//! outcome says the data was unavailable and the caller carries on.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::composition::{compose, WeightEntry};
use crate::questionnaire::scorer::scoring_notices;
use crate::questionnaire::{
    AnswerSet, PlanContribution, Questionnaire, RiskToleranceScore, Scorer, TimeHorizonScore,
    RISK_TOLERANCE_CAP,
};
use crate::reference::{ReferenceData, ReferenceTable};
use crate::resolver::{FixedAllocation, PortfolioProfile, Recommendation, SHORT_HORIZON_THRESHOLD};
use crate::types::{with_metadata, ComputationOutput, Points};

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssessmentOutcome {
    ShortHorizon {
        allocation: FixedAllocation,
        composition: Vec<WeightEntry>,
    },
    Recommended {
        portfolio: PortfolioProfile,
        /// Empty when the catalog has no weight columns.
        composition: Vec<WeightEntry>,
    },
    Unavailable {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub time_horizon_score: Points,
    /// Not scored on the short-horizon branch.
    pub risk_tolerance_score: Option<Points>,
    pub portfolio_type: Option<String>,
    pub time_horizon: TimeHorizonScore,
    pub risk_tolerance: Option<RiskToleranceScore>,
    pub outcome: AssessmentOutcome,
}

#[derive(Debug, Serialize)]
struct Assumptions {
    short_horizon_threshold: Points,
    risk_tolerance_cap: Points,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

pub fn assess(
    questionnaire: &Questionnaire,
    answers: &AnswerSet,
    reference: &ReferenceData,
) -> ComputationOutput<Assessment> {
    let start = Instant::now();
    let scorer = Scorer::new(questionnaire);
    let mut warnings = Vec::new();

    let time_horizon = scorer.time_horizon(answers);
    warnings.extend(scoring_notices(&time_horizon.answers, answers));

    let (risk_tolerance, outcome) = if time_horizon.score < SHORT_HORIZON_THRESHOLD {
        let allocation = FixedAllocation::short_horizon();
        let composition = allocation.composition();
        (
            None,
            AssessmentOutcome::ShortHorizon {
                allocation,
                composition,
            },
        )
    } else {
        let risk_tolerance = scorer.risk_tolerance(answers, reference.plans());
        warnings.extend(scoring_notices(&risk_tolerance.answers, answers));
        warnings.extend(plan_notice(&risk_tolerance.plan));
        if risk_tolerance.capped {
            warnings.push(format!(
                "Risk tolerance score capped at {} (raw score {}).",
                RISK_TOLERANCE_CAP, risk_tolerance.raw_score
            ));
        }

        let outcome = match reference.resolve(time_horizon.score, risk_tolerance.score) {
            Ok(Recommendation::Portfolio(portfolio)) => {
                let composition = portfolio.weights.as_ref().map(compose).unwrap_or_default();
                AssessmentOutcome::Recommended {
                    portfolio,
                    composition,
                }
            }
            Ok(Recommendation::ShortHorizon(allocation)) => {
                let composition = allocation.composition();
                AssessmentOutcome::ShortHorizon {
                    allocation,
                    composition,
                }
            }
            Err(err) => {
                warn!(error = %err, "portfolio resolution failed");
                AssessmentOutcome::Unavailable {
                    message: err.to_string(),
                }
            }
        };
        (Some(risk_tolerance), outcome)
    };

    let portfolio_type = match &outcome {
        AssessmentOutcome::Recommended { portfolio, .. } => Some(portfolio.portfolio_type.clone()),
        _ => None,
    };
    info!(
        time_horizon = time_horizon.score,
        risk_tolerance = ?risk_tolerance.as_ref().map(|r| r.score),
        portfolio_type = ?portfolio_type.as_deref(),
        "assessment complete"
    );

    let assessment = Assessment {
        time_horizon_score: time_horizon.score,
        risk_tolerance_score: risk_tolerance.as_ref().map(|r| r.score),
        portfolio_type,
        time_horizon,
        risk_tolerance,
        outcome,
    };

    let assumptions = Assumptions {
        short_horizon_threshold: SHORT_HORIZON_THRESHOLD,
        risk_tolerance_cap: RISK_TOLERANCE_CAP,
    };

    with_metadata(
        "Questionnaire scoring with exact-match risk profile matrix lookup",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        assessment,
    )
}

fn plan_notice(plan: &PlanContribution) -> Option<String> {
    match plan {
        PlanContribution::Matched { .. } => None,
        PlanContribution::Unmatched { plan } => Some(format!(
            "Plan '{}' not found in {}; scored as 0.",
            plan,
            ReferenceTable::Plans
        )),
        PlanContribution::NotSelected => Some("No plan selected; scored as 0.".to_string()),
        PlanContribution::TableUnavailable { reason } => Some(format!(
            "Question 7 table is unavailable ({}); scoring continues without it.",
            reason
        )),
    }
}

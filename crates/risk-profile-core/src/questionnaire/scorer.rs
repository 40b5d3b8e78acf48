//! Time-horizon and risk-tolerance scoring.
//!
//! Both scores are plain sums of the selected options' points. The
//! risk-tolerance score adds the selected plan's points and is capped at
//! [`RISK_TOLERANCE_CAP`]. An answer that cannot be matched contributes
//! nothing, but the miss is kept on the result instead of being folded
//! silently into a zero.

use serde::{Deserialize, Serialize};

use super::answers::AnswerSet;
use super::question::{QuestionId, Questionnaire, Section};
use crate::error::TableIssue;
use crate::reference::PlanTable;
use crate::types::Points;

/// Business-rule ceiling on the risk-tolerance score.
pub const RISK_TOLERANCE_CAP: Points = 40;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Score contributed by a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerScore {
    pub question: QuestionId,
    /// Label of the matched option, if any.
    pub selected: Option<String>,
    /// `None` when the question was unanswered or the choice is unknown.
    pub points: Option<Points>,
}

impl AnswerScore {
    pub fn contribution(&self) -> Points {
        self.points.unwrap_or(0)
    }
}

/// What the table-driven plan question contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanContribution {
    Matched { plan: String, points: Points },
    Unmatched { plan: String },
    NotSelected,
    TableUnavailable { reason: String },
}

impl PlanContribution {
    pub fn points(&self) -> Points {
        match self {
            PlanContribution::Matched { points, .. } => *points,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeHorizonScore {
    pub score: Points,
    pub answers: Vec<AnswerScore>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskToleranceScore {
    /// Capped score used for the matrix lookup.
    pub score: Points,
    /// Sum before the cap.
    pub raw_score: Points,
    pub capped: bool,
    pub answers: Vec<AnswerScore>,
    pub plan: PlanContribution,
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

pub struct Scorer<'a> {
    questionnaire: &'a Questionnaire,
}

impl<'a> Scorer<'a> {
    pub fn new(questionnaire: &'a Questionnaire) -> Self {
        Scorer { questionnaire }
    }

    /// Sum of the time-horizon questions. No cap.
    pub fn time_horizon(&self, answers: &AnswerSet) -> TimeHorizonScore {
        let answers = self.score_section(Section::TimeHorizon, answers);
        let score = answers
            .iter()
            .map(AnswerScore::contribution)
            .fold(0, Points::saturating_add);
        TimeHorizonScore { score, answers }
    }

    /// Sum of the risk-tolerance questions plus plan points, capped at 40.
    pub fn risk_tolerance(
        &self,
        answers: &AnswerSet,
        plans: Result<&PlanTable, &TableIssue>,
    ) -> RiskToleranceScore {
        let scored = self.score_section(Section::RiskTolerance, answers);
        let plan = plan_contribution(answers, plans);

        let raw_score = scored
            .iter()
            .map(AnswerScore::contribution)
            .fold(0, Points::saturating_add)
            .saturating_add(plan.points());
        let score = raw_score.min(RISK_TOLERANCE_CAP);

        RiskToleranceScore {
            score,
            raw_score,
            capped: raw_score > RISK_TOLERANCE_CAP,
            answers: scored,
            plan,
        }
    }

    fn score_section(&self, section: Section, answers: &AnswerSet) -> Vec<AnswerScore> {
        self.questionnaire
            .section(section)
            .map(|question| {
                let option = answers
                    .get(question.id)
                    .and_then(|choice| question.options.select(choice));
                AnswerScore {
                    question: question.id,
                    selected: option.map(|o| o.label.clone()),
                    points: option.map(|o| o.points),
                }
            })
            .collect()
    }
}

fn plan_contribution(answers: &AnswerSet, plans: Result<&PlanTable, &TableIssue>) -> PlanContribution {
    let table = match plans {
        Ok(table) => table,
        Err(issue) => {
            return PlanContribution::TableUnavailable {
                reason: issue.to_string(),
            }
        }
    };

    let Some(choice) = answers.plan.as_ref() else {
        return PlanContribution::NotSelected;
    };

    match table.select(choice) {
        Some(row) => PlanContribution::Matched {
            plan: row.plan.clone(),
            points: row.points,
        },
        None => PlanContribution::Unmatched { plan: choice.raw() },
    }
}

/// Human-readable notices for answers that scored nothing.
pub fn scoring_notices(answers: &[AnswerScore], set: &AnswerSet) -> Vec<String> {
    answers
        .iter()
        .filter(|a| a.points.is_none())
        .map(|a| match set.get(a.question) {
            Some(choice) => format!(
                "Unrecognized answer {} for {}; scored as 0.",
                choice, a.question
            ),
            None => format!("{} was not answered; scored as 0.", a.question),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::PlanRow;

    fn plans() -> PlanTable {
        PlanTable::new(vec![
            PlanRow::new("Plan A", 0),
            PlanRow::new("Plan C", 6),
            PlanRow::new("Plan E", 10),
        ])
    }

    #[test]
    fn test_time_horizon_is_plain_sum() {
        let q = Questionnaire::standard();
        let answers = AnswerSet::new()
            .with(QuestionId::Q1, "11 years or more")
            .with(QuestionId::Q2, "11 years or more");
        let th = Scorer::new(&q).time_horizon(&answers);
        assert_eq!(th.score, 18);
        assert_eq!(th.answers.len(), 2);
    }

    #[test]
    fn test_unknown_label_scores_zero_and_is_visible() {
        let q = Questionnaire::standard();
        let answers = AnswerSet::new()
            .with(QuestionId::Q1, "Tomorrow")
            .with(QuestionId::Q2, 3usize);
        let th = Scorer::new(&q).time_horizon(&answers);
        assert_eq!(th.score, 4);
        assert_eq!(th.answers[0].points, None);
        assert_eq!(th.answers[1].points, Some(4));

        let notices = scoring_notices(&th.answers, &answers);
        assert_eq!(notices.len(), 1);
        assert!(notices[0].contains("q1"));
    }

    #[test]
    fn test_risk_tolerance_caps_at_40() {
        let q = Questionnaire::standard();
        let table = plans();
        // 10 + 8 + 8 + 8 + 10 = 44
        let answers = AnswerSet::new()
            .with(QuestionId::Q3, "Extensive")
            .with(QuestionId::Q4, 3usize)
            .with(QuestionId::Q5, 3usize)
            .with(QuestionId::Q6, "Buy more shares")
            .with_plan("Plan E");
        let rt = Scorer::new(&q).risk_tolerance(&answers, Ok(&table));
        assert_eq!(rt.raw_score, 44);
        assert_eq!(rt.score, RISK_TOLERANCE_CAP);
        assert!(rt.capped);
    }

    #[test]
    fn test_unmatched_plan_contributes_zero() {
        let q = Questionnaire::standard();
        let table = plans();
        let answers = AnswerSet::new()
            .with(QuestionId::Q3, "Good")
            .with_plan("Plan Z");
        let rt = Scorer::new(&q).risk_tolerance(&answers, Ok(&table));
        assert_eq!(rt.score, 7);
        assert_eq!(
            rt.plan,
            PlanContribution::Unmatched {
                plan: "Plan Z".into()
            }
        );
    }

    #[test]
    fn test_unavailable_plan_table_continues() {
        let q = Questionnaire::standard();
        let issue = TableIssue::MissingColumn {
            column: "Points".into(),
        };
        let answers = AnswerSet::new().with(QuestionId::Q3, "Limited").with_plan("Plan C");
        let rt = Scorer::new(&q).risk_tolerance(&answers, Err(&issue));
        assert_eq!(rt.score, 3);
        assert!(matches!(rt.plan, PlanContribution::TableUnavailable { .. }));
    }
}

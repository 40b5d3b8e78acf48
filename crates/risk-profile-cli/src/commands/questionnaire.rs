use clap::Args;
use serde::Serialize;
use serde_json::{Map, Value};

use risk_profile_core::questionnaire::scorer::scoring_notices;
use risk_profile_core::questionnaire::{
    AnswerSet, Choice, QuestionId, Questionnaire, RiskToleranceScore, Scorer, Section,
    TimeHorizonScore,
};
use risk_profile_core::reference::{PlanTable, ReferenceData, ReferenceTable};
use risk_profile_core::resolver::SHORT_HORIZON_THRESHOLD;
use risk_profile_core::types::Points;
use risk_profile_core::{assess, TableIssue};

use crate::input;

/// Where an answer set comes from
#[derive(Args)]
pub struct AnswerArgs {
    /// Path to a JSON or YAML answer file
    #[arg(long)]
    pub answers: Option<String>,

    /// Answer to question 1 (option number or exact label)
    #[arg(long)]
    pub q1: Option<String>,

    /// Answer to question 2
    #[arg(long)]
    pub q2: Option<String>,

    /// Answer to question 3
    #[arg(long)]
    pub q3: Option<String>,

    /// Answer to question 4
    #[arg(long)]
    pub q4: Option<String>,

    /// Answer to question 5
    #[arg(long)]
    pub q5: Option<String>,

    /// Answer to question 6
    #[arg(long)]
    pub q6: Option<String>,

    /// Question 7 plan (row number or plan name). Numeric text is always a
    /// row number, so plans named with digits must be chosen by position or
    /// through --answers.
    #[arg(long)]
    pub plan: Option<String>,
}

impl AnswerArgs {
    fn flags(&self) -> [(QuestionId, &Option<String>); 6] {
        [
            (QuestionId::Q1, &self.q1),
            (QuestionId::Q2, &self.q2),
            (QuestionId::Q3, &self.q3),
            (QuestionId::Q4, &self.q4),
            (QuestionId::Q5, &self.q5),
            (QuestionId::Q6, &self.q6),
        ]
    }

    fn has_flags(&self) -> bool {
        self.plan.is_some() || self.flags().iter().any(|(_, v)| v.is_some())
    }
}

// ---------------------------------------------------------------------------
// Output shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct OptionView {
    number: usize,
    label: String,
    points: Points,
}

#[derive(Debug, Serialize)]
struct QuestionView {
    id: QuestionId,
    section: Section,
    prompt: String,
    options: Vec<OptionView>,
}

#[derive(Debug, Serialize)]
struct PlansOutput {
    table: ReferenceTable,
    available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    issue: Option<String>,
    rows: Vec<Map<String, Value>>,
}

#[derive(Debug, Serialize)]
struct QuestionsOutput {
    questions: Vec<QuestionView>,
    plans: PlansOutput,
}

#[derive(Debug, Serialize)]
struct ScoreOutput {
    time_horizon_score: Points,
    risk_tolerance_score: Points,
    /// The assessment would take the fixed allocation branch.
    short_horizon: bool,
    time_horizon: TimeHorizonScore,
    risk_tolerance: RiskToleranceScore,
    warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

pub fn run_questions(reference: &ReferenceData) -> Result<Value, Box<dyn std::error::Error>> {
    let questionnaire = Questionnaire::standard();
    let questions = questionnaire
        .questions()
        .iter()
        .map(|q| QuestionView {
            id: q.id,
            section: q.section,
            prompt: q.prompt.clone(),
            options: q
                .options
                .options()
                .iter()
                .enumerate()
                .map(|(i, o)| OptionView {
                    number: i + 1,
                    label: o.label.clone(),
                    points: o.points,
                })
                .collect(),
        })
        .collect();

    let output = QuestionsOutput {
        questions,
        plans: plans_output(reference.plans()),
    };
    Ok(serde_json::to_value(output)?)
}

pub fn run_plans(reference: &ReferenceData) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(plans_output(reference.plans()))?)
}

pub fn run_score(
    args: AnswerArgs,
    reference: &ReferenceData,
) -> Result<Value, Box<dyn std::error::Error>> {
    let answers = get_answers(&args)?;
    let questionnaire = Questionnaire::standard();
    let scorer = Scorer::new(&questionnaire);

    let time_horizon = scorer.time_horizon(&answers);
    let risk_tolerance = scorer.risk_tolerance(&answers, reference.plans());

    let mut warnings = scoring_notices(&time_horizon.answers, &answers);
    warnings.extend(scoring_notices(&risk_tolerance.answers, &answers));

    let output = ScoreOutput {
        time_horizon_score: time_horizon.score,
        risk_tolerance_score: risk_tolerance.score,
        short_horizon: time_horizon.score < SHORT_HORIZON_THRESHOLD,
        time_horizon,
        risk_tolerance,
        warnings,
    };
    Ok(serde_json::to_value(output)?)
}

pub fn run_assess(
    args: AnswerArgs,
    reference: &ReferenceData,
) -> Result<Value, Box<dyn std::error::Error>> {
    let answers = get_answers(&args)?;
    let output = assess(&Questionnaire::standard(), &answers, reference);
    Ok(serde_json::to_value(output)?)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// File or piped input first, then individual flags on top.
fn get_answers(args: &AnswerArgs) -> Result<AnswerSet, Box<dyn std::error::Error>> {
    let mut answers = if let Some(ref path) = args.answers {
        input::file::read_structured::<AnswerSet>(path)?
    } else if args.has_flags() {
        AnswerSet::new()
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err(
            "No answers provided. Use --answers <file>, --q1..--q6/--plan, or pipe JSON via stdin"
                .into(),
        );
    };

    apply_flags(&mut answers, args);
    Ok(answers)
}

fn apply_flags(answers: &mut AnswerSet, args: &AnswerArgs) {
    for (id, value) in args.flags() {
        if let Some(raw) = value {
            answers.answers.insert(id, Choice::parse(raw));
        }
    }
    if let Some(ref raw) = args.plan {
        answers.plan = Some(Choice::parse(raw));
    }
}

fn plans_output(plans: Result<&PlanTable, &TableIssue>) -> PlansOutput {
    match plans {
        Ok(table) => PlansOutput {
            table: ReferenceTable::Plans,
            available: true,
            issue: None,
            rows: table
                .rows()
                .iter()
                .map(|row| {
                    let mut map = Map::new();
                    map.insert("plan".into(), Value::String(row.plan.clone()));
                    map.insert("points".into(), Value::from(row.points));
                    for detail in &row.details {
                        map.insert(detail.column.clone(), Value::String(detail.value.clone()));
                    }
                    map
                })
                .collect(),
        },
        Err(issue) => PlansOutput {
            table: ReferenceTable::Plans,
            available: false,
            issue: Some(issue.to_string()),
            rows: Vec::new(),
        },
    }
}

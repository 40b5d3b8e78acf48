use std::io::{self, BufRead, Write};

use tabled::{builder::Builder, Table};
use tracing::debug;

use risk_profile_core::composition::WeightEntry;
use risk_profile_core::questionnaire::{
    AnswerSet, Choice, Questionnaire, Scorer, Section, RISK_TOLERANCE_CAP,
};
use risk_profile_core::reference::{PlanTable, ReferenceData, ReturnStats};
use risk_profile_core::resolver::SHORT_HORIZON_THRESHOLD;
use risk_profile_core::{
    assess, Assessment, AssessmentOutcome, AssetClass, ComputationOutput, TableIssue,
};

use crate::input::prompt::Prompter;
use crate::output::chart::render_bar_chart;

const INTRO: &str = "\
INVESTOR PROFILE QUESTIONNAIRE

Your investing strategy should reflect the kind of investor you are: your
personal investor profile. This quiz will help you determine your profile and
then match it to an investment strategy designed for investors like you. It
measures two key factors.

YOUR TIME HORIZON
When will you begin withdrawing money from your account and at what rate? If
it is many years away, there may be more time to weather the market's
inevitable ups and downs, and you may be comfortable with a portfolio that has
a greater potential for appreciation and a higher level of risk.

YOUR RISK TOLERANCE
How do you feel about risk? Some investments fluctuate more dramatically in
value than others but may have the potential for higher returns. It is
important to select investments that fit within your level of tolerance for
this risk.

Press Enter to accept the first (marked) option.";

const PLAN_PROMPT: &str = "\
We've outlined the most likely best-case and worst-case annual returns of five
hypothetical investment plans. Which range of possible outcomes is most
acceptable to you? The figures are hypothetical and do not represent the
performance of any particular investment.";

/// Run questionnaire sessions on the terminal until the user stops.
pub fn run_interactive(reference: &ReferenceData) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());
    let sessions = run_sessions(&mut prompter, reference)?;
    debug!(sessions, "interactive mode finished");
    Ok(())
}

/// Returns the number of completed sessions.
fn run_sessions<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    reference: &ReferenceData,
) -> io::Result<usize> {
    let questionnaire = Questionnaire::standard();
    let mut sessions = 0;
    loop {
        run_session(prompter, &questionnaire, reference)?;
        sessions += 1;

        writeln!(prompter.writer())?;
        if !prompter.confirm("Start another questionnaire?", false)? {
            return Ok(sessions);
        }
    }
}

/// One pass through the questionnaire, ending with the presented result.
pub fn run_session<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    questionnaire: &Questionnaire,
    reference: &ReferenceData,
) -> io::Result<ComputationOutput<Assessment>> {
    writeln!(prompter.writer(), "{}", INTRO)?;
    let mut answers = AnswerSet::new();

    writeln!(prompter.writer(), "\n--- Time horizon ---")?;
    ask_section(prompter, questionnaire, Section::TimeHorizon, &mut answers)?;
    let time_horizon = Scorer::new(questionnaire).time_horizon(&answers).score;
    writeln!(prompter.writer(), "\nTime horizon score: {}", time_horizon)?;

    if time_horizon >= SHORT_HORIZON_THRESHOLD {
        writeln!(prompter.writer(), "\n--- Risk tolerance ---")?;
        ask_section(prompter, questionnaire, Section::RiskTolerance, &mut answers)?;
        ask_plan(prompter, reference.plans(), &mut answers)?;
    }

    let output = assess(questionnaire, &answers, reference);
    if let Some(risk) = &output.result.risk_tolerance {
        if risk.capped {
            writeln!(
                prompter.writer(),
                "\nRisk tolerance score: {} (capped at {}; raw score {})",
                risk.score,
                RISK_TOLERANCE_CAP,
                risk.raw_score
            )?;
        } else {
            writeln!(prompter.writer(), "\nRisk tolerance score: {}", risk.score)?;
        }
    }

    present(prompter.writer(), &output.result)?;
    Ok(output)
}

fn ask_section<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    questionnaire: &Questionnaire,
    section: Section,
    answers: &mut AnswerSet,
) -> io::Result<()> {
    for question in questionnaire.section(section) {
        let labels: Vec<&str> = question
            .options
            .options()
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        let prompt = format!("{}. {}", question.id.number(), question.prompt);
        let idx = prompter.choose(&prompt, &labels)?;
        answers.answers.insert(question.id, Choice::Index(idx + 1));
    }
    Ok(())
}

fn ask_plan<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    plans: Result<&PlanTable, &TableIssue>,
    answers: &mut AnswerSet,
) -> io::Result<()> {
    match plans {
        Ok(table) if !table.is_empty() => {
            writeln!(prompter.writer(), "\n7. {}\n", PLAN_PROMPT)?;
            writeln!(prompter.writer(), "{}", plan_table(table))?;
            let names: Vec<&str> = table.rows().iter().map(|r| r.plan.as_str()).collect();
            let idx = prompter.choose("Which plan is most acceptable to you?", &names)?;
            answers.plan = Some(Choice::Index(idx + 1));
        }
        _ => writeln!(
            prompter.writer(),
            "\nQuestion 7 table is unavailable; scoring continues without it."
        )?,
    }
    Ok(())
}

/// The plan rows with their descriptive columns; points stay hidden.
fn plan_table(table: &PlanTable) -> Table {
    let mut builder = Builder::default();
    let mut header = vec!["Plan".to_string()];
    if let Some(first) = table.rows().first() {
        header.extend(first.details.iter().map(|d| d.column.clone()));
    }
    builder.push_record(header);
    for row in table.rows() {
        let mut record = vec![row.plan.clone()];
        record.extend(row.details.iter().map(|d| d.value.clone()));
        builder.push_record(record);
    }
    builder.build()
}

// ---------------------------------------------------------------------------
// Presenter
// ---------------------------------------------------------------------------

fn present<W: Write>(out: &mut W, assessment: &Assessment) -> io::Result<()> {
    match &assessment.outcome {
        AssessmentOutcome::ShortHorizon {
            allocation,
            composition,
        } => {
            writeln!(out, "\n{}", allocation.note)?;
            write_composition(out, composition)?;
        }
        AssessmentOutcome::Recommended {
            portfolio,
            composition,
        } => {
            let name = portfolio.display_name();
            writeln!(out, "\n=== {} ===", name)?;
            if let Some(description) = &portfolio.investor_type {
                writeln!(out, "\n{} profile: {}", name, description)?;
            }
            if let Some(returns) = &portfolio.returns {
                writeln!(out, "\n{}", returns_table(returns))?;
            }
            if !composition.is_empty() {
                writeln!(
                    out,
                    "\nBased on your risk profile ({}), the suggested portfolio is:",
                    name
                )?;
                write_composition(out, composition)?;

                writeln!(out, "\nDefinitions:")?;
                for class in AssetClass::ALL {
                    writeln!(out, "  - {}: {}", class.label(), class.definition())?;
                }
            }
        }
        AssessmentOutcome::Unavailable { message } => {
            writeln!(out, "\n{}", message)?;
        }
    }
    Ok(())
}

fn returns_table(returns: &ReturnStats) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["", "Return %"]);
    for row in returns.rows() {
        let value = match row.value {
            Some(v) => format!("{:.1} %", v),
            None => "-".to_string(),
        };
        builder.push_record([row.label, value]);
    }
    builder.build()
}

fn write_composition<W: Write>(out: &mut W, composition: &[WeightEntry]) -> io::Result<()> {
    let mut builder = Builder::default();
    builder.push_record(["Asset class", "Weight"]);
    for entry in composition {
        builder.push_record([entry.asset_class.clone(), format!("{}%", entry.weight)]);
    }
    writeln!(out, "\n{}\n", builder.build())?;

    let rows: Vec<(String, u32)> = composition
        .iter()
        .map(|e| (e.asset_class.clone(), e.weight))
        .collect();
    write!(out, "{}", render_bar_chart(&rows))
}

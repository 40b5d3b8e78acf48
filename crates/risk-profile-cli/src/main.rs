mod commands;
mod config;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;

use risk_profile_core::reference::ReferenceData;
use tracing::{debug, warn};

use commands::questionnaire::AnswerArgs;
use commands::resolve::ResolveArgs;

/// Investor risk profile questionnaire
#[derive(Parser)]
#[command(
    name = "riskprofile",
    version,
    about = "Investor risk profile questionnaire",
    long_about = "Scores a short investor questionnaire into a time-horizon score and a \
                  risk-tolerance score, then maps the pair to a portfolio type using the \
                  reference tables in the data directory (question_7.csv, \
                  Risk_profile_matrix.csv, Portfolio_type.csv)."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Directory holding the reference CSV files (overrides RISK_PROFILE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer the questionnaire step by step in the terminal
    Interactive,
    /// List the questions, their options and points, and the plan table
    Questions,
    /// List the question 7 plan table
    Plans,
    /// Score an answer set without resolving a portfolio
    Score(AnswerArgs),
    /// Score an answer set and recommend a portfolio
    Assess(AnswerArgs),
    /// Look up the portfolio for a pair of scores
    Resolve(ResolveArgs),
    /// Check that every achievable score pair maps to a known portfolio
    CheckData,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let config = match config::AppConfig::load() {
        Ok(config) => config.with_data_dir(cli.data_dir.clone()),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };
    if let Err(e) = telemetry::init(&config.telemetry) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let load_reference = || {
        debug!(data_dir = %config.data_dir.display(), "loading reference data");
        ReferenceData::load_dir(&config.data_dir)
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Interactive => {
            if let Err(e) = commands::interactive::run_interactive(&load_reference()) {
                eprintln!("{}: {}", "error".red().bold(), e);
                process::exit(1);
            }
            return;
        }
        Commands::Questions => commands::questionnaire::run_questions(&load_reference()),
        Commands::Plans => commands::questionnaire::run_plans(&load_reference()),
        Commands::Score(args) => commands::questionnaire::run_score(args, &load_reference()),
        Commands::Assess(args) => commands::questionnaire::run_assess(args, &load_reference()),
        Commands::Resolve(args) => commands::resolve::run_resolve(args, &load_reference()),
        Commands::CheckData => {
            commands::audit::run_check_data(&load_reference(), &config.data_dir)
        }
        Commands::Version => {
            println!("riskprofile {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            warn!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

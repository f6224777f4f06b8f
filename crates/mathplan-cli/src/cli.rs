use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mathplan",
    version,
    about = "Math placement eligibility and next-step advising",
    long_about = "Evaluate student records against the course catalog, recommend the \
                  next placement step for their majors, and walk the self-assessment \
                  questionnaire."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(flatten)]
    pub color: Color,

    /// Override log level (error, warn, info, debug, trace).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Directory holding catalog.toml and majors.toml (default: compiled-in policy).
    #[arg(long = "policy-dir", value_name = "DIR", global = true)]
    pub policy_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate a student record and recommend the next step.
    Evaluate(EvaluateArgs),
    /// Show the self-assessment question or recommendation for an answer path.
    Assess(AssessArgs),
    /// List majors and their math requirements.
    Majors,
    /// List every path through the self-assessment questionnaire.
    Paths,
    /// Load and validate the policy, then report counts.
    Check,
}

#[derive(Args)]
pub struct EvaluateArgs {
    /// Student record as JSON.
    #[arg(value_name = "RECORD")]
    pub record: PathBuf,

    /// Print the result as JSON instead of tables.
    #[arg(long)]
    pub json: bool,

    /// Only count requirements scheduled in the first semester.
    #[arg(long = "first-semester")]
    pub first_semester: bool,

    /// Lowest passing grade on completed courses (default: C).
    #[arg(long = "passing-grade", value_name = "GRADE")]
    pub passing_grade: Option<String>,
}

#[derive(Args)]
pub struct AssessArgs {
    /// Answers so far, one letter each: Y, N or X (unsure). Empty for the first question.
    #[arg(value_name = "PATH", default_value = "")]
    pub path: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

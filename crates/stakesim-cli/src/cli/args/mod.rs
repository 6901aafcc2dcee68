use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod common;
pub use common::*;

#[derive(Parser)]
#[command(
    name = "stakesim",
    version,
    about = "Rubric-driven grading for simulated stakeholder conversations"
)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the evaluation prompt for a conversation without calling a provider
    Prompt(PromptArgs),
    /// Grade a completed conversation
    Grade(GradeArgs),
    /// Apply an instructor override to a stored grade
    Override(OverrideArgs),
    /// List low-confidence AI grades awaiting instructor review
    Review(ReviewArgs),
    /// Check a rubric file
    ValidateRubric(ValidateRubricArgs),
    Version,
}

#[derive(clap::Args, Debug)]
pub struct PromptArgs {
    #[command(flatten)]
    pub input: GradingInputArgs,

    /// Print only the sha256 digest of the prompt
    #[arg(long)]
    pub digest: bool,
}

#[derive(clap::Args, Debug)]
pub struct GradeArgs {
    #[command(flatten)]
    pub input: GradingInputArgs,

    #[command(flatten)]
    pub provider: ProviderArgs,

    /// Write the full grade record (JSON) here; the report goes to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct OverrideArgs {
    /// Grade record produced by `stakesim grade --output`
    #[arg(short, long)]
    pub grade: PathBuf,

    /// Rubric the grade was produced against (YAML)
    #[arg(short, long)]
    pub rubric: PathBuf,

    /// New score as name=value; repeatable
    #[arg(short = 's', long = "score", value_name = "NAME=VALUE", required = true)]
    pub scores: Vec<String>,

    /// Justification recorded on the grade (min 10 characters)
    #[arg(long)]
    pub reason: String,

    /// Where to write the updated grade (default: overwrite --grade)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ReviewArgs {
    /// Grade record files (JSON)
    #[arg(required = true)]
    pub grades: Vec<PathBuf>,

    /// Maximum number of entries
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(clap::Args, Debug)]
pub struct ValidateRubricArgs {
    /// Rubric file (YAML)
    pub rubric: PathBuf,

    /// Also print the rubric as rendered into the prompt
    #[arg(long)]
    pub render: bool,
}

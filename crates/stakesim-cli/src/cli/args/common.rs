//! Argument groups shared by several commands.

use std::path::PathBuf;

#[derive(clap::Args, Clone, Debug)]
pub struct GradingInputArgs {
    /// Rubric file (YAML)
    #[arg(short, long)]
    pub rubric: PathBuf,

    /// Stakeholder persona file (YAML)
    #[arg(short, long)]
    pub persona: PathBuf,

    /// Conversation file (JSON)
    #[arg(short, long)]
    pub conversation: PathBuf,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct ProviderArgs {
    /// Grading config file (YAML); env vars and flags override it
    #[arg(long, env = "STAKESIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Evaluation provider
    /// - anthropic: live calls to the Anthropic Messages API
    /// - fake: canned reply from --fake-response (tests/dev)
    #[arg(long)]
    pub provider: Option<String>,

    /// Model identifier (provider-specific)
    #[arg(long)]
    pub model: Option<String>,

    /// File holding the canned evaluator reply for the fake provider
    #[arg(long)]
    pub fake_response: Option<PathBuf>,
}

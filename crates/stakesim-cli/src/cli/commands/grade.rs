//! CLI command: stakesim grade
//!
//! Usage:
//!   stakesim grade -r rubric.yaml -p persona.yaml -c conversation.json [-o grade.json]
//!
//! Prints a grade report (JSON) on stdout. With `--output`, the full grade
//! record is also written for later `override` and `review` runs.

use anyhow::Result;
use stakesim_core::config::{load_config, GradingConfig};
use stakesim_core::providers::llm::build_client;
use stakesim_core::{GradeReport, GradingEngine};
use tracing::info;

use super::super::args::{GradeArgs, ProviderArgs};
use super::super::helpers::{
    grading_failure, load_conversation, load_persona, load_rubric, load_text, print_json,
    write_json,
};
use crate::exit_codes::SUCCESS;

/// File config, then env, then flags.
pub(crate) fn resolve_config(args: &ProviderArgs) -> Result<GradingConfig> {
    let mut cfg = match &args.config {
        Some(path) => load_config(path)?,
        None => GradingConfig::default(),
    }
    .with_env_overrides();

    if let Some(provider) = &args.provider {
        cfg = cfg.with_provider(provider.as_str());
    }
    if let Some(model) = &args.model {
        cfg = cfg.with_model(model.as_str());
    }
    if let Some(path) = &args.fake_response {
        cfg = cfg.with_fake_response(load_text(path)?);
    }
    cfg.validate()?;
    Ok(cfg)
}

pub async fn run(args: GradeArgs) -> Result<i32> {
    let rubric = load_rubric(&args.input.rubric)?;
    let persona = load_persona(&args.input.persona)?;
    let conversation = load_conversation(&args.input.conversation)?;

    let cfg = match resolve_config(&args.provider) {
        Ok(cfg) => cfg,
        Err(e) => match e.downcast_ref::<stakesim_core::GradingError>() {
            Some(ge) => return Ok(grading_failure(ge)),
            None => return Err(e),
        },
    };

    let client = match build_client(&cfg) {
        Ok(c) => c,
        Err(e) => return Ok(grading_failure(&e)),
    };
    let engine = GradingEngine::new(cfg, client);

    let grade = match engine.grade(&rubric, &persona, &conversation).await {
        Ok(g) => g,
        Err(e) => return Ok(grading_failure(&e)),
    };

    info!(
        grade_id = %grade.id,
        total_score = %grade.total_score,
        needs_review = grade.needs_review(),
        "conversation graded"
    );

    if let Some(path) = &args.output {
        write_json(path, &grade)?;
    }
    print_json(&GradeReport::new(&grade, &rubric))?;
    Ok(SUCCESS)
}

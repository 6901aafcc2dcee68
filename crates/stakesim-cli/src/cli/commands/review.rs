//! CLI command: stakesim review
//!
//! Scan stored grade records and list the AI grades an instructor should
//! look at, newest first.

use anyhow::Result;
use stakesim_core::needs_review_queue;

use super::super::args::ReviewArgs;
use super::super::helpers::{load_grade, print_json};
use crate::exit_codes::SUCCESS;

pub fn run(args: ReviewArgs) -> Result<i32> {
    let grades = args
        .grades
        .iter()
        .map(|p| load_grade(p))
        .collect::<Result<Vec<_>>>()?;

    let queue = needs_review_queue(&grades, args.limit);
    tracing::info!(scanned = grades.len(), queued = queue.len(), "review queue built");
    print_json(&queue)?;
    Ok(SUCCESS)
}

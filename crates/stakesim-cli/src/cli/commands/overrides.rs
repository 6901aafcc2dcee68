//! CLI command: stakesim override
//!
//! Usage:
//!   stakesim override -g grade.json -r rubric.yaml -s clarity=20 --reason "..."

use anyhow::Result;
use stakesim_core::{apply_override, GradeReport, OverrideRequest};

use super::super::args::OverrideArgs;
use super::super::helpers::{
    grading_failure, load_grade, load_rubric, parse_score_pairs, print_json, write_json,
};
use crate::exit_codes::SUCCESS;

pub fn run(args: OverrideArgs) -> Result<i32> {
    let mut grade = load_grade(&args.grade)?;
    let rubric = load_rubric(&args.rubric)?;

    if grade.rubric_id != rubric.id {
        tracing::warn!(
            grade_rubric = %grade.rubric_id,
            rubric = %rubric.id,
            "grade was produced against a different rubric id"
        );
    }

    let request = OverrideRequest {
        criteria_scores: parse_score_pairs(&args.scores)?,
        reason: args.reason,
    };

    if let Err(e) = request.validate() {
        return Ok(grading_failure(&e));
    }
    if let Err(e) = apply_override(&mut grade, &rubric, &request) {
        return Ok(grading_failure(&e));
    }

    let out = args.output.as_deref().unwrap_or(&args.grade);
    write_json(out, &grade)?;
    print_json(&GradeReport::new(&grade, &rubric))?;
    Ok(SUCCESS)
}

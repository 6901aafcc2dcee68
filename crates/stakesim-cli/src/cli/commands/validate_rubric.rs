use anyhow::Result;

use super::super::args::ValidateRubricArgs;
use super::super::helpers::{grading_failure, load_rubric};
use crate::exit_codes::SUCCESS;

pub fn run(args: ValidateRubricArgs) -> Result<i32> {
    let rubric = load_rubric(&args.rubric)?;
    if let Err(e) = rubric.validate() {
        return Ok(grading_failure(&e));
    }

    println!(
        "ok: '{}' ({} criteria, {} points)",
        rubric.name,
        rubric.criteria.len(),
        rubric.total_points()
    );
    if args.render {
        println!("{}", rubric.to_prompt_text());
    }
    Ok(SUCCESS)
}

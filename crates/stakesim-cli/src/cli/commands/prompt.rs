//! CLI command: stakesim prompt
//!
//! Render the evaluation prompt exactly as it would be sent, without a
//! provider call. Useful for reviewing rubric wording and for pinning a
//! grading run by digest.

use anyhow::Result;
use stakesim_core::grading::{build_grading_prompt, prompt_digest};

use super::super::args::PromptArgs;
use super::super::helpers::{grading_failure, load_conversation, load_persona, load_rubric};
use crate::exit_codes::SUCCESS;

pub fn run(args: PromptArgs) -> Result<i32> {
    let rubric = load_rubric(&args.input.rubric)?;
    let persona = load_persona(&args.input.persona)?;
    let conversation = load_conversation(&args.input.conversation)?;

    if let Err(e) = rubric.validate() {
        return Ok(grading_failure(&e));
    }

    let prompt = build_grading_prompt(&rubric, &persona, &conversation);
    if args.digest {
        println!("{}", prompt_digest(&prompt));
    } else {
        println!("{}", prompt);
    }
    Ok(SUCCESS)
}

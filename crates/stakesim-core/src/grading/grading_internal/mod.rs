//! Grading pipeline internals.
//!
//! - prompt.rs: prompt template + output schema only
//! - parse.rs: raw evaluator text -> `ParsedGrade`
//! - assemble.rs: `ParsedGrade` -> `Grade`
//! - run.rs: evaluate flow (gradability, call, parse)

pub(crate) mod assemble;
pub(crate) mod parse;
pub(crate) mod prompt;
pub(crate) mod run;

//! Process exit codes for `stakesim`.
//! Grading failures reuse `GradingError::exit_code`; these cover the rest.

pub const SUCCESS: i32 = 0;
pub const INVALID_INPUT: i32 = 1; // Bad rubric, persona, override or ungradable conversation
pub const INTERNAL_ERROR: i32 = 2; // I/O or unreadable input files
pub const SCORE_REJECTED: i32 = 3; // Unknown criterion or out-of-range score
pub const BAD_EVALUATOR_OUTPUT: i32 = 4; // Evaluator reply malformed or incomplete
pub const PROVIDER_FAILED: i32 = 5; // Evaluation call failed

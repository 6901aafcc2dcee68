pub mod grade;
pub mod overrides;
pub mod prompt;
pub mod review;
pub mod validate_rubric;

mod dispatch;
pub use dispatch::dispatch;

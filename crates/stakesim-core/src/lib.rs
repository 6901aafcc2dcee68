//! Grading pipeline for simulated stakeholder conversations.
//!
//! The crate turns a completed role-play conversation into an auditable grade:
//!
//! - rubric model and rendering ([`rubric`])
//! - transcript formatting ([`conversation`])
//! - deterministic evaluation prompt + strict response parsing ([`grading`])
//! - grade entity, review flag and report views ([`grade`])
//! - instructor overrides ([`overrides`])
//! - LLM provider seam ([`providers::llm`])
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use stakesim_core::config::GradingConfig;
//! use stakesim_core::conversation::{Conversation, Persona};
//! use stakesim_core::grading::GradingEngine;
//! use stakesim_core::providers::llm::build_client;
//! use stakesim_core::rubric::Rubric;
//!
//! # async fn example(rubric: Rubric, persona: Persona, conversation: Conversation) -> anyhow::Result<()> {
//! let config = GradingConfig::from_env();
//! let client = build_client(&config)?;
//! let engine = GradingEngine::new(config, client);
//!
//! let grade = engine.grade(&rubric, &persona, &conversation).await?;
//! if grade.needs_review() {
//!     println!("grade {} needs instructor review", grade.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod conversation;
pub mod errors;
pub mod grade;
pub mod grading;
pub mod model;
pub mod overrides;
pub mod providers;
pub mod rubric;

pub use config::GradingConfig;
pub use conversation::{Conversation, ConversationStatus, Persona, Role, Turn};
pub use errors::{GradingError, GradingResult};
pub use grade::{needs_review_queue, CriterionScore, Grade, GradeReport, GradeSummary, GradedBy};
pub use grading::{GradingEngine, ParsedGrade};
pub use overrides::{apply_override, OverrideRequest};
pub use rubric::{Criterion, Rubric};

mod grading_internal;
pub mod validate;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::GradingConfig;
use crate::conversation::{Conversation, Persona};
use crate::errors::GradingResult;
use crate::grade::{CriterionScore, Grade};
use crate::providers::llm::LlmClient;
use crate::rubric::Rubric;

pub use validate::validate_scores;

/// Evaluator output after fence stripping and required-field checks.
///
/// No bound checks have been applied yet; see [`GradingEngine::create_grade_record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedGrade {
    pub criteria_scores: BTreeMap<String, CriterionScore>,
    pub total_score: Decimal,
    pub overall_feedback: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    /// Key is mandatory; an explicit `null` means the evaluator gave no value.
    pub confidence: Option<Decimal>,
}

/// Grades conversations through an injected evaluation client.
#[derive(Clone)]
pub struct GradingEngine {
    config: GradingConfig,
    client: Arc<dyn LlmClient>,
}

impl GradingEngine {
    pub fn new(config: GradingConfig, client: Arc<dyn LlmClient>) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    pub fn build_prompt(
        &self,
        rubric: &Rubric,
        persona: &Persona,
        conversation: &Conversation,
    ) -> String {
        build_grading_prompt(rubric, persona, conversation)
    }

    /// Gradability check, one evaluation call, strict parse.
    pub async fn evaluate(
        &self,
        rubric: &Rubric,
        persona: &Persona,
        conversation: &Conversation,
    ) -> GradingResult<ParsedGrade> {
        grading_internal::run::evaluate_impl(self, rubric, persona, conversation).await
    }

    /// Validate parsed data against the rubric and build an AI-provenance grade.
    pub fn create_grade_record(
        &self,
        conversation_id: Uuid,
        rubric: &Rubric,
        parsed: ParsedGrade,
    ) -> GradingResult<Grade> {
        assemble_grade(conversation_id, rubric, parsed)
    }

    /// [`evaluate`](Self::evaluate) then [`create_grade_record`](Self::create_grade_record).
    pub async fn grade(
        &self,
        rubric: &Rubric,
        persona: &Persona,
        conversation: &Conversation,
    ) -> GradingResult<Grade> {
        let parsed = self.evaluate(rubric, persona, conversation).await?;
        self.create_grade_record(conversation.id, rubric, parsed)
    }
}

/// Deterministic evaluation prompt for one conversation.
pub fn build_grading_prompt(
    rubric: &Rubric,
    persona: &Persona,
    conversation: &Conversation,
) -> String {
    grading_internal::prompt::build_grading_prompt_impl(rubric, persona, conversation)
}

/// `sha256:<hex>` digest of a prompt, for correlating or caching runs.
pub fn prompt_digest(prompt: &str) -> String {
    grading_internal::prompt::prompt_digest_impl(prompt)
}

/// Parse raw evaluator output.
pub fn parse_grade_response(raw: &str) -> GradingResult<ParsedGrade> {
    grading_internal::parse::parse_grade_response_impl(raw)
}

/// Build a grade from parsed evaluator output, stamped now.
pub fn assemble_grade(
    conversation_id: Uuid,
    rubric: &Rubric,
    parsed: ParsedGrade,
) -> GradingResult<Grade> {
    grading_internal::assemble::create_grade_record_impl(conversation_id, rubric, parsed, Utc::now())
}

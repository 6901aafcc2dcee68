//! Grade entity and read-side projections.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rubric::Rubric;

/// Confidence below this (or absent) flags a grade for instructor review.
pub const REVIEW_CONFIDENCE_THRESHOLD: Decimal = Decimal::from_parts(70, 0, 0, false, 2);

/// Provenance of the current scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradedBy {
    Ai,
    Instructor,
}

/// Score for a single rubric criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub score: Decimal,
    pub max_score: Decimal,
    #[serde(default)]
    pub evidence: String,
    #[serde(default)]
    pub feedback: String,
}

/// Outcome of evaluating one conversation against one rubric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub rubric_id: Uuid,

    /// Keyed by rubric criterion `name`.
    pub criteria_scores: BTreeMap<String, CriterionScore>,

    /// Sum of scores as of the last scoring event; not re-derived on read.
    pub total_score: Decimal,

    pub overall_feedback: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,

    #[serde(default)]
    pub ai_confidence: Option<Decimal>,

    pub graded_by: GradedBy,

    #[serde(default)]
    pub instructor_override: bool,

    #[serde(default)]
    pub override_reason: Option<String>,

    pub graded_at: DateTime<Utc>,
}

impl Grade {
    /// True when the AI confidence is absent or below [`REVIEW_CONFIDENCE_THRESHOLD`].
    pub fn needs_review(&self) -> bool {
        match self.ai_confidence {
            None => true,
            Some(c) => c < REVIEW_CONFIDENCE_THRESHOLD,
        }
    }

    /// Sum of the current per-criterion scores.
    pub fn criteria_total(&self) -> Decimal {
        self.criteria_scores.values().map(|c| c.score).sum()
    }
}

/// Full grade view, including the rubric's possible total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeReport {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub rubric_id: Uuid,
    pub criteria_scores: BTreeMap<String, CriterionScore>,
    pub total_score: Decimal,
    pub max_score: u32,
    pub overall_feedback: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub ai_confidence: Option<Decimal>,
    pub graded_by: GradedBy,
    pub instructor_override: bool,
    pub override_reason: Option<String>,
    pub graded_at: DateTime<Utc>,
    pub needs_review: bool,
}

impl GradeReport {
    pub fn new(grade: &Grade, rubric: &Rubric) -> Self {
        Self {
            id: grade.id,
            conversation_id: grade.conversation_id,
            rubric_id: grade.rubric_id,
            criteria_scores: grade.criteria_scores.clone(),
            total_score: grade.total_score,
            max_score: rubric.total_points(),
            overall_feedback: grade.overall_feedback.clone(),
            strengths: grade.strengths.clone(),
            areas_for_improvement: grade.areas_for_improvement.clone(),
            ai_confidence: grade.ai_confidence,
            graded_by: grade.graded_by,
            instructor_override: grade.instructor_override,
            override_reason: grade.override_reason.clone(),
            graded_at: grade.graded_at,
            needs_review: grade.needs_review(),
        }
    }
}

/// Brief grade view for list output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeSummary {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub total_score: Decimal,
    pub graded_by: GradedBy,
    pub graded_at: DateTime<Utc>,
    pub needs_review: bool,
}

impl From<&Grade> for GradeSummary {
    fn from(grade: &Grade) -> Self {
        Self {
            id: grade.id,
            conversation_id: grade.conversation_id,
            total_score: grade.total_score,
            graded_by: grade.graded_by,
            graded_at: grade.graded_at,
            needs_review: grade.needs_review(),
        }
    }
}

/// Low-confidence AI grades not yet overridden, newest first.
///
/// Grades without any confidence value are left out here even though
/// [`Grade::needs_review`] reports them; the queue tracks scored-but-unsure
/// evaluations only.
pub fn needs_review_queue<'a, I>(grades: I, limit: usize) -> Vec<GradeSummary>
where
    I: IntoIterator<Item = &'a Grade>,
{
    let mut queue: Vec<&Grade> = grades
        .into_iter()
        .filter(|g| !g.instructor_override)
        .filter(|g| matches!(g.ai_confidence, Some(c) if c < REVIEW_CONFIDENCE_THRESHOLD))
        .collect();
    queue.sort_by(|a, b| b.graded_at.cmp(&a.graded_at).then_with(|| a.id.cmp(&b.id)));
    queue.into_iter().take(limit).map(GradeSummary::from).collect()
}

//! Instructor overrides of AI-assigned scores.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{GradingError, GradingResult};
use crate::grade::{CriterionScore, Grade, GradedBy};
use crate::grading::validate_scores;
use crate::rubric::Rubric;

const MIN_REASON_CHARS: usize = 10;
const OVERRIDE_EVIDENCE: &str = "Instructor override";
const OVERRIDE_FEEDBACK: &str = "Score adjusted by instructor";

/// New scores for some criteria plus the instructor's justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRequest {
    pub criteria_scores: BTreeMap<String, Decimal>,
    pub reason: String,
}

impl OverrideRequest {
    pub fn single(name: impl Into<String>, score: Decimal, reason: impl Into<String>) -> Self {
        let mut criteria_scores = BTreeMap::new();
        criteria_scores.insert(name.into(), score);
        Self {
            criteria_scores,
            reason: reason.into(),
        }
    }

    /// Caller-facing shape checks: a non-empty score map and a reason of at
    /// least ten characters. [`apply_override`] does not call this.
    pub fn validate(&self) -> GradingResult<()> {
        if self.criteria_scores.is_empty() {
            return Err(GradingError::InvalidOverride {
                message: "override must change at least one criterion".to_string(),
            });
        }
        if self.reason.trim().chars().count() < MIN_REASON_CHARS {
            return Err(GradingError::InvalidOverride {
                message: format!(
                    "override reason must be at least {} characters",
                    MIN_REASON_CHARS
                ),
            });
        }
        Ok(())
    }
}

/// Apply an instructor override, stamped now.
pub fn apply_override(
    grade: &mut Grade,
    rubric: &Rubric,
    request: &OverrideRequest,
) -> GradingResult<()> {
    apply_override_at(grade, rubric, request, Utc::now())
}

/// Apply an instructor override at a fixed time.
///
/// Every entry is validated against the rubric before the grade is touched;
/// on error the grade is unchanged. The reason is recorded as given.
/// Criteria already scored keep their evidence and feedback. The total is
/// recomputed over all criteria, not only the changed ones.
pub fn apply_override_at(
    grade: &mut Grade,
    rubric: &Rubric,
    request: &OverrideRequest,
    now: DateTime<Utc>,
) -> GradingResult<()> {
    validate_scores(rubric, &request.criteria_scores)?;

    for (name, score) in &request.criteria_scores {
        match grade.criteria_scores.get_mut(name) {
            Some(existing) => existing.score = *score,
            None => {
                // validate_scores guarantees the criterion exists.
                let max_points = rubric.criterion(name).map(|c| c.max_points).unwrap_or(0);
                grade.criteria_scores.insert(
                    name.clone(),
                    CriterionScore {
                        score: *score,
                        max_score: Decimal::from(max_points),
                        evidence: OVERRIDE_EVIDENCE.to_string(),
                        feedback: OVERRIDE_FEEDBACK.to_string(),
                    },
                );
            }
        }
    }

    grade.total_score = grade.criteria_total();
    grade.instructor_override = true;
    grade.graded_by = GradedBy::Instructor;
    grade.override_reason = Some(request.reason.clone());
    grade.graded_at = now;

    info!(
        grade_id = %grade.id,
        criteria = request.criteria_scores.len(),
        total_score = %grade.total_score,
        "instructor override applied"
    );
    Ok(())
}

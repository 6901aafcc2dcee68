use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::errors::{GradingError, GradingResult};
use crate::grade::{Grade, GradedBy};
use crate::grading::validate::validate_scores;
use crate::grading::ParsedGrade;
use crate::rubric::Rubric;

/// Build an AI-provenance grade. Each stored `max_score` is the rubric's
/// `max_points`; the evaluator's echoed value is not trusted.
pub(crate) fn create_grade_record_impl(
    conversation_id: Uuid,
    rubric: &Rubric,
    mut parsed: ParsedGrade,
    now: DateTime<Utc>,
) -> GradingResult<Grade> {
    let scores: BTreeMap<String, Decimal> = parsed
        .criteria_scores
        .iter()
        .map(|(name, s)| (name.clone(), s.score))
        .collect();
    validate_scores(rubric, &scores)?;

    for (name, entry) in parsed.criteria_scores.iter_mut() {
        if let Some(criterion) = rubric.criterion(name) {
            let max = Decimal::from(criterion.max_points);
            if entry.max_score != max {
                debug!(
                    criterion = %name,
                    reported = %entry.max_score,
                    rubric_max = %max,
                    "evaluator max_score differs from rubric"
                );
                entry.max_score = max;
            }
        }
    }

    if let Some(confidence) = parsed.confidence {
        if confidence < Decimal::ZERO || confidence > Decimal::ONE {
            return Err(GradingError::MalformedResponse {
                message: format!("confidence {} outside 0.0..=1.0", confidence),
            });
        }
    }

    Ok(Grade {
        id: Uuid::new_v4(),
        conversation_id,
        rubric_id: rubric.id,
        criteria_scores: parsed.criteria_scores,
        total_score: parsed.total_score,
        overall_feedback: parsed.overall_feedback,
        strengths: parsed.strengths,
        areas_for_improvement: parsed.areas_for_improvement,
        ai_confidence: parsed.confidence,
        graded_by: GradedBy::Ai,
        instructor_override: false,
        override_reason: None,
        graded_at: now,
    })
}

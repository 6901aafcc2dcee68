//! Criteria validation shared by AI assembly and instructor overrides.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::errors::{GradingError, GradingResult};
use crate::rubric::Rubric;

/// Check every `name -> score` entry against the rubric.
///
/// All names are checked before any range, so an unknown criterion always
/// wins over an out-of-range score regardless of entry order. Entries are
/// visited in name order.
pub fn validate_scores(rubric: &Rubric, scores: &BTreeMap<String, Decimal>) -> GradingResult<()> {
    for name in scores.keys() {
        if rubric.criterion(name).is_none() {
            return Err(GradingError::UnknownCriterion { name: name.clone() });
        }
    }

    for (name, value) in scores {
        let max = rubric
            .criterion(name)
            .map(|c| c.max_points)
            .ok_or_else(|| GradingError::UnknownCriterion { name: name.clone() })?;
        if *value < Decimal::ZERO || *value > Decimal::from(max) {
            return Err(GradingError::ScoreOutOfRange {
                name: name.clone(),
                value: *value,
                max,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rubric::tests::criterion;

    fn rubric() -> Rubric {
        Rubric::new("r", vec![criterion("a", 25), criterion("b", 20)])
    }

    fn scores(entries: &[(&str, Decimal)]) -> BTreeMap<String, Decimal> {
        entries.iter().map(|(n, v)| (n.to_string(), *v)).collect()
    }

    #[test]
    fn test_accepts_bounds_inclusive() {
        let s = scores(&[("a", Decimal::ZERO), ("b", Decimal::from(20))]);
        assert!(validate_scores(&rubric(), &s).is_ok());
        let s = scores(&[("a", Decimal::new(125, 1))]);
        assert!(validate_scores(&rubric(), &s).is_ok());
    }

    #[test]
    fn test_rejects_negative_and_above_max() {
        let s = scores(&[("a", Decimal::new(-1, 1))]);
        assert!(matches!(
            validate_scores(&rubric(), &s),
            Err(GradingError::ScoreOutOfRange { max: 25, .. })
        ));

        let s = scores(&[("b", Decimal::new(201, 1))]);
        match validate_scores(&rubric(), &s) {
            Err(GradingError::ScoreOutOfRange { name, value, max }) => {
                assert_eq!(name, "b");
                assert_eq!(value, Decimal::new(201, 1));
                assert_eq!(max, 20);
            }
            other => panic!("expected ScoreOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_checked_before_range() {
        // "a" sorts first and is out of range, but the unknown name must win.
        let s = scores(&[("a", Decimal::from(99)), ("zzz", Decimal::ONE)]);
        match validate_scores(&rubric(), &s) {
            Err(GradingError::UnknownCriterion { name }) => assert_eq!(name, "zzz"),
            other => panic!("expected UnknownCriterion, got {:?}", other),
        }
    }
}

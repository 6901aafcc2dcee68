//! Rubric model: ordered scoring criteria with point ranges and scoring guides.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::errors::{GradingError, GradingResult};

/// A grading rubric. Immutable once a grade references it.
///
/// A rubric file without an `id` gets one derived from its content, so the
/// same file always loads with the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RubricFile")]
pub struct Rubric {
    pub id: Uuid,

    /// Human-readable rubric name.
    pub name: String,

    /// Criteria in presentation order.
    pub criteria: Vec<Criterion>,
}

/// A single named, bounded-point scoring dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    /// Stable identifier (lowercase with underscores), used as the score key.
    pub name: String,

    pub display_name: String,

    #[serde(default)]
    pub description: String,

    pub max_points: u32,

    /// Achievable point value (as string) -> qualitative description.
    #[serde(default)]
    pub scoring_guide: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct RubricFile {
    #[serde(default)]
    id: Option<Uuid>,
    name: String,
    criteria: Vec<Criterion>,
}

impl From<RubricFile> for Rubric {
    fn from(file: RubricFile) -> Self {
        let id = file
            .id
            .unwrap_or_else(|| content_id(&file.name, &file.criteria));
        Self {
            id,
            name: file.name,
            criteria: file.criteria,
        }
    }
}

/// Version-8 UUID from the sha256 of the rubric name and criteria.
pub fn content_id(name: &str, criteria: &[Criterion]) -> Uuid {
    fn field(hasher: &mut Sha256, value: &str) {
        hasher.update((value.len() as u64).to_le_bytes());
        hasher.update(value.as_bytes());
    }

    let mut hasher = Sha256::new();
    field(&mut hasher, name);
    for c in criteria {
        field(&mut hasher, &c.name);
        field(&mut hasher, &c.display_name);
        field(&mut hasher, &c.description);
        hasher.update(c.max_points.to_le_bytes());
        for (points, desc) in &c.scoring_guide {
            field(&mut hasher, points);
            field(&mut hasher, desc);
        }
    }

    let digest = hasher.finalize();
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    uuid::Builder::from_custom_bytes(bytes).into_uuid()
}

impl Criterion {
    /// Scoring guide entries, highest point value first.
    pub fn guide_descending(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(i64, &str, &str)> = self
            .scoring_guide
            .iter()
            .map(|(points, desc)| {
                let key = points.trim().parse::<i64>().unwrap_or(i64::MIN);
                (key, points.as_str(), desc.as_str())
            })
            .collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        entries.into_iter().map(|(_, p, d)| (p, d)).collect()
    }
}

impl Rubric {
    /// Rubric with a content-derived id.
    pub fn new(name: impl Into<String>, criteria: Vec<Criterion>) -> Self {
        let name = name.into();
        Self {
            id: content_id(&name, &criteria),
            name,
            criteria,
        }
    }

    /// Total possible points (sum of `max_points`).
    pub fn total_points(&self) -> u32 {
        self.criteria.iter().map(|c| c.max_points).sum()
    }

    pub fn criterion(&self, name: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.name == name)
    }

    /// Check the rubric's structural invariants.
    pub fn validate(&self) -> GradingResult<()> {
        if self.criteria.is_empty() {
            return Err(invalid(format!("rubric '{}' has no criteria", self.name)));
        }

        let mut seen = HashSet::new();
        for criterion in &self.criteria {
            if criterion.name.is_empty() {
                return Err(invalid("criterion name must not be empty".to_string()));
            }
            if !criterion
                .name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
            {
                return Err(invalid(format!(
                    "criterion name '{}' must be lowercase with underscores",
                    criterion.name
                )));
            }
            if !seen.insert(criterion.name.as_str()) {
                return Err(invalid(format!(
                    "duplicate criterion name '{}'",
                    criterion.name
                )));
            }
            if criterion.max_points == 0 {
                return Err(invalid(format!(
                    "criterion '{}' must have positive max_points",
                    criterion.name
                )));
            }
            for key in criterion.scoring_guide.keys() {
                let points: i64 = key.trim().parse().map_err(|_| {
                    invalid(format!(
                        "scoring guide key '{}' of '{}' is not an integer",
                        key, criterion.name
                    ))
                })?;
                if points < 0 || points > i64::from(criterion.max_points) {
                    return Err(invalid(format!(
                        "scoring guide key {} of '{}' outside 0..={}",
                        points, criterion.name, criterion.max_points
                    )));
                }
            }
        }
        Ok(())
    }

    /// Render every criterion as prompt text, scoring guides highest first.
    pub fn to_prompt_text(&self) -> String {
        let mut lines = Vec::new();
        for criterion in &self.criteria {
            lines.push(format!(
                "\n### {} ({} points)",
                criterion.display_name, criterion.max_points
            ));
            lines.push(format!("**Key:** `{}`", criterion.name));
            if !criterion.description.is_empty() {
                lines.push(format!("**Description:** {}", criterion.description));
            }
            if !criterion.scoring_guide.is_empty() {
                lines.push("\n**Scoring Guide:**".to_string());
                for (points, desc) in criterion.guide_descending() {
                    lines.push(format!("- {} points: {}", points, desc));
                }
            }
        }
        lines.join("\n")
    }
}

fn invalid(message: String) -> GradingError {
    GradingError::InvalidRubric { message }
}

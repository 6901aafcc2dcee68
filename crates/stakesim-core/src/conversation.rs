//! Conversation input: turns, status, persona, and transcript formatting.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{GradingError, GradingResult};

/// Who said a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The trainee.
    Student,
    /// The simulated counterpart.
    Stakeholder,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Stakeholder => "Stakeholder",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    #[default]
    InProgress,
    Completed,
    Abandoned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn student(content: impl Into<String>) -> Self {
        Self {
            role: Role::Student,
            content: content.into(),
        }
    }

    pub fn stakeholder(content: impl Into<String>) -> Self {
        Self {
            role: Role::Stakeholder,
            content: content.into(),
        }
    }
}

/// A role-play session as handed to the grader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub status: ConversationStatus,

    /// The student's own description of their project.
    #[serde(default)]
    pub context: Option<String>,

    /// Turns in the order they were spoken.
    #[serde(default, alias = "messages")]
    pub turns: Vec<Turn>,
}

impl Conversation {
    pub fn completed(context: impl Into<String>, turns: Vec<Turn>) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: ConversationStatus::Completed,
            context: Some(context.into()),
            turns,
        }
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// A conversation is gradable once completed with at least one turn.
    pub fn ensure_gradable(&self) -> GradingResult<()> {
        if self.status != ConversationStatus::Completed {
            return Err(GradingError::NotGradable {
                reason: format!(
                    "conversation {} is {:?}, only completed conversations can be graded",
                    self.id, self.status
                ),
            });
        }
        if self.turns.is_empty() {
            return Err(GradingError::NotGradable {
                reason: format!("conversation {} has no turns", self.id),
            });
        }
        Ok(())
    }

    /// Numbered plain-text transcript, see [`format_transcript`].
    pub fn transcript(&self) -> String {
        format_transcript(&self.turns)
    }
}

/// Stakeholder persona the student talked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub background: Option<String>,
}

/// Render turns as `[Turn N] Label:\n<text>`, separated by blank lines.
///
/// Order is preserved exactly and nothing is truncated.
pub fn format_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .enumerate()
        .map(|(i, turn)| format!("[Turn {}] {}:\n{}", i + 1, turn.role.label(), turn.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

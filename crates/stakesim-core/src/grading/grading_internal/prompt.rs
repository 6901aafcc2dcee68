//! Evaluation prompt template and the output schema it mandates.
//!
//! The schema text here and [`REQUIRED_FIELDS`] must stay in lockstep with
//! `parse.rs`; nothing else writes prompt text.

use sha2::{Digest, Sha256};

use crate::conversation::{Conversation, Persona};
use crate::rubric::Rubric;

/// Top-level keys the evaluator must return, in the order they are checked.
pub(crate) const REQUIRED_FIELDS: [&str; 6] = [
    "criteria_scores",
    "total_score",
    "overall_feedback",
    "strengths",
    "areas_for_improvement",
    "confidence",
];

const TASK_FRAMING: &str = "You are an expert evaluator assessing a student's ability to \
communicate with business stakeholders about data science work.

## Your Task
Evaluate the following conversation in which a student presented their data science project \
to a business stakeholder. Grade the student's performance against the rubric below.";

const GRADING_PHILOSOPHY: &str = "## Grading Philosophy
- Be fair but rigorous; this is professional training
- Justify every score with specific evidence from the conversation
- Consider both what was said and what was missing
- Acknowledge strengths while identifying areas for improvement
- The goal is to help the student improve, not to be harsh";

const EVALUATION_INSTRUCTIONS: &str = "## Your Evaluation
Evaluate the conversation against each criterion in the rubric. For each criterion:
1. Assign a score based on the scoring guide
2. Cite specific evidence from the conversation (quote or reference specific turns)
3. Provide constructive feedback for improvement

Then provide:
- Overall summary feedback (2-3 paragraphs)
- Top 2-3 strengths
- Top 2-3 areas for improvement
- Your confidence in this evaluation (0.0-1.0)";

/// Build the evaluation prompt. Pure: identical inputs give identical text.
pub(crate) fn build_grading_prompt_impl(
    rubric: &Rubric,
    persona: &Persona,
    conversation: &Conversation,
) -> String {
    let context = conversation
        .context
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or("Not provided");
    let background = persona
        .background
        .as_deref()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or("Not specified");

    let sections = [
        TASK_FRAMING.to_string(),
        GRADING_PHILOSOPHY.to_string(),
        format!("## The Rubric\n{}", rubric.to_prompt_text()),
        format!("## Total Points Possible: {}", rubric.total_points()),
        format!(
            "## Context\n\
             - **Student's Project:** {}\n\
             - **Stakeholder:** {}, {}\n\
             - **Stakeholder Background:** {}\n\
             - **Conversation Turns:** {}",
            context,
            persona.name,
            persona.title,
            background,
            conversation.turn_count()
        ),
        format!(
            "## The Conversation Transcript\n{}",
            conversation.transcript()
        ),
        EVALUATION_INSTRUCTIONS.to_string(),
        format!(
            "## Response Format\n\
             You MUST respond with valid JSON in exactly this format:\n\
             ```json\n{}\n```\n\n\
             Use exactly these criterion keys: {}.\n\
             Respond ONLY with the JSON object, no other text.",
            output_schema(rubric),
            criterion_key_list(rubric)
        ),
    ];

    sections.join("\n\n")
}

/// Literal response skeleton, one entry per rubric criterion in rubric order.
pub(crate) fn output_schema(rubric: &Rubric) -> String {
    let criteria = rubric
        .criteria
        .iter()
        .map(|c| {
            format!(
                "    \"{}\": {{\n      \"score\": <number 0-{}>,\n      \"max_score\": {},\n      \
                 \"evidence\": \"<specific quotes or observations from the conversation>\",\n      \
                 \"feedback\": \"<constructive feedback for improvement>\"\n    }}",
                c.name, c.max_points, c.max_points
            )
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "{{\n  \"{}\": {{\n{}\n  }},\n  \"{}\": <number>,\n  \"{}\": \"<2-3 paragraph summary>\",\n  \
         \"{}\": [\"<strength 1>\", \"<strength 2>\"],\n  \
         \"{}\": [\"<area 1>\", \"<area 2>\"],\n  \"{}\": <0.0-1.0>\n}}",
        REQUIRED_FIELDS[0],
        criteria,
        REQUIRED_FIELDS[1],
        REQUIRED_FIELDS[2],
        REQUIRED_FIELDS[3],
        REQUIRED_FIELDS[4],
        REQUIRED_FIELDS[5],
    )
}

fn criterion_key_list(rubric: &Rubric) -> String {
    rubric
        .criteria
        .iter()
        .map(|c| format!("`{}`", c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `sha256:<hex>` of the prompt text; identifies a grading run's input.
pub(crate) fn prompt_digest_impl(prompt: &str) -> String {
    format!("sha256:{}", hex::encode(Sha256::digest(prompt.as_bytes())))
}

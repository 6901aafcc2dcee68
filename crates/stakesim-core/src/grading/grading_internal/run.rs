use tracing::{debug, info};

use crate::conversation::{Conversation, Persona};
use crate::errors::GradingResult;
use crate::grading::{GradingEngine, ParsedGrade};
use crate::rubric::Rubric;

pub(crate) async fn evaluate_impl(
    engine: &GradingEngine,
    rubric: &Rubric,
    persona: &Persona,
    conversation: &Conversation,
) -> GradingResult<ParsedGrade> {
    conversation.ensure_gradable()?;
    rubric.validate()?;

    let prompt = super::prompt::build_grading_prompt_impl(rubric, persona, conversation);
    let digest = super::prompt::prompt_digest_impl(&prompt);
    debug!(
        conversation_id = %conversation.id,
        rubric_id = %rubric.id,
        prompt_digest = %digest,
        turns = conversation.turn_count(),
        "built grading prompt"
    );

    let system = [engine.config.system_prompt.clone()];
    let resp = engine.client.complete(&prompt, Some(&system[..])).await?;

    let parsed = super::parse::parse_grade_response_impl(&resp.text)?;
    info!(
        conversation_id = %conversation.id,
        provider = %resp.provider,
        model = %resp.model,
        prompt_digest = %digest,
        total_score = %parsed.total_score,
        "grading response parsed"
    );
    Ok(parsed)
}

use tracing::{debug, info};

use crate::errors::{ParseError, ParseResult, ValidationError};
use crate::models::content::{ModelPayload, StopCondition};
use crate::models::outcome::{OrchestrationStep, Outcome};
use crate::parsers::answer::parse_answer;
use crate::parsers::classifier::{classify, ContentByKind};
use crate::parsers::rationale::parse_rationale;
use crate::parsers::tool::{parse_tool_use, ParserOptions};

/// Parse the raw output of an orchestration step.
///
/// Errors only when the output is not an orchestration payload at all, see
/// [`ParseError::triggers_fallback`]. Every grammar problem inside a payload becomes a
/// reprompt outcome instead.
pub fn parse_orchestration(raw: &str, options: &ParserOptions) -> ParseResult<OrchestrationStep> {
    let payload = ModelPayload::from_raw(raw)?;
    assemble(payload, options)
}

pub fn assemble(payload: ModelPayload, options: &ParserOptions) -> ParseResult<OrchestrationStep> {
    let content = classify(payload.content);
    let rationale = parse_rationale(&content);
    info!("Stop reason: {:?}", payload.stop_reason);

    let outcome = match payload.stop_reason {
        StopCondition::ToolUse => tool_use_outcome(&content, options)?,
        StopCondition::EndTurn | StopCondition::StopSequence => final_answer_outcome(&content),
        StopCondition::Other(reason) => {
            Outcome::reprompt(ValidationError::UnrecognizedStopCondition(reason))
        }
    };

    Ok(OrchestrationStep::new(rationale, outcome))
}

fn tool_use_outcome(content: &ContentByKind, options: &ParserOptions) -> ParseResult<Outcome> {
    let tool_use = content.first_tool_use().ok_or_else(|| {
        ParseError::Unclassifiable("tool_use stop reason without a tool_use block".to_string())
    })?;

    match parse_tool_use(tool_use, options) {
        Ok(invocation) => Ok(invocation.into()),
        Err(e) if e.reprompts() => Ok(Outcome::reprompt(e)),
        Err(e) => Err(ParseError::Unclassifiable(e.to_string())),
    }
}

fn final_answer_outcome(content: &ContentByKind) -> Outcome {
    let Some(text) = content.first_text() else {
        debug!("No text content to take a final answer from");
        return Outcome::ReStep;
    };

    match parse_answer(text) {
        Ok(Some(answer)) if !answer.text.is_empty() => {
            info!("Final answer parsed");
            Outcome::Finish(answer)
        }
        Ok(_) => Outcome::ReStep,
        Err(e) => Outcome::reprompt(e),
    }
}

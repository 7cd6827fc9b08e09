use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::ParseResult;
use crate::knowledge_base::parse_kb_generated_response;
use crate::models::response::{ParsedResponse, KNOWLEDGE_BASE_RESPONSE_GENERATION};
use crate::orchestration::parse_orchestration;
use crate::parsers::tool::ParserOptions;

/// One parser invocation as sent by the agent runtime
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationEvent {
    #[serde(default)]
    pub prompt_type: Option<String>,
    #[serde(default)]
    pub invoke_model_raw_response: Option<String>,
}

impl InvocationEvent {
    pub fn orchestration<S: Into<String>>(raw_response: S) -> Self {
        InvocationEvent {
            prompt_type: Some("ORCHESTRATION".to_string()),
            invoke_model_raw_response: Some(raw_response.into()),
        }
    }

    pub fn knowledge_base<S: Into<String>>(raw_response: S) -> Self {
        InvocationEvent {
            prompt_type: Some(KNOWLEDGE_BASE_RESPONSE_GENERATION.to_string()),
            invoke_model_raw_response: Some(raw_response.into()),
        }
    }

    pub fn raw_response(&self) -> &str {
        self.invoke_model_raw_response.as_deref().unwrap_or_default()
    }

    pub fn is_knowledge_base(&self) -> bool {
        self.prompt_type.as_deref() == Some(KNOWLEDGE_BASE_RESPONSE_GENERATION)
    }
}

/// Parse one invocation into exactly one response envelope.
///
/// Orchestration parsing is attempted unless the event asks for a knowledge base
/// generation. When the raw output is not an orchestration payload the raw text is parsed
/// as a knowledge base generation instead. The only error returned is a malformed
/// answer part in knowledge base mode.
pub fn handle(event: &InvocationEvent, options: &ParserOptions) -> ParseResult<ParsedResponse> {
    let raw = event.raw_response();
    debug!("Parser input event: {:?}", event);

    if event.is_knowledge_base() {
        return handle_kb_response(raw);
    }

    match parse_orchestration(raw, options) {
        Ok(step) => {
            let response = ParsedResponse::from(step);
            info!("Parser output: {:?}", response);
            Ok(response)
        }
        Err(e) if e.triggers_fallback() => {
            warn!("Falling back to knowledge base parsing: {}", e);
            handle_kb_response(raw)
        }
        Err(e) => Err(e),
    }
}

fn handle_kb_response(raw: &str) -> ParseResult<ParsedResponse> {
    let response = ParsedResponse::from(parse_kb_generated_response(raw)?);
    info!("Parser output (kb response): {:?}", response);
    Ok(response)
}

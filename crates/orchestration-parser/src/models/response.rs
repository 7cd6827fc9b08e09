use serde::{Deserialize, Serialize};

use super::answer::{FinalAnswer, GeneratedResponse};
use super::invocation::{ActionInvocation, AskUser, KnowledgeBaseQuery};
use super::outcome::{OrchestrationStep, Outcome};

pub const ORCHESTRATION: &str = "ORCHESTRATION";
pub const KNOWLEDGE_BASE_RESPONSE_GENERATION: &str = "KNOWLEDGE_BASE_RESPONSE_GENERATION";

/// The envelope handed back to the agent runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "promptType")]
pub enum ParsedResponse {
    #[serde(rename = "ORCHESTRATION", rename_all = "camelCase")]
    Orchestration {
        orchestration_parsed_response: OrchestrationParsedResponse,
    },
    #[serde(
        rename = "KNOWLEDGE_BASE_RESPONSE_GENERATION",
        rename_all = "camelCase"
    )]
    KnowledgeBaseResponseGeneration {
        knowledge_base_response_generation_parsed_response: KnowledgeBaseParsedResponse,
    },
}

impl ParsedResponse {
    pub fn prompt_type(&self) -> &'static str {
        match self {
            ParsedResponse::Orchestration { .. } => ORCHESTRATION,
            ParsedResponse::KnowledgeBaseResponseGeneration { .. } => {
                KNOWLEDGE_BASE_RESPONSE_GENERATION
            }
        }
    }

    pub fn as_orchestration(&self) -> Option<&OrchestrationParsedResponse> {
        match self {
            ParsedResponse::Orchestration {
                orchestration_parsed_response,
            } => Some(orchestration_parsed_response),
            _ => None,
        }
    }

    pub fn as_knowledge_base(&self) -> Option<&GeneratedResponse> {
        match self {
            ParsedResponse::KnowledgeBaseResponseGeneration {
                knowledge_base_response_generation_parsed_response,
            } => Some(&knowledge_base_response_generation_parsed_response.generated_response),
            _ => None,
        }
    }
}

impl From<OrchestrationStep> for ParsedResponse {
    fn from(step: OrchestrationStep) -> Self {
        ParsedResponse::Orchestration {
            orchestration_parsed_response: step.into(),
        }
    }
}

impl From<GeneratedResponse> for ParsedResponse {
    fn from(generated_response: GeneratedResponse) -> Self {
        ParsedResponse::KnowledgeBaseResponseGeneration {
            knowledge_base_response_generation_parsed_response: KnowledgeBaseParsedResponse {
                generated_response,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationParsedResponse {
    pub rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_details: Option<ResponseDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsing_error_details: Option<ParsingErrorDetails>,
}

impl From<OrchestrationStep> for OrchestrationParsedResponse {
    fn from(step: OrchestrationStep) -> Self {
        let (response_details, parsing_error_details) = match step.outcome {
            Outcome::AskUser(agent_ask_user) => {
                (Some(ResponseDetails::AskUser { agent_ask_user }), None)
            }
            Outcome::KnowledgeBase(agent_knowledge_base) => (
                Some(ResponseDetails::KnowledgeBase {
                    agent_knowledge_base,
                }),
                None,
            ),
            Outcome::ActionGroup(action_group_invocation) => (
                Some(ResponseDetails::ActionGroup {
                    action_group_invocation,
                }),
                None,
            ),
            Outcome::Finish(agent_final_response) => (
                Some(ResponseDetails::Finish {
                    agent_final_response,
                }),
                None,
            ),
            Outcome::ReStep => (None, None),
            Outcome::RepromptError { message } => (
                None,
                Some(ParsingErrorDetails {
                    reprompt_response: message,
                }),
            ),
        };

        OrchestrationParsedResponse {
            rationale: step.rationale,
            response_details,
            parsing_error_details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "invocationType")]
pub enum ResponseDetails {
    #[serde(rename = "ASK_USER", rename_all = "camelCase")]
    AskUser { agent_ask_user: AskUser },
    #[serde(rename = "KNOWLEDGE_BASE", rename_all = "camelCase")]
    KnowledgeBase {
        agent_knowledge_base: KnowledgeBaseQuery,
    },
    #[serde(rename = "ACTION_GROUP", rename_all = "camelCase")]
    ActionGroup {
        action_group_invocation: ActionInvocation,
    },
    #[serde(rename = "FINISH", rename_all = "camelCase")]
    Finish { agent_final_response: FinalAnswer },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsingErrorDetails {
    pub reprompt_response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseParsedResponse {
    pub generated_response: GeneratedResponse,
}

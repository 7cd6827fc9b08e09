use std::fmt::Display;

use super::answer::FinalAnswer;
use super::invocation::{ActionInvocation, AskUser, KnowledgeBaseQuery, ToolInvocation};

/// The decision taken for one orchestration step
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    AskUser(AskUser),
    KnowledgeBase(KnowledgeBaseQuery),
    ActionGroup(ActionInvocation),
    Finish(FinalAnswer),
    /// No decision yet, only the rationale
    ReStep,
    /// Text to send back to the model so it can correct its output
    RepromptError { message: String },
}

impl Outcome {
    pub fn reprompt<E: Display>(error: E) -> Self {
        let message = error.to_string();
        tracing::warn!("{}", message);
        Outcome::RepromptError { message }
    }
}

impl From<ToolInvocation> for Outcome {
    fn from(invocation: ToolInvocation) -> Self {
        match invocation {
            ToolInvocation::AskUser(ask_user) => Outcome::AskUser(ask_user),
            ToolInvocation::KnowledgeBaseQuery(query) => Outcome::KnowledgeBase(query),
            ToolInvocation::ActionInvocation(action) => Outcome::ActionGroup(action),
        }
    }
}

/// An outcome together with the rationale extracted for the same step
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestrationStep {
    pub rationale: Option<String>,
    pub outcome: Outcome,
}

impl OrchestrationStep {
    pub fn new(rationale: Option<String>, outcome: Outcome) -> Self {
        OrchestrationStep { rationale, outcome }
    }

    pub fn reprompt_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::RepromptError { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

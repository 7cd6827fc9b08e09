use thiserror::Error;

/// Errors raised while checking a tool call against the naming and parameter grammar.
///
/// The display strings are fed back to the model verbatim as reprompt text, so they are
/// fixed and caller facing.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing the parameter '{parameter}' for {tool} function call. Please try again with the correct argument added.")]
    MissingRequiredParameter { parameter: String, tool: String },

    #[error("The tool name format is incorrect. The format for the tool name must be: 'httpVerb__actionGroupName__apiName.")]
    MalformedToolName { name: String },

    #[error("Failed to parse the LLM output")]
    UnrecognizedStopCondition(String),

    /// Not fed back to the model: the step is treated as unclassifiable instead
    #[error("knowledge base call without searchQuery: {tool}")]
    MissingSearchQuery { tool: String },
}

impl ValidationError {
    pub fn missing_parameter<P: Into<String>, T: Into<String>>(parameter: P, tool: T) -> Self {
        ValidationError::MissingRequiredParameter {
            parameter: parameter.into(),
            tool: tool.into(),
        }
    }

    /// Whether this error becomes a reprompt outcome rather than aborting the step
    pub fn reprompts(&self) -> bool {
        !matches!(self, ValidationError::MissingSearchQuery { .. })
    }
}

/// Errors raised while turning raw model output into a parsed response.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ParseError {
    /// An `<answer_part>` without its `<text>` segment.
    #[error("Could not parse generated response")]
    MalformedAnswerMarkup,

    #[error("Unclassifiable payload: {0}")]
    Unclassifiable(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ParseError {
    /// Whether the handler should give up on orchestration parsing and treat the raw
    /// output as a knowledge-base generation instead.
    pub fn triggers_fallback(&self) -> bool {
        matches!(self, ParseError::Unclassifiable(_) | ParseError::Json(_))
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

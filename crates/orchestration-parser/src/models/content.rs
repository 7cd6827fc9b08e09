use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::EnumString;

use crate::errors::{ParseError, ParseResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUseContent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub input: Map<String, Value>,
}

/// A single content block from the model output
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Text(TextContent),
    ToolUse(ToolUseContent),
    /// Any block type we do not interpret, kept so it can still be grouped by kind
    Other { kind: String, body: Value },
}

impl ContentItem {
    pub const TEXT: &'static str = "text";
    pub const TOOL_USE: &'static str = "tool_use";

    pub fn text<S: Into<String>>(text: S) -> Self {
        ContentItem::Text(TextContent { text: text.into() })
    }

    pub fn tool_use<I: Into<String>, N: Into<String>>(
        id: I,
        name: N,
        input: Map<String, Value>,
    ) -> Self {
        ContentItem::ToolUse(ToolUseContent {
            id: id.into(),
            name: name.into(),
            input,
        })
    }

    pub fn kind(&self) -> &str {
        match self {
            ContentItem::Text(_) => Self::TEXT,
            ContentItem::ToolUse(_) => Self::TOOL_USE,
            ContentItem::Other { kind, .. } => kind,
        }
    }

    /// Get the text if this is a Text variant
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentItem::Text(text) => Some(&text.text),
            _ => None,
        }
    }

    pub fn as_tool_use(&self) -> Option<&ToolUseContent> {
        if let ContentItem::ToolUse(ref tool_use) = self {
            Some(tool_use)
        } else {
            None
        }
    }

    /// Read one content block, dispatching on its `type` field.
    pub fn from_value(value: Value) -> ParseResult<Self> {
        let kind = value
            .get("type")
            .and_then(|kind| kind.as_str())
            .map(String::from)
            .ok_or_else(|| ParseError::Unclassifiable("content item has no type".to_string()))?;

        match kind.as_str() {
            Self::TEXT => serde_json::from_value(value)
                .map(ContentItem::Text)
                .map_err(|e| ParseError::Unclassifiable(format!("malformed text content: {}", e))),
            Self::TOOL_USE => serde_json::from_value(value)
                .map(ContentItem::ToolUse)
                .map_err(|e| {
                    ParseError::Unclassifiable(format!("malformed tool_use content: {}", e))
                }),
            _ => Ok(ContentItem::Other { kind, body: value }),
        }
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
pub enum StopCondition {
    #[strum(serialize = "tool_use")]
    ToolUse,
    #[strum(serialize = "end_turn")]
    EndTurn,
    #[strum(serialize = "stop_sequence")]
    StopSequence,
    #[strum(default)]
    Other(String),
}

impl StopCondition {
    pub fn from_value(value: &Value) -> Self {
        match value.as_str() {
            // Parsing cannot fail, unknown strings land in Other
            Some(reason) => reason
                .parse::<StopCondition>()
                .unwrap_or_else(|_| StopCondition::Other(reason.to_string())),
            None => StopCondition::Other(value.to_string()),
        }
    }
}

/// The orchestration payload the model produced for one step
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPayload {
    pub stop_reason: StopCondition,
    pub content: Vec<ContentItem>,
}

impl ModelPayload {
    pub fn from_raw(raw: &str) -> ParseResult<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> ParseResult<Self> {
        let Value::Object(mut payload) = value else {
            return Err(ParseError::Unclassifiable(
                "model output is not a JSON object".to_string(),
            ));
        };

        let stop_reason = payload
            .get("stop_reason")
            .map(StopCondition::from_value)
            .ok_or_else(|| ParseError::Unclassifiable("model output has no stop_reason".to_string()))?;

        let content = match payload.remove("content") {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(ContentItem::from_value)
                .collect::<ParseResult<Vec<_>>>()?,
            _ => {
                return Err(ParseError::Unclassifiable(
                    "model output has no content list".to_string(),
                ))
            }
        };

        Ok(ModelPayload {
            stop_reason,
            content,
        })
    }
}

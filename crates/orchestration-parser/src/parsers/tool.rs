use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{Display, EnumString};
use tracing::info;

use crate::errors::ValidationError;
use crate::models::content::ToolUseContent;
use crate::models::invocation::{
    value_to_string, ActionInvocation, AskUser, KnowledgeBaseQuery, ParamValue, ToolInvocation,
};

pub const ASK_USER: &str = "user__askuser";
pub const ASK_USER_QUESTION: &str = "question";
pub const KNOWLEDGE_STORE_SEARCH_ACTION_PREFIX: &str = "x_amz_knowledgebase_";
pub const SEARCH_QUERY: &str = "searchQuery";
const TOOL_NAME_SEPARATOR: &str = "__";

/// Which list-valued parameters get flattened into a comma-joined string
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ListFlattening {
    /// Every list parameter, on both the action group and knowledge base paths
    #[default]
    Every,
    /// Only the parameter that comes last in the input, and only for action groups
    Last,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserOptions {
    #[serde(default)]
    pub list_flattening: ListFlattening,
}

impl ParserOptions {
    pub fn with_list_flattening(list_flattening: ListFlattening) -> Self {
        ParserOptions { list_flattening }
    }
}

/// Python-style truthiness: null, false, zero and empty containers count as missing
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Detect an ask-user call.
///
/// Returns `Ok(None)` for any other tool so the caller can fall through to
/// [`parse_function_call`].
pub fn parse_ask_user(tool_use: &ToolUseContent) -> Result<Option<AskUser>, ValidationError> {
    if tool_use.name != ASK_USER {
        return Ok(None);
    }

    match tool_use.input.get(ASK_USER_QUESTION) {
        Some(question) if !is_empty_value(question) => Ok(Some(AskUser {
            question: value_to_string(question),
            id: tool_use.id.clone(),
        })),
        _ => Err(ValidationError::missing_parameter(ASK_USER_QUESTION, ASK_USER)),
    }
}

/// Strip the knowledge base prefix, matched case-insensitively
fn knowledge_base_id(resource_name: &str) -> Option<&str> {
    let prefix_len = KNOWLEDGE_STORE_SEARCH_ACTION_PREFIX.len();
    resource_name
        .get(..prefix_len)
        .filter(|prefix| prefix.eq_ignore_ascii_case(KNOWLEDGE_STORE_SEARCH_ACTION_PREFIX))
        .map(|_| &resource_name[prefix_len..])
}

fn wrap_parameter(value: &Value, flatten: bool) -> ParamValue {
    if flatten {
        ParamValue::flattened(value.clone())
    } else {
        ParamValue::new(value.clone())
    }
}

/// Parse a `verb__actionGroupName__apiName` tool call into a knowledge base query or an
/// action group invocation.
pub fn parse_function_call(
    tool_use: &ToolUseContent,
    options: &ParserOptions,
) -> Result<ToolInvocation, ValidationError> {
    info!("Parsing function call: {}", tool_use.name);

    let segments: Vec<&str> = tool_use
        .name
        .split(TOOL_NAME_SEPARATOR)
        .map(str::trim)
        .collect();
    let [verb, resource_name, function] = segments.as_slice() else {
        return Err(ValidationError::MalformedToolName {
            name: tool_use.name.clone(),
        });
    };

    let flatten_every = options.list_flattening == ListFlattening::Every;

    if let Some(knowledge_base_id) = knowledge_base_id(resource_name) {
        let search_query = tool_use
            .input
            .get(SEARCH_QUERY)
            .map(|value| wrap_parameter(value, flatten_every))
            .ok_or_else(|| ValidationError::MissingSearchQuery {
                tool: tool_use.name.clone(),
            })?;
        info!("Knowledge base tool use for {}", knowledge_base_id);
        return Ok(ToolInvocation::KnowledgeBaseQuery(KnowledgeBaseQuery {
            search_query,
            knowledge_base_id: knowledge_base_id.to_string(),
            invocation_id: tool_use.id.clone(),
        }));
    }

    let last_index = tool_use.input.len().saturating_sub(1);
    let parameters: Map<String, Value> = tool_use
        .input
        .iter()
        .enumerate()
        .map(|(index, (name, value))| {
            let flatten = match options.list_flattening {
                ListFlattening::Every => true,
                ListFlattening::Last => index == last_index,
            };
            (name.clone(), wrap_parameter(value, flatten).into())
        })
        .collect();

    info!("Action group tool use for {}", resource_name);
    Ok(ToolInvocation::ActionInvocation(ActionInvocation {
        verb: verb.to_string(),
        action_group_name: resource_name.to_string(),
        api_name: function.to_string(),
        parameters,
        invocation_id: tool_use.id.clone(),
    }))
}

/// Ask-user detection first, then the general function call grammar
pub fn parse_tool_use(
    tool_use: &ToolUseContent,
    options: &ParserOptions,
) -> Result<ToolInvocation, ValidationError> {
    if let Some(ask_user) = parse_ask_user(tool_use)? {
        return Ok(ToolInvocation::AskUser(ask_user));
    }
    parse_function_call(tool_use, options)
}

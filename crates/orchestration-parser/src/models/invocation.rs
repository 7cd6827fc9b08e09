use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tool parameter value as handed to the runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamValue {
    pub value: Value,
}

impl ParamValue {
    pub fn new<V: Into<Value>>(value: V) -> Self {
        ParamValue {
            value: value.into(),
        }
    }

    /// Wrap a value, replacing a list with the comma-joined string forms of its elements
    pub fn flattened(value: Value) -> Self {
        match value {
            Value::Array(items) => ParamValue::new(
                items
                    .iter()
                    .map(value_to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            other => ParamValue::new(other),
        }
    }
}

impl From<ParamValue> for Value {
    fn from(param: ParamValue) -> Self {
        let mut wrapped = Map::new();
        wrapped.insert("value".to_string(), param.value);
        Value::Object(wrapped)
    }
}

/// String form of a JSON value: strings verbatim, everything else as JSON text
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The model asks the user a clarifying question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskUser {
    #[serde(rename = "responseText")]
    pub question: String,
    pub id: String,
}

/// A search against a knowledge base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseQuery {
    pub search_query: ParamValue,
    pub knowledge_base_id: String,
    #[serde(rename = "id")]
    pub invocation_id: String,
}

/// A call into an action group API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionInvocation {
    pub verb: String,
    pub action_group_name: String,
    pub api_name: String,
    /// Wrapped `{"value": ...}` entries, in the order the model wrote them
    #[serde(rename = "actionGroupInput")]
    pub parameters: Map<String, Value>,
    #[serde(rename = "id")]
    pub invocation_id: String,
}

/// What a tool_use block asks the runtime to do
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInvocation {
    AskUser(AskUser),
    KnowledgeBaseQuery(KnowledgeBaseQuery),
    ActionInvocation(ActionInvocation),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flattened() {
        assert_eq!(
            ParamValue::flattened(json!(["a", "b", 3, true])).value,
            json!("a,b,3,true")
        );
        assert_eq!(ParamValue::flattened(json!([])).value, json!(""));
        assert_eq!(ParamValue::flattened(json!("Rome")).value, json!("Rome"));
        assert_eq!(ParamValue::flattened(json!({"k": 1})).value, json!({"k": 1}));
    }

    #[test]
    fn test_action_invocation_wire_names() {
        let invocation = ActionInvocation {
            verb: "GET".to_string(),
            action_group_name: "weather".to_string(),
            api_name: "getForecast".to_string(),
            parameters: Map::from_iter([("city".to_string(), ParamValue::new("Rome").into())]),
            invocation_id: "toolu_1".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&invocation).unwrap(),
            json!({
                "verb": "GET",
                "actionGroupName": "weather",
                "apiName": "getForecast",
                "actionGroupInput": {"city": {"value": "Rome"}},
                "id": "toolu_1"
            })
        );
    }
}

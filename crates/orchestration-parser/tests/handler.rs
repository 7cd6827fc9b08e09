use anyhow::Result;
use indoc::indoc;
use orchestration_parser::models::response::ResponseDetails;
use orchestration_parser::{handle, InvocationEvent, ListFlattening, ParsedResponse, ParserOptions};
use serde_json::{json, Value};

fn run(event: Value) -> Result<ParsedResponse> {
    let event: InvocationEvent = serde_json::from_value(event)?;
    Ok(handle(&event, &ParserOptions::default())?)
}

fn run_orchestration(payload: Value) -> Result<Value> {
    let response = run(json!({
        "promptType": "ORCHESTRATION",
        "invokeModelRawResponse": payload.to_string()
    }))?;
    Ok(serde_json::to_value(response)?)
}

#[test]
fn test_final_answer_without_citations() -> Result<()> {
    let output = run_orchestration(json!({
        "stop_reason": "end_turn",
        "content": [{"type": "text", "text": "<answer>Paris is the capital.<answer>"}]
    }))?;

    assert_eq!(
        output,
        json!({
            "promptType": "ORCHESTRATION",
            "orchestrationParsedResponse": {
                "rationale": "<answer>Paris is the capital.<answer>",
                "responseDetails": {
                    "invocationType": "FINISH",
                    "agentFinalResponse": {"responseText": "Paris is the capital."}
                }
            }
        })
    );
    Ok(())
}

#[test]
fn test_final_answer_with_citations() -> Result<()> {
    let text = indoc! {"
        <thinking>The documents answer this directly.</thinking>
        <answer>
        <answer_part><text>Rome is the capital of Italy.</text><sources><source>kb-doc-1</source></sources></answer_part>
        <answer_part><text>It was founded in 753 BC.</text><sources><source>kb-doc-2</source><source>kb-doc-3</source></sources></answer_part>
        </answer>
    "};
    let output = run_orchestration(json!({
        "stop_reason": "end_turn",
        "content": [{"type": "text", "text": text}]
    }))?;

    let parsed = &output["orchestrationParsedResponse"];
    assert_eq!(parsed["rationale"], "The documents answer this directly.");
    let final_response = &parsed["responseDetails"]["agentFinalResponse"];
    assert_eq!(
        final_response["responseText"],
        "Rome is the capital of Italy. It was founded in 753 BC."
    );
    assert_eq!(
        final_response["citations"]["generatedResponseParts"],
        json!([
            {"text": "Rome is the capital of Italy.", "references": [{"sourceId": "kb-doc-1"}]},
            {"text": "It was founded in 753 BC.", "references": [{"sourceId": "kb-doc-2"}, {"sourceId": "kb-doc-3"}]}
        ])
    );
    Ok(())
}

#[test]
fn test_action_group_invocation() -> Result<()> {
    let output = run_orchestration(json!({
        "stop_reason": "tool_use",
        "content": [
            {"type": "text", "text": "<thinking>I need the forecast for Rome.</thinking>"},
            {"type": "tool_use", "id": "toolu_bdrk_01", "name": "GET__weather__getForecast", "input": {"city": "Rome"}}
        ]
    }))?;

    assert_eq!(
        output["orchestrationParsedResponse"],
        json!({
            "rationale": "I need the forecast for Rome.",
            "responseDetails": {
                "invocationType": "ACTION_GROUP",
                "actionGroupInvocation": {
                    "verb": "GET",
                    "actionGroupName": "weather",
                    "apiName": "getForecast",
                    "actionGroupInput": {"city": {"value": "Rome"}},
                    "id": "toolu_bdrk_01"
                }
            }
        })
    );
    Ok(())
}

#[test]
fn test_knowledge_base_query() -> Result<()> {
    let output = run_orchestration(json!({
        "stop_reason": "tool_use",
        "content": [{
            "type": "tool_use",
            "id": "toolu_2",
            "name": "GET__x_amz_knowledgebase_foo__Search",
            "input": {"searchQuery": "population of Rome"}
        }]
    }))?;

    let details = &output["orchestrationParsedResponse"]["responseDetails"];
    assert_eq!(details["invocationType"], "KNOWLEDGE_BASE");
    assert_eq!(
        details["agentKnowledgeBase"],
        json!({"searchQuery": {"value": "population of Rome"}, "knowledgeBaseId": "foo", "id": "toolu_2"})
    );
    Ok(())
}

#[test]
fn test_ask_user() -> Result<()> {
    let response = run(json!({
        "invokeModelRawResponse": json!({
            "stop_reason": "tool_use",
            "content": [{"type": "tool_use", "id": "toolu_3", "name": "user__askuser", "input": {"question": "Which city?"}}]
        }).to_string()
    }))?;

    let parsed = response.as_orchestration().expect("orchestration response");
    match parsed.response_details.as_ref() {
        Some(ResponseDetails::AskUser { agent_ask_user }) => {
            assert_eq!(agent_ask_user.question, "Which city?");
            assert_eq!(agent_ask_user.id, "toolu_3");
        }
        other => panic!("Expected ask user, got {:?}", other),
    }
    assert!(parsed.rationale.is_none());
    Ok(())
}

#[test]
fn test_reprompts() -> Result<()> {
    let cases = [
        (
            json!({"stop_reason": "foo", "content": []}),
            "Failed to parse the LLM output",
        ),
        (
            json!({"stop_reason": "tool_use", "content": [{"type": "tool_use", "id": "t", "name": "user__askuser", "input": {"question": ""}}]}),
            "Missing the parameter 'question' for user__askuser function call. Please try again with the correct argument added.",
        ),
        (
            json!({"stop_reason": "tool_use", "content": [{"type": "tool_use", "id": "t", "name": "GET__weather__getForecast__v2", "input": {}}]}),
            "The tool name format is incorrect. The format for the tool name must be: 'httpVerb__actionGroupName__apiName.",
        ),
        (
            json!({"stop_reason": "end_turn", "content": [{"type": "text", "text": "<answer_part><source>x</source></answer_part>"}]}),
            "Could not parse generated response",
        ),
    ];

    for (payload, message) in cases {
        let output = run_orchestration(payload)?;
        let parsed = &output["orchestrationParsedResponse"];
        assert_eq!(parsed["parsingErrorDetails"]["repromptResponse"], message);
        assert!(parsed.get("responseDetails").is_none());
    }
    Ok(())
}

#[test]
fn test_unclassifiable_payloads_fall_back_to_knowledge_base() -> Result<()> {
    let payloads = [
        String::new(),
        "not json at all <answer_part><text>Cited</text><source>s1</source></answer_part>".to_string(),
        json!([1, 2, 3]).to_string(),
        json!({"content": []}).to_string(),
        json!({"stop_reason": "end_turn"}).to_string(),
        json!({"stop_reason": "end_turn", "content": [{"text": "no type"}]}).to_string(),
        json!({"stop_reason": "tool_use", "content": [{"type": "text", "text": "no tool"}]}).to_string(),
        json!({
            "stop_reason": "tool_use",
            "content": [{
                "type": "tool_use",
                "id": "t",
                "name": "GET__x_amz_knowledgebase_foo__Search",
                "input": {"query": "x"}
            }]
        })
        .to_string(),
    ];

    for raw in payloads {
        let response = run(json!({"promptType": "ORCHESTRATION", "invokeModelRawResponse": raw}))?;
        assert!(
            response.as_knowledge_base().is_some(),
            "expected fallback for {}",
            raw
        );
    }
    Ok(())
}

#[test]
fn test_knowledge_base_generation() -> Result<()> {
    let raw = "<answer_part><text>Rome</text><source>s1</source></answer_part>";
    let output = serde_json::to_value(run(json!({
        "promptType": "KNOWLEDGE_BASE_RESPONSE_GENERATION",
        "invokeModelRawResponse": raw
    }))?)?;

    assert_eq!(
        output,
        json!({
            "promptType": "KNOWLEDGE_BASE_RESPONSE_GENERATION",
            "knowledgeBaseResponseGenerationParsedResponse": {
                "generatedResponse": {
                    "generatedResponseParts": [{
                        "text": "Rome <text>Rome</text><source>s1</source>",
                        "references": [{"sourceId": "s1"}]
                    }]
                }
            }
        })
    );
    Ok(())
}

#[test]
fn test_knowledge_base_generation_with_malformed_part_is_an_error() {
    let event = InvocationEvent::knowledge_base("<answer_part><source>s1</source></answer_part>");
    assert!(handle(&event, &ParserOptions::default()).is_err());
}

#[test]
fn test_list_flattening_modes() -> Result<()> {
    let raw = json!({
        "stop_reason": "tool_use",
        "content": [{
            "type": "tool_use",
            "id": "t",
            "name": "POST__tickets__create",
            "input": {"labels": ["bug", "urgent"], "watchers": ["ana", "li"]}
        }]
    })
    .to_string();
    let event = InvocationEvent::orchestration(raw);

    let every = serde_json::to_value(handle(&event, &ParserOptions::default())?)?;
    let input = &every["orchestrationParsedResponse"]["responseDetails"]["actionGroupInvocation"]["actionGroupInput"];
    assert_eq!(input["labels"]["value"], "bug,urgent");
    assert_eq!(input["watchers"]["value"], "ana,li");

    let last = serde_json::to_value(handle(
        &event,
        &ParserOptions::with_list_flattening(ListFlattening::Last),
    )?)?;
    let input = &last["orchestrationParsedResponse"]["responseDetails"]["actionGroupInvocation"]["actionGroupInput"];
    assert_eq!(input["labels"]["value"], json!(["bug", "urgent"]));
    assert_eq!(input["watchers"]["value"], "ana,li");
    Ok(())
}

//! Tests for the OpenAI-compatible client against a local stub server.

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use paystub_underwriter::config::{ApiKey, ModelSettings};
use paystub_underwriter::error::UnderwritingError;
use paystub_underwriter::evaluation::{
    build_messages, underwrite_income_tool, IncomeEvaluator, ModelClient, OpenAiClient,
    ToolCallRequest,
};
use paystub_underwriter::models::{BorrowerFact, PayrollFact};

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn chat_completions(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    stub.seen.lock().unwrap().push((auth, body));
    (stub.status, Json(stub.reply.clone()))
}

/// Starts a stub `chat/completions` server and returns its base URL.
async fn spawn_stub(stub: Stub) -> String {
    let app = Router::new()
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

fn stub(status: StatusCode, reply: Value) -> Stub {
    Stub {
        status,
        reply,
        seen: Arc::new(Mutex::new(Vec::new())),
    }
}

fn settings(base_url: String) -> ModelSettings {
    ModelSettings {
        base_url,
        api_key: ApiKey::new("sk-stub"),
        ..ModelSettings::default()
    }
}

fn tool_call_reply(arguments: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "finish_reason": "tool_calls",
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "underwrite_income", "arguments": arguments}
                }]
            }
        }]
    })
}

fn request() -> ToolCallRequest {
    ToolCallRequest {
        messages: build_messages(&PayrollFact::default(), &BorrowerFact::new()).unwrap(),
        tool: underwrite_income_tool(),
        max_output_tokens: 1000,
    }
}

#[tokio::test]
async fn test_submit_sends_tool_request_and_reads_invocation() {
    let stub = stub(
        StatusCode::OK,
        tool_call_reply(r#"{"qualifying_income_monthly": 5000}"#),
    );
    let seen = stub.seen.clone();
    let base_url = spawn_stub(stub).await;

    let client = OpenAiClient::new(&settings(base_url), ApiKey::new("sk-stub").unwrap()).unwrap();
    let invocation = client.submit(&request()).await.unwrap();

    assert_eq!(invocation.name, "underwrite_income");
    assert_eq!(invocation.arguments, r#"{"qualifying_income_monthly": 5000}"#);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-stub"));
    assert_eq!(body["model"], "gpt-4-1106-preview");
    assert_eq!(body["tool_choice"], "auto");
    assert_eq!(body["max_tokens"], 1000);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["tools"][0]["type"], "function");
    assert_eq!(
        body["tools"][0]["function"]["parameters"]["required"],
        json!(["qualifying_income_monthly", "income_type", "action_items"])
    );
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let base_url = spawn_stub(stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": {"message": "boom"}}),
    ))
    .await;

    let client = OpenAiClient::new(&settings(base_url), ApiKey::new("sk-stub").unwrap()).unwrap();
    let error = client.submit(&request()).await.unwrap_err();

    match error {
        UnderwritingError::ModelStatus { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("boom"));
        }
        other => panic!("expected ModelStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_text_only_answer_becomes_fallback_decision() {
    let reply = json!({
        "choices": [{"message": {"role": "assistant", "content": "About $5,000 a month."}}]
    });
    let base_url = spawn_stub(stub(StatusCode::OK, reply)).await;

    let evaluator = IncomeEvaluator::from_settings(&settings(base_url)).unwrap();
    let decision = evaluator
        .evaluate(&PayrollFact::default(), &BorrowerFact::new())
        .await;

    assert_eq!(decision.qualifying_income_monthly.to_string(), "0");
    assert_eq!(
        decision.action_items,
        vec!["Error: Model response contained no tool call. Please review manually."]
    );
}

#[tokio::test]
async fn test_evaluator_decodes_stub_decision() {
    let reply = tool_call_reply(
        r#"{"qualifying_income_monthly": 6250.5, "income_type": "Salaried", "action_items": ["Verify start date"], "guideline_citations": ["B3-3.1-05", "B3-3.1-06"]}"#,
    );
    let base_url = spawn_stub(stub(StatusCode::OK, reply)).await;

    let evaluator = IncomeEvaluator::from_settings(&settings(base_url)).unwrap();
    let decision = evaluator
        .evaluate(&PayrollFact::default(), &BorrowerFact::new().with("name", "Jane Doe"))
        .await;

    assert_eq!(decision.qualifying_income_monthly.to_string(), "6250.5");
    assert_eq!(decision.action_items, vec!["Verify start date"]);
    assert_eq!(decision.guideline_citations, vec!["B3-3.1-05", "B3-3.1-06"]);
}

#[tokio::test]
async fn test_long_income_passes_through_unchanged() {
    let reply = tool_call_reply(
        r#"{"qualifying_income_monthly": 8333.3333333333333, "income_type": "Salaried", "action_items": []}"#,
    );
    let base_url = spawn_stub(stub(StatusCode::OK, reply)).await;

    let evaluator = IncomeEvaluator::from_settings(&settings(base_url)).unwrap();
    let outcome = evaluator
        .evaluate_outcome(&PayrollFact::default(), &BorrowerFact::new())
        .await;

    assert!(!outcome.is_fallback());
    assert_eq!(
        outcome.decision.qualifying_income_monthly.to_string(),
        "8333.3333333333333"
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_becomes_fallback_decision() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let evaluator =
        IncomeEvaluator::from_settings(&settings(format!("http://{}/v1", addr))).unwrap();
    let outcome = evaluator
        .evaluate_outcome(&PayrollFact::default(), &BorrowerFact::new())
        .await;

    assert!(outcome.is_fallback());
    assert!(outcome.decision.action_items[0].starts_with("Error: Model request failed:"));
    assert!(outcome.decision.action_items[0].ends_with("Please review manually."));
}

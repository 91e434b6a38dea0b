use async_trait::async_trait;
use draftwright::agent::{AgentInput, AgentResult, AgentRuntime};
use draftwright::assistant::Assistant;
use draftwright::config::GatewayConfig;
use draftwright::gateway::{AppState, run_gateway_with_listener};
use draftwright::session::{ChatTurn, SessionStore};
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Hands out one tool payload per call, in order.
struct ScriptedRuntime {
    payloads: Mutex<VecDeque<Value>>,
}

impl ScriptedRuntime {
    fn new(payloads: impl IntoIterator<Item = Value>) -> Self {
        Self {
            payloads: Mutex::new(payloads.into_iter().collect()),
        }
    }
}

#[async_trait]
impl AgentRuntime for ScriptedRuntime {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn run(&self, _input: AgentInput) -> anyhow::Result<AgentResult> {
        let payload = self
            .payloads
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script exhausted"))?;
        let output = payload.to_string();
        Ok(AgentResult {
            final_output: Some(Value::String(output.clone())),
            new_items: Some(vec![json!({"type": "tool_call_output_item", "output": output})]),
            output: None,
            dump: Value::Null,
        })
    }
}

fn tool_payload(ops_json: &str, reply: &str) -> Value {
    json!({
        "summary": "",
        "ack": "",
        "reply": reply,
        "baseHash": "",
        "opsJson": ops_json,
        "markdown": null
    })
}

struct GatewayTestServer {
    port: u16,
    sessions: Arc<SessionStore>,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl GatewayTestServer {
    async fn start(runtime: Option<ScriptedRuntime>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral gateway listener should bind");
        let port = listener
            .local_addr()
            .expect("ephemeral gateway listener should expose local address")
            .port();

        let sessions = Arc::new(SessionStore::default());
        let runtime = runtime.map(|runtime| Arc::new(runtime) as Arc<dyn AgentRuntime>);
        let assistant =
            Assistant::new(runtime, Arc::clone(&sessions)).expect("assistant should build");
        let state = AppState::new(assistant);

        let handle = tokio::spawn(async move {
            run_gateway_with_listener(listener, state, &GatewayConfig::default()).await
        });
        wait_until_gateway_ready(port).await;

        Self {
            port,
            sessions,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.port)
    }
}

impl Drop for GatewayTestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn wait_until_gateway_ready(port: u16) {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .expect("reqwest client should be built");

    for _ in 0..80 {
        let health = client
            .get(format!("http://127.0.0.1:{port}/health"))
            .send()
            .await;
        if matches!(health, Ok(response) if response.status() == StatusCode::OK) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("gateway did not become ready on port {port}");
}

#[tokio::test]
async fn edit_mode_a_returns_appended_section() {
    let server = GatewayTestServer::start(Some(ScriptedRuntime::new([tool_payload(
        r###"[{"op":"append_markdown","markdown":"## Tips\n- Be punctual"}]"###,
        "",
    )])))
    .await;

    let response = reqwest::Client::new()
        .post(server.url("/edit"))
        .json(&json!({
            "mode": "A",
            "markdown": "# Onboarding",
            "instruction": "add a tips section",
            "baseHash": "abc"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["ops"],
        json!([{"op": "append_markdown", "markdown": "## Tips\n- Be punctual"}])
    );
    assert_eq!(body["baseHash"], "abc");
    assert!(body.get("reply").is_none());
}

#[tokio::test]
async fn edit_op_without_heading_is_rejected() {
    let server = GatewayTestServer::start(Some(ScriptedRuntime::new([tool_payload(
        r#"[{"op":"replace_section_by_heading","markdown":"new text"}]"#,
        "",
    )])))
    .await;

    let response = reqwest::Client::new()
        .post(server.url("/edit"))
        .json(&json!({"mode": "A", "markdown": "# Doc", "instruction": "rewrite"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"detail": "Missing heading in op"}));
}

#[tokio::test]
async fn silent_chat_turn_replies_okay() {
    let server =
        GatewayTestServer::start(Some(ScriptedRuntime::new([tool_payload("", "")]))).await;

    let response = reqwest::Client::new()
        .post(server.url("/chat"))
        .json(&json!({"message": "hi"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["reply"], "Okay.");
    assert!(body.get("ops").is_none());
    assert_eq!(body["sessionId"], "default");

    assert_eq!(
        server.sessions.get("default").await,
        vec![ChatTurn::user("hi"), ChatTurn::assistant("Okay.")]
    );
}

#[tokio::test]
async fn missing_credential_degrades_to_bad_gateway() {
    let server = GatewayTestServer::start(None).await;
    let client = reqwest::Client::new();

    let health: Value = client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["agent"], "unavailable");

    let response = client
        .post(server.url("/chat"))
        .json(&json!({"message": "hi", "sessionId": "s1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(server.sessions.get("s1").await.is_empty());
}

#[tokio::test]
async fn malformed_body_is_rejected_before_the_agent() {
    let server = GatewayTestServer::start(Some(ScriptedRuntime::new(Vec::<Value>::new()))).await;

    let response = reqwest::Client::new()
        .post(server.url("/chat"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

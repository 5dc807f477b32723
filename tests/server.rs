//! End-to-end tests for the HTTP server.
//!
//! Each test spins up a real server on a free port against its own
//! temporary database and drives it with an HTTP client, then inspects the
//! database directly through the library.

use serde_json::{json, Value};
use tempfile::TempDir;

use chatkb::config::Config;
use chatkb::{db, learning, server, store};

fn find_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn test_config(tmp: &TempDir, port: u16) -> Config {
    let db_path = tmp.path().join("chatkb.sqlite");
    let config_content = format!(
        r#"[db]
path = "{}"

[matching]
threshold = 0.6

[server]
bind = "127.0.0.1:{}"
"#,
        db_path.display(),
        port
    );
    toml::from_str(&config_content).unwrap()
}

async fn start_server(cfg: &Config) {
    let server_cfg = cfg.clone();
    tokio::spawn(async move {
        server::run_server(&server_cfg)
            .await
            .expect("server exited with error");
    });
    wait_for_server(cfg).await;
}

async fn wait_for_server(cfg: &Config) {
    let client = reqwest::Client::new();
    let url = format!("http://{}/health", cfg.server.bind);
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        if let Ok(resp) = client.get(&url).send().await {
            if resp.status().is_success() {
                return;
            }
        }
    }
    panic!("Server did not become ready within 5 seconds");
}

async fn post_json(cfg: &Config, path: &str, body: Value) -> Value {
    let client = reqwest::Client::new();
    let url = format!("http://{}{}", cfg.server.bind, path);
    client
        .post(&url)
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

// ─── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_endpoint() {
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, find_free_port());
    start_server(&cfg).await;

    let client = reqwest::Client::new();
    let body: Value = client
        .get(format!("http://{}/health", cfg.server.bind))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "healthy");
}

/// Empty knowledge base: the placeholder answer comes back with
/// `needs_feedback` set, and the question is logged.
#[tokio::test]
async fn test_chat_with_empty_knowledge_base_logs_unknown() {
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, find_free_port());
    start_server(&cfg).await;

    let body = post_json(&cfg, "/chat", json!({"message": "hello"})).await;

    assert_eq!(body["needs_feedback"], true);
    assert_eq!(body["confidence"], 0.0);
    assert!(body["answer"].as_str().unwrap().contains("not sure"));

    let pool = db::connect(&cfg).await.unwrap();
    let pending = store::list_unresolved(&pool, 10).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].question, "hello");
}

/// Exact match: the stored answer comes back with confidence ~1.0.
#[tokio::test]
async fn test_chat_exact_match_returns_stored_answer() {
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, find_free_port());
    start_server(&cfg).await;

    let pool = db::connect(&cfg).await.unwrap();
    let outcome = learning::apply_feedback(&pool, "what is your name", "I am a bot")
        .await
        .unwrap();
    assert!(outcome.is_success());

    let body = post_json(&cfg, "/chat", json!({"message": "what is your name"})).await;

    assert_eq!(body["answer"], "I am a bot");
    assert_eq!(body["needs_feedback"], false);
    assert!(
        body["confidence"].as_f64().unwrap() > 0.99,
        "exact match should score ~1.0, got {}",
        body["confidence"]
    );
}

/// Feedback then chat: the taught answer is returned above the threshold.
#[tokio::test]
async fn test_feedback_then_chat_round_trip() {
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, find_free_port());
    start_server(&cfg).await;

    let body = post_json(
        &cfg,
        "/feedback",
        json!({"question": "2+2", "feedback": "It is 4"}),
    )
    .await;
    assert_eq!(body["status"], "success");

    let body = post_json(&cfg, "/chat", json!({"message": "2+2"})).await;
    assert_eq!(body["answer"], "It is 4");
    assert_eq!(body["needs_feedback"], false);
    assert!(
        body["confidence"].as_f64().unwrap() >= 0.6,
        "taught question should match above threshold, got {}",
        body["confidence"]
    );
}

/// Whitespace-only message: fixed prompt, nothing written.
#[tokio::test]
async fn test_chat_whitespace_message_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, find_free_port());
    start_server(&cfg).await;

    let body = post_json(&cfg, "/chat", json!({"message": "   "})).await;

    assert_eq!(body["answer"], "Please ask something.");
    assert_eq!(body["needs_feedback"], false);
    assert_eq!(body["confidence"], 0.0);

    let pool = db::connect(&cfg).await.unwrap();
    let pending = store::list_unresolved(&pool, 10).await.unwrap();
    assert!(pending.is_empty());
}

/// Short feedback is rejected in the response body and writes nothing.
#[tokio::test]
async fn test_feedback_too_short_rejected() {
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, find_free_port());
    start_server(&cfg).await;

    let body = post_json(&cfg, "/feedback", json!({"question": "x", "feedback": "ok"})).await;

    assert_eq!(body["status"], "error");
    assert!(body["message"].as_str().unwrap().contains("too short"));

    let pool = db::connect(&cfg).await.unwrap();
    let entries = store::list_knowledge_entries(&pool).await.unwrap();
    assert!(entries.is_empty());
}

/// Feedback resolves every unresolved row with the same question text.
#[tokio::test]
async fn test_feedback_resolves_logged_questions() {
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, find_free_port());
    start_server(&cfg).await;

    // Ask the same unknown question twice, logging two rows
    post_json(&cfg, "/chat", json!({"message": "what is the answer"})).await;
    post_json(&cfg, "/chat", json!({"message": "what is the answer"})).await;

    let pool = db::connect(&cfg).await.unwrap();
    assert_eq!(store::list_unresolved(&pool, 10).await.unwrap().len(), 2);

    let body = post_json(
        &cfg,
        "/feedback",
        json!({"question": "what is the answer", "feedback": "Forty-two"}),
    )
    .await;
    assert_eq!(body["status"], "success");

    assert!(store::list_unresolved(&pool, 10).await.unwrap().is_empty());
}

/// A near-match below the threshold still reports its actual score.
#[tokio::test]
async fn test_chat_below_threshold_reports_actual_score() {
    let tmp = TempDir::new().unwrap();
    let cfg = test_config(&tmp, find_free_port());
    start_server(&cfg).await;

    let pool = db::connect(&cfg).await.unwrap();
    learning::apply_feedback(
        &pool,
        "how do I configure the database connection pool",
        "Set it in the config file",
    )
    .await
    .unwrap();

    let body = post_json(&cfg, "/chat", json!({"message": "pool"})).await;

    assert_eq!(body["needs_feedback"], true);
    let confidence = body["confidence"].as_f64().unwrap();
    assert!(
        confidence > 0.0 && confidence < 0.6,
        "partial overlap should score between 0 and the threshold, got {}",
        confidence
    );
}

//! End-to-end tests for the Folio assistant.
//!
//! These drive the full path a visitor takes: a config file on disk, the
//! widget shell, the turn controller with its reply delay, and the HTTP
//! gateway the site talks to.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use folio_agent::TurnController;
use folio_channels::{TYPING_INDICATOR, WidgetShell};
use folio_config::AppConfig;
use folio_core::classifier::TopicKey;
use folio_core::event::EventBus;
use folio_core::message::Role;
use folio_gateway::{GatewayState, build_router};

// ── Helpers ──────────────────────────────────────────────────────────────

fn controller_from(config: &AppConfig) -> Arc<TurnController> {
    let catalog = Arc::new(config.response_catalog());
    Arc::new(TurnController::from_config(
        config,
        catalog,
        Arc::new(EventBus::default()),
    ))
}

fn write_config(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, body).unwrap();
    path
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ── Widget scenarios ─────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn e2e_visitor_asks_about_experience() {
    let config = AppConfig::default();
    let catalog = config.response_catalog();
    let mut shell = WidgetShell::new(controller_from(&config));

    shell.open();
    let view = shell.render().await;
    assert!(view.open);
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].role, Role::Assistant);
    assert_eq!(view.messages[0].content, catalog.seed_greeting());

    shell.set_input("Tell me about your experience");
    let handle = shell.submit().unwrap();
    assert_eq!(shell.input(), "");

    tokio::time::sleep(Duration::from_millis(500)).await;
    let view = shell.render().await;
    assert_eq!(view.messages.len(), 2);
    assert!(view.composing);
    assert_eq!(view.to_lines().last().unwrap(), TYPING_INDICATOR);

    let outcome = handle.await.unwrap().unwrap();
    assert_eq!(outcome.topic, TopicKey::Experience);

    let view = shell.render().await;
    assert!(!view.composing);
    assert_eq!(view.messages.len(), 3);
    assert_eq!(view.messages[1].content, "Tell me about your experience");
    assert_eq!(view.messages[2].content, catalog.reply(TopicKey::Experience));
}

#[tokio::test(start_paused = true)]
async fn e2e_closing_widget_keeps_pending_turn() {
    let config = AppConfig::default();
    let mut shell = WidgetShell::new(controller_from(&config));
    shell.open();

    shell.set_input("how do I contact you?");
    let handle = shell.submit().unwrap();
    shell.close();

    let outcome = handle.await.unwrap().unwrap();
    assert_eq!(outcome.topic, TopicKey::Contact);

    shell.open();
    let view = shell.render().await;
    assert_eq!(view.messages.len(), 3);
    assert!(view.indicator.is_none());
}

#[tokio::test(start_paused = true)]
async fn e2e_unmatched_question_gets_default_reply() {
    let config = AppConfig::default();
    let catalog = config.response_catalog();
    let mut shell = WidgetShell::new(controller_from(&config));

    shell.set_input("What's the weather like?");
    let outcome = shell.submit().unwrap().await.unwrap().unwrap();

    assert_eq!(outcome.topic, TopicKey::Default);
    assert_eq!(outcome.reply.content, catalog.reply(TopicKey::Default));
}

#[tokio::test(start_paused = true)]
async fn e2e_blank_input_leaves_transcript_alone() {
    let config = AppConfig::default();
    let mut shell = WidgetShell::new(controller_from(&config));

    shell.set_input("   ");
    assert!(shell.submit().is_none());

    let view = shell.render().await;
    assert_eq!(view.messages.len(), 1);
    assert!(!view.composing);
}

// ── Config on disk ───────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn e2e_config_overrides_flow_into_replies() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[assistant]
reply_delay_ms = 250
seed_greeting = "Welcome to the site!"

[assistant.responses]
resume = "Grab the PDF from the header."
"#,
    );

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.assistant.reply_delay_ms, 250);

    let controller = controller_from(&config);
    assert_eq!(controller.transcript().await[0].content, "Welcome to the site!");

    let started = tokio::time::Instant::now();
    let outcome = controller.submit("Can I see your CV?").await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(250));
    assert_eq!(outcome.topic, TopicKey::Resume);
    assert_eq!(outcome.reply.content, "Grab the PDF from the header.");
}

#[test]
fn e2e_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[assistant.responses]
weather = "Sunny"
"#,
    );
    assert!(AppConfig::load_from(&path).is_err());
}

// ── Gateway ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_gateway_session_round_trip() {
    let mut config = AppConfig::default();
    config.assistant.reply_delay_ms = 0;
    let app = build_router(Arc::new(GatewayState::from_config(config)));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/chat/sessions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let session = body_json(response).await;
    let id = session["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/v1/chat/sessions/{id}/messages?wait=true"))
                .header("content-type", "application/json")
                .body(Body::from(r#"{"message":"Show me your portfolio"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let submitted = body_json(response).await;
    assert_eq!(submitted["outcome"]["topic"], "projects");

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/v1/chat/sessions/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let transcript = body_json(response).await;
    let messages = transcript["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["id"], "1");
    assert_eq!(messages[2]["role"], "assistant");
}

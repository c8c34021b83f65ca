//! HTTP API v1.
//!
//! Endpoints:
//!
//! - `POST /v1/chat`                          — One-shot reply, no delay
//! - `POST /v1/chat/sessions`                 — Open a widget session
//! - `GET  /v1/chat/sessions/{id}`            — Transcript + composing flag
//! - `POST /v1/chat/sessions/{id}/messages`   — Submit a message (`?wait=true` to block for the reply)
//! - `GET  /v1/chat/sessions/{id}/events`     — SSE stream of session events (`lagged` if some were missed)
//! - `GET  /v1/profile`                       — Site owner
//! - `GET  /v1/skills`                        — Skill bars
//! - `GET  /v1/projects`                      — Projects (`?all=true` for non-featured too)

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tracing::{info, warn};

use folio_agent::TurnOutcome;
use folio_core::agent::AssistantState;
use folio_core::classifier::TopicKey;
use folio_core::message::Message;
use folio_core::portfolio::{Profile, Project, Skill};
use folio_core::responder::Responder;

use crate::{GatewayError, SharedState};

/// Build the v1 API router. Nest this under "/v1" in the main router.
pub fn v1_router(state: SharedState) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/chat/sessions", post(create_session_handler))
        .route("/chat/sessions/{id}", get(get_session_handler))
        .route("/chat/sessions/{id}/messages", post(submit_handler))
        .route("/chat/sessions/{id}/events", get(events_handler))
        .route("/profile", get(profile_handler))
        .route("/skills", get(skills_handler))
        .route("/projects", get(projects_handler))
        .with_state(state)
}

// ── DTOs ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub topic: TopicKey,
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub messages: Vec<Message>,
    #[serde(flatten)]
    pub state: AssistantState,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmitQuery {
    #[serde(default)]
    pub wait: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<TurnOutcome>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectsQuery {
    #[serde(default)]
    pub all: bool,
}

// ── Chat ──────────────────────────────────────────────────────────────────

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, GatewayError> {
    let reply = state.responder.respond(&payload.message).await?;
    info!(topic = %reply.topic, message_len = payload.message.len(), "v1/chat request");
    Ok(Json(ChatResponse {
        topic: reply.topic,
        reply: reply.text,
    }))
}

async fn create_session_handler(
    State(state): State<SharedState>,
) -> (StatusCode, Json<SessionResponse>) {
    let (id, controller) = state.open_session().await;
    info!(session = %id, "Chat session opened");
    (
        StatusCode::CREATED,
        Json(SessionResponse {
            id,
            messages: controller.transcript().await,
            state: controller.state(),
        }),
    )
}

async fn get_session_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, GatewayError> {
    let controller = state.session(&id).await?;
    Ok(Json(SessionResponse {
        messages: controller.transcript().await,
        state: controller.state(),
        id,
    }))
}

async fn submit_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<SubmitQuery>,
    Json(payload): Json<ChatRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), GatewayError> {
    let controller = state.session(&id).await?;

    if payload.message.trim().is_empty() {
        return Ok((
            StatusCode::ACCEPTED,
            Json(SubmitResponse {
                accepted: false,
                outcome: None,
            }),
        ));
    }

    // Detached: a dropped connection must not cancel the turn.
    let turn = tokio::spawn(async move { controller.submit(&payload.message).await });

    if query.wait {
        let outcome = turn
            .await
            .map_err(|e| GatewayError::Reply(e.to_string()))?;
        return Ok((
            StatusCode::OK,
            Json(SubmitResponse {
                accepted: outcome.is_some(),
                outcome,
            }),
        ));
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitResponse {
            accepted: true,
            outcome: None,
        }),
    ))
}

async fn events_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Sse<impl futures::Stream<Item = Result<SseEvent, Infallible>>>, GatewayError> {
    let controller = state.session(&id).await?;
    let rx = controller.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(move |result| match result {
        Ok(event) if event.conversation_id() == id => {
            let data = serde_json::to_string(event.as_ref()).unwrap_or_default();
            Some(Ok(SseEvent::default().event(event.name()).data(data)))
        }
        Ok(_) => None,
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            warn!(session = %id, skipped, "SSE subscriber lagged");
            let data = serde_json::json!({ "skipped": skipped }).to_string();
            Some(Ok(SseEvent::default().event("lagged").data(data)))
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

// ── Portfolio ─────────────────────────────────────────────────────────────

async fn profile_handler(State(state): State<SharedState>) -> Json<Profile> {
    Json(state.config.profile.clone())
}

async fn skills_handler(State(state): State<SharedState>) -> Json<Vec<Skill>> {
    Json(state.config.skills.clone())
}

async fn projects_handler(
    State(state): State<SharedState>,
    Query(query): Query<ProjectsQuery>,
) -> Json<Vec<Project>> {
    Json(state.projects.displayed(query.all).into_iter().cloned().collect())
}

//! HTTP API gateway for Folio.
//!
//! Serves the chat widget (sessions, submissions, SSE updates) and the
//! portfolio content the site renders (profile, skills, projects).
//!
//! Built on Axum.

pub mod api_v1;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::{Router, routing::get};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use folio_agent::{ScriptedResponder, TurnController};
use folio_config::AppConfig;
use folio_core::catalog::ResponseCatalog;
use folio_core::error::ResponderError;
use folio_core::event::EventBus;
use folio_core::portfolio::ProjectCatalog;
use folio_core::responder::Responder;

/// Maximum request body size.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// One open chat widget.
pub struct Session {
    pub controller: Arc<TurnController>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Shared application state for the gateway.
pub struct GatewayState {
    pub config: AppConfig,
    pub catalog: Arc<ResponseCatalog>,
    /// Answers one-shot `/v1/chat` requests
    pub responder: Arc<dyn Responder>,
    pub projects: ProjectCatalog,
    pub event_bus: Arc<EventBus>,
    pub sessions: RwLock<HashMap<String, Session>>,
}

impl GatewayState {
    /// Build the immutable parts once from config.
    pub fn from_config(config: AppConfig) -> Self {
        let catalog = Arc::new(config.response_catalog());
        Self {
            responder: Arc::new(ScriptedResponder::new(catalog.clone())),
            catalog,
            projects: config.project_catalog(),
            event_bus: Arc::new(EventBus::default()),
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Open a widget session, evicting the oldest one at capacity.
    pub async fn open_session(&self) -> (String, Arc<TurnController>) {
        let controller = Arc::new(TurnController::from_config(
            &self.config,
            self.catalog.clone(),
            self.event_bus.clone(),
        ));
        let id = controller.conversation_id().to_string();

        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.config.gateway.max_sessions {
            if let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, s)| s.created_at)
                .map(|(k, _)| k.clone())
            {
                sessions.remove(&oldest);
                info!(session = %oldest, "Evicted oldest chat session");
            }
        }
        sessions.insert(
            id.clone(),
            Session {
                controller: controller.clone(),
                created_at: chrono::Utc::now(),
            },
        );

        (id, controller)
    }

    pub async fn session(&self, id: &str) -> Result<Arc<TurnController>, GatewayError> {
        self.sessions
            .read()
            .await
            .get(id)
            .map(|s| s.controller.clone())
            .ok_or_else(|| GatewayError::SessionNotFound(id.to_string()))
    }
}

pub type SharedState = Arc<GatewayState>;

/// Gateway errors, mapped onto HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Chat session not found: {0}")]
    SessionNotFound(String),

    #[error("Message must not be empty")]
    EmptyMessage,

    #[error("Reply failed: {0}")]
    Reply(String),

    #[error("Invalid gateway configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ResponderError> for GatewayError {
    fn from(err: ResponderError) -> Self {
        match err {
            ResponderError::Validation => Self::EmptyMessage,
            ResponderError::Service(reason) => Self::Reply(reason),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::EmptyMessage => StatusCode::BAD_REQUEST,
            Self::Reply(_) | Self::Config(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/v1", api_v1::v1_router(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES)),
        )
}

/// CORS for the site origin.
fn cors_layer(origin: &str) -> Result<CorsLayer, GatewayError> {
    let origin: HeaderValue = origin
        .parse()
        .map_err(|_| GatewayError::Config(format!("invalid allowed_origin {origin:?}")))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600)))
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), GatewayError> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let cors = cors_layer(&config.gateway.allowed_origin)?;

    let state = Arc::new(GatewayState::from_config(config));
    let app = build_router(state).layer(cors);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

use super::state::{ActiveSession, AppState};
use crate::buffer::Snapshot;
use crate::recognition::{ChannelSource, FragmentEvent, RecognitionError};
use crate::session::{LiveSession, SessionConfig, SessionStats};
use crate::translate::{BlockingBackend, SuffixTranslator};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct StartSessionRequest {
    /// Optional session ID (if not provided, generate UUID)
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct FragmentRequest {
    pub transcript: String,

    /// Milliseconds since session start; stamped by the server when absent
    pub timestamp_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct RecognitionErrorRequest {
    /// Recognizer error code, e.g. "no-speech"
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct StopSessionResponse {
    pub session_id: String,
    pub status: String,
    pub stats: SessionStats,
    pub snapshot: Snapshot,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: String) -> axum::response::Response {
    (status, Json(ErrorResponse { error })).into_response()
}

fn no_session() -> axum::response::Response {
    error_response(StatusCode::NOT_FOUND, "No active session".to_string())
}

async fn active_session(state: &AppState) -> Option<Arc<ActiveSession>> {
    let slot = state.session.read().await;
    slot.as_ref()
        .filter(|active| active.session.is_active())
        .cloned()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /session/start
/// Start a new live session (only one may run at a time)
pub async fn start_session(
    State(state): State<AppState>,
    body: Option<Json<StartSessionRequest>>,
) -> impl IntoResponse {
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let mut slot = state.session.write().await;
    if let Some(previous) = slot.as_ref() {
        if previous.session.is_active() {
            return error_response(
                StatusCode::CONFLICT,
                format!("Session {} is already active", previous.session.session_id()),
            );
        }

        // Ended on its own (recognizer sent End); keep its transcript readable
        if let Err(e) = previous.session.stop().await {
            error!("Failed to finalize previous session: {}", e);
        }
        *state.last_snapshot.write().await = previous.session.snapshot().await;
    }

    let mut config = SessionConfig {
        segmenter: state.defaults.segmenter,
        translation_timeout: state.defaults.translation_timeout,
        ..SessionConfig::default()
    };
    if let Some(id) = req.session_id {
        config.session_id = id;
    }

    let (source, sender) = ChannelSource::new();
    let translator = Arc::new(BlockingBackend::new(SuffixTranslator::new(
        state.defaults.translation_suffix.clone(),
    )));
    let session = LiveSession::new(config, Box::new(source), translator);

    if let Err(e) = session.start().await {
        error!("Failed to start session: {}", e);
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to start session: {}", e),
        );
    }

    let session_id = session.session_id().to_string();
    *slot = Some(Arc::new(ActiveSession { session, sender }));

    info!("Session started over HTTP: {}", session_id);

    (
        StatusCode::OK,
        Json(StartSessionResponse {
            session_id: session_id.clone(),
            status: "listening".to_string(),
            message: format!("Session {} started", session_id),
        }),
    )
        .into_response()
}

/// POST /session/fragment
/// Push a recognizer hypothesis into the active session
pub async fn push_fragment(
    State(state): State<AppState>,
    Json(req): Json<FragmentRequest>,
) -> impl IntoResponse {
    let Some(active) = active_session(&state).await else {
        return no_session();
    };

    match active.sender.send_fragment(req.transcript, req.timestamp_ms).await {
        Ok(event) => (StatusCode::ACCEPTED, Json::<FragmentEvent>(event)).into_response(),
        Err(e) => error_response(StatusCode::CONFLICT, format!("Fragment rejected: {}", e)),
    }
}

/// POST /session/error
/// Report a recognizer error; the transcript is left untouched
pub async fn push_error(
    State(state): State<AppState>,
    Json(req): Json<RecognitionErrorRequest>,
) -> impl IntoResponse {
    let Some(active) = active_session(&state).await else {
        return no_session();
    };

    let error = RecognitionError::from_code(&req.error);
    match active.sender.send_error(error).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(e) => error_response(StatusCode::CONFLICT, format!("Error rejected: {}", e)),
    }
}

/// POST /session/stop
/// Stop the active session and return its final transcript
pub async fn stop_session(State(state): State<AppState>) -> impl IntoResponse {
    let Some(active) = state.session.write().await.take() else {
        return no_session();
    };

    let session_id = active.session.session_id().to_string();
    info!("Stopping session over HTTP: {}", session_id);

    match active.session.stop().await {
        Ok(stats) => {
            let snapshot = active.session.snapshot().await;
            *state.last_snapshot.write().await = snapshot.clone();

            (
                StatusCode::OK,
                Json(StopSessionResponse {
                    session_id,
                    status: "stopped".to_string(),
                    stats,
                    snapshot,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to stop session: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to stop session: {}", e),
            )
        }
    }
}

/// GET /session/snapshot
/// Current transcript, or the last stopped session's transcript
pub async fn get_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    let current = state.session.read().await.clone();

    let snapshot = match current {
        Some(active) => active.session.snapshot().await,
        None => state.last_snapshot.read().await.clone(),
    };

    (StatusCode::OK, Json(snapshot)).into_response()
}

/// GET /session/status
/// Statistics of the current session
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    let current = state.session.read().await.clone();

    match current {
        Some(active) => (StatusCode::OK, Json(active.session.stats().await)).into_response(),
        None => no_session(),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

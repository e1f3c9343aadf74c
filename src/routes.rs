use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::{
    analytics::{EventType, FunnelEvent, FunnelMetrics, compute_metrics},
    database::{EVENT_LIMIT, push_event, recent_events},
    error::AppError,
    quiz::{QUESTIONS, Question},
    skin::{SkinType, classify},
    state::AppState,
};

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

#[derive(Deserialize)]
pub struct ClassifyRequest {
    answers: HashMap<u8, String>,
}

#[derive(Serialize)]
pub struct ClassifyResponse {
    skin_type: SkinType,
}

#[derive(Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    current_href: Option<String>,
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    url: String,
}

#[derive(Deserialize)]
pub struct RecordEventRequest {
    session_id: String,
    event_type: EventType,
    #[serde(default)]
    payload: Option<Value>,
}

pub async fn questions_handler() -> Json<&'static [Question]> {
    Json(&QUESTIONS[..])
}

pub async fn classify_handler(Json(payload): Json<ClassifyRequest>) -> Json<ClassifyResponse> {
    let skin_type = classify(&payload.answers);

    #[cfg(feature = "verbose")]
    tracing::info!("Classified {} answers as {:?}", payload.answers.len(), skin_type);

    Json(ClassifyResponse { skin_type })
}

pub async fn checkout_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CheckoutRequest>,
) -> Json<CheckoutResponse> {
    let url = state.checkout.resolve(payload.current_href.as_deref()).await;

    Json(CheckoutResponse { url })
}

/// Recording faults never reach the caller, the funnel keeps moving.
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RecordEventRequest>,
) -> StatusCode {
    let event = FunnelEvent::now(payload.session_id, payload.event_type, payload.payload);

    if let Err(e) = push_event(&state.redis_connection, &event).await {
        warn!("Failed to record event: {e}");
    }

    StatusCode::NO_CONTENT
}

pub async fn metrics_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<FunnelMetrics>, AppError> {
    let supplied_key = headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if supplied_key != Some(state.config.admin_key.as_str()) {
        return Err(AppError::Unauthorized);
    }

    let events = recent_events(&state.redis_connection, EVENT_LIMIT).await?;
    let checkout_clicks = state.checkout.clicks().await?;

    Ok(Json(compute_metrics(&events, checkout_clicks)))
}

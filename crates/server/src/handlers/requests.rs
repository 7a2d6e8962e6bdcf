use crate::config::AppState;
use crate::error::{JsonBody, Result};
use crate::models::{AccessRequest, AccessRequestInput, Ack, Collection};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;
use tracing::info;

/// GET /api/degree2-requests
pub async fn list_requests(State(state): State<AppState>) -> Json<Vec<Value>> {
    info!("GET /api/degree2-requests");
    Json(state.store.load_raw(Collection::Degree2Requests).await)
}

/// POST /api/degree2-requests
pub async fn add_request(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<AccessRequestInput>,
) -> Result<(StatusCode, Json<Ack>)> {
    info!("POST /api/degree2-requests");
    let number = input.require()?;
    state
        .store
        .append(Collection::Degree2Requests, AccessRequest::stamped(number))
        .await?;
    Ok((StatusCode::CREATED, Json(Ack::ok())))
}

//! Code list handlers, shared by the free and premium tiers.
//!
//! The router binds each handler to its collection.

use crate::config::AppState;
use crate::error::{Error, JsonBody, Result};
use crate::models::{Ack, CodeInput, Collection};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::info;

/// GET /api/{codes,degree2-codes}
///
/// Returned verbatim so positions line up with the delete index.
pub async fn list_codes(
    State(state): State<AppState>,
    collection: Collection,
) -> Json<Vec<Value>> {
    info!("GET /api/{}", collection);
    Json(state.store.load_raw(collection).await)
}

/// POST /api/{codes,degree2-codes}
pub async fn add_code(
    State(state): State<AppState>,
    collection: Collection,
    JsonBody(input): JsonBody<CodeInput>,
) -> Result<(StatusCode, Json<Ack>)> {
    info!("POST /api/{}", collection);
    let code = input.require()?;
    state.store.append(collection, code).await?;
    Ok((StatusCode::CREATED, Json(Ack::ok())))
}

/// DELETE /api/{codes,degree2-codes}/:index
///
/// The index refers to the array as last read by the client. Anything that
/// isn't a valid position, including non-numeric input, is a 404.
pub async fn delete_code(
    State(state): State<AppState>,
    collection: Collection,
    Path(index): Path<String>,
) -> Result<Json<Ack>> {
    info!("DELETE /api/{}/{}", collection, index);
    let index: usize = index.trim().parse().map_err(|_| Error::NotFound)?;

    match state.store.remove_at(collection, index).await? {
        Some(_) => Ok(Json(Ack::ok())),
        None => Err(Error::NotFound),
    }
}

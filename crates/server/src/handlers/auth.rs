//! PIN check handlers

use crate::auth::Tier;
use crate::config::AppState;
use crate::error::{Error, JsonBody, Result};
use crate::models::{Ack, PinInput};
use axum::{extract::State, Json};
use tracing::{info, warn};

/// POST /check-pin
pub async fn check_pin(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<PinInput>,
) -> Result<Json<Ack>> {
    info!("POST /check-pin");
    verify(&state, Tier::Free, input)
}

/// POST /check-premium-pin
pub async fn check_premium_pin(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<PinInput>,
) -> Result<Json<Ack>> {
    info!("POST /check-premium-pin");
    verify(&state, Tier::Premium, input)
}

fn verify(state: &AppState, tier: Tier, input: PinInput) -> Result<Json<Ack>> {
    match input.pin {
        Some(pin) if state.pins.check(tier, &pin) => Ok(Json(Ack::ok())),
        _ => {
            warn!("Rejected {:?} tier PIN", tier);
            Err(Error::Unauthorized)
        }
    }
}

use crate::config::AppState;
use crate::error::JsonBody;
use crate::handlers::{
    add_code, add_request, chat_socket, check_pin, check_premium_pin, delete_code, list_codes,
    list_messages, list_requests, post_message,
};
use crate::models::{CodeInput, Collection};
use axum::{
    extract::{Path, State},
    routing::{delete, get, post, MethodRouter},
    Router,
};
use std::path::Path as FsPath;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Assemble every route. Paths that match nothing are served from
/// `public_dir`.
pub fn router(state: AppState, public_dir: impl AsRef<FsPath>) -> Router {
    Router::new()
        // PIN checks
        .route("/check-pin", post(check_pin))
        .route("/check-premium-pin", post(check_premium_pin))
        // Free tier
        .route("/api/codes", code_list(Collection::Codes))
        .route("/api/codes/{index}", code_item(Collection::Codes))
        // Degree 2 premium tier
        .route("/api/degree2-codes", code_list(Collection::Degree2Codes))
        .route("/api/degree2-codes/{index}", code_item(Collection::Degree2Codes))
        .route("/api/degree2-requests", get(list_requests).post(add_request))
        .route("/api/degree2-chat", get(list_messages).post(post_message))
        .route("/ws/degree2-chat", get(chat_socket))
        // Health check
        .route("/health", get(health_check))
        .fallback_service(ServeDir::new(public_dir))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn code_list(collection: Collection) -> MethodRouter<AppState> {
    get(move |state: State<AppState>| list_codes(state, collection)).post(
        move |state: State<AppState>, body: JsonBody<CodeInput>| add_code(state, collection, body),
    )
}

fn code_item(collection: Collection) -> MethodRouter<AppState> {
    delete(move |state: State<AppState>, index: Path<String>| {
        delete_code(state, collection, index)
    })
}

async fn health_check() -> &'static str {
    "OK - Lodge Server"
}

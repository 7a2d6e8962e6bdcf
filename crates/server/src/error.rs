use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required body field was absent or empty
    #[error("Missing {0}")]
    Validation(&'static str),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Delete index out of range or not a number
    #[error("Not found")]
    NotFound,

    /// PIN mismatch
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type Result<T> = core::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Error::Validation(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": self.to_string() }),
            ),
            Error::MalformedBody(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": msg }),
            ),
            Error::NotFound => (StatusCode::NOT_FOUND, json!({ "success": false })),
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, json!({ "success": false })),
            Error::Storage(err) => {
                error!("Storage failure: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": "Storage failure" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor whose rejection is [`Error`], so malformed bodies get
/// the same `{success:false}` shape as every other failure.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::MalformedBody(rejection.body_text())
    }
}

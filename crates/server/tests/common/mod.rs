use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use lodge_server::{router, AppState, ServerConfig};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// A server state rooted in a throwaway directory
pub struct TestApp {
    pub dir: TempDir,
    pub config: ServerConfig,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = ServerConfig::with_data_dir(dir.path().join("data"));
        config.public_dir = dir.path().join("public");
        let state = AppState::new(&config);
        Self { dir, config, state }
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router(self.state.clone(), &self.config.public_dir)
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    /// Send and decode the body as JSON (`Null` when it isn't JSON)
    pub async fn json(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = self.send(method, uri, body).await;
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }
}

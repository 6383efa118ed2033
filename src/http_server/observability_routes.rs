//! Observability HTTP Routes
//!
//! Liveness check reporting the store size.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::store::BookStore;

use super::errors::ApiResult;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub books: usize,
}

/// Health check route at root /health
pub fn health_routes(store: Arc<BookStore>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(store)
}

/// Health check handler
async fn health_handler(State(store): State<Arc<BookStore>>) -> ApiResult<impl IntoResponse> {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        books: store.len()?,
    };

    Ok((StatusCode::OK, Json(response)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            books: 3,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["books"], 3);
    }
}

//! API Documentation Routes

use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Json, Router};
use serde_json::Value;

use super::openapi::{openapi_document, swagger_ui_html, OPENAPI_PATH};

/// Create documentation routes, advertising `server_url` as the API base
pub fn docs_routes(server_url: &str) -> Router {
    let document = Arc::new(openapi_document(server_url));

    Router::new()
        .route("/api-docs", get(swagger_ui_handler))
        .route(OPENAPI_PATH, get(openapi_handler))
        .with_state(document)
}

async fn swagger_ui_handler() -> Html<String> {
    Html(swagger_ui_html())
}

async fn openapi_handler(State(document): State<Arc<Value>>) -> Json<Value> {
    Json(document.as_ref().clone())
}

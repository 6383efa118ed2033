//! # HTTP Server Module
//!
//! Exposes the record store over JSON-over-HTTP with an Axum router.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/books`, `/books/{id}` - Book CRUD
//! - `/api-docs` - Swagger UI, with the document at `/api-docs/openapi.json`

pub mod book_routes;
pub mod config;
pub mod docs_routes;
pub mod errors;
pub mod observability_routes;
pub mod openapi;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;

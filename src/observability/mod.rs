//! Observability for the book service
//!
//! Logging goes through `tracing`; per-request spans come from the
//! `TraceLayer` installed by the HTTP server.

mod logging;

pub use logging::init_logging;

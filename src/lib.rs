//! bookshelf - A small REST API for book records backed by a JSON file
//!
//! The [`store`] owns the collection and its backing file; [`http_server`]
//! exposes it as JSON over HTTP; [`cli`] wires configuration and startup.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod store;

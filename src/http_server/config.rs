//! HTTP Server Configuration
//!
//! Listen address, backing file location, CORS origins and logging.
//! Every field has a default so a partial JSON config file is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 4000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Backing JSON file (default: "db.json")
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// CORS allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Log filter used when RUST_LOG is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit one JSON object per log line (default: false)
    #[serde(default)]
    pub json_logs: bool,
}

/// Port used when neither config nor environment set one
pub const DEFAULT_PORT: u16 = 4000;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_db_path() -> PathBuf {
    PathBuf::from("db.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            db_path: default_db_path(),
            cors_origins: Vec::new(),
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL advertised in the API documentation
    pub fn public_url(&self) -> String {
        let host = match self.host.as_str() {
            "0.0.0.0" | "::" => "localhost",
            other => other,
        };
        format!("http://{}:{}", host, self.port)
    }
}

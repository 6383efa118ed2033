//! CLI command implementations
//!
//! Settings are resolved in layers: built-in defaults, then the optional
//! JSON config file, then environment variables and flags.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::http_server::openapi::openapi_document;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::init_logging;
use crate::store::JsonFileBackend;

use super::args::{Command, SettingsArgs};
use super::errors::{CliError, CliResult};

/// Load a configuration file
pub fn load_config(path: &Path) -> CliResult<HttpServerConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

    serde_json::from_str(&content)
        .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
}

/// Validate resolved settings
fn validate(config: &HttpServerConfig) -> CliResult<()> {
    if config.port == 0 {
        return Err(CliError::config_error("port must be > 0"));
    }

    if config.host.trim().is_empty() {
        return Err(CliError::config_error("host must not be empty"));
    }

    if config.db_path.as_os_str().is_empty() {
        return Err(CliError::config_error("db_path must not be empty"));
    }

    Ok(())
}

/// Resolve defaults, config file and overrides into one config
pub fn resolve_config(settings: &SettingsArgs) -> CliResult<HttpServerConfig> {
    let mut config = match &settings.config {
        Some(path) => load_config(path)?,
        None => HttpServerConfig::default(),
    };

    if let Some(host) = &settings.host {
        config.host = host.clone();
    }
    if let Some(port) = settings.port {
        config.port = port;
    }
    if let Some(db) = &settings.db {
        config.db_path = db.clone();
    }

    validate(&config)?;
    Ok(config)
}

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { settings } => serve(&resolve_config(&settings)?),
        Command::Init { settings } => init(&resolve_config(&settings)?).map(|_| ()),
        Command::Openapi { settings } => openapi(&resolve_config(&settings)?, &mut io::stdout()),
    }
}

/// Create the backing file with an empty book list if it is missing.
///
/// Returns true when a file was written.
pub fn init(config: &HttpServerConfig) -> CliResult<bool> {
    let backend = JsonFileBackend::new(&config.db_path);
    let created = backend.ensure_initialized()?;

    let mut out = io::stdout();
    if created {
        writeln!(out, "Initialized {}", config.db_path.display())?;
    } else {
        writeln!(out, "{} already initialized", config.db_path.display())?;
    }
    Ok(created)
}

/// Write the OpenAPI document for `config` to `out`
pub fn openapi<W: Write>(config: &HttpServerConfig, out: &mut W) -> CliResult<()> {
    let document = openapi_document(&config.public_url());
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)?;
    Ok(())
}

/// Open the store and serve HTTP until Ctrl-C
pub fn serve(config: &HttpServerConfig) -> CliResult<()> {
    init_logging(&config.log_level, config.json_logs);

    let server = HttpServer::open(config.clone())?;
    info!(
        db = %config.db_path.display(),
        addr = %server.socket_addr(),
        "Starting bookshelf"
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config_file() {
        let config = resolve_config(&SettingsArgs::default()).unwrap();
        assert_eq!(config, HttpServerConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookshelf.json");
        fs::write(&path, r#"{"port": 5000, "db_path": "from-file.json", "host": "127.0.0.1"}"#)
            .unwrap();

        let settings = SettingsArgs {
            config: Some(path),
            port: Some(6000),
            ..Default::default()
        };
        let config = resolve_config(&settings).unwrap();

        assert_eq!(config.port, 6000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.db_path, PathBuf::from("from-file.json"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let settings = SettingsArgs {
            config: Some(PathBuf::from("/nonexistent/bookshelf.json")),
            ..Default::default()
        };
        let err = resolve_config(&settings).unwrap_err();
        assert_eq!(err.code_str(), "BOOKSHELF_CONFIG_ERROR");
    }

    #[test]
    fn test_zero_port_rejected() {
        let settings = SettingsArgs {
            port: Some(0),
            ..Default::default()
        };
        assert!(resolve_config(&settings).is_err());
    }

    #[test]
    fn test_init_creates_file_once() {
        let dir = TempDir::new().unwrap();
        let config = HttpServerConfig {
            db_path: dir.path().join("db.json"),
            ..Default::default()
        };

        assert!(init(&config).unwrap());
        assert!(!init(&config).unwrap());
    }

    #[test]
    fn test_openapi_writes_document() {
        let mut out = Vec::new();
        openapi(&HttpServerConfig::with_port(4100), &mut out).unwrap();

        let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["openapi"], "3.0.0");
        assert_eq!(doc["servers"][0]["url"], "http://localhost:4100");
    }
}

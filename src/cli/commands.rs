//! CLI command implementations

use std::fs::{self, File};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::deposit::{DepositValidator, UploadSet, UploadedPart, ValidationOutcome, MANIFEST_PART};
use crate::http_server::{DepositResponse, HttpServer, HttpServerConfig};
use crate::observability::{init_logging, Event, LogFormat};

use super::args::{Cli, Command, PartArg};
use super::errors::{CliError, CliResult};
use super::io::write_outcome;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub server: HttpServerConfig,

    /// tracing filter directive (optional, default "info"); `RUST_LOG` wins
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// "text" or "json" (optional, default "text")
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            log_filter: default_log_filter(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.server.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        if self.server.max_upload_bytes == 0 {
            return Err(CliError::config_error("max_upload_bytes must be > 0"));
        }

        if let Some(dir) = &self.server.spool_dir {
            if !dir.is_dir() {
                return Err(CliError::config_error(format!(
                    "spool_dir is not a directory: {}",
                    dir.display()
                )));
            }
        }

        self.parsed_log_format()?;

        Ok(())
    }

    pub fn parsed_log_format(&self) -> CliResult<LogFormat> {
        self.log_format
            .parse()
            .map_err(|e: String| CliError::config_error(e))
    }
}

/// Main CLI entry point
///
/// Parses arguments, loads configuration, installs logging and dispatches
/// to the appropriate command. This is the only function main.rs calls.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = Config::load_or_default(cli.config.as_deref())?;

    init_logging(&config.log_filter, config.parsed_log_format()?)
        .map_err(|e| CliError::logging_failed(e.to_string()))?;
    info!(event = %Event::ConfigLoaded, source = ?cli.config);

    run_command(cli.command, config)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, config: Config) -> CliResult<()> {
    match cmd {
        Command::Serve { port } => serve(config, port),
        Command::Validate { manifest, parts } => validate(&manifest, &parts),
    }
}

/// Start the deposit HTTP server and block until it stops
pub fn serve(config: Config, port: Option<u16>) -> CliResult<()> {
    let mut server_config = config.server;
    if let Some(port) = port {
        server_config.port = port;
    }

    let server = HttpServer::with_config(server_config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::server_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Validate a deposit from local files and print the outcome
///
/// A rejected deposit is reported on stdout and returned as an error so the
/// process exits non-zero.
pub fn validate(manifest: &Path, parts: &[PartArg]) -> CliResult<()> {
    let outcome = validate_deposit(manifest, parts)?;
    write_outcome(&DepositResponse::from(&outcome))?;

    if outcome.is_success() {
        Ok(())
    } else {
        Err(CliError::deposit_rejected(outcome.violations().len()))
    }
}

/// Run the validation pipeline over files on disk
pub fn validate_deposit(manifest: &Path, parts: &[PartArg]) -> CliResult<ValidationOutcome> {
    let mut uploads = UploadSet::new();
    uploads.push(UploadedPart::new(MANIFEST_PART, open_part(manifest)?));

    for part in parts {
        debug!(id = %part.id, path = %part.path.display(), "registering part");
        uploads.push(UploadedPart::new(part.id.clone(), open_part(&part.path)?));
    }

    Ok(DepositValidator::new().validate(uploads))
}

fn open_part(path: &Path) -> CliResult<File> {
    File::open(path).map_err(|e| {
        CliError::io_error(format!("Failed to open {}: {}", path.display(), e))
    })
}

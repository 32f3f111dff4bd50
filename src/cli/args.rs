//! CLI argument definitions using clap
//!
//! Commands:
//! - ingestgate serve [--config <path>] [--port <port>]
//! - ingestgate validate --manifest <path> [--part <id>=<path>]...

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

/// ingestgate - validate archival deposits against their manifest
#[derive(Parser, Debug)]
#[command(name = "ingestgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the deposit HTTP server
    Serve {
        /// Port to listen on, overrides the configuration file
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate a deposit from local files and print the outcome
    Validate {
        /// Path to the manifest document
        #[arg(long)]
        manifest: PathBuf,

        /// Uploaded object as <id>=<path>; repeat for each object
        #[arg(long = "part", value_name = "ID=PATH")]
        parts: Vec<PartArg>,
    },
}

/// One `--part <id>=<path>` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartArg {
    pub id: String,
    pub path: PathBuf,
}

impl FromStr for PartArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, path) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <id>=<path>, got '{}'", s))?;

        if id.is_empty() {
            return Err(format!("empty id in '{}'", s));
        }
        if path.is_empty() {
            return Err(format!("empty path in '{}'", s));
        }

        Ok(Self {
            id: id.to_string(),
            path: PathBuf::from(path),
        })
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

//! CLI module for ingestgate
//!
//! Provides command-line interface for:
//! - serve: Run the deposit HTTP server
//! - validate: Validate a deposit laid out on local disk

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, PartArg};
pub use commands::{run, run_command, serve, validate, validate_deposit, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_outcome;

//! JSON output for CLI
//!
//! One JSON object per line on stdout, UTF-8 only.

use std::io::{self, Write};

use serde_json::Value;

use crate::http_server::DepositResponse;

use super::errors::CliResult;

fn write_line<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn outcome_line(response: &DepositResponse) -> CliResult<Value> {
    let status = if response.success { "ok" } else { "rejected" };
    Ok(serde_json::json!({
        "status": status,
        "data": serde_json::to_value(response)?
    }))
}

/// Write a validation outcome to stdout
pub fn write_outcome(response: &DepositResponse) -> CliResult<()> {
    let line = outcome_line(response)?;
    write_line(&mut io::stdout(), &line)
}

//! Printing of the output summary.

use crate::error::CliResult;
use ffbar_core::{CoreError, OutputSummary};
use std::io::Write;

/// Writes the summary block, or the summary as pretty JSON.
pub fn print_summary<W: Write + ?Sized>(
    out: &mut W,
    summary: &OutputSummary,
    as_json: bool,
) -> CliResult<()> {
    if as_json {
        let json = serde_json::to_string_pretty(summary)
            .map_err(|e| CoreError::JsonParseError(e.to_string()))?;
        writeln!(out, "{json}")?;
    } else {
        writeln!(out)?;
        writeln!(out, "{summary}")?;
    }
    out.flush()?;
    Ok(())
}

//! The `latsim` command-line tool: JSON configuration in, JSON report out.
//!
//! ```text
//! latsim [CONFIG.json]
//! ```
//!
//! The configuration is read from the file argument, or from stdin when
//! none is given. With `verbose` set, one trace line per applied event is
//! written to stdout ahead of the report.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use latsim_core::SimConfig;
use latsim_engine::{simulate, simulate_with_sink, RunError, RunReport, TraceWriter};
use tracing::debug;

/// Errors surfaced by the command-line tool.
#[derive(Debug)]
pub enum CliError {
    /// More than one positional argument.
    Usage,
    /// Reading the configuration or writing output failed.
    Io(io::Error),
    /// The configuration is not valid JSON for a [`SimConfig`].
    Parse(serde_json::Error),
    /// The configuration was rejected or the run could not start.
    Run(RunError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage => write!(f, "usage: latsim [CONFIG.json]"),
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Parse(e) => write!(f, "malformed configuration: {e}"),
            Self::Run(e) => write!(f, "{e}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Usage => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Run(e) => Some(e),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<RunError> for CliError {
    fn from(e: RunError) -> Self {
        Self::Run(e)
    }
}

/// Parse a configuration from JSON text.
pub fn parse_config(text: &str) -> Result<SimConfig, CliError> {
    Ok(serde_json::from_str(text)?)
}

/// Read a configuration from `path`, or from stdin when `None`.
pub fn read_config(path: Option<&Path>) -> Result<SimConfig, CliError> {
    let text = match path {
        Some(path) => {
            debug!(path = %path.display(), "reading configuration");
            fs::read_to_string(path)?
        }
        None => {
            debug!("reading configuration from stdin");
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    parse_config(&text)
}

/// Run `config`, writing the trace (if verbose) and then the JSON report
/// to `out`.
pub fn execute<W: Write>(config: &SimConfig, mut out: W) -> Result<RunReport, CliError> {
    let report = if config.verbose {
        let mut trace = TraceWriter::new(&mut out);
        let report = simulate_with_sink(config, &mut trace)?;
        trace.finish()?;
        report
    } else {
        simulate(config)?
    };
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(report)
}

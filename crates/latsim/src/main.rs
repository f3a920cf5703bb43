use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use latsim::cli::{self, CliError};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("latsim: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let mut args = std::env::args_os().skip(1);
    let path = args.next().map(PathBuf::from);
    if args.next().is_some() {
        return Err(CliError::Usage);
    }

    let config = cli::read_config(path.as_deref())?;
    let stdout = io::stdout();
    cli::execute(&config, BufWriter::new(stdout.lock()))?;
    Ok(())
}

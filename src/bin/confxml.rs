//! Command-line shell for confxml.
//!
//! Reads a config document from stdin and writes the indented XML to stdout.
//!
//! Usage:
//!   confxml < config.txt > config.xml
use std::io::{self, Read, Write};
use std::process::ExitCode;

use confxml::{ConfXmlError, ErrorKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "confxml=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(kind = %e.kind(), "compile aborted");
            eprintln!("{}", e);
            match e.kind() {
                ErrorKind::Io => ExitCode::from(2),
                _ => ExitCode::from(1),
            }
        }
    }
}

fn run() -> Result<(), ConfXmlError> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let output = confxml::compile_pretty(&input)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

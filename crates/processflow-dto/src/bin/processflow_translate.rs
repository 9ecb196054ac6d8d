//! Translate a backend snapshot file into dashboard records.
//!
//! This binary delegates to `processflow_dto::translate_cli` for the read,
//! translate and write flow, keeping it testable without spawning a process.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::OrthoConfig;
use processflow_dto::translate_cli::{CliError, TranslateRequest, run};
use processflow_dto::{LogFormat, TranslateSettings, UnknownLogFormat};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_FILTER: &str = "warn";

/// `processflow-translate` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "processflow-translate",
    about = "Translate a ProcessFlow backend snapshot into dashboard records",
    version
)]
struct CliArgs {
    /// Backend snapshot JSON with `users`, `processes` and `tasks` arrays.
    #[arg(long, value_name = "path")]
    input: Utf8PathBuf,
    /// Write the dashboard snapshot here instead of stdout.
    #[arg(long, value_name = "path")]
    output: Option<Utf8PathBuf>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("failed to load settings: {0}")]
    Settings(String),
    #[error(transparent)]
    LogFormat(#[from] UnknownLogFormat),
    #[error(transparent)]
    Translate(#[from] CliError),
    #[error("failed to write to stdout: {0}")]
    Stdout(#[from] io::Error),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run_cli(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run_cli(args: CliArgs) -> Result<(), AppError> {
    let settings = TranslateSettings::load_from_iter([OsString::from("processflow-translate")])
        .map_err(|err| AppError::Settings(err.to_string()))?;
    init_tracing(settings.log_format()?);

    let request = TranslateRequest {
        input: args.input,
        output: args.output,
    };
    let translation = run(&request, &settings)?;

    if request.output.is_some() {
        write_line(&mut io::stderr().lock(), &translation.summary.to_string())
    } else {
        write_line(&mut io::stdout().lock(), &translation.rendered)
    }
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);
    let initialised = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(err) = initialised {
        drop(writeln!(io::stderr().lock(), "tracing init failed: {err}"));
    }
}

fn write_line(out: &mut impl Write, message: &str) -> Result<(), AppError> {
    writeln!(out, "{message}")?;
    Ok(())
}

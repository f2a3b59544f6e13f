use super::CliError;
use anyhow::Context;
use fdtd_core::SimulationParameters;
use fdtd_core::domain::{ErrorCode, FdtdError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub(super) enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<ConfigError> for FdtdError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::Read { .. } => FdtdError::new(ErrorCode::ConfigRead, error.to_string()),
            ConfigError::Parse { .. } => FdtdError::new(ErrorCode::Config, error.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Compute(error.into())
    }
}

/// Logs go to stderr so stdout stays a clean data stream. `RUST_LOG`
/// overrides the `-v` count.
pub(super) fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Defaults when no path is given; otherwise a (possibly partial) camelCase
/// JSON document, validated before use.
pub(super) fn load_parameters(path: Option<&Path>) -> Result<SimulationParameters, CliError> {
    let parameters: SimulationParameters = match path {
        None => SimulationParameters::default(),
        Some(path) => {
            let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&source).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        }
    };
    parameters.validate().map_err(FdtdError::from)?;
    debug!(?parameters, "simulation parameters loaded");
    Ok(parameters)
}

/// Writes one line per row to `output`, or to stdout when absent.
pub(super) fn write_rows(output: Option<&Path>, rows: &[String]) -> Result<(), CliError> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory '{}'", parent.display())
                })?;
            }
            let mut content = rows.join("\n");
            content.push('\n');
            fs::write(path, content)
                .with_context(|| format!("failed to write output '{}'", path.display()))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            for row in rows {
                writeln!(handle, "{row}").context("failed to write to stdout")?;
            }
        }
    }
    Ok(())
}

pub(super) fn format_scientific(value: f64) -> String {
    format!("{value:.6e}")
}

mod commands;
mod helpers;

use clap::Parser;
use fdtd_core::domain::{ErrorCode, FdtdError};

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let fdtd_error = error.as_fdtd_error();
            eprintln!("{}", fdtd_error.diagnostic_line());
            eprintln!("{}", fdtd_error.fatal_exit_line());
            fdtd_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("fdtd-rs".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_tracing(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "fdtd-rs",
    version,
    about = "Dispersive-media FDTD reference pulse and material solvers"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Run the 1-D reference pulse and write its power spectrum at one index
    Pulse(commands::PulseArgs),
    /// Tabulate the permittivity of a material model over a wavelength range
    Permittivity(commands::PermittivityArgs),
    /// Drive the sphere-in-vacuum cell grid with the source pulse
    Medium(commands::MediumArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Pulse(args) => commands::run_pulse_command(args),
        CliCommand::Permittivity(args) => commands::run_permittivity_command(args),
        CliCommand::Medium(args) => commands::run_medium_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(FdtdError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<FdtdError> for CliError {
    fn from(error: FdtdError) -> Self {
        Self::Compute(error)
    }
}

impl CliError {
    fn as_fdtd_error(&self) -> FdtdError {
        match self {
            Self::Usage(message) => FdtdError::new(ErrorCode::CliUsage, message.clone()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => FdtdError::new(ErrorCode::CliIo, format!("{error:#}")),
        }
    }
}

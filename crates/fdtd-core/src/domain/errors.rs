use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FdtdResult<T> = Result<T, FdtdError>;

/// Failure class; each maps to a process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FdtdErrorCategory {
    InputValidation,
    IoSystem,
    Computation,
    Internal,
}

impl FdtdErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidation => 2,
            Self::IoSystem => 3,
            Self::Computation => 4,
            Self::Internal => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidation => "InputValidationError",
            Self::IoSystem => "IoSystemError",
            Self::Computation => "ComputationError",
            Self::Internal => "InternalError",
        }
    }
}

/// Stable diagnostic code. The dotted form is what users and scripts match
/// on, so it must not change when message wording does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Spectrum,
    PermittivityTable,
    PulseLength,
    Parameters,
    Config,
    ConfigRead,
    ProbeIndex,
    CliUsage,
    CliIo,
    GridIndex,
    PulseSpectrum,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spectrum => "INPUT.SPECTRUM",
            Self::PermittivityTable => "INPUT.PERMITTIVITY_TABLE",
            Self::PulseLength => "INPUT.PULSE_LENGTH",
            Self::Parameters => "INPUT.PARAMETERS",
            Self::Config => "INPUT.CONFIG",
            Self::ConfigRead => "IO.CONFIG",
            Self::ProbeIndex => "INPUT.PROBE_INDEX",
            Self::CliUsage => "INPUT.CLI_USAGE",
            Self::CliIo => "IO.CLI",
            Self::GridIndex => "RUN.GRID_INDEX",
            Self::PulseSpectrum => "RUN.PULSE_SPECTRUM",
        }
    }

    pub const fn category(self) -> FdtdErrorCategory {
        match self {
            Self::Spectrum
            | Self::PermittivityTable
            | Self::PulseLength
            | Self::Parameters
            | Self::Config
            | Self::ProbeIndex
            | Self::CliUsage => FdtdErrorCategory::InputValidation,
            Self::ConfigRead | Self::CliIo => FdtdErrorCategory::IoSystem,
            Self::GridIndex => FdtdErrorCategory::Computation,
            Self::PulseSpectrum => FdtdErrorCategory::Internal,
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error shared by every stage of a run; module errors convert into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FdtdError {
    code: ErrorCode,
    message: String,
}

impl FdtdError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    pub const fn category(&self) -> FdtdErrorCategory {
        self.code.category()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    /// `ERROR: [CODE] message`, the first line written to stderr.
    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.code, self.message)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}

impl Display for FdtdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category().as_str(),
            self.code,
            self.message
        )
    }
}

impl Error for FdtdError {}

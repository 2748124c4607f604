use std::fmt;
use std::process::ExitCode;
use std::str::FromStr;

use daybucket_core::DayBucketError;
use serde::Serialize;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_INPUT_ERROR: u8 = 2;
pub const EXIT_RUNTIME_ERROR: u8 = 3;

/// How command results and errors are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    /// Best guess used to render an error about the format flag itself.
    pub fn lenient(s: &str) -> Self {
        s.parse().unwrap_or(OutputFormat::Text)
    }
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => Err(CliError::input(format!(
                "Invalid output format '{}'. Expected: json, text",
                s
            ))),
        }
    }
}

#[derive(Debug)]
pub enum CliError {
    /// Bad arguments, unreadable documents or rejected ledger changes.
    Input(String),
    /// File-system failures.
    Runtime(String),
}

impl CliError {
    pub fn input(message: impl Into<String>) -> Self {
        CliError::Input(message.into())
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        CliError::Runtime(message.into())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Input(_) => EXIT_INPUT_ERROR,
            CliError::Runtime(_) => EXIT_RUNTIME_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            CliError::Input(_) => "input",
            CliError::Runtime(_) => "runtime",
        }
    }

    fn message(&self) -> &str {
        match self {
            CliError::Input(message) | CliError::Runtime(message) => message,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for CliError {}

impl From<DayBucketError> for CliError {
    fn from(err: DayBucketError) -> Self {
        CliError::input(err.to_string())
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::runtime(format!("{err:#}"))
    }
}

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: &'a str,
    kind: &'static str,
    exit_code: u8,
}

/// Print an error on stderr and turn it into the process exit code.
pub fn report_error(err: &CliError, output_format: OutputFormat) -> ExitCode {
    let envelope = ErrorEnvelope {
        error: err.message(),
        kind: err.kind(),
        exit_code: err.exit_code(),
    };
    match output_format {
        OutputFormat::Json => match serde_json::to_string_pretty(&envelope) {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("Error: {}", err),
        },
        OutputFormat::Text => eprintln!("Error: {}", err),
    }

    ExitCode::from(err.exit_code())
}

pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}

use thiserror::Error;

/// Failures surfaced by the evaluation core.
///
/// Malformed scraped records are never reported here; the cleaner drops
/// them silently and only the resulting dataset size can trigger
/// `InsufficientData`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("Insufficient data for {stage}: {available} usable listings, need at least {required}.")]
    InsufficientData {
        stage: &'static str,
        available: usize,
        required: usize,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Numerical failure: {0}")]
    Numerical(String),
}

impl EvalError {
    /// Process exit code used by the `carval` binary for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            EvalError::InvalidInput(_) | EvalError::InvalidConfig(_) => 2,
            EvalError::InsufficientData { .. } => 3,
            EvalError::Numerical(_) => 4,
        }
    }
}

pub type EvalResult<T> = Result<T, EvalError>;

/// Exit code for unreadable or malformed input files.
pub const EXIT_BAD_INPUT: u8 = 2;

/// Binary-level failure: the message printed to stderr and the exit code.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// A listings file that could not be opened or decoded.
    pub fn bad_input(message: impl Into<String>) -> Self {
        Self::new(EXIT_BAD_INPUT, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<EvalError> for AppError {
    fn from(err: EvalError) -> Self {
        Self::new(err.exit_code(), err.to_string())
    }
}

//! Process-level error type.
//!
//! Every fallible operation returns an [`AppError`] carrying the diagnostic
//! to print and the exit code to return. Exit code conventions:
//!
//! - `2` — usage, configuration, or file-system errors
//! - `3` — RCDB errors (unreachable file, failed query, missing condition)
//! - `4` — rate-calculator errors (network, HTTP status, label/marker parse)

#[derive(Clone)]
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

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

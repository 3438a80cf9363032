// src/types.rs
use std::io;

/// Pipeline-wide error type. Every stage returns this and the single
/// handler in `main` maps it to an exit code.
#[derive(Debug)]
pub enum IssueError {
    /// A required flag or value is missing or malformed. Raised before any
    /// cryptographic work starts.
    Validation(String),
    /// A native cryptographic operation failed. Carries the OpenSSL
    /// error-stack text verbatim.
    Crypto(String),
    /// File read/write failure.
    Io(io::Error),
}

impl IssueError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Crypto(_) | Self::Io(_) => 1,
        }
    }
}

impl std::fmt::Display for IssueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(s) => write!(f, "{}", s),
            Self::Crypto(s) => write!(f, "Cryptographic operation failed: {}", s),
            Self::Io(e) => write!(f, "IO Error: {}", e),
        }
    }
}

impl std::error::Error for IssueError {}

impl From<io::Error> for IssueError {
    fn from(error: io::Error) -> Self {
        IssueError::Io(error)
    }
}

impl From<openssl::error::ErrorStack> for IssueError {
    fn from(error: openssl::error::ErrorStack) -> Self {
        IssueError::Crypto(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_exit_with_usage_code() {
        let err = IssueError::Validation("user name is empty".to_string());
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "user name is empty");
    }

    #[test]
    fn io_errors_exit_nonzero() {
        let err = IssueError::from(io::Error::new(io::ErrorKind::NotFound, "ca.pem"));
        assert_eq!(err.exit_code(), 1);
    }
}

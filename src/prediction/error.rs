//! Transport error types

use std::fmt;
use thiserror::Error;

/// Failure to obtain a usable answer from the prediction service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Status(code), message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Decode, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Unknown, message)
    }
}

/// Error classification, kept for diagnostics only.
///
/// Every kind is shown to the user the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection refused, reset, DNS failure
    Network,
    /// The client-side deadline elapsed
    Timeout,
    /// Non-2xx response
    Status(u16),
    /// 2xx response whose body is not a prediction payload
    Decode,
    Unknown,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => f.write_str("network"),
            Self::Timeout => f.write_str("timeout"),
            Self::Status(code) => write!(f, "http_{code}"),
            Self::Decode => f.write_str("decode"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(TransportErrorKind::Status(503).to_string(), "http_503");
        assert_eq!(TransportErrorKind::Timeout.to_string(), "timeout");
    }

    #[test]
    fn test_error_displays_message() {
        let err = TransportError::status(404, "Not Found");
        assert_eq!(err.to_string(), "Not Found");
        assert_eq!(err.kind, TransportErrorKind::Status(404));
    }
}

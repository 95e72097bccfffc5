//! Error types for skin analysis requests.
//!
//! Analysis itself is total: once an image is decoded a report is always
//! produced. The only failures are at the input boundary, and both are
//! caller errors that no retry on the same input can fix.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Category of a failed analysis request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No image payload was supplied
    MissingInput,
    /// The payload could not be decoded into an RGB bitmap
    DecodeFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::MissingInput => write!(f, "missing input"),
            ErrorKind::DecodeFailure => write!(f, "decode failure"),
        }
    }
}

/// Error returned by [`crate::SkinAnalyzer`] entry points
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("image required")]
    MissingInput,
    #[error("failed to decode image: {0}")]
    DecodeFailure(#[source] image::ImageError),
}

impl AnalysisError {
    /// Get the error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::MissingInput => ErrorKind::MissingInput,
            AnalysisError::DecodeFailure(_) => ErrorKind::DecodeFailure,
        }
    }

    /// Whether the caller supplied bad input (4xx-equivalent).
    ///
    /// Every error the library produces is a client error; the method exists
    /// so front ends can map errors without matching on variants.
    pub fn is_client_error(&self) -> bool {
        match self.kind() {
            ErrorKind::MissingInput | ErrorKind::DecodeFailure => true,
        }
    }

    /// Wire body for this error
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::from(self)
    }
}

impl From<image::ImageError> for AnalysisError {
    fn from(err: image::ImageError) -> Self {
        AnalysisError::DecodeFailure(err)
    }
}

/// JSON error body: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&AnalysisError> for ErrorResponse {
    fn from(err: &AnalysisError) -> Self {
        let message = match err.kind() {
            ErrorKind::MissingInput => "image required",
            ErrorKind::DecodeFailure => "failed to analyze",
        };
        Self {
            error: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> AnalysisError {
        let err = image::load_from_memory(b"definitely not an image").unwrap_err();
        AnalysisError::from(err)
    }

    #[test]
    fn test_kinds() {
        assert_eq!(AnalysisError::MissingInput.kind(), ErrorKind::MissingInput);
        assert_eq!(decode_error().kind(), ErrorKind::DecodeFailure);
    }

    #[test]
    fn test_all_errors_are_client_errors() {
        assert!(AnalysisError::MissingInput.is_client_error());
        assert!(decode_error().is_client_error());
    }

    #[test]
    fn test_error_response_bodies() {
        let missing = serde_json::to_string(&AnalysisError::MissingInput.to_response()).unwrap();
        assert_eq!(missing, r#"{"error":"image required"}"#);

        let failed = serde_json::to_string(&decode_error().to_response()).unwrap();
        assert_eq!(failed, r#"{"error":"failed to analyze"}"#);
    }

    #[test]
    fn test_decode_failure_keeps_source() {
        use std::error::Error;
        assert!(decode_error().source().is_some());
    }
}

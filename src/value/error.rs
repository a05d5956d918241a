//! Error type for nullable value codecs

use std::fmt;

/// Error raised while decoding or converting a nullable value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NullableError {
    /// Malformed or out-of-range JSON input
    Decode(String),
    /// A driver value could not be coerced to text, or the text is not a valid `u64`
    Conversion(String),
}

impl fmt::Display for NullableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NullableError::Decode(msg) => write!(f, "Decode error: {msg}"),
            NullableError::Conversion(msg) => write!(f, "Conversion error: {msg}"),
        }
    }
}

impl std::error::Error for NullableError {}

impl From<serde_json::Error> for NullableError {
    fn from(err: serde_json::Error) -> Self {
        NullableError::Decode(err.to_string())
    }
}

impl From<std::num::ParseIntError> for NullableError {
    fn from(err: std::num::ParseIntError) -> Self {
        NullableError::Conversion(err.to_string())
    }
}

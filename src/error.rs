use std::fmt::{self, Display};

/// Error type for the crate's fallible edges: UTC-offset parsing and
/// exchange snapshot decoding.
///
/// Formatting itself is total and never returns this; malformed bodies
/// degrade to pass-through output instead.
#[derive(Debug, Clone)]
pub struct ResponseFormatError {
    pub message: String,
}

impl ResponseFormatError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl Display for ResponseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ResponseFormatError {}

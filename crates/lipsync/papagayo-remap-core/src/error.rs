//! Error types for Papagayo remapping.
//!
//! Only structural failures live here. Malformed phoneme lines and unknown
//! phoneme tokens are absorbed by the parser/compiler and reported as data.

use serde::{Deserialize, Serialize};

/// Fatal errors that abort a remap before any host mutation happens.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RemapError {
    /// A fixed-position header line is absent
    #[error("Missing header line {line} ({field})")]
    MissingHeader { field: String, line: usize },

    /// A header line is present but not a usable number
    #[error("Invalid header {field} on line {line}: {raw:?}")]
    InvalidHeader {
        field: String,
        line: usize,
        raw: String,
    },

    /// Frame rate that is zero, negative or not finite
    #[error("Invalid frame rate: {rate}")]
    InvalidFrameRate { rate: f64 },

    /// Phoneme table could not be built
    #[error("Invalid phoneme table: {reason}")]
    InvalidPhonemeTable { reason: String },

    /// Substitute token for unresolved phonemes is itself unknown
    #[error("Unknown substitute phoneme: {token}")]
    UnknownSubstitute { token: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// IO error
    #[error("IO error: {reason}")]
    IoError { reason: String },
}

impl RemapError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingHeader { .. } | Self::InvalidHeader { .. } => "header",
            Self::InvalidFrameRate { .. } => "validation",
            Self::InvalidPhonemeTable { .. } | Self::UnknownSubstitute { .. } => "phonemes",
            Self::SerializationError { .. } => "serialization",
            Self::IoError { .. } => "io",
        }
    }
}

impl From<std::io::Error> for RemapError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RemapError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

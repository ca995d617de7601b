//! Error types for the transcription boundary
//!
//! Service outcomes (could not understand, unreachable) are not errors here;
//! they travel in [`crate::Transcription`]. These errors cover local faults:
//! bad configuration and request-body encoding.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TranscribeError>;

#[derive(Error, Debug)]
pub enum TranscribeError {
    #[error("WAV encoding error: {0}")]
    EncodeError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TranscribeError {
    pub fn encode<S: Into<String>>(msg: S) -> Self {
        Self::EncodeError(msg.into())
    }

    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

//! Transcription service boundary
//!
//! The remote speech-to-text service is an opaque collaborator: it receives
//! a captured clip and either returns text or fails. The three expected
//! outcomes are a tagged value, not exceptions, so the evaluation loop can
//! pattern-match on them:
//!
//! - [`Transcription::Recognized`] — the service returned text.
//! - [`Transcription::UnknownAudio`] — the service could not parse speech.
//! - [`Transcription::ServiceUnavailable`] — request or connectivity failure.
//!
//! [`HttpTranscriber`] is the wire implementation: it posts the clip as a
//! mono 16-bit WAV to a configured endpoint and reads `{"text": ...}` back.

use vocaleval_audio::AudioClip;

mod error;
mod http;
mod wav;

pub use error::{Result, TranscribeError};
pub use http::HttpTranscriber;
pub use wav::encode_wav;

/// Outcome of one transcription request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcription {
    /// Recognized text.
    Recognized(String),
    /// The service could not understand the audio. Recoverable per attempt.
    UnknownAudio,
    /// The service could not be reached or rejected the request.
    /// Recoverable per attempt; the reason is for diagnostics only.
    ServiceUnavailable(String),
}

/// Provider handle owned by the evaluation loop.
///
/// `Err` is reserved for local faults (encoding, misconfiguration); every
/// service-side outcome is a [`Transcription`] variant.
pub trait TranscriptionProvider {
    fn transcribe(&self, clip: &AudioClip) -> Result<Transcription>;
}

//! HTTP-backed transcription provider

use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use ureq::Agent;
use vocaleval_audio::AudioClip;

use crate::error::{Result, TranscribeError};
use crate::wav::encode_wav;
use crate::{Transcription, TranscriptionProvider};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(30);
const WRITE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    text: String,
}

/// Blocking transcription client.
///
/// Posts the clip as `audio/wav` and expects `{"text": "..."}` back. Blank
/// text means the service heard nothing intelligible. Transport failures and
/// non-success statuses surface as [`Transcription::ServiceUnavailable`],
/// never as `Err`, so one bad request cannot abort an evaluation run.
pub struct HttpTranscriber {
    agent: Agent,
    endpoint: String,
}

impl HttpTranscriber {
    pub fn new<S: Into<String>>(endpoint: S) -> Result<Self> {
        let endpoint = endpoint.into();

        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(TranscribeError::invalid_config(format!(
                "endpoint must be an http(s) URL, got '{endpoint}'"
            )));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .timeout_write(WRITE_TIMEOUT)
            .build();

        Ok(Self { agent, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TranscriptionProvider for HttpTranscriber {
    fn transcribe(&self, clip: &AudioClip) -> Result<Transcription> {
        let body = encode_wav(clip)?;
        debug!(
            "Posting {:.2}s clip ({} bytes) to {}",
            clip.duration_secs(),
            body.len(),
            self.endpoint
        );

        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "audio/wav")
            .send_bytes(&body);

        let outcome = match response {
            Ok(response) => match response.into_json::<TranscriptResponse>() {
                Ok(parsed) => {
                    let text = parsed.text.trim();
                    if text.is_empty() {
                        Transcription::UnknownAudio
                    } else {
                        Transcription::Recognized(text.to_string())
                    }
                }
                Err(e) => Transcription::ServiceUnavailable(format!("malformed response: {e}")),
            },
            Err(ureq::Error::Status(code, _)) => {
                Transcription::ServiceUnavailable(format!("HTTP status {code}"))
            }
            Err(ureq::Error::Transport(transport)) => {
                Transcription::ServiceUnavailable(transport.to_string())
            }
        };

        Ok(outcome)
    }
}

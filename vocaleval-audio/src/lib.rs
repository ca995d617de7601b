//! Microphone capture for the evaluation harness
//!
//! One utterance at a time: calibrate against ambient noise immediately
//! before listening, then record until the speaker falls silent or a timeout
//! fires. Capture devices are acquired per call and released when the call
//! returns, so no process-wide microphone state survives between attempts.
//!
//! # Example
//!
//! ```no_run
//! use vocaleval_audio::{AudioSource, CaptureConfig, Microphone};
//!
//! let mut mic = Microphone::new(CaptureConfig::default())?;
//! mic.calibrate()?;
//! let clip = mic.capture()?;
//! println!("captured {:.2}s of audio", clip.duration_secs());
//! # Ok::<(), vocaleval_audio::AudioError>(())
//! ```

use serde::{Deserialize, Serialize};

mod capture;
mod endpoint;
mod error;

pub use capture::Microphone;
pub use endpoint::{derive_threshold, rms, GateState, SpeechGate};
pub use error::{AudioError, Result};

/// A captured mono audio segment.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioClip {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Source of captured utterances, owned by the evaluation loop.
///
/// [`Microphone`] is the device-backed implementation; tests substitute
/// scripted sources.
pub trait AudioSource {
    /// Measure ambient noise and derive the speech-energy threshold.
    /// Called immediately before each [`capture`](Self::capture).
    fn calibrate(&mut self) -> Result<()>;

    /// Block until one utterance completes (speech followed by trailing
    /// silence) or the configured timeout elapses.
    fn capture(&mut self) -> Result<AudioClip>;
}

/// Capture settings.
///
/// Durations are in seconds. Serializes into the harness config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Input device index (None = default device).
    pub device_index: Option<usize>,

    /// Ambient-noise measurement window before each capture.
    pub calibration_duration: f32,

    /// Multiplier applied to the ambient RMS to get the speech threshold.
    pub ambient_margin: f32,

    /// Lower bound on the speech threshold, for very quiet rooms.
    pub threshold_floor: f32,

    /// Analysis window length fed to the endpointer.
    pub window_duration: f32,

    /// Minimum speech duration before trailing silence may end the utterance.
    pub min_speech_duration: f32,

    /// Trailing silence that ends the utterance.
    pub trailing_silence: f32,

    /// Hard ceiling on a single capture, endpointer included.
    pub capture_timeout: f32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device_index: None,
            calibration_duration: 0.5,
            ambient_margin: 2.5,
            threshold_floor: 0.01,
            window_duration: 0.03,
            min_speech_duration: 0.25,
            trailing_silence: 0.8,
            capture_timeout: 15.0,
        }
    }
}

impl CaptureConfig {
    /// Set the input device index.
    pub fn device_index(mut self, index: Option<usize>) -> Self {
        self.device_index = index;
        self
    }

    /// Set the trailing-silence duration.
    pub fn trailing_silence(mut self, seconds: f32) -> Self {
        self.trailing_silence = seconds;
        self
    }

    /// Set the capture timeout.
    pub fn capture_timeout(mut self, seconds: f32) -> Self {
        self.capture_timeout = seconds;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.calibration_duration <= 0.0 {
            return Err(AudioError::invalid_config(
                "calibration_duration must be positive",
            ));
        }

        if self.ambient_margin < 1.0 {
            return Err(AudioError::invalid_config(
                "ambient_margin must be at least 1.0",
            ));
        }

        if self.window_duration <= 0.0 {
            return Err(AudioError::invalid_config(
                "window_duration must be positive",
            ));
        }

        if self.min_speech_duration <= 0.0 {
            return Err(AudioError::invalid_config(
                "min_speech_duration must be positive",
            ));
        }

        if self.trailing_silence <= 0.0 {
            return Err(AudioError::invalid_config(
                "trailing_silence must be positive",
            ));
        }

        if self.capture_timeout <= self.trailing_silence {
            return Err(AudioError::invalid_config(
                "capture_timeout must exceed trailing_silence",
            ));
        }

        Ok(())
    }
}

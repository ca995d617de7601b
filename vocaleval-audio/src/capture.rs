//! Microphone capture with cpal
//!
//! Opens the input device per call, feeds interleaved frames into a
//! parking_lot-guarded sample buffer, and lets [`SpeechGate`] decide when
//! the utterance is over. Dropping the stream handle releases the device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host, Stream, StreamConfig};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::endpoint::{derive_threshold, rms, GateState, SpeechGate};
use crate::error::{AudioError, Result};
use crate::{AudioClip, AudioSource, CaptureConfig};

/// Device-backed [`AudioSource`].
pub struct Microphone {
    config: CaptureConfig,
    host: Host,
    threshold: Option<f32>,
}

/// A live input stream plus its accumulating sample buffer.
///
/// The stream stays open for exactly as long as this value is alive.
struct OpenStream {
    _stream: Stream,
    samples: Arc<Mutex<Vec<f32>>>,
    sample_rate: u32,
}

impl OpenStream {
    /// Take everything captured since the last drain.
    fn drain(&self) -> Vec<f32> {
        std::mem::take(&mut *self.samples.lock())
    }
}

impl Microphone {
    /// Create a microphone source for the configured device.
    pub fn new(config: CaptureConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            host: cpal::default_host(),
            threshold: None,
        })
    }

    /// Speech-energy threshold from the last calibration, if any.
    pub fn threshold(&self) -> Option<f32> {
        self.threshold
    }

    fn select_device(&self) -> Result<Device> {
        match self.config.device_index {
            Some(index) => {
                let mut devices = self.host.input_devices().map_err(|e| {
                    AudioError::device(format!("Failed to enumerate devices: {e}"))
                })?;
                devices
                    .nth(index)
                    .ok_or_else(|| AudioError::device(format!("Device index {index} not found")))
            }
            None => self
                .host
                .default_input_device()
                .ok_or_else(|| AudioError::device("No default input device found")),
        }
    }

    fn open_stream(&self) -> Result<OpenStream> {
        let device = self.select_device()?;
        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());

        let supported = device
            .default_input_config()
            .map_err(|e| AudioError::device(format!("Failed to get device config: {e}")))?;

        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels();
        let stream_config: StreamConfig = supported.config();

        debug!(
            "Opening input stream on '{}' ({} Hz, {} channel(s))",
            device_name, sample_rate, channels
        );

        let samples = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&samples);

        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let mut sink = sink.lock();
                    if channels > 1 {
                        // Left channel only; averaging halves amplitude when
                        // the microphone feeds a single channel.
                        sink.extend(data.chunks(channels as usize).map(|frame| frame[0]));
                    } else {
                        sink.extend_from_slice(data);
                    }
                },
                |err| {
                    warn!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::stream(format!("Failed to build input stream: {e}")))?;

        stream
            .play()
            .map_err(|e| AudioError::stream(format!("Failed to start input stream: {e}")))?;

        Ok(OpenStream {
            _stream: stream,
            samples,
            sample_rate,
        })
    }
}

impl AudioSource for Microphone {
    fn calibrate(&mut self) -> Result<()> {
        let open = self.open_stream()?;

        std::thread::sleep(Duration::from_secs_f32(self.config.calibration_duration));
        let ambient = open.drain();

        let ambient_rms = rms(&ambient);
        let threshold = derive_threshold(
            ambient_rms,
            self.config.ambient_margin,
            self.config.threshold_floor,
        );

        debug!(
            "Calibrated: ambient RMS {:.4}, speech threshold {:.4}",
            ambient_rms, threshold
        );
        self.threshold = Some(threshold);

        Ok(())
    }

    fn capture(&mut self) -> Result<AudioClip> {
        let threshold = self.threshold.ok_or(AudioError::NotCalibrated)?;

        let open = self.open_stream()?;
        let sample_rate = open.sample_rate;

        let window_samples =
            ((self.config.window_duration * sample_rate as f32) as usize).max(1);
        let min_speech_windows =
            (self.config.min_speech_duration / self.config.window_duration).ceil() as usize;
        let close_silence_windows =
            (self.config.trailing_silence / self.config.window_duration).ceil() as usize;

        let mut gate = SpeechGate::new(threshold, min_speech_windows, close_silence_windows);
        let mut captured: Vec<f32> = Vec::new();
        let mut analyzed = 0usize;
        let started = Instant::now();

        loop {
            std::thread::sleep(Duration::from_secs_f32(self.config.window_duration));
            captured.extend(open.drain());

            while captured.len() - analyzed >= window_samples {
                let window_rms = rms(&captured[analyzed..analyzed + window_samples]);
                analyzed += window_samples;

                if gate.observe(window_rms) == GateState::Complete {
                    captured.truncate(analyzed);
                    info!(
                        "Captured {:.2}s utterance",
                        captured.len() as f32 / sample_rate as f32
                    );
                    return Ok(AudioClip::new(captured, sample_rate));
                }
            }

            if started.elapsed().as_secs_f32() > self.config.capture_timeout {
                return Err(AudioError::CaptureTimeout(self.config.capture_timeout));
            }
        }
    }
}

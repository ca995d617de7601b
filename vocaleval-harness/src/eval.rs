//! Evaluation loop
//!
//! One attempt per expected utterance, fully sequential:
//! calibrate → capture → transcribe → score → accumulate. Per-attempt
//! failures of any kind are contained here; the loop always runs to the end
//! of the script.

use anyhow::{Context, Result};
use tracing::{info, warn};

use vocaleval_audio::AudioSource;
use vocaleval_classify::{FeatureVector, TrainingSet};
use vocaleval_score::similarity;
use vocaleval_transcribe::{Transcription, TranscriptionProvider};

use crate::attempt::Attempt;

/// Everything a finished run produces: the ordered attempt records and the
/// frozen training set.
pub struct EvaluationRun {
    pub attempts: Vec<Attempt>,
    pub training: TrainingSet,
}

/// Drives one evaluation run. Owns its audio source and transcription
/// provider; nothing here is shared or global.
pub struct EvaluationLoop<A, T> {
    audio: A,
    transcriber: T,
    correct_threshold: f64,
}

impl<A: AudioSource, T: TranscriptionProvider> EvaluationLoop<A, T> {
    pub fn new(audio: A, transcriber: T, correct_threshold: f64) -> Self {
        Self {
            audio,
            transcriber,
            correct_threshold,
        }
    }

    pub fn correct_threshold(&self) -> f64 {
        self.correct_threshold
    }

    /// Run one attempt per expected utterance.
    ///
    /// Every attempt produces exactly one [`Attempt`] record. Attempts whose
    /// transcription succeeded additionally contribute one training pair, in
    /// the same order. Transcription and capture failures are recorded with
    /// zero scores and never abort the run.
    pub fn run(&mut self, expected_texts: &[String]) -> EvaluationRun {
        let mut attempts = Vec::with_capacity(expected_texts.len());
        let mut training = TrainingSet::new();

        for (idx, expected) in expected_texts.iter().enumerate() {
            let index = idx + 1;
            info!("Attempt {}: please say: '{}'", index, expected);

            let transcription = match self.capture_and_transcribe() {
                Ok(t) => t,
                Err(e) => {
                    warn!("Attempt {}: {:#}", index, e);
                    attempts.push(Attempt::failed(index, expected.clone()));
                    continue;
                }
            };

            match transcription {
                Transcription::Recognized(recognized) => {
                    info!("Attempt {}: recognized '{}'", index, recognized);

                    let score = similarity(&recognized, expected);
                    let label = if score > self.correct_threshold { 1 } else { 0 };

                    training.push(
                        FeatureVector::new(recognized.chars().count(), score),
                        label,
                    );
                    attempts.push(Attempt::scored(
                        index,
                        expected.clone(),
                        recognized,
                        score,
                        label,
                    ));
                }
                Transcription::UnknownAudio => {
                    warn!("Attempt {}: could not understand the audio", index);
                    attempts.push(Attempt::failed(index, expected.clone()));
                }
                Transcription::ServiceUnavailable(reason) => {
                    // Recorded like UnknownAudio: the result table keeps one
                    // row per attempt whatever the failure mode.
                    warn!(
                        "Attempt {}: transcription service unavailable: {}",
                        index, reason
                    );
                    attempts.push(Attempt::failed(index, expected.clone()));
                }
            }
        }

        EvaluationRun { attempts, training }
    }

    /// Capture and transcribe one utterance outside the scripted run, for
    /// the post-training probe.
    pub fn probe(&mut self) -> Result<Transcription> {
        self.capture_and_transcribe()
    }

    fn capture_and_transcribe(&mut self) -> Result<Transcription> {
        self.audio
            .calibrate()
            .context("ambient-noise calibration failed")?;

        let clip = self.audio.capture().context("audio capture failed")?;

        self.transcriber
            .transcribe(&clip)
            .context("transcription request failed")
    }
}

//! vocaleval — evaluate a speech-to-text service against a scripted list of
//! utterances and train a correctness classifier on the outcome.
//!
//! Runs as a single invocation with no arguments; paths, the correctness
//! threshold, the transcription endpoint, and capture timings come from the
//! config file (created with defaults on first run).

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use vocaleval_audio::Microphone;
use vocaleval_classify::{Classifier, FeatureVector};
use vocaleval_harness::{storage, EvaluationLoop, HarnessConfig, HarnessError};
use vocaleval_score::similarity;
use vocaleval_transcribe::{HttpTranscriber, Transcription};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    info!("Starting vocaleval v{}", env!("CARGO_PKG_VERSION"));

    let config = HarnessConfig::load().context("Failed to load configuration")?;
    info!("Configuration loaded from {}", config.config_path.display());

    let expected_texts = match storage::load_expected_texts(&config.expected_texts_path) {
        Ok(texts) => texts,
        Err(HarnessError::SourceMissing(path)) => {
            // Fatal but clean: no capture, no results file.
            error!("{} not found, nothing to evaluate", path);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if expected_texts.is_empty() {
        info!("Expected-text list is empty, nothing to do");
        return Ok(());
    }

    let microphone =
        Microphone::new(config.capture.clone()).context("Failed to set up audio capture")?;
    let transcriber = HttpTranscriber::new(&config.transcribe_endpoint)
        .context("Failed to set up transcription client")?;

    let mut eval = EvaluationLoop::new(microphone, transcriber, config.correct_threshold);
    let run = eval.run(&expected_texts);

    let mut classifier = Classifier::new();
    classifier
        .train(&run.training)
        .context("Failed to train classifier")?;
    info!(
        "Decision tree trained on {} of {} attempts",
        run.training.len(),
        run.attempts.len()
    );

    probe_model(&mut eval, &classifier, &expected_texts[0]);

    storage::save_results(&config.results_path, &run.attempts)
        .context("Failed to save results")?;

    Ok(())
}

/// Capture one more utterance and predict its correctness with the trained
/// model. The probe is compared against the first expected text. Failures
/// here are logged and never fail the run.
fn probe_model<A, T>(eval: &mut EvaluationLoop<A, T>, classifier: &Classifier, reference: &str)
where
    A: vocaleval_audio::AudioSource,
    T: vocaleval_transcribe::TranscriptionProvider,
{
    info!("Speak once more to probe the trained model");

    match eval.probe() {
        Ok(Transcription::Recognized(text)) => {
            info!("Probe recognized: '{}'", text);

            let score = similarity(&text, reference);
            let feature = FeatureVector::new(text.chars().count(), score);

            match classifier.predict(&feature) {
                Ok(1) => info!("Predicted: correct (similarity {:.2})", score),
                Ok(_) => info!("Predicted: incorrect (similarity {:.2})", score),
                Err(e) => warn!("Prediction failed: {}", e),
            }
        }
        Ok(Transcription::UnknownAudio) => {
            warn!("Could not understand the probe audio");
        }
        Ok(Transcription::ServiceUnavailable(reason)) => {
            warn!("Transcription service unavailable for probe: {}", reason);
        }
        Err(e) => {
            warn!("Probe capture failed: {:#}", e);
        }
    }
}

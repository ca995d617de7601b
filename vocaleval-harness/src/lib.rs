//! Vocaleval — scripted speech-recognition evaluation harness
//!
//! The operator reads a scripted list of utterances into a microphone. Each
//! transcription is scored against its expected text; the (length,
//! similarity) features plus a thresholded correctness label train a
//! decision-tree classifier, which is then probed with one more utterance.
//! Attempt records go out as a CSV table.
//!
//! ## Pipeline
//!
//! expected texts → [`EvaluationLoop`] ⇄ transcription provider →
//! similarity scoring → training-set accumulation → classifier train →
//! probe predict → results CSV.

pub mod attempt;
pub mod config;
pub mod eval;
pub mod storage;

mod error;

pub use attempt::Attempt;
pub use config::HarnessConfig;
pub use error::{HarnessError, Result};
pub use eval::{EvaluationLoop, EvaluationRun};

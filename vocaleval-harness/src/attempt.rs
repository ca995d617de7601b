//! Per-utterance attempt records

/// One recorded trial: the operator spoke an expected utterance and the
/// transcription was scored. Immutable once created; attempts are collected
/// in the order they were made.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    /// 1-based attempt number.
    pub index: usize,
    /// The utterance the operator was asked to say.
    pub expected_text: String,
    /// What the service heard. Empty when transcription failed.
    pub recognized_text: String,
    /// Similarity against the expected text, in `[0.0, 1.0]`.
    pub similarity: f64,
    /// Classifier output. Only the post-training probe is predicted, so
    /// this is `None` for every logged attempt.
    pub predicted_label: Option<u8>,
    /// Ground truth from thresholding the similarity.
    pub actual_label: u8,
    /// `similarity * 100`, rounded to two decimals.
    pub accuracy_percent: f64,
}

impl Attempt {
    /// Record a scored attempt.
    pub fn scored(
        index: usize,
        expected_text: String,
        recognized_text: String,
        similarity: f64,
        actual_label: u8,
    ) -> Self {
        Self {
            index,
            expected_text,
            recognized_text,
            similarity,
            predicted_label: None,
            actual_label,
            accuracy_percent: accuracy_percent(similarity),
        }
    }

    /// Record an attempt whose transcription failed: empty text, zero
    /// similarity, label 0.
    pub fn failed(index: usize, expected_text: String) -> Self {
        Self {
            index,
            expected_text,
            recognized_text: String::new(),
            similarity: 0.0,
            predicted_label: None,
            actual_label: 0,
            accuracy_percent: 0.0,
        }
    }
}

/// Similarity as a percentage, rounded to two decimals.
pub fn accuracy_percent(similarity: f64) -> f64 {
    (similarity * 10_000.0).round() / 100.0
}

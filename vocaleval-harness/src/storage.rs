//! CSV load/save for expected texts and attempt records
//!
//! Pure serialization, no decision logic: the expected-text list comes in
//! from `expected_texts.csv` (first column of each row) and the
//! attempt-by-attempt record table goes out to `speech_results.csv`.

use std::path::Path;
use tracing::info;

use crate::attempt::Attempt;
use crate::error::{HarnessError, Result};

const RESULT_HEADER: [&str; 7] = [
    "Attempt",
    "Recognized Text",
    "Expected Text",
    "Similarity Score",
    "Prediction (Correct=1)",
    "Actual (Correct=1)",
    "Accuracy (%)",
];

/// Load the ordered list of expected utterances.
///
/// Fails with [`HarnessError::SourceMissing`] when the file is absent. An
/// existing file with no rows yields an empty list; the caller treats that
/// as a clean nothing-to-do run.
pub fn load_expected_texts<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(HarnessError::SourceMissing(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut expected = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(first) = record.get(0) {
            expected.push(first.to_string());
        }
    }

    info!("Loaded {} expected utterance(s) from {}", expected.len(), path.display());
    Ok(expected)
}

/// Write the attempt records in original order.
///
/// The prediction column is `-` for every logged attempt; only the
/// post-training probe is ever predicted, and it is not part of this table.
pub fn save_results<P: AsRef<Path>>(path: P, attempts: &[Attempt]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(RESULT_HEADER)?;

    for attempt in attempts {
        let prediction = match attempt.predicted_label {
            Some(label) => label.to_string(),
            None => "-".to_string(),
        };

        writer.write_record([
            attempt.index.to_string(),
            attempt.recognized_text.clone(),
            attempt.expected_text.clone(),
            format!("{:.2}", attempt.similarity),
            prediction,
            attempt.actual_label.to_string(),
            format!("{:.2}", attempt.accuracy_percent),
        ])?;
    }

    writer.flush()?;
    info!("Results saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_source_is_reported_as_source_missing() {
        let dir = tempdir().unwrap();
        let err = load_expected_texts(dir.path().join("expected_texts.csv")).unwrap_err();
        assert!(matches!(err, HarnessError::SourceMissing(_)));
    }

    #[test]
    fn loads_first_column_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("expected_texts.csv");
        std::fs::write(&path, "open the door\nhello world,ignored\nturn it off\n").unwrap();

        let expected = load_expected_texts(&path).unwrap();
        assert_eq!(expected, vec!["open the door", "hello world", "turn it off"]);
    }

    #[test]
    fn empty_source_yields_empty_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("expected_texts.csv");
        std::fs::write(&path, "").unwrap();

        let expected = load_expected_texts(&path).unwrap();
        assert!(expected.is_empty());
    }

    #[test]
    fn saves_header_and_rows_in_attempt_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("speech_results.csv");

        let attempts = vec![
            Attempt::scored(1, "open the door".into(), "open the door".into(), 1.0, 1),
            Attempt::failed(2, "hello world".into()),
        ];
        save_results(&path, &attempts).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Attempt,Recognized Text,Expected Text,Similarity Score,\
             Prediction (Correct=1),Actual (Correct=1),Accuracy (%)"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,open the door,open the door,1.00,-,1,100.00"
        );
        assert_eq!(lines.next().unwrap(), "2,,hello world,0.00,-,0,0.00");
        assert!(lines.next().is_none());
    }
}

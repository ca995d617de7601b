//! Binary correctness classifier over transcription features
//!
//! Consumes the (length, similarity) feature vectors accumulated by the
//! evaluation loop and fits a Gini decision tree that predicts whether a
//! transcription is correct. The tree grows without a depth limit, which on
//! the small sample sizes this harness produces essentially memorizes the
//! training data; it is an evaluation aid, not a generalizing model.
//!
//! # Example
//!
//! ```
//! use vocaleval_classify::{Classifier, FeatureVector, TrainingSet};
//!
//! let mut training = TrainingSet::new();
//! training.push(FeatureVector::new(13, 1.0), 1);
//! training.push(FeatureVector::new(4, 0.2), 0);
//!
//! let mut classifier = Classifier::new();
//! classifier.train(&training)?;
//! let label = classifier.predict(&FeatureVector::new(13, 0.95))?;
//! assert_eq!(label, 1);
//! # Ok::<(), vocaleval_classify::ClassifyError>(())
//! ```

use linfa::prelude::*;
use linfa::Dataset;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2};
use tracing::info;

mod error;

pub use error::{ClassifyError, Result};

/// One classifier input: character count and similarity of a transcription.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    /// Character count of the recognized text.
    pub length: usize,
    /// Similarity against the expected text, in `[0.0, 1.0]`.
    pub similarity: f64,
}

impl FeatureVector {
    pub fn new(length: usize, similarity: f64) -> Self {
        Self { length, similarity }
    }

    fn as_row(&self) -> [f64; 2] {
        [self.length as f64, self.similarity]
    }
}

/// Ordered (feature, label) pairs collected during an evaluation run.
///
/// Grown monotonically by the loop, then handed to [`Classifier::train`] as
/// an immutable view. Labels are 0 (incorrect) or 1 (correct).
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    features: Vec<FeatureVector>,
    labels: Vec<u8>,
}

impl TrainingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one labeled feature vector, preserving insertion order.
    pub fn push(&mut self, feature: FeatureVector, label: u8) {
        self.features.push(feature);
        self.labels.push(label);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &[FeatureVector] {
        &self.features
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }
}

/// Decision-tree classifier for transcription correctness.
///
/// Holds no state before [`train`](Self::train); afterwards it owns the
/// fitted tree for the lifetime of the process. Models are never persisted.
pub struct Classifier {
    tree: Option<DecisionTree<f64, usize>>,
}

impl Classifier {
    pub fn new() -> Self {
        Self { tree: None }
    }

    /// Fit the decision tree to the accumulated training set.
    ///
    /// Fails with [`ClassifyError::InsufficientData`] on an empty set rather
    /// than letting the underlying library reject the empty dataset.
    pub fn train(&mut self, training: &TrainingSet) -> Result<()> {
        if training.is_empty() {
            return Err(ClassifyError::insufficient_data(
                "no transcription attempts succeeded, nothing to train on",
            ));
        }

        let records = Array2::from_shape_fn((training.len(), 2), |(i, j)| {
            training.features[i].as_row()[j]
        });
        let targets: Array1<usize> = training.labels.iter().map(|&l| l as usize).collect();
        let dataset = Dataset::new(records, targets);

        let tree = DecisionTree::<f64, usize>::params()
            .split_quality(SplitQuality::Gini)
            .fit(&dataset)
            .map_err(|e| ClassifyError::training(e.to_string()))?;

        info!("Decision tree fitted on {} samples", training.len());
        self.tree = Some(tree);
        Ok(())
    }

    /// Predict the correctness label for a single feature vector.
    pub fn predict(&self, feature: &FeatureVector) -> Result<u8> {
        let tree = self.tree.as_ref().ok_or(ClassifyError::ModelNotTrained)?;

        let row = feature.as_row();
        let observation = Array2::from_shape_fn((1, 2), |(_, j)| row[j]);
        let predicted = tree.predict(&observation);

        Ok(predicted[0] as u8)
    }

    pub fn is_trained(&self) -> bool {
        self.tree.is_some()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled_set() -> TrainingSet {
        let mut set = TrainingSet::new();
        set.push(FeatureVector::new(13, 1.0), 1);
        set.push(FeatureVector::new(14, 0.89), 1);
        set.push(FeatureVector::new(5, 0.21), 0);
        set.push(FeatureVector::new(0, 0.0), 0);
        set
    }

    #[test]
    fn train_on_empty_set_fails_with_insufficient_data() {
        let mut classifier = Classifier::new();
        let err = classifier.train(&TrainingSet::new()).unwrap_err();
        assert!(matches!(err, ClassifyError::InsufficientData(_)));
        assert!(!classifier.is_trained());
    }

    #[test]
    fn predict_before_train_fails_with_model_not_trained() {
        let classifier = Classifier::new();
        let err = classifier
            .predict(&FeatureVector::new(10, 0.9))
            .unwrap_err();
        assert!(matches!(err, ClassifyError::ModelNotTrained));
    }

    #[test]
    fn separable_labels_are_recovered() {
        let mut classifier = Classifier::new();
        classifier.train(&labeled_set()).unwrap();

        assert_eq!(classifier.predict(&FeatureVector::new(13, 0.97)).unwrap(), 1);
        assert_eq!(classifier.predict(&FeatureVector::new(3, 0.1)).unwrap(), 0);
    }

    #[test]
    fn single_sample_is_memorized() {
        let mut set = TrainingSet::new();
        set.push(FeatureVector::new(13, 1.0), 1);

        let mut classifier = Classifier::new();
        classifier.train(&set).unwrap();

        // One pure leaf; every observation lands in it.
        assert_eq!(classifier.predict(&FeatureVector::new(13, 1.0)).unwrap(), 1);
        assert_eq!(classifier.predict(&FeatureVector::new(2, 0.0)).unwrap(), 1);
    }

    #[test]
    fn uniform_labels_train_and_predict() {
        let mut set = TrainingSet::new();
        set.push(FeatureVector::new(4, 0.1), 0);
        set.push(FeatureVector::new(9, 0.4), 0);

        let mut classifier = Classifier::new();
        classifier.train(&set).unwrap();
        assert_eq!(classifier.predict(&FeatureVector::new(7, 0.3)).unwrap(), 0);
    }

    #[test]
    fn training_set_preserves_order() {
        let set = labeled_set();
        assert_eq!(set.len(), 4);
        assert_eq!(set.labels(), &[1, 1, 0, 0]);
        assert_eq!(set.features()[0], FeatureVector::new(13, 1.0));
        assert_eq!(set.features()[3], FeatureVector::new(0, 0.0));
    }
}

//! Error types for classifier training and prediction

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClassifyError>;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Insufficient training data: {0}")]
    InsufficientData(String),

    #[error("Model not trained: call train() before predict()")]
    ModelNotTrained,

    #[error("Training error: {0}")]
    TrainingError(String),
}

impl ClassifyError {
    pub fn insufficient_data<S: Into<String>>(msg: S) -> Self {
        Self::InsufficientData(msg.into())
    }

    pub fn training<S: Into<String>>(msg: S) -> Self {
        Self::TrainingError(msg.into())
    }
}

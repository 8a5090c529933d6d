mod classifier;
mod error;
mod label;
mod model;
mod preprocess;
mod tokenizer;
pub mod builder;

pub use builder::CalorieClassifierBuilder;
pub use classifier::{CalorieClassifier, DEFAULT_SEQUENCE_LENGTH};
pub use error::ClassifierError;
pub use label::CalorieLabel;
pub use model::{CalorieModel, OnnxCalorieModel};
pub use preprocess::normalize;

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Number of words in the vocabulary
    pub vocabulary_size: usize,
    /// Token ID substituted for out-of-vocabulary words
    pub oov_id: u32,
    /// Model input width in tokens
    pub sequence_length: usize,
}

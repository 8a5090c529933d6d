use std::path::Path;
use std::sync::Arc;

use log::info;

use super::classifier::{CalorieClassifier, DEFAULT_SEQUENCE_LENGTH};
use super::error::ClassifierError;
use super::model::{CalorieModel, OnnxCalorieModel};
use crate::runtime::RuntimeConfig;
use crate::vocabulary::Vocabulary;

/// A builder for constructing a [`CalorieClassifier`] with a fluent interface.
///
/// A vocabulary and a model are required; the sequence length defaults to
/// [`DEFAULT_SEQUENCE_LENGTH`]. Set a runtime configuration before calling
/// [`with_onnx_model`](Self::with_onnx_model), since the session is created
/// at that point.
#[derive(Default)]
pub struct CalorieClassifierBuilder {
    vocabulary: Option<Vocabulary>,
    model: Option<Arc<dyn CalorieModel>>,
    sequence_length: Option<usize>,
    runtime_config: RuntimeConfig,
}

impl CalorieClassifierBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime configuration used when loading ONNX models
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Sets an already-loaded vocabulary
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// Loads the vocabulary from a flat JSON file
    ///
    /// # Errors
    /// - `ConfigurationError` if the file cannot be read, parsed, or lacks
    ///   the OOV entry
    pub fn with_vocabulary_file<P: AsRef<Path>>(
        mut self,
        path: P,
    ) -> Result<Self, ClassifierError> {
        self.vocabulary = Some(Vocabulary::from_file(path)?);
        Ok(self)
    }

    /// Sets the model handle the classifier delegates inference to
    pub fn with_model(mut self, model: Arc<dyn CalorieModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Loads an ONNX model file using the current runtime configuration
    ///
    /// # Errors
    /// - `BuildError` if the session cannot be created
    pub fn with_onnx_model<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ClassifierError> {
        let model = OnnxCalorieModel::from_file(path, &self.runtime_config)?;
        self.model = Some(Arc::new(model));
        Ok(self)
    }

    /// Overrides the model input width in tokens
    ///
    /// # Errors
    /// - `BuildError` if `sequence_length` is zero
    pub fn with_sequence_length(
        mut self,
        sequence_length: usize,
    ) -> Result<Self, ClassifierError> {
        if sequence_length == 0 {
            return Err(ClassifierError::BuildError(
                "sequence length must be non-zero".to_string(),
            ));
        }
        self.sequence_length = Some(sequence_length);
        Ok(self)
    }

    /// Builds the classifier
    ///
    /// # Errors
    /// - `BuildError` if no vocabulary or no model was provided
    pub fn build(self) -> Result<CalorieClassifier, ClassifierError> {
        let vocabulary = self
            .vocabulary
            .ok_or_else(|| ClassifierError::BuildError("no vocabulary provided".to_string()))?;
        let model = self
            .model
            .ok_or_else(|| ClassifierError::BuildError("no model provided".to_string()))?;
        let sequence_length = self.sequence_length.unwrap_or(DEFAULT_SEQUENCE_LENGTH);

        info!(
            "Classifier built: {} vocabulary entries, sequence length {}",
            vocabulary.len(),
            sequence_length
        );

        Ok(CalorieClassifier::new(
            Arc::new(vocabulary),
            model,
            sequence_length,
        ))
    }
}

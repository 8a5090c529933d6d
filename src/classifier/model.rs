use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use log::info;
use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;

use super::error::ClassifierError;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// The model capability the pipeline is built against: batched fixed-width
/// token sequences in, batched 3-wide confidence vectors out.
///
/// The classifier holds an implementation behind `Arc<dyn CalorieModel>` and
/// never manages its lifecycle, so any inference backend can plug in without
/// touching the pipeline. Implementations must be stateless with respect to
/// calls (a pure function of the batch) for concurrent classification to be
/// safe.
pub trait CalorieModel: Send + Sync {
    /// Runs the model on a `[batch, sequence_length]` batch of token IDs and
    /// returns a `[batch, 3]` confidence batch ordered {low, average, high}.
    ///
    /// # Errors
    /// - `ModelInvocationError` if inference fails or the output is not a
    ///   2-dimensional batch
    fn predict_batch(&self, batch: &Array2<i64>) -> Result<Array2<f32>, ClassifierError>;
}

/// A [`CalorieModel`] backed by an ONNX Runtime session.
#[derive(Debug)]
pub struct OnnxCalorieModel {
    session: Session,
    input_name: String,
}

impl OnnxCalorieModel {
    /// Loads an ONNX model file into a session configured by `config`.
    ///
    /// # Errors
    /// - `BuildError` if the session cannot be created or the model declares
    ///   no inputs
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        config: &RuntimeConfig,
    ) -> Result<Self, ClassifierError> {
        let session = create_session_builder(config)?.commit_from_file(&path)?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| ClassifierError::BuildError("model declares no inputs".into()))?;

        info!("ONNX model loaded from {:?}", path.as_ref());
        Ok(Self {
            session,
            input_name,
        })
    }
}

impl CalorieModel for OnnxCalorieModel {
    fn predict_batch(&self, batch: &Array2<i64>) -> Result<Array2<f32>, ClassifierError> {
        let input_dyn = batch.clone().into_dyn();
        let input = input_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            self.input_name.as_str(),
            Tensor::from_array(&input).map_err(|e| {
                ClassifierError::ModelInvocationError(format!(
                    "failed to create input tensor: {}",
                    e
                ))
            })?,
        );

        let outputs = self.session.run(input_tensors).map_err(|e| {
            ClassifierError::ModelInvocationError(format!("failed to run model: {}", e))
        })?;
        let output = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
            ClassifierError::ModelInvocationError(format!(
                "failed to extract confidence batch: {}",
                e
            ))
        })?;

        let shape = output.shape().to_vec();
        if shape.len() != 2 {
            return Err(ClassifierError::ModelInvocationError(format!(
                "expected a 2-dimensional confidence batch, got {} dimension(s)",
                shape.len()
            )));
        }

        Array2::from_shape_vec((shape[0], shape[1]), output.iter().copied().collect()).map_err(
            |e| {
                ClassifierError::ModelInvocationError(format!(
                    "failed to read confidence batch: {}",
                    e
                ))
            },
        )
    }
}

/// Bridges a single token sequence to the batched model capability: wraps it
/// as a `[1, sequence_length]` batch and unwraps the single-row result,
/// enforcing the model's output contract at the boundary.
pub(crate) struct ModelAdapter {
    model: Arc<dyn CalorieModel>,
    sequence_length: usize,
}

impl ModelAdapter {
    pub(crate) fn new(model: Arc<dyn CalorieModel>, sequence_length: usize) -> Self {
        Self {
            model,
            sequence_length,
        }
    }

    /// Runs one shaped sequence through the model.
    ///
    /// # Errors
    /// - `ModelInvocationError` if the model does not return exactly one row
    ///   of exactly 3 columns, or returns non-finite scores
    pub(crate) fn predict(&self, sequence: &[u32]) -> Result<[f32; 3], ClassifierError> {
        debug_assert_eq!(sequence.len(), self.sequence_length);

        let batch = Array2::from_shape_vec(
            (1, sequence.len()),
            sequence.iter().map(|&t| t as i64).collect(),
        )
        .map_err(|e| {
            ClassifierError::ModelInvocationError(format!("failed to build input batch: {}", e))
        })?;

        let confidences = self.model.predict_batch(&batch)?;
        let (rows, cols) = confidences.dim();
        if (rows, cols) != (1, 3) {
            return Err(ClassifierError::ModelInvocationError(format!(
                "expected a [1, 3] confidence batch, got [{}, {}]",
                rows, cols
            )));
        }

        let scores = [
            confidences[[0, 0]],
            confidences[[0, 1]],
            confidences[[0, 2]],
        ];
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(ClassifierError::ModelInvocationError(format!(
                "model returned non-finite confidences: {:?}",
                scores
            )));
        }

        Ok(scores)
    }
}

impl fmt::Debug for ModelAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelAdapter")
            .field("sequence_length", &self.sequence_length)
            .finish_non_exhaustive()
    }
}

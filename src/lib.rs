//! A thread-safe calorie-tier classifier for restaurant dish names, backed
//! by a pre-trained ONNX model.
//!
//! A dish name goes through a fixed pipeline: special-character stripping
//! and lower-casing, vocabulary tokenization (unknown words become the OOV
//! token), padding/truncation to the model's input width, a single-item
//! batched model call, and confidence-to-label resolution.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use amaranth::{CalorieClassifier, CalorieLabel, CalorieModel, ClassifierError, Vocabulary};
//! use ndarray::Array2;
//!
//! // Any inference backend works; here a stub that always answers "high".
//! struct StubModel;
//! impl CalorieModel for StubModel {
//!     fn predict_batch(&self, _batch: &Array2<i64>) -> Result<Array2<f32>, ClassifierError> {
//!         Ok(Array2::from_shape_vec((1, 3), vec![0.1, 0.2, 0.7]).unwrap())
//!     }
//! }
//!
//! let classifier = CalorieClassifier::builder()
//!     .with_vocabulary(Vocabulary::from_json(r#"{"hamburger": 7, "OOV": 1}"#)?)
//!     .with_model(Arc::new(StubModel))
//!     .build()?;
//!
//! assert_eq!(classifier.classify("Hamburger!")?, CalorieLabel::HighCalorie);
//! # Ok(())
//! # }
//! ```
//!
//! An ONNX-backed classifier is built the same way with
//! [`CalorieClassifierBuilder::with_onnx_model`] and a vocabulary file:
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use amaranth::CalorieClassifier;
//!
//! let classifier = CalorieClassifier::builder()
//!     .with_vocabulary_file("vocabulary.json")?
//!     .with_onnx_model("model.onnx")?
//!     .build()?;
//!
//! let label = classifier.classify("Caesar Salad")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The classifier holds only immutable injected state, so one instance can
//! be shared across threads with `Arc` and classify concurrently; see
//! [`CalorieClassifier`] for an example.

pub mod asset_manager;
pub mod classifier;
mod runtime;
pub mod vocabulary;

pub use asset_manager::{AssetError, AssetManager, AssetSource};
pub use classifier::{
    normalize, CalorieClassifier, CalorieClassifierBuilder, CalorieLabel, CalorieModel,
    ClassifierError, ClassifierInfo, OnnxCalorieModel, DEFAULT_SEQUENCE_LENGTH,
};
pub use runtime::{create_session_builder, RuntimeConfig};
pub use vocabulary::{Vocabulary, OOV_TOKEN, PAD_ID};

pub fn init_logger() {
    env_logger::init();
}

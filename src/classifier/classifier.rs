use std::sync::Arc;

use super::error::ClassifierError;
use super::label::{resolve, CalorieLabel};
use super::model::{CalorieModel, ModelAdapter};
use super::preprocess::{normalize, pad_sequence};
use super::tokenizer::DishTokenizer;
use crate::vocabulary::Vocabulary;

/// Model input width the reference dish-name model was trained with (the
/// longest dish name in its training corpus, in tokens).
pub const DEFAULT_SEQUENCE_LENGTH: usize = 43;

/// A thread-safe dish-name calorie classifier.
///
/// Composes normalization, tokenization, sequence shaping, model invocation,
/// and label resolution into a single `classify` call. The vocabulary and
/// the model handle are injected at construction and never change, so one
/// instance can serve many concurrent calls with no per-call state.
///
/// # Thread Safety
///
/// This type is `Send + Sync` because all of its fields are: the vocabulary
/// is immutable behind an `Arc`, and [`CalorieModel`] implementations are
/// required to be `Send + Sync` pure functions of their input.
///
/// Multi-thread usage:
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::sync::Arc;
/// use std::thread;
/// use amaranth::{CalorieClassifier, CalorieModel, ClassifierError, Vocabulary};
/// use ndarray::Array2;
///
/// struct StubModel;
/// impl CalorieModel for StubModel {
///     fn predict_batch(&self, _batch: &Array2<i64>) -> Result<Array2<f32>, ClassifierError> {
///         Ok(Array2::from_shape_vec((1, 3), vec![0.1, 0.2, 0.7]).unwrap())
///     }
/// }
///
/// let classifier = Arc::new(
///     CalorieClassifier::builder()
///         .with_vocabulary(Vocabulary::from_json(r#"{"hamburger": 7, "OOV": 1}"#)?)
///         .with_model(Arc::new(StubModel))
///         .build()?,
/// );
///
/// let mut handles = vec![];
/// for _ in 0..3 {
///     let classifier = Arc::clone(&classifier);
///     handles.push(thread::spawn(move || {
///         classifier.classify("hamburger").unwrap();
///     }));
/// }
///
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CalorieClassifier {
    tokenizer: DishTokenizer,
    adapter: ModelAdapter,
    sequence_length: usize,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<CalorieClassifier>();
    }
};

impl CalorieClassifier {
    /// Creates a new CalorieClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::CalorieClassifierBuilder {
        super::builder::CalorieClassifierBuilder::new()
    }

    pub(crate) fn new(
        vocabulary: Arc<Vocabulary>,
        model: Arc<dyn CalorieModel>,
        sequence_length: usize,
    ) -> Self {
        Self {
            tokenizer: DishTokenizer::new(vocabulary),
            adapter: ModelAdapter::new(model, sequence_length),
            sequence_length,
        }
    }

    /// Labels a dish name with its calorie tier.
    ///
    /// Every input produces exactly one label; ties between confidences
    /// resolve deterministically (see [`CalorieLabel`]).
    ///
    /// # Errors
    /// - `ModelInvocationError` if the model violates its output contract
    ///
    /// # Example
    /// ```rust
    /// # use std::sync::Arc;
    /// # use amaranth::{CalorieClassifier, CalorieLabel, CalorieModel, ClassifierError, Vocabulary};
    /// # use ndarray::Array2;
    /// # struct StubModel;
    /// # impl CalorieModel for StubModel {
    /// #     fn predict_batch(&self, _batch: &Array2<i64>) -> Result<Array2<f32>, ClassifierError> {
    /// #         Ok(Array2::from_shape_vec((1, 3), vec![0.1, 0.2, 0.7]).unwrap())
    /// #     }
    /// # }
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let classifier = CalorieClassifier::builder()
    /// #     .with_vocabulary(Vocabulary::from_json(r#"{"hamburger": 7, "OOV": 1}"#)?)
    /// #     .with_model(Arc::new(StubModel))
    /// #     .build()?;
    /// let label = classifier.classify("Hamburger!")?;
    /// assert_eq!(label, CalorieLabel::HighCalorie);
    /// # Ok(())
    /// # }
    /// ```
    pub fn classify(&self, dish_name: &str) -> Result<CalorieLabel, ClassifierError> {
        self.classify_with_scores(dish_name).map(|(label, _)| label)
    }

    /// Like [`classify`](Self::classify), but also returns the raw
    /// `[low, average, high]` confidence triple the label was resolved from.
    pub fn classify_with_scores(
        &self,
        dish_name: &str,
    ) -> Result<(CalorieLabel, [f32; 3]), ClassifierError> {
        let normalized = normalize(dish_name);
        let tokens = self.tokenizer.tokenize(&normalized);
        let sequence = pad_sequence(tokens, self.sequence_length);
        let confidences = self.adapter.predict(&sequence)?;
        Ok((resolve(confidences), confidences))
    }

    /// Returns information about the classifier's current configuration
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            vocabulary_size: self.tokenizer.vocabulary().len(),
            oov_id: self.tokenizer.vocabulary().oov_id(),
            sequence_length: self.sequence_length,
        }
    }
}

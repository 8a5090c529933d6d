use std::sync::{Arc, Mutex};
use std::thread;

use ndarray::Array2;

use amaranth::{
    CalorieClassifier, CalorieLabel, CalorieModel, ClassifierError, Vocabulary,
    DEFAULT_SEQUENCE_LENGTH,
};

/// Answers every batch with the same confidence triple.
struct ConstantModel([f32; 3]);

impl CalorieModel for ConstantModel {
    fn predict_batch(&self, _batch: &Array2<i64>) -> Result<Array2<f32>, ClassifierError> {
        Ok(Array2::from_shape_vec((1, 3), self.0.to_vec()).unwrap())
    }
}

/// Records the batch it was invoked with, for asserting on shaped input.
struct RecordingModel {
    seen: Mutex<Option<Array2<i64>>>,
    scores: [f32; 3],
}

impl RecordingModel {
    fn new(scores: [f32; 3]) -> Self {
        Self {
            seen: Mutex::new(None),
            scores,
        }
    }
}

impl CalorieModel for RecordingModel {
    fn predict_batch(&self, batch: &Array2<i64>) -> Result<Array2<f32>, ClassifierError> {
        *self.seen.lock().unwrap() = Some(batch.clone());
        Ok(Array2::from_shape_vec((1, 3), self.scores.to_vec()).unwrap())
    }
}

fn test_vocabulary() -> Vocabulary {
    Vocabulary::from_json(r#"{"hamburger": 7, "fish": 3, "chips": 4, "OOV": 1}"#).unwrap()
}

fn setup_classifier(scores: [f32; 3]) -> CalorieClassifier {
    CalorieClassifier::builder()
        .with_vocabulary(test_vocabulary())
        .with_model(Arc::new(ConstantModel(scores)))
        .build()
        .expect("Failed to create classifier")
}

#[test]
fn test_end_to_end_classification() -> Result<(), Box<dyn std::error::Error>> {
    let classifier = CalorieClassifier::builder()
        .with_vocabulary(Vocabulary::from_json(r#"{"hamburger": 7, "OOV": 1}"#)?)
        .with_model(Arc::new(ConstantModel([0.1, 0.2, 0.7])))
        .build()?;

    assert_eq!(classifier.classify("Hamburger!")?, CalorieLabel::HighCalorie);
    Ok(())
}

#[test]
fn test_classification_is_deterministic() -> Result<(), ClassifierError> {
    let classifier = setup_classifier([0.6, 0.3, 0.1]);

    let first = classifier.classify("Fish & Chips")?;
    let second = classifier.classify("Fish & Chips")?;
    assert_eq!(first, second);
    assert_eq!(first, CalorieLabel::LowCalorie);
    Ok(())
}

#[test]
fn test_scores_are_exposed() -> Result<(), ClassifierError> {
    let classifier = setup_classifier([0.2, 0.5, 0.3]);

    let (label, scores) = classifier.classify_with_scores("fish chips")?;
    assert_eq!(label, CalorieLabel::AverageCalorie);
    assert_eq!(scores, [0.2, 0.5, 0.3]);
    Ok(())
}

#[test]
fn test_empty_dish_name_still_gets_a_label() -> Result<(), ClassifierError> {
    let classifier = setup_classifier([0.4, 0.4, 0.4]);

    // An empty name tokenizes to nothing and is shaped to all padding;
    // the three-way tie resolves to the earliest class.
    assert_eq!(classifier.classify("")?, CalorieLabel::LowCalorie);
    Ok(())
}

#[test]
fn test_model_receives_padded_sequence() -> Result<(), ClassifierError> {
    let model = Arc::new(RecordingModel::new([0.1, 0.2, 0.7]));
    let classifier = CalorieClassifier::builder()
        .with_vocabulary(test_vocabulary())
        .with_model(Arc::clone(&model) as Arc<dyn CalorieModel>)
        .build()?;

    classifier.classify("Fish & Chips")?;

    let seen = model.seen.lock().unwrap();
    let batch = seen.as_ref().expect("model was not invoked");
    assert_eq!(batch.dim(), (1, DEFAULT_SEQUENCE_LENGTH));
    assert_eq!(batch[[0, 0]], 3);
    assert_eq!(batch[[0, 1]], 4);
    assert!((2..DEFAULT_SEQUENCE_LENGTH).all(|i| batch[[0, i]] == 0));
    Ok(())
}

#[test]
fn test_model_receives_truncated_sequence() -> Result<(), ClassifierError> {
    let model = Arc::new(RecordingModel::new([0.1, 0.2, 0.7]));
    let classifier = CalorieClassifier::builder()
        .with_vocabulary(test_vocabulary())
        .with_model(Arc::clone(&model) as Arc<dyn CalorieModel>)
        .build()?;

    // 50 words, none in the vocabulary: the input must be cut to the
    // model's width with no padding.
    let long_dish = vec!["word"; 50].join(" ");
    classifier.classify(&long_dish)?;

    let seen = model.seen.lock().unwrap();
    let batch = seen.as_ref().expect("model was not invoked");
    assert_eq!(batch.dim(), (1, DEFAULT_SEQUENCE_LENGTH));
    assert!((0..DEFAULT_SEQUENCE_LENGTH).all(|i| batch[[0, i]] == 1));
    Ok(())
}

#[test]
fn test_malformed_model_output_is_surfaced() {
    struct WrongShapeModel;
    impl CalorieModel for WrongShapeModel {
        fn predict_batch(&self, _batch: &Array2<i64>) -> Result<Array2<f32>, ClassifierError> {
            Ok(Array2::zeros((1, 4)))
        }
    }

    let classifier = CalorieClassifier::builder()
        .with_vocabulary(test_vocabulary())
        .with_model(Arc::new(WrongShapeModel))
        .build()
        .unwrap();

    let result = classifier.classify("hamburger");
    assert!(matches!(
        result,
        Err(ClassifierError::ModelInvocationError(_))
    ));
}

#[test]
fn test_thread_safety() {
    let classifier = Arc::new(setup_classifier([0.1, 0.2, 0.7]));
    let mut handles = vec![];

    for _ in 0..3 {
        let classifier = Arc::clone(&classifier);
        let handle = thread::spawn(move || {
            let result = classifier.classify("hamburger");
            assert_eq!(result.unwrap(), CalorieLabel::HighCalorie);
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_classifier_info() {
    let classifier = setup_classifier([0.1, 0.2, 0.7]);
    let info = classifier.info();

    assert_eq!(info.vocabulary_size, 4);
    assert_eq!(info.oov_id, 1);
    assert_eq!(info.sequence_length, DEFAULT_SEQUENCE_LENGTH);
}

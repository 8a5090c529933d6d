use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array2;

use amaranth::{normalize, CalorieClassifier, CalorieModel, ClassifierError, Vocabulary};

struct ConstantModel;

impl CalorieModel for ConstantModel {
    fn predict_batch(&self, _batch: &Array2<i64>) -> Result<Array2<f32>, ClassifierError> {
        Ok(Array2::from_shape_vec((1, 3), vec![0.1, 0.2, 0.7]).unwrap())
    }
}

fn setup_benchmark_classifier() -> CalorieClassifier {
    let vocabulary = Vocabulary::from_json(
        r#"{"double": 2, "bacon": 3, "cheeseburger": 4, "with": 5, "fries": 6,
            "garden": 8, "salad": 9, "OOV": 1}"#,
    )
    .unwrap();

    CalorieClassifier::builder()
        .with_vocabulary(vocabulary)
        .with_model(Arc::new(ConstantModel))
        .build()
        .unwrap()
}

fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("Normalization");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    group.bench_function("plain_name", |b| {
        b.iter(|| normalize(black_box("Double Bacon Cheeseburger")))
    });

    group.bench_function("noisy_name", |b| {
        b.iter(|| normalize(black_box("**Double!! Bacon & Cheeseburger (w/ Fries)**\t")))
    });

    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let classifier = setup_benchmark_classifier();
    let mut group = c.benchmark_group("Classification");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    // Short name, fully in-vocabulary
    group.bench_function("short_dish", |b| {
        b.iter(|| classifier.classify(black_box("Garden Salad")).unwrap())
    });

    // Longer name with out-of-vocabulary words
    group.bench_function("long_dish", |b| {
        b.iter(|| {
            classifier
                .classify(black_box(
                    "Double Bacon Cheeseburger with Fries, onion rings, \
                     a side of coleslaw and a large chocolate milkshake",
                ))
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_normalization, bench_classification);
criterion_main!(benches);

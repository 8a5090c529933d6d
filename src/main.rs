use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use amaranth::{CalorieClassifier, DEFAULT_SEQUENCE_LENGTH};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the vocabulary JSON file (flat word -> id map with an "OOV" entry)
    #[arg(short, long)]
    vocabulary: PathBuf,

    /// Path to the ONNX model file
    #[arg(short, long)]
    model: PathBuf,

    /// Model input width in tokens
    #[arg(long, default_value_t = DEFAULT_SEQUENCE_LENGTH)]
    sequence_length: usize,

    /// Dish names to label; reads dish names from stdin when none are given
    dishes: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let classifier = CalorieClassifier::builder()
        .with_vocabulary_file(&args.vocabulary)?
        .with_onnx_model(&args.model)?
        .with_sequence_length(args.sequence_length)?
        .build()?;

    let classifier_info = classifier.info();
    info!(
        "Classifier ready: {} vocabulary entries, sequence length {}",
        classifier_info.vocabulary_size, classifier_info.sequence_length
    );

    if args.dishes.is_empty() {
        interactive_loop(&classifier)
    } else {
        for dish in &args.dishes {
            label_dish(&classifier, dish)?;
        }
        Ok(())
    }
}

fn interactive_loop(classifier: &CalorieClassifier) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "dish> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let dish = line.trim();
        if dish.is_empty() {
            return Ok(());
        }

        label_dish(classifier, dish)?;
    }
}

fn label_dish(
    classifier: &CalorieClassifier,
    dish: &str,
) -> Result<()> {
    let (label, [low, average, high]) = classifier.classify_with_scores(dish)?;
    println!(
        "{}: {} (low {:.3}, average {:.3}, high {:.3})",
        dish, label, low, average, high
    );
    Ok(())
}

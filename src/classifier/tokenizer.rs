use std::sync::Arc;

use crate::vocabulary::Vocabulary;

/// Maps normalized dish-name text to token IDs through an owned vocabulary.
///
/// Unknown words become the vocabulary's OOV ID, so tokenization is
/// infallible per call; the only failure mode (a vocabulary without an OOV
/// entry) is caught when the vocabulary is loaded.
#[derive(Debug, Clone)]
pub(crate) struct DishTokenizer {
    vocabulary: Arc<Vocabulary>,
}

impl DishTokenizer {
    pub(crate) fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    /// Splits `normalized_text` on runs of whitespace and looks each word up
    /// in the vocabulary. Empty input produces an empty sequence, not a
    /// one-element sequence for the empty string.
    pub(crate) fn tokenize(&self, normalized_text: &str) -> Vec<u32> {
        normalized_text
            .split_whitespace()
            .map(|word| self.vocabulary.token_id(word))
            .collect()
    }

    pub(crate) fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

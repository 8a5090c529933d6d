use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::info;

use crate::classifier::ClassifierError;

/// Reserved vocabulary key whose ID is substituted for unknown words.
pub const OOV_TOKEN: &str = "OOV";

/// Padding value appended to short token sequences. The vocabulary the model
/// was trained with reserves 0, so it never collides with a real token ID.
pub const PAD_ID: u32 = 0;

/// An immutable mapping from normalized dish-name words to token IDs.
///
/// The serialized form is a flat JSON object (`{"word": id, ...}`) produced
/// alongside the trained model. It must contain the reserved [`OOV_TOKEN`]
/// entry; that is validated once here so lookups never fail per call.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: HashMap<String, u32>,
    oov_id: u32,
}

impl Vocabulary {
    /// Builds a vocabulary from an in-memory word→ID map.
    ///
    /// # Errors
    /// - `ConfigurationError` if the map has no `"OOV"` entry
    pub fn from_map(words: HashMap<String, u32>) -> Result<Self, ClassifierError> {
        let oov_id = *words.get(OOV_TOKEN).ok_or_else(|| {
            ClassifierError::ConfigurationError(format!(
                "vocabulary has no \"{}\" entry",
                OOV_TOKEN
            ))
        })?;

        info!(
            "Vocabulary loaded: {} entries, OOV id {}",
            words.len(),
            oov_id
        );
        Ok(Self { words, oov_id })
    }

    /// Parses a vocabulary from its flat JSON serialization.
    pub fn from_json(json: &str) -> Result<Self, ClassifierError> {
        let words: HashMap<String, u32> = serde_json::from_str(json).map_err(|e| {
            ClassifierError::ConfigurationError(format!("failed to parse vocabulary: {}", e))
        })?;
        Self::from_map(words)
    }

    /// Reads and parses a vocabulary JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let json = fs::read_to_string(&path).map_err(|e| {
            ClassifierError::ConfigurationError(format!(
                "failed to read vocabulary file {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;
        Self::from_json(&json)
    }

    /// Returns the token ID for `word`, falling back to the OOV ID for
    /// words the vocabulary does not contain.
    pub fn token_id(&self, word: &str) -> u32 {
        self.words.get(word).copied().unwrap_or(self.oov_id)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    pub fn oov_id(&self) -> u32 {
        self.oov_id
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_oov_entry_is_rejected() {
        let mut words = HashMap::new();
        words.insert("hamburger".to_string(), 7);

        let result = Vocabulary::from_map(words);
        assert!(matches!(
            result,
            Err(ClassifierError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_known_and_unknown_lookups() {
        let vocabulary = Vocabulary::from_json(r#"{"pop": 5, "OOV": 1}"#).unwrap();

        assert_eq!(vocabulary.token_id("pop"), 5);
        assert_eq!(vocabulary.token_id("tart"), 1);
        assert_eq!(vocabulary.oov_id(), 1);
        assert!(vocabulary.contains("pop"));
        assert!(!vocabulary.contains("tart"));
    }

    #[test]
    fn test_invalid_json_is_a_configuration_error() {
        let result = Vocabulary::from_json("not json");
        assert!(matches!(
            result,
            Err(ClassifierError::ConfigurationError(_))
        ));
    }
}

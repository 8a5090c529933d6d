use crate::vocabulary::PAD_ID;

/// Characters stripped from dish names before tokenization. Matches the
/// filter set the model's training pipeline used, plus tab and newline.
/// Apostrophes are deliberately absent.
const SPECIAL_CHARACTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

/// Normalizes a raw dish name for tokenization.
///
/// Removes every character in the special-character set (a pure filter:
/// everything else passes through in order, whitespace is not collapsed)
/// and lower-cases the result. Total function; an empty input yields an
/// empty output.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !SPECIAL_CHARACTERS.contains(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Shapes a token sequence to exactly `target_length` entries: short
/// sequences are padded at the end with [`PAD_ID`], long ones are silently
/// truncated to their first `target_length` tokens.
pub(crate) fn pad_sequence(mut tokens: Vec<u32>, target_length: usize) -> Vec<u32> {
    if tokens.len() >= target_length {
        tokens.truncate(target_length);
    } else {
        tokens.resize(target_length, PAD_ID);
    }
    tokens
}

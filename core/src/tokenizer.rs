use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // Anything outside ASCII lowercase, digits, the Portuguese accented letters and whitespace.
    static ref STRIP: Regex = Regex::new(r"[^a-z0-9áéíóúâêîôûãõç\s]").expect("valid regex");
}

/// Lowercase after NFC composition so that `e` + U+0301 and `é` index as the same letter.
pub fn normalize(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

/// Tokenize text into index terms: normalize, drop every character outside the term
/// alphabet, split on whitespace. Empty tokens never survive.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let cleaned = STRIP.replace_all(&normalized, "");
    cleaned.split_whitespace().map(str::to_string).collect()
}

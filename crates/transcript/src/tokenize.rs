/// Lowercase, strip ASCII punctuation, split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    cleaned.split_whitespace().map(str::to_owned).collect()
}

/// Words per second of raw speech. Zero-length sentences have no tempo.
pub fn tempo(word_count: usize, duration: f64) -> f64 {
    if duration > 0.0 {
        word_count as f64 / duration
    } else {
        0.0
    }
}

pub fn is_question(text: &str) -> bool {
    text.contains('?')
}

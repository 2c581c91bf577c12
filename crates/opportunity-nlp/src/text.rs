//! Text normalization helpers shared by the analyzers.

/// Clean a post for lexicon-based sentiment scoring.
///
/// Lowercases, drops URLs (`http` followed by non-space characters), turns
/// every character outside `a-z` and whitespace into a space, then collapses
/// runs of whitespace.
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut cleaned = String::with_capacity(lowered.len());

    for token in lowered.split_whitespace() {
        let kept = strip_url(token);
        let letters: String = kept
            .chars()
            .map(|c| if c.is_ascii_lowercase() { c } else { ' ' })
            .collect();
        for word in letters.split_whitespace() {
            if !cleaned.is_empty() {
                cleaned.push(' ');
            }
            cleaned.push_str(word);
        }
    }

    cleaned
}

/// Cut a token at the first URL it contains.
fn strip_url(token: &str) -> &str {
    match token.find("http") {
        Some(pos) if token.len() > pos + "http".len() => &token[..pos],
        _ => token,
    }
}

/// Normalize a phrase for whole-word matching.
///
/// Lowercases, replaces non-alphanumeric characters with spaces and pads the
/// result with one space on each side, so `" can t find "` matches the
/// phrase `can't find` only at word boundaries.
pub fn normalize_phrase(text: &str) -> String {
    let spaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let mut padded = String::with_capacity(spaced.len() + 2);
    padded.push(' ');
    for word in spaced.split_whitespace() {
        padded.push_str(word);
        padded.push(' ');
    }
    padded
}

/// Check whether a normalized haystack contains a term at word boundaries.
pub fn contains_term(normalized_haystack: &str, term: &str) -> bool {
    let needle = normalize_phrase(term);
    if needle.trim().is_empty() {
        return false;
    }
    normalized_haystack.contains(&needle)
}

/// Tokenize text into lowercase words.
///
/// Filters out:
/// - Stop words (common English words and chat filler)
/// - Single character tokens
/// - Numbers
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| s.chars().count() > 1)
        .filter(|s| !is_stop_word(s))
        .filter(|s| !s.chars().all(|c| c.is_numeric()))
        .map(String::from)
        .collect()
}

/// Check if a word is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    const STOP_WORDS: &[&str] = &[
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
        "it", "its", "of", "on", "or", "that", "the", "to", "was", "were", "will", "with", "this",
        "they", "but", "have", "had", "what", "when", "where", "who", "which", "why", "how", "all",
        "each", "every", "both", "few", "more", "most", "other", "some", "such", "no", "nor",
        "not", "only", "own", "same", "so", "than", "too", "very", "can", "just", "should", "now",
        "also", "been", "being", "do", "does", "did", "doing", "would", "could", "might", "must",
        "shall", "about", "above", "after", "again", "against", "am", "any", "before", "below",
        "between", "into", "through", "during", "out", "over", "under", "up", "down", "then",
        "once", "here", "there", "if", "else", "while", "because", "until", "we", "you", "your",
        "our", "their", "him", "her", "them", "me", "my", "myself", "itself", "those", "these",
        "his", "im", "ive", "dont", "cant", "get", "got", "really", "even", "still", "much",
        "like", "one", "anyone", "someone", "something", "thing", "things", "know", "think",
    ];

    STOP_WORDS.contains(&word)
}

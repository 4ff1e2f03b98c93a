//! Deciding whether two book records denote the same real-world book.
//!
//! Providers return the same work under different volume ids (editions,
//! reprints, regional listings), so matching falls back from ids to ISBNs to
//! fuzzy title comparison backed by a shared author.

use crate::models::Book;

/// Similarity above which two titles by a shared author are the same book
pub const TITLE_SIMILARITY_THRESHOLD: f64 = 0.85;

const STOP_WORDS: [&str; 11] = [
    "the", "a", "an", "and", "or", "of", "in", "on", "at", "to", "for",
];

fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercases, drops stop-words and punctuation, and collapses whitespace
///
/// Stop-words are matched as whole words before punctuation is removed, so
/// "the-end" loses its "the" while "theend" keeps it.
pub fn clean_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut word = String::new();

    fn flush(word: &mut String, out: &mut String) {
        if !word.is_empty() && !STOP_WORDS.contains(&word.as_str()) {
            out.push_str(word);
        }
        word.clear();
    }

    for c in lowered.chars() {
        if is_word_char(c) {
            word.push(c);
            continue;
        }
        flush(&mut word, &mut out);
        if c.is_whitespace() {
            out.push(' ');
        }
    }
    flush(&mut word, &mut out);

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Order-sensitive share of characters that line up at the same position
///
/// Counts matches over the shorter string's length, divided by the longer
/// string's length. Transposed titles score low.
fn positional_overlap(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if longer.is_empty() {
        return 1.0;
    }

    let matches = shorter
        .iter()
        .zip(longer.iter())
        .filter(|(x, y)| x == y)
        .count();

    matches as f64 / longer.len() as f64
}

/// Symmetric title similarity in `0.0..=1.0`
pub fn title_similarity(a: &str, b: &str) -> f64 {
    if fold(a) == fold(b) {
        return 1.0;
    }

    let a = clean_title(a);
    let b = clean_title(b);

    if a == b {
        return 0.95;
    }
    if a.contains(b.as_str()) || b.contains(a.as_str()) {
        return 0.9;
    }

    positional_overlap(&a, &b)
}

/// True when at least one author appears in both lists, ignoring case and padding
pub fn shares_author(a: &[String], b: &[String]) -> bool {
    let theirs: Vec<String> = b.iter().map(|author| fold(author)).collect();
    a.iter().any(|author| theirs.contains(&fold(author)))
}

/// Identity judgment between two records, checked in priority order
pub fn is_same_book(a: &Book, b: &Book) -> bool {
    if a.id == b.id {
        return true;
    }

    if let (Some(isbn_a), Some(isbn_b)) = (&a.isbn, &b.isbn) {
        if isbn_a == isbn_b {
            return true;
        }
    }

    if fold(&a.title) == fold(&b.title) && shares_author(&a.authors, &b.authors) {
        return true;
    }

    title_similarity(&a.title, &b.title) > TITLE_SIMILARITY_THRESHOLD
        && shares_author(&a.authors, &b.authors)
}

use std::collections::HashMap;

use crate::models::{Book, ReadingProfile, Signal};

pub const TOP_CATEGORIES: usize = 3;
pub const TOP_AUTHORS: usize = 2;

/// Frequency map that remembers the order in which terms were first seen
#[derive(Debug, Default)]
struct TermCounter {
    index: HashMap<String, usize>,
    entries: Vec<Signal>,
}

impl TermCounter {
    fn add(&mut self, raw: &str) {
        let term = raw.trim();
        if term.is_empty() {
            return;
        }

        match self.index.get(term) {
            Some(&position) => self.entries[position].frequency += 1,
            None => {
                self.index.insert(term.to_string(), self.entries.len());
                self.entries.push(Signal::new(term, 1));
            }
        }
    }

    /// Highest frequencies first; equal counts stay in first-seen order
    fn into_ranked(self) -> Vec<Signal> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        entries
    }
}

/// Counts every trimmed category and author across the have-read shelf
pub fn count_signals(have_read: &[Book]) -> (Vec<Signal>, Vec<Signal>) {
    let mut categories = TermCounter::default();
    let mut authors = TermCounter::default();

    for book in have_read {
        for category in &book.categories {
            categories.add(category);
        }
        for author in &book.authors {
            authors.add(author);
        }
    }

    (categories.into_ranked(), authors.into_ranked())
}

/// Builds the ranked interest profile for a reading history
///
/// Returns `None` when there is nothing to personalize on, in which case the
/// caller should fall back to a generic query.
pub fn build_profile(have_read: &[Book]) -> Option<ReadingProfile> {
    if have_read.is_empty() {
        return None;
    }

    let (mut categories, mut authors) = count_signals(have_read);
    if categories.is_empty() && authors.is_empty() {
        return None;
    }

    categories.truncate(TOP_CATEGORIES);
    authors.truncate(TOP_AUTHORS);

    Some(ReadingProfile {
        top_categories: categories,
        top_authors: authors,
    })
}

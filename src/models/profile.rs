use serde::{Deserialize, Serialize};

use super::Book;

/// A term from the reading history with the number of times it occurred
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Signal {
    pub term: String,
    pub frequency: usize,
}

impl Signal {
    pub fn new(term: impl Into<String>, frequency: usize) -> Self {
        Self {
            term: term.into(),
            frequency,
        }
    }
}

/// Ranked interest signals derived from the have-read shelf
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ReadingProfile {
    pub top_categories: Vec<Signal>,
    pub top_authors: Vec<Signal>,
}

/// Response body of the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    /// False when the fallback query was used
    pub personalized: bool,
    pub books: Vec<Book>,
}

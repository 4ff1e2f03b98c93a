use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One of the user's two book lists
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    /// Books the user wants to read
    ToRead,
    /// Books the user has finished
    HaveRead,
}

impl Collection {
    /// The collection a book moves to from this one
    pub fn other(self) -> Self {
        match self {
            Collection::ToRead => Collection::HaveRead,
            Collection::HaveRead => Collection::ToRead,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Collection::ToRead => "to-read",
            Collection::HaveRead => "have-read",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Counts shown alongside the shelves
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShelfStats {
    pub to_read: usize,
    pub have_read: usize,
    pub total: usize,
    /// Sum of page counts over the have-read shelf
    pub pages_read: u64,
}

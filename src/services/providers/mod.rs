/// Book search provider abstraction
///
/// The recommendation engine and the search routes only see this trait, so the
/// concrete provider (Google Books today) is injected at startup and replaced by
/// fakes in tests.
use crate::{error::AppResult, models::Book};

pub mod google_books;

pub use google_books::GoogleBooksProvider;

/// Trait for remote book catalogs
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BookSearchProvider: Send + Sync {
    /// Free-text search
    ///
    /// Supports the provider's field prefixes (`subject:`, `inauthor:`, `isbn:`).
    /// `language` restricts results to one language code.
    async fn search_books(
        &self,
        query: &str,
        max_results: u32,
        language: &str,
    ) -> AppResult<Vec<Book>>;

    /// Fetch a single volume by its provider id
    async fn get_volume(&self, id: &str) -> AppResult<Book>;

    /// Look up the first volume carrying this ISBN
    async fn lookup_isbn(&self, isbn: &str) -> AppResult<Option<Book>>;
}

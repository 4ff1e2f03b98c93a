use crate::{error::AppResult, models::Book, services::providers::BookSearchProvider};

pub const DEFAULT_SEARCH_RESULTS: u32 = 20;
pub const DEFAULT_SIMILAR_RESULTS: u32 = 10;
/// Google Books rejects larger page sizes
pub const MAX_PROVIDER_RESULTS: u32 = 40;

/// Free-text search, with the page size clamped to what the provider accepts
pub async fn search_books(
    provider: &dyn BookSearchProvider,
    query: &str,
    max_results: Option<u32>,
    language: &str,
) -> AppResult<Vec<Book>> {
    let max_results = max_results
        .unwrap_or(DEFAULT_SEARCH_RESULTS)
        .clamp(1, MAX_PROVIDER_RESULTS);

    provider.search_books(query, max_results, language).await
}

/// Query for books like `book`: its first category, else its first author
pub fn similar_query(book: &Book) -> Option<String> {
    let category = book
        .categories
        .iter()
        .map(|c| c.trim())
        .find(|c| !c.is_empty());
    if let Some(category) = category {
        return Some(format!("subject:{}", category));
    }

    book.authors
        .iter()
        .map(|a| a.trim())
        .find(|a| !a.is_empty())
        .map(|author| format!("inauthor:{}", author))
}

/// Books similar to `book`, never including `book` itself
pub async fn similar_books(
    provider: &dyn BookSearchProvider,
    book: &Book,
    max_results: Option<u32>,
    language: &str,
) -> AppResult<Vec<Book>> {
    let Some(query) = similar_query(book) else {
        tracing::debug!(book_id = %book.id, "No categories or authors to find similar books");
        return Ok(Vec::new());
    };

    let max_results = max_results
        .unwrap_or(DEFAULT_SIMILAR_RESULTS)
        .clamp(1, MAX_PROVIDER_RESULTS);

    let books = provider.search_books(&query, max_results, language).await?;
    Ok(books.into_iter().filter(|b| b.id != book.id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockBookSearchProvider;
    use mockall::predicate::eq;

    fn book(id: &str, categories: &[&str], authors: &[&str]) -> Book {
        Book {
            id: id.to_string(),
            title: format!("Book {}", id),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_similar_query_prefers_category() {
        let b = book("1", &["Fantasy", "Adventure"], &["J.R.R. Tolkien"]);
        assert_eq!(similar_query(&b), Some("subject:Fantasy".to_string()));
    }

    #[test]
    fn test_similar_query_falls_back_to_author() {
        let b = book("1", &[], &["Ursula K. Le Guin"]);
        assert_eq!(similar_query(&b), Some("inauthor:Ursula K. Le Guin".to_string()));
    }

    #[test]
    fn test_similar_query_none_without_terms() {
        assert_eq!(similar_query(&book("1", &[" "], &[])), None);
    }

    #[tokio::test]
    async fn test_search_clamps_and_defaults_page_size() {
        let mut provider = MockBookSearchProvider::new();
        provider
            .expect_search_books()
            .with(eq("dune"), eq(DEFAULT_SEARCH_RESULTS), eq("en"))
            .times(1)
            .returning(|_, _, _| Ok(vec![]));
        provider
            .expect_search_books()
            .with(eq("dune"), eq(MAX_PROVIDER_RESULTS), eq("en"))
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        search_books(&provider, "dune", None, "en").await.unwrap();
        search_books(&provider, "dune", Some(500), "en").await.unwrap();
    }

    #[tokio::test]
    async fn test_similar_books_excludes_source_book() {
        let mut provider = MockBookSearchProvider::new();
        provider
            .expect_search_books()
            .with(eq("subject:Fantasy"), eq(DEFAULT_SIMILAR_RESULTS), eq("en"))
            .returning(|_, _, _| Ok(vec![book("1", &[], &[]), book("2", &[], &[])]));

        let source = book("1", &["Fantasy"], &["J.R.R. Tolkien"]);
        let similar = similar_books(&provider, &source, None, "en").await.unwrap();

        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].id, "2");
    }

    #[tokio::test]
    async fn test_similar_books_without_terms_skips_provider() {
        let provider = MockBookSearchProvider::new();
        let similar = similar_books(&provider, &book("1", &[], &[]), None, "en")
            .await
            .unwrap();
        assert!(similar.is_empty());
    }
}

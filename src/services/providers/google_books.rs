/// Google Books API provider
///
/// Wraps the public `volumes` endpoint:
/// 1. Search: GET /volumes?q=...&maxResults=...&langRestrict=...
/// 2. Volume: GET /volumes/{id}
/// 3. ISBN: a search for `isbn:<isbn>`, first hit
///
/// An API key is optional; without one Google applies anonymous quotas.
use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{Book, VolumeItem, VolumesResponse},
    services::providers::BookSearchProvider,
};
use reqwest::{Client as HttpClient, StatusCode};

const SEARCH_CACHE_TTL: u64 = 3600; // 1 hour
const VOLUME_CACHE_TTL: u64 = 86400; // 1 day

#[derive(Clone)]
pub struct GoogleBooksProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    cache: Option<Cache>,
}

impl GoogleBooksProvider {
    pub fn new(api_key: Option<String>, api_url: String, cache: Option<Cache>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    /// Query string for a search, with the key appended when configured
    fn search_params(&self, query: &str, max_results: u32, language: &str) -> Vec<(String, String)> {
        let mut params = vec![
            ("q".to_string(), query.to_string()),
            ("maxResults".to_string(), max_results.to_string()),
            ("langRestrict".to_string(), language.to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("key".to_string(), key.clone()));
        }
        params
    }

    async fn fetch_volumes(&self, params: &[(String, String)]) -> AppResult<Vec<Book>> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Google Books API returned status {}: {}",
                status, body
            )));
        }

        let volumes: VolumesResponse = response.json().await?;
        Ok(parse_volumes(volumes))
    }
}

/// Maps a search response into books; a response without `items` is empty
fn parse_volumes(response: VolumesResponse) -> Vec<Book> {
    response
        .items
        .unwrap_or_default()
        .into_iter()
        .map(Book::from)
        .collect()
}

#[async_trait::async_trait]
impl BookSearchProvider for GoogleBooksProvider {
    async fn search_books(
        &self,
        query: &str,
        max_results: u32,
        language: &str,
    ) -> AppResult<Vec<Book>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        cached!(
            self.cache,
            CacheKey::BookSearch {
                query: query.to_string(),
                max_results,
                language: language.to_string(),
            },
            SEARCH_CACHE_TTL,
            async move {
                let params = self.search_params(query, max_results, language);
                let books = self.fetch_volumes(&params).await?;

                tracing::info!(
                    query = %query,
                    language = %language,
                    results = books.len(),
                    provider = "google_books",
                    "Book search completed"
                );

                Ok::<_, AppError>(books)
            }
        )
    }

    async fn get_volume(&self, id: &str) -> AppResult<Book> {
        if id.trim().is_empty() {
            return Err(AppError::InvalidInput("Volume id cannot be empty".to_string()));
        }

        cached!(
            self.cache,
            CacheKey::Volume(id.to_string()),
            VOLUME_CACHE_TTL,
            async move {
                let url = format!("{}/{}", self.api_url, id);
                let mut request = self.http_client.get(&url);
                if let Some(key) = &self.api_key {
                    request = request.query(&[("key", key.as_str())]);
                }

                let response = request.send().await?;

                if response.status() == StatusCode::NOT_FOUND {
                    return Err(AppError::NotFound(format!("Volume {} not found", id)));
                }
                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(AppError::ExternalApi(format!(
                        "Google Books API returned status {}: {}",
                        status, body
                    )));
                }

                let item: VolumeItem = response.json().await?;

                tracing::info!(volume_id = %id, provider = "google_books", "Volume fetched");

                Ok(Book::from(item))
            }
        )
    }

    async fn lookup_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let isbn = isbn.trim();
        if isbn.is_empty() {
            return Err(AppError::InvalidInput("ISBN cannot be empty".to_string()));
        }

        cached!(
            self.cache,
            CacheKey::Isbn(isbn.to_string()),
            VOLUME_CACHE_TTL,
            async move {
                let mut params = vec![("q".to_string(), format!("isbn:{}", isbn))];
                if let Some(key) = &self.api_key {
                    params.push(("key".to_string(), key.clone()));
                }

                let books = self.fetch_volumes(&params).await?;

                tracing::info!(
                    isbn = %isbn,
                    found = !books.is_empty(),
                    provider = "google_books",
                    "ISBN lookup completed"
                );

                Ok::<_, AppError>(books.into_iter().next())
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider(api_key: Option<&str>) -> GoogleBooksProvider {
        GoogleBooksProvider::new(
            api_key.map(|k| k.to_string()),
            "http://test.local/books/v1/volumes/".to_string(),
            None,
        )
    }

    #[test]
    fn test_search_params_without_key() {
        let provider = create_test_provider(None);
        let params = provider.search_params("subject:Fiction", 8, "en");

        assert_eq!(
            params,
            vec![
                ("q".to_string(), "subject:Fiction".to_string()),
                ("maxResults".to_string(), "8".to_string()),
                ("langRestrict".to_string(), "en".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_params_with_key() {
        let provider = create_test_provider(Some("secret"));
        let params = provider.search_params("dune", 20, "en");
        assert_eq!(params.last(), Some(&("key".to_string(), "secret".to_string())));
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let provider = create_test_provider(Some("  "));
        assert!(provider.api_key.is_none());
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let provider = create_test_provider(None);
        assert_eq!(provider.api_url, "http://test.local/books/v1/volumes");
    }

    #[test]
    fn test_parse_volumes_without_items() {
        let response: VolumesResponse =
            serde_json::from_str(r#"{"kind": "books#volumes", "totalItems": 0}"#).unwrap();
        assert!(parse_volumes(response).is_empty());
    }

    #[test]
    fn test_parse_volumes_maps_every_item() {
        let json = r#"{
            "items": [
                {"id": "a", "volumeInfo": {"title": "Dune", "authors": ["Frank Herbert"]}},
                {"id": "b"}
            ]
        }"#;

        let books = parse_volumes(serde_json::from_str(json).unwrap());
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[1].title, "Unknown title");
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let provider = create_test_provider(None);
        let result = provider.search_books("   ", 10, "en").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_empty_isbn_rejected() {
        let provider = create_test_provider(None);
        let result = provider.lookup_isbn("").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}

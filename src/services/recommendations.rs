use rand::{seq::SliceRandom, Rng};
use std::sync::Arc;

use crate::{
    models::{Book, ReadingProfile, Recommendations},
    services::{identity::is_same_book, profile::build_profile, providers::BookSearchProvider},
};

pub const CATEGORY_RESULTS: u32 = 8;
pub const AUTHOR_RESULTS: u32 = 6;
pub const MAX_RECOMMENDATIONS: usize = 12;
pub const FALLBACK_QUERY: &str = "bestseller fiction";
pub const FALLBACK_RESULTS: u32 = 12;

/// One provider call in the fan-out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub max_results: u32,
}

impl SearchQuery {
    pub fn subject(category: &str) -> Self {
        Self {
            text: format!("subject:{}", category),
            max_results: CATEGORY_RESULTS,
        }
    }

    /// Exact-phrase author query
    pub fn author(author: &str) -> Self {
        Self {
            text: format!("inauthor:\"{}\"", author),
            max_results: AUTHOR_RESULTS,
        }
    }

    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_QUERY.to_string(),
            max_results: FALLBACK_RESULTS,
        }
    }
}

/// Category queries first, then author queries, each in rank order
pub fn build_queries(profile: &ReadingProfile) -> Vec<SearchQuery> {
    profile
        .top_categories
        .iter()
        .map(|signal| SearchQuery::subject(&signal.term))
        .chain(
            profile
                .top_authors
                .iter()
                .map(|signal| SearchQuery::author(&signal.term)),
        )
        .collect()
}

/// Drops every record that an earlier record in the list matches
///
/// Identity is not transitive, so a record is compared against all earlier
/// records, including ones that were themselves dropped.
pub fn remove_internal_duplicates(candidates: Vec<Book>) -> Vec<Book> {
    let keep: Vec<bool> = candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            !candidates[..i]
                .iter()
                .any(|earlier| is_same_book(earlier, candidate))
        })
        .collect();

    candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(book, keep)| keep.then_some(book))
        .collect()
}

/// Drops every candidate that matches a book the user already owns
pub fn remove_owned(candidates: Vec<Book>, owned: &[Book]) -> Vec<Book> {
    candidates
        .into_iter()
        .filter(|candidate| !owned.iter().any(|book| is_same_book(book, candidate)))
        .collect()
}

/// Shuffles and truncates to `cap`
pub fn select_recommendations<R: Rng + ?Sized>(
    mut candidates: Vec<Book>,
    cap: usize,
    rng: &mut R,
) -> Vec<Book> {
    candidates.shuffle(rng);
    candidates.truncate(cap);
    candidates
}

/// Deduplication and selection applied to merged query results
pub fn finalize<R: Rng + ?Sized>(raw: Vec<Book>, owned: &[Book], rng: &mut R) -> Vec<Book> {
    let unique = remove_internal_duplicates(raw);
    let novel = remove_owned(unique, owned);
    select_recommendations(novel, MAX_RECOMMENDATIONS, rng)
}

/// Builds reading recommendations from a user's shelves
///
/// Stateless: every call recomputes the profile and queries the provider again.
/// Provider failures are absorbed per query, so `recommend` always succeeds.
#[derive(Clone)]
pub struct RecommendationEngine {
    provider: Arc<dyn BookSearchProvider>,
    language: String,
}

impl RecommendationEngine {
    pub fn new(provider: Arc<dyn BookSearchProvider>, language: impl Into<String>) -> Self {
        Self {
            provider,
            language: language.into(),
        }
    }

    /// Runs all queries concurrently and concatenates results in issue order
    ///
    /// A failed query contributes nothing.
    pub async fn fan_out(&self, queries: Vec<SearchQuery>) -> Vec<Book> {
        let mut tasks = Vec::with_capacity(queries.len());

        for query in queries {
            let provider = Arc::clone(&self.provider);
            let language = self.language.clone();
            let task = tokio::spawn(async move {
                let result = provider
                    .search_books(&query.text, query.max_results, &language)
                    .await;
                (query, result)
            });
            tasks.push(task);
        }

        let mut merged = Vec::new();
        let mut failures = 0usize;

        for task in tasks {
            match task.await {
                Ok((_, Ok(books))) => merged.extend(books),
                Ok((query, Err(e))) => {
                    failures += 1;
                    tracing::warn!(error = %e, query = %query.text, "Recommendation query failed");
                }
                Err(e) => {
                    failures += 1;
                    tracing::error!(error = %e, "Recommendation query task failed");
                }
            }
        }

        if failures > 0 {
            tracing::warn!(
                candidates = merged.len(),
                failed_queries = failures,
                "Partial recommendation fan-out failure"
            );
        }

        merged
    }

    /// Recommendations for a reading history, excluding everything owned
    pub async fn recommend(&self, have_read: &[Book], owned: &[Book]) -> Recommendations {
        let (raw, personalized) = self.gather(have_read).await;
        Self::build(raw, personalized, owned, &mut rand::thread_rng())
    }

    /// Same as [`recommend`](Self::recommend) with a caller-supplied RNG
    pub async fn recommend_with_rng<R: Rng + ?Sized>(
        &self,
        have_read: &[Book],
        owned: &[Book],
        rng: &mut R,
    ) -> Recommendations {
        let (raw, personalized) = self.gather(have_read).await;
        Self::build(raw, personalized, owned, rng)
    }

    fn build<R: Rng + ?Sized>(
        raw: Vec<Book>,
        personalized: bool,
        owned: &[Book],
        rng: &mut R,
    ) -> Recommendations {
        let books = finalize(raw, owned, rng);

        tracing::info!(
            personalized,
            recommendations = books.len(),
            "Recommendations built"
        );

        Recommendations {
            personalized,
            books,
        }
    }

    async fn gather(&self, have_read: &[Book]) -> (Vec<Book>, bool) {
        match build_profile(have_read) {
            Some(profile) => {
                let queries = build_queries(&profile);
                tracing::debug!(
                    categories = profile.top_categories.len(),
                    authors = profile.top_authors.len(),
                    queries = queries.len(),
                    "Reading profile built"
                );
                (self.fan_out(queries).await, true)
            }
            None => {
                tracing::debug!("No reading profile, using fallback query");
                (self.fan_out(vec![SearchQuery::fallback()]).await, false)
            }
        }
    }
}

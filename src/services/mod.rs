pub mod identity;
pub mod profile;
pub mod providers;
pub mod recommendations;
pub mod search;

pub use providers::{BookSearchProvider, GoogleBooksProvider};
pub use recommendations::RecommendationEngine;

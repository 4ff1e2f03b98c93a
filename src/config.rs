use serde::Deserialize;

/// Which store backs the two shelves
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShelfBackend {
    Memory,
    Redis,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Google Books API key, sent as `key=` when present
    #[serde(default)]
    pub google_books_api_key: Option<String>,

    /// Google Books volumes endpoint
    #[serde(default = "default_google_books_api_url")]
    pub google_books_api_url: String,

    /// Language restriction applied to recommendation queries
    #[serde(default = "default_search_language")]
    pub search_language: String,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Cache search responses in Redis
    #[serde(default)]
    pub search_cache_enabled: bool,

    #[serde(default = "default_shelf_backend")]
    pub shelf_backend: ShelfBackend,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_google_books_api_url() -> String {
    "https://www.googleapis.com/books/v1/volumes".to_string()
}

fn default_search_language() -> String {
    "en".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_shelf_backend() -> ShelfBackend {
    ShelfBackend::Memory
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Whether any Redis connection is needed at startup
    pub fn uses_redis(&self) -> bool {
        self.search_cache_enabled || self.shelf_backend == ShelfBackend::Redis
    }
}

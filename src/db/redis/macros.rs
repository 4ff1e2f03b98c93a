/// Read-through caching for provider calls backed by an optional Redis cache.
///
/// If a cache is configured and holds the key, the cached value is returned.
/// Otherwise the block runs, and its successful result is queued for a
/// background write. A failed cache read is logged and treated as a miss so an
/// unavailable Redis never fails the underlying call.
///
/// # Arguments
/// * `$cache`: an `Option<Cache>`.
/// * `$key`: the `CacheKey` to read and write.
/// * `$ttl`: time-to-live for the cached value in seconds.
/// * `$block`: the future computing the value on a miss.
///
/// # Example
/// ```rust,ignore
/// let books = cached!(self.cache, CacheKey::Volume(id.to_string()), 3600, async move {
///     fetch_volume(id).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        let cache: Option<&$crate::db::Cache> = $cache.as_ref();

        let hit = match cache {
            Some(cache) => match cache.get_from_cache(&key).await {
                Ok(hit) => hit,
                Err(e) => {
                    tracing::warn!(error = %e, key = %key, "Cache read failed, treating as miss");
                    None
                }
            },
            None => None,
        };

        match hit {
            Some(cached) => Ok(cached),
            None => {
                let value = $block.await?;
                if let Some(cache) = cache {
                    cache.set_in_background(&key, &value, $ttl);
                }
                Ok(value)
            }
        }
    }};
}

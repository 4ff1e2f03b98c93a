pub mod redis;
pub mod shelf;

pub use self::redis::create_redis_client;
pub use self::redis::Cache;
pub use self::redis::CacheKey;
pub use self::redis::CacheWriterHandle;
pub use self::redis::RedisShelfStore;
pub use shelf::{MemoryShelfStore, ShelfStore};

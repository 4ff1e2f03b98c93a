use redis::AsyncCommands;
use redis::{Client, Script};

use crate::{
    db::ShelfStore,
    error::{AppError, AppResult},
    models::{Book, Collection},
};

/// Ids in shelf order in KEYS[1], books as JSON by id in KEYS[2].
/// The hash insert is the existence gate, so concurrent adds never overwrite.
const ADD_SCRIPT: &str = r#"
if redis.call('HSETNX', KEYS[2], ARGV[1], ARGV[2]) == 1 then
    redis.call('RPUSH', KEYS[1], ARGV[1])
    return 1
end
return 0
"#;

const REMOVE_SCRIPT: &str = r#"
if redis.call('HDEL', KEYS[2], ARGV[1]) == 1 then
    redis.call('LREM', KEYS[1], 0, ARGV[1])
    return 1
end
return 0
"#;

const LIST_SCRIPT: &str = r#"
local ids = redis.call('LRANGE', KEYS[1], 0, -1)
if #ids == 0 then
    return {}
end
return redis.call('HMGET', KEYS[2], unpack(ids))
"#;

/// Shelves persisted in Redis
///
/// Each collection is an id list for ordering plus a hash of book JSON. All
/// mutations run as Lua scripts, so each one is atomic on the server.
#[derive(Clone)]
pub struct RedisShelfStore {
    redis_client: Client,
    add_script: Script,
    remove_script: Script,
    list_script: Script,
}

fn order_key(collection: Collection) -> String {
    format!("shelf:{}:order", collection)
}

fn books_key(collection: Collection) -> String {
    format!("shelf:{}:books", collection)
}

impl RedisShelfStore {
    pub fn new(redis_client: Client) -> Self {
        Self {
            redis_client,
            add_script: Script::new(ADD_SCRIPT),
            remove_script: Script::new(REMOVE_SCRIPT),
            list_script: Script::new(LIST_SCRIPT),
        }
    }

    async fn read(&self, collection: Collection) -> AppResult<Vec<Book>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let stored: Vec<Option<String>> = self
            .list_script
            .key(order_key(collection))
            .key(books_key(collection))
            .invoke_async(&mut conn)
            .await?;

        stored
            .into_iter()
            .flatten()
            .map(|json| {
                serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Corrupt shelf {}: {}", collection, e))
                })
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl ShelfStore for RedisShelfStore {
    async fn list(&self, collection: Collection) -> Vec<Book> {
        match self.read(collection).await {
            Ok(books) => books,
            Err(e) => {
                tracing::error!(error = %e, collection = %collection, "Failed to load shelf");
                Vec::new()
            }
        }
    }

    async fn add(&self, collection: Collection, book: Book) -> AppResult<bool> {
        let json = serde_json::to_string(&book)
            .map_err(|e| AppError::Internal(format!("Shelf serialization error: {}", e)))?;

        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let added: i64 = self
            .add_script
            .key(order_key(collection))
            .key(books_key(collection))
            .arg(&book.id)
            .arg(json)
            .invoke_async(&mut conn)
            .await?;

        if added == 0 {
            tracing::debug!(book_id = %book.id, collection = %collection, "Book already on shelf");
        }
        Ok(added == 1)
    }

    async fn remove(&self, collection: Collection, book_id: &str) -> AppResult<bool> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let removed: i64 = self
            .remove_script
            .key(order_key(collection))
            .key(books_key(collection))
            .arg(book_id)
            .invoke_async(&mut conn)
            .await?;

        Ok(removed == 1)
    }

    async fn clear(&self) -> AppResult<()> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn
            .del(&[
                order_key(Collection::ToRead),
                books_key(Collection::ToRead),
                order_key(Collection::HaveRead),
                books_key(Collection::HaveRead),
            ])
            .await?;
        Ok(())
    }
}

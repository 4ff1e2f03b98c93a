use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Book, Collection, ShelfStats},
};

/// Storage for the user's two shelves
///
/// Implementations only need the four primitive operations; moving, shelving
/// and statistics are built on top of them.
#[async_trait::async_trait]
pub trait ShelfStore: Send + Sync {
    /// All books on a shelf in insertion order
    ///
    /// Never fails: a store that cannot be read yields an empty shelf.
    async fn list(&self, collection: Collection) -> Vec<Book>;

    /// Appends a book, returning `false` if its id is already on the shelf
    async fn add(&self, collection: Collection, book: Book) -> AppResult<bool>;

    /// Removes a book by id, returning `false` if it was not on the shelf
    async fn remove(&self, collection: Collection, book_id: &str) -> AppResult<bool>;

    /// Empties both shelves
    async fn clear(&self) -> AppResult<()>;

    async fn contains(&self, collection: Collection, book_id: &str) -> bool {
        self.list(collection).await.iter().any(|b| b.id == book_id)
    }

    /// Snapshot of every owned book, to-read first
    async fn owned(&self) -> Vec<Book> {
        let mut books = self.list(Collection::ToRead).await;
        books.extend(self.list(Collection::HaveRead).await);
        books
    }

    /// Adds a book and takes it off the other shelf so the two stay disjoint
    async fn shelve(&self, collection: Collection, book: Book) -> AppResult<bool> {
        let book_id = book.id.clone();
        let added = self.add(collection, book).await?;
        if added {
            self.remove(collection.other(), &book_id).await?;
        }
        Ok(added)
    }

    /// Moves a book from `from` to the other shelf
    async fn move_book(&self, book_id: &str, from: Collection) -> AppResult<Book> {
        let book = self
            .list(from)
            .await
            .into_iter()
            .find(|b| b.id == book_id)
            .ok_or_else(|| AppError::NotFound(format!("Book {} is not on {}", book_id, from)))?;

        self.add(from.other(), book.clone()).await?;
        self.remove(from, book_id).await?;

        tracing::info!(book_id = %book_id, from = %from, to = %from.other(), "Book moved");

        Ok(book)
    }

    async fn stats(&self) -> ShelfStats {
        let to_read = self.list(Collection::ToRead).await;
        let have_read = self.list(Collection::HaveRead).await;
        let pages_read = have_read.iter().map(|b| u64::from(b.page_count)).sum();

        ShelfStats {
            to_read: to_read.len(),
            have_read: have_read.len(),
            total: to_read.len() + have_read.len(),
            pages_read,
        }
    }
}

/// Process-local shelves, lost on restart
#[derive(Default)]
pub struct MemoryShelfStore {
    shelves: RwLock<HashMap<Collection, Vec<Book>>>,
}

impl MemoryShelfStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ShelfStore for MemoryShelfStore {
    async fn list(&self, collection: Collection) -> Vec<Book> {
        let shelves = self.shelves.read().await;
        shelves.get(&collection).cloned().unwrap_or_default()
    }

    async fn add(&self, collection: Collection, book: Book) -> AppResult<bool> {
        let mut shelves = self.shelves.write().await;
        let shelf = shelves.entry(collection).or_default();

        if shelf.iter().any(|b| b.id == book.id) {
            tracing::debug!(book_id = %book.id, collection = %collection, "Book already on shelf");
            return Ok(false);
        }

        shelf.push(book);
        Ok(true)
    }

    async fn remove(&self, collection: Collection, book_id: &str) -> AppResult<bool> {
        let mut shelves = self.shelves.write().await;
        let Some(shelf) = shelves.get_mut(&collection) else {
            return Ok(false);
        };

        let before = shelf.len();
        shelf.retain(|b| b.id != book_id);
        Ok(shelf.len() != before)
    }

    async fn clear(&self) -> AppResult<()> {
        self.shelves.write().await.clear();
        Ok(())
    }
}

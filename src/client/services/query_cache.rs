use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use log::{debug, info};

use crate::client::services::books_service::BooksApi;
use crate::common::error::{ServiceError, ServiceResult};
use crate::common::models::Book;

/// Key of the library's book list.
pub const BOOKS_QUERY: &str = "books";

/// Keyed cache of remote queries. Invalidating a key makes dependent views refetch it.
#[async_trait]
pub trait QueryCache: Send + Sync {
    async fn fetch(&self, key: &str) -> ServiceResult<Vec<Book>>;

    fn invalidate(&self, key: &str);

    /// True when `key` has never been fetched or was invalidated since the last fetch.
    fn is_stale(&self, key: &str) -> bool;
}

#[derive(Debug, Default)]
struct CacheEntry {
    books: Vec<Book>,
    stale: bool,
    generation: u64,
}

pub struct QueryClient {
    api: Arc<dyn BooksApi>,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl QueryClient {
    pub fn new(api: Arc<dyn BooksApi>) -> Self {
        Self {
            api,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl QueryCache for QueryClient {
    async fn fetch(&self, key: &str) -> ServiceResult<Vec<Book>> {
        if key != BOOKS_QUERY {
            return Err(ServiceError::UnknownQuery(key.to_string()));
        }

        let generation = {
            let entries = self.entries();
            match entries.get(key) {
                Some(entry) if !entry.stale => return Ok(entry.books.clone()),
                Some(entry) => entry.generation,
                None => 0,
            }
        };

        let books = self.api.list_books().await?;
        debug!("[QUERY] fetched {} books for `{}`", books.len(), key);

        let mut entries = self.entries();
        let entry = entries.entry(key.to_string()).or_default();
        entry.books = books.clone();
        // An invalidation that raced this request keeps the entry stale.
        entry.stale = entry.generation != generation;
        Ok(books)
    }

    fn invalidate(&self, key: &str) {
        let mut entries = self.entries();
        let entry = entries.entry(key.to_string()).or_insert_with(|| CacheEntry {
            stale: true,
            ..Default::default()
        });
        entry.stale = true;
        entry.generation += 1;
        info!("[QUERY] invalidated `{}`", key);
    }

    fn is_stale(&self, key: &str) -> bool {
        self.entries().get(key).map_or(true, |entry| entry.stale)
    }
}

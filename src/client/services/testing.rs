use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::services::books_service::BooksApi;
use crate::client::services::query_cache::QueryCache;
use crate::common::error::{ServiceError, ServiceResult};
use crate::common::models::Book;

/// In-memory `BooksApi` recording every call.
#[derive(Default)]
pub struct MockBooksApi {
    books: Mutex<Vec<Book>>,
    deleted: Mutex<Vec<i64>>,
    list_calls: Mutex<usize>,
    fail_delete: AtomicBool,
    fail_list: AtomicBool,
}

impl MockBooksApi {
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
            ..Default::default()
        }
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    /// Ids passed to `delete_book`, in call order.
    pub fn delete_calls(&self) -> Vec<i64> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }
}

#[async_trait]
impl BooksApi for MockBooksApi {
    async fn list_books(&self) -> ServiceResult<Vec<Book>> {
        *self.list_calls.lock().unwrap() += 1;
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ServiceError::Disconnected);
        }
        Ok(self.books.lock().unwrap().clone())
    }

    async fn delete_book(&self, id: i64) -> ServiceResult<()> {
        self.deleted.lock().unwrap().push(id);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(ServiceError::Server(format!("Book {} not found", id)));
        }
        self.books.lock().unwrap().retain(|b| b.id != id);
        Ok(())
    }
}

/// `QueryCache` that only records invalidated keys.
#[derive(Default)]
pub struct RecordingCache {
    invalidated: Mutex<Vec<String>>,
}

impl RecordingCache {
    pub fn invalidations(&self) -> Vec<String> {
        self.invalidated.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryCache for RecordingCache {
    async fn fetch(&self, _key: &str) -> ServiceResult<Vec<Book>> {
        Ok(vec![])
    }

    fn invalidate(&self, key: &str) {
        self.invalidated.lock().unwrap().push(key.to_string());
    }

    fn is_stale(&self, key: &str) -> bool {
        self.invalidated.lock().unwrap().iter().any(|k| k == key)
    }
}

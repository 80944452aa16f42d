// Modelli condivisi tra GUI e servizi
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub subject: String,
}

impl Book {
    pub fn new(id: i64, title: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            subject: subject.into(),
        }
    }

    /// Path of the management page for this book.
    pub fn manage_path(&self) -> String {
        manage_book_path(self.id)
    }
}

pub fn manage_book_path(id: i64) -> String {
    format!("/manage-book/{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manage_path_uses_book_id() {
        let book = Book::new(42, "Dune", "Fiction");
        assert_eq!(book.manage_path(), "/manage-book/42");
    }

    #[test]
    fn book_deserializes_from_server_json() {
        let book: Book = serde_json::from_str(r#"{"id":1,"title":"Alpha","subject":"Math"}"#).unwrap();
        assert_eq!(book, Book::new(1, "Alpha", "Math"));
    }
}

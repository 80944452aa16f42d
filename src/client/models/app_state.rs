use crate::common::models::{manage_book_path, Book};

/// Current screen, addressed by path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Loading,
    Books,
    ManageBook(i64),
}

impl AppState {
    pub fn path(&self) -> String {
        match self {
            AppState::Loading | AppState::Books => "/".to_string(),
            AppState::ManageBook(id) => manage_book_path(*id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BooksAppState {
    pub app_state: AppState,
    pub books: Vec<Book>,
    pub fetching: bool,
    pub load_error: Option<String>,
}

impl BooksAppState {
    pub fn find_book(&self, id: i64) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_map_to_their_paths() {
        assert_eq!(AppState::ManageBook(2).path(), "/manage-book/2");
        assert_eq!(AppState::Books.path(), "/");
        assert_eq!(AppState::Loading.path(), "/");
    }

    #[test]
    fn find_book_matches_by_id() {
        let state = BooksAppState {
            books: vec![Book::new(1, "Alpha", "Math"), Book::new(2, "Beta", "History")],
            ..Default::default()
        };
        assert_eq!(state.find_book(2).map(|b| b.title.as_str()), Some("Beta"));
        assert!(state.find_book(9).is_none());
    }
}

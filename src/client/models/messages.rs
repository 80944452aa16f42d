use crate::client::models::app_state::AppState;
use crate::common::models::Book;

#[derive(Debug, Clone)]
pub enum Message {
    BooksLoaded(Result<Vec<Book>, String>),
    RetryLoad,
    Navigate(AppState),
    Table(TableMessage),
}

/// Events of the book table component.
#[derive(Debug, Clone)]
pub enum TableMessage {
    DeletePressed { id: i64, title: String },
    DeleteFinished { id: i64, result: Result<(), String> },
    OpenBook(i64),
    DismissNotification,
    NotificationExpired(u64),
}

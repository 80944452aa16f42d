pub mod book_table;
pub mod manage_book;

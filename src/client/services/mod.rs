pub mod books_service;
pub mod message_parser;
pub mod query_cache;

#[cfg(test)]
pub mod testing;

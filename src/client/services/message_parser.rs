// Modulo di parsing delle risposte del server lato client
use crate::common::error::{ServiceError, ServiceResult};
use crate::common::models::Book;

/// Split a single-line `OK: <payload>` / `ERR: <reason>` reply.
/// Returns the trimmed payload of an `OK:` reply.
pub fn parse_ok(resp: &str) -> ServiceResult<&str> {
    let trimmed = resp.trim();
    if let Some(payload) = trimmed.strip_prefix("OK:") {
        Ok(payload.trim())
    } else if let Some(reason) = trimmed.strip_prefix("ERR:") {
        Err(ServiceError::Server(reason.trim().to_string()))
    } else {
        Err(ServiceError::Protocol(trimmed.to_string()))
    }
}

/// Parse `OK: [{"id":1,"title":"..","subject":".."}, ...]` into books, keeping server order.
pub fn parse_book_list(resp: &str) -> ServiceResult<Vec<Book>> {
    let payload = parse_ok(resp)?;
    if payload.is_empty() {
        return Ok(vec![]);
    }
    Ok(serde_json::from_str(payload)?)
}

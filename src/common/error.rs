use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("connection to {host} failed: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("i/o error talking to {host}: {source}")]
    Io {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("connection to the books server was closed")]
    Disconnected,
    #[error("server error: {0}")]
    Server(String),
    #[error("unexpected response: {0}")]
    Protocol(String),
    #[error("malformed book list: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unknown query key `{0}`")]
    UnknownQuery(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot, Mutex};

use crate::client::services::message_parser;
use crate::common::error::{ServiceError, ServiceResult};
use crate::common::models::Book;

/// Remote operations on the library's book collection.
#[async_trait]
pub trait BooksApi: Send + Sync {
    async fn list_books(&self) -> ServiceResult<Vec<Book>>;

    async fn delete_book(&self, id: i64) -> ServiceResult<()>;
}

type Request = (String, oneshot::Sender<ServiceResult<String>>);

/// TCP client for the books server.
///
/// Commands are newline-terminated lines, every reply is a single `OK:`/`ERR:` line.
/// Requests are serialized through one background task that owns the connection.
pub struct BooksService {
    host: String,
    tx: Mutex<Option<mpsc::UnboundedSender<Request>>>,
}

impl BooksService {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            tx: Mutex::new(None),
        }
    }

    /// Ensure there is an active background task connected to the server.
    async fn ensure_connected(&self) -> ServiceResult<mpsc::UnboundedSender<Request>> {
        let mut guard = self.tx.lock().await;
        if let Some(tx) = guard.as_ref() {
            if !tx.is_closed() {
                return Ok(tx.clone());
            }
        }

        let stream = connect(&self.host).await?;
        let (tx, rx) = mpsc::unbounded_channel::<Request>();
        tokio::spawn(run_connection(self.host.clone(), stream, rx));
        debug!("[BOOKS_SVC] connected to {}", self.host);
        *guard = Some(tx.clone());
        Ok(tx)
    }

    /// Send a command and wait for the single-line response from the server.
    pub async fn send_command(&self, cmd: String) -> ServiceResult<String> {
        let tx = self.ensure_connected().await?;
        let (resp_tx, resp_rx) = oneshot::channel();
        tx.send((cmd, resp_tx)).map_err(|_| ServiceError::Disconnected)?;
        resp_rx.await.map_err(|_| ServiceError::Disconnected)?
    }
}

#[async_trait]
impl BooksApi for BooksService {
    async fn list_books(&self) -> ServiceResult<Vec<Book>> {
        let resp = self.send_command("/list_books".to_string()).await?;
        message_parser::parse_book_list(&resp)
    }

    async fn delete_book(&self, id: i64) -> ServiceResult<()> {
        let resp = self.send_command(format!("/delete_book {}", id)).await?;
        message_parser::parse_ok(&resp).map(|_| ())
    }
}

async fn connect(host: &str) -> ServiceResult<TcpStream> {
    TcpStream::connect(host).await.map_err(|source| ServiceError::Connect {
        host: host.to_string(),
        source,
    })
}

struct Connection {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl Connection {
    fn new(stream: TcpStream) -> Self {
        let (reader, writer) = stream.into_split();
        Self {
            reader: BufReader::new(reader),
            writer: BufWriter::new(writer),
        }
    }

    async fn send(&mut self, cmd: &str) -> std::io::Result<()> {
        self.writer.write_all(cmd.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    /// `Ok(None)` means the peer closed the connection.
    async fn read_reply(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Commands that can be sent twice without changing the result.
fn is_read_only(cmd: &str) -> bool {
    cmd == "/list_books"
}

async fn reconnect_and_send(host: &str, conn: &mut Connection, cmd: &str) -> ServiceResult<String> {
    *conn = Connection::new(connect(host).await?);
    let io_err = |source| ServiceError::Io {
        host: host.to_string(),
        source,
    };
    conn.send(cmd).await.map_err(io_err)?;
    conn.read_reply().await.map_err(io_err)?.ok_or(ServiceError::Disconnected)
}

// Processes outgoing requests sequentially. A command whose write failed is
// resent once on a fresh connection. Once written, only read-only commands are
// resent: the server may already have applied a mutation whose reply was lost.
async fn run_connection(host: String, stream: TcpStream, mut rx: mpsc::UnboundedReceiver<Request>) {
    let mut conn = Connection::new(stream);
    while let Some((cmd, resp_tx)) = rx.recv().await {
        let result = match conn.send(&cmd).await {
            Err(e) => {
                warn!("[BOOKS_SVC] write to {} failed: {}, reconnecting...", host, e);
                reconnect_and_send(&host, &mut conn, &cmd).await
            }
            Ok(()) => match conn.read_reply().await {
                Ok(Some(line)) => Ok(line),
                Ok(None) | Err(_) if is_read_only(&cmd) => {
                    warn!("[BOOKS_SVC] connection to {} lost, reconnecting...", host);
                    reconnect_and_send(&host, &mut conn, &cmd).await
                }
                Ok(None) | Err(_) => {
                    warn!("[BOOKS_SVC] reply to `{}` lost, not resending", cmd);
                    Err(ServiceError::Disconnected)
                }
            },
        };
        let _ = resp_tx.send(result);
    }
    debug!("[BOOKS_SVC] request channel closed, stopping connection task");
}

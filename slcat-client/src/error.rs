use std::time::Duration;

/// Errors that can occur inside catalog client operations.
///
/// These never cross the query boundary:
/// [`CatalogClient::query`](crate::CatalogClient::query) folds every failure
/// into the [`QueryResult`](crate::QueryResult) it returns.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// TCP or socket I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Protocol violation while accumulating a response.
    #[error("protocol error: {0}")]
    Protocol(#[from] slcat_rs_protocol::ProtocolError),

    /// Operation exceeded the configured timeout duration.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// Server closed the connection (read returned 0 bytes).
    #[error("disconnected")]
    Disconnected,

    /// A `host[:port]` target spec that cannot be parsed.
    #[error("invalid target: {0:?}")]
    InvalidTarget(String),
}

/// Convenience alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;

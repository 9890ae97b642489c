#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("malformed greeting: {0:?}")]
    MalformedGreeting(String),

    #[error("handshake already complete")]
    HandshakeDone,
}

pub type Result<T> = std::result::Result<T, ProtocolError>;

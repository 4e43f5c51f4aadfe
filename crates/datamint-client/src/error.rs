use thiserror::Error;

/// Failures talking to the backend. Messages are surfaced to the user
/// verbatim.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("backend unreachable at {url}: {message}")]
    Unreachable { url: String, message: String },
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed backend response: {0}")]
    Envelope(String),
    #[error("invalid client configuration: {0}")]
    Client(String),
}

pub type Result<T> = std::result::Result<T, TransportError>;

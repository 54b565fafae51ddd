use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// No response at all: connection refused, DNS failure, timeout.
    #[error("backend unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status. `message` carries the
    /// server's `detail` field when the body had one.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("invalid response from backend: {0}")]
    InvalidResponse(#[source] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Client initialization failed: {message}")]
    InitializationError { message: String },
}

pub type GatewayResult<T> = Result<T, GatewayError>;

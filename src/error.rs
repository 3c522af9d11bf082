use thiserror::Error;

/// Error type for Quotely operations.
///
/// - `InvalidUrl` — the request URL could not be built
/// - `Network` — transport/connectivity failure or timeout (wraps `reqwest::Error`)
/// - `Http` — any non-2xx status code
/// - `Decode` — the response body does not match the quote schema
/// - `PersistenceDecode` — a stored value could not be read back
/// - `Io` — store or config file I/O
/// - `Config` — configuration could not be located or parsed
#[derive(Debug, Error)]
pub enum QuotelyError {
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unreadable stored value for '{key}': {message}")]
    PersistenceDecode { key: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl QuotelyError {
    /// True for failures of the network leg (transport or status code).
    pub fn is_network(&self) -> bool {
        matches!(self, QuotelyError::Network(_) | QuotelyError::Http { .. })
    }
}

pub type Result<T> = std::result::Result<T, QuotelyError>;

//! Error types surfaced to callers of the API facade
//!
//! Classification happens exactly once, at the facade's translation
//! boundary; operations never re-wrap an error that already carries one of
//! these variants.

use thiserror::Error;

/// Main error type for Faraday API operations
#[derive(Error, Debug)]
pub enum FaradayError {
    /// No token is configured; the caller must authenticate first.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// The server rejected the supplied credentials or token.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The server rejected the second authentication factor.
    #[error("Invalid second factor: {0}")]
    InvalidSecondFactor(String),

    /// A create operation conflicts with an existing resource.
    #[error("Duplicated resource: {0}")]
    Duplicated(String),

    /// The requested resource or path does not exist on the server.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic 4xx response not otherwise classified.
    #[error("Client error ({status}): {message}")]
    Client { status: u16, message: String },

    /// The server could not be reached.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Catch-all carrying the underlying failure's kind and message.
    /// Indicates a classification gap, not a branch point for callers.
    #[error("Unknown error: {kind} - {message}")]
    Unknown { kind: String, message: String },
}

/// Result type alias for Faraday API operations
pub type Result<T> = std::result::Result<T, FaradayError>;

//! Transport contract for the server's REST API
//!
//! The facade depends on the [`Transport`] trait rather than a concrete
//! HTTP stack, so callers and tests can inject doubles. The reqwest-backed
//! implementation lives in [`rest`].

pub mod resources;
pub mod rest;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use resources::{OperationSpec, Resource, ResourceDescriptor};
pub use rest::{RestTransport, TransportConfig};

/// Error raised by the transport while talking to the server
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The server answered 401 or 403.
    #[error("authentication rejected ({status})")]
    Auth { status: u16 },

    /// The server answered 404.
    #[error("not found: {url}")]
    NotFound { url: String },

    /// Any other 4xx answer.
    #[error("client error ({status}): {message}")]
    Client { status: u16, message: String },

    /// A 5xx answer.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body could not be read.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The invocation does not fit the resource's descriptor.
    #[error("invalid invocation: {0}")]
    Invalid(String),

    /// The operation is not part of the resource's descriptor.
    #[error("resource {resource} has no operation {operation}")]
    UnknownOperation {
        resource: &'static str,
        operation: &'static str,
    },
}

impl TransportError {
    /// Short kind name, reported when a failure escapes classification.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Auth { .. } => "auth",
            Self::NotFound { .. } => "not found",
            Self::Client { .. } => "client",
            Self::Server { .. } => "server",
            Self::Decode(_) => "decode",
            Self::Invalid(_) => "invalid invocation",
            Self::UnknownOperation { .. } => "unknown operation",
        }
    }
}

/// Decoded response from a transport invocation
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// A single operation call against a named resource
#[derive(Debug, Clone)]
pub struct Invocation {
    pub resource: Resource,
    pub operation: &'static str,
    pub path_args: Vec<String>,
    pub body: Option<Value>,
    pub params: Vec<(String, String)>,
}

impl Invocation {
    pub fn new(resource: Resource, operation: &'static str) -> Self {
        Self {
            resource,
            operation,
            path_args: Vec::new(),
            body: None,
            params: Vec::new(),
        }
    }

    pub fn path_arg(mut self, arg: impl Into<String>) -> Self {
        self.path_args.push(arg.into());
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// Parameterized access to the server's resource operations
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one operation call and decode the response.
    async fn invoke(&self, invocation: Invocation) -> Result<ApiResponse, TransportError>;
}

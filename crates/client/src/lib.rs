//! # Faraday Client
//!
//! Authenticated facade over the Faraday vulnerability-management HTTP API.
//!
//! This crate contains:
//! - Client configuration (`config`)
//! - HTTP client construction (`http`)
//! - The transport contract, resource registry and reqwest-backed
//!   implementation (`transport`)
//! - The authenticated API facade and auth flows (`api`)
//!
//! ## Architecture
//! - One network round trip per operation; no retries in this layer
//! - Failures are classified exactly once, at the facade's translation
//!   boundary
//! - The facade depends on the [`transport::Transport`] trait so callers and
//!   tests can inject doubles

pub mod api;
pub mod config;
pub mod http;
pub mod transport;

// Re-export commonly used items
pub use api::FaradayClient;
pub use config::ClientConfig;
pub use faraday_domain::{
    FaradayError, LoginOutcome, Product, Result, VersionInfo, WorkspaceUsers,
};

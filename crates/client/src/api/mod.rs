//! Authenticated API facade
//!
//! This module provides the client-side facade over the server's HTTP API.
//! It handles authentication (including the two-factor step), composes the
//! resource registry onto a single configured transport, and normalizes
//! transport failures into the caller-facing error taxonomy.
//!
//! # Architecture
//!
//! - Construction wires the nine-resource registry onto the transport and
//!   never contacts the network
//! - Every authenticated operation passes the token guard and the
//!   error-translation adapter
//! - No retries; every failure surfaces synchronously to the caller

pub mod auth;
pub mod client;

pub use client::{FaradayClient, Session};

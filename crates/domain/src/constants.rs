//! Domain constants
//!
//! Centralized location for the domain-level constants used throughout the
//! client.

// Server layout
pub const API_MOUNT_POINT: &str = "_api";

// Workspace creation
pub const BASELINE_WORKSPACE_USER: &str = "faraday";

// Transport configuration
pub const TIMEOUT_ENV_VAR: &str = "FARADAY_CLIENT_TIMEOUT_MS";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

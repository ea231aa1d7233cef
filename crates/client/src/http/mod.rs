//! HTTP client construction

mod client;

pub use client::{HttpClient, HttpClientBuilder};

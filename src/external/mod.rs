//! Outbound HTTP plumbing.

pub mod client;

pub use client::build_http_client;

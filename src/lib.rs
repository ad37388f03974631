//! Platform API: runtime core of the Platform REST API client.
//!
//! The generated per-endpoint methods are thin callers of this crate: they
//! supply a path, an HTTP verb and typed payloads, and forward whatever the
//! dispatcher returns.
//!
//! - [`config`] resolves how a client is built (token, transport, base URL)
//! - [`client`] holds the [`Client`](client::Client), its dispatcher and the error model
//! - [`transport`] abstracts the single HTTP round-trip per call

pub mod client;
pub mod config;
pub mod transport;

//! Configuration layer: resolving how a [`Client`](crate::client::Client) is built.
//!
//! This module provides:
//! - The client builder ([`ClientBuilder`])
//! - The resolved, immutable configuration ([`Config`])
//! - Environment access for the token lookup ([`Environment`], [`ProcessEnvironment`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! The API token is resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit token** - set with [`ClientBuilder::with_token`]
//! 2. **Environment** - the [`defaults::TOKEN_ENV_VAR`] variable
//!
//! An empty value at either level counts as unset. Without a token the build
//! fails, unless the transport is the test double
//! ([`MockTransport`](crate::transport::MockTransport)).
//!
//! The transport defaults to a [`ReqwestClient`](crate::transport::ReqwestClient)
//! with a two-minute timeout when none is set.

mod builder;
pub mod defaults;
mod env;
mod error;


pub use builder::{ClientBuilder, Config, CustomTransport, DefaultTransport, TransportSlot};
pub use env::{Environment, ProcessEnvironment};
pub use error::ConfigError;

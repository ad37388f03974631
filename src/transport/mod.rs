//! Transport layer: one HTTP request in, one HTTP response (or failure) out.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses and their bodies ([`HttpResponse`], [`Body`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - The designated test double ([`MockTransport`])

mod client;
mod error;
mod message;
mod mock;


pub use client::ReqwestClient;
pub use error::{BodyError, HttpError};
pub use message::{Body, HttpClient, HttpRequest, HttpResponse};
pub use mock::MockTransport;

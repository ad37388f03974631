//! The API client: request dispatch and the error model.
//!
//! This module provides:
//! - The long-lived, immutable [`Client`]
//! - The request dispatcher ([`Client::dispatch`], [`Client::dispatch_empty`])
//! - The status-carrying [`ApiError`] and its wire shape [`ErrorBody`]
//! - The dispatch result error [`Error`]
//!
//! # Error model
//!
//! A dispatch fails in one of two ways:
//!
//! - **Local failures** (request encoding, transport, body read, response
//!   decoding) keep their own [`Error`] variant and carry no HTTP status.
//! - **API failures** become [`Error::Api`]: any status above 299, and any
//!   GET answered with success but a body under
//!   [`NOT_FOUND_BODY_THRESHOLD`] bytes, which the upstream service uses to
//!   report a missing object.

mod dispatch;
mod error;

#[cfg(test)]
mod dispatch_tests;

pub use dispatch::{Client, NOT_FOUND_BODY_THRESHOLD};
pub use error::{ApiError, CANNOT_READ_BODY, Error, ErrorBody, OBJECT_NOT_FOUND};

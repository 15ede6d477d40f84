//! Transport layer for talking to the cluster's REST API.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - JSON calls bound to one cluster ([`RestClient`])

mod client;
mod error;
mod http;
mod rest;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use client::ReqwestClient;
pub use error::{HttpError, TransportError};
pub use self::http::{HttpClient, HttpRequest, HttpResponse};
pub use rest::RestClient;

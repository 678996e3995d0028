//! REST API client module for the Z Reader backend.
//!
//! This module provides the `ApiClient` for communicating with the backend.
//! Every reply is a JSON `Envelope` whose `code` decides success; HTTP status
//! codes are not interpreted.
//!
//! Authentication uses an opaque session token sent verbatim in the
//! `Authentication` header.

pub mod auth;
pub mod client;
pub mod codes;
pub mod envelope;
pub mod error;
pub mod request;
pub mod settings;

pub use client::{default_base_url, ApiClient, ClientBuilder, AUTH_HEADER};
pub use envelope::Envelope;
pub use error::ApiError;
pub use request::RequestOptions;

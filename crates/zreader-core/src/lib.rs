//! Core library for the Z Reader client.
//!
//! This crate provides:
//! - `ApiClient`: the request dispatcher for the Z Reader REST backend
//! - `Envelope`: the uniform `{code, msg, data}` response shape
//! - `SessionStore`: durable storage for the session token and cached user
//! - `ExpiryGuard`: reacts to session expiry by navigating to the entry point
//! - `codes`: the static business code to message table

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{codes, ApiClient, ApiError, ClientBuilder, Envelope, RequestOptions};
pub use auth::{
    AuthState, ExpiryGuard, FileSessionStore, MemorySessionStore, Navigator, Route, SessionStore,
    StorageError,
};
pub use config::Config;

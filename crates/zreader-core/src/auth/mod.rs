//! Authentication state for the Z Reader client.
//!
//! This module provides:
//! - `KeyValueStore`: a directory of small files, one per key
//! - `SessionStore`: the token and cached current-user capability interface
//! - `FileSessionStore` / `MemorySessionStore`: durable and in-memory stores
//! - `ExpiryGuard`: routes the caller back to the entry point on expiry
//!
//! The token and the cached user are always cleared together.

pub mod expiry;
pub mod session;
pub mod storage;

pub use expiry::{ExpiryGuard, Navigator, Route};
pub use session::{
    AuthState, CachedUser, FileSessionStore, MemorySessionStore, SessionStore, CURRENT_USER_KEY,
    TOKEN_KEY,
};
pub use storage::{KeyValueStore, StorageError};

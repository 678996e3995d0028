//! Data models for the Z Reader backend.
//!
//! - `UserInfo`, `LoginRequest`, `LoginResponse`, `UpdateProfile`: account types
//! - `Category`, `StorageProvider`: settings payloads, passed through mostly opaque

pub mod setting;
pub mod user;

pub use setting::{Category, NewCategory, NewStorage, StorageProvider};
pub use user::{Gender, LoginRequest, LoginResponse, Role, UpdateProfile, UserInfo};

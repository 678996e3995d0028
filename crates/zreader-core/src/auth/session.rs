use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::storage::{KeyValueStore, StorageError};
use crate::models::UserInfo;

/// Storage key holding the raw session token
pub const TOKEN_KEY: &str = "zr_auth_token";

/// Storage key holding the cached current-user record
pub const CURRENT_USER_KEY: &str = "zr_current_user";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedUser {
    pub user: UserInfo,
    pub cached_at: DateTime<Utc>,
}

impl CachedUser {
    pub fn new(user: UserInfo) -> Self {
        Self {
            user,
            cached_at: Utc::now(),
        }
    }
}

/// Holder of the session token and the cached current user.
///
/// Implementations are last-write-wins with no locking discipline beyond what
/// sharing across tasks requires. `clear` must remove both records.
pub trait SessionStore: Send + Sync {
    fn token(&self) -> Result<Option<String>, StorageError>;

    fn set_token(&self, token: &str) -> Result<(), StorageError>;

    fn current_user(&self) -> Result<Option<CachedUser>, StorageError>;

    fn set_current_user(&self, user: &UserInfo) -> Result<(), StorageError>;

    fn clear(&self) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Authenticated,
    Unauthenticated,
}

impl AuthState {
    pub fn of(store: &dyn SessionStore) -> Result<Self, StorageError> {
        Ok(match store.token()? {
            Some(_) => AuthState::Authenticated,
            None => AuthState::Unauthenticated,
        })
    }

    pub fn is_authenticated(self) -> bool {
        self == AuthState::Authenticated
    }
}

/// Session store persisted under a data directory, one file per key.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    kv: KeyValueStore,
}

impl FileSessionStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            kv: KeyValueStore::new(data_dir),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .kv
            .get(TOKEN_KEY)?
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }

    fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.kv.set(TOKEN_KEY, token)
    }

    fn current_user(&self) -> Result<Option<CachedUser>, StorageError> {
        let Some(contents) = self.kv.get(CURRENT_USER_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StorageError::Serialization {
                key: CURRENT_USER_KEY.to_string(),
                source,
            })
    }

    fn set_current_user(&self, user: &UserInfo) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(&CachedUser::new(user.clone())).map_err(
            |source| StorageError::Serialization {
                key: CURRENT_USER_KEY.to_string(),
                source,
            },
        )?;
        self.kv.set(CURRENT_USER_KEY, &contents)
    }

    fn clear(&self) -> Result<(), StorageError> {
        // Attempt both removals even if the first fails
        let token = self.kv.remove(TOKEN_KEY);
        let user = self.kv.remove(CURRENT_USER_KEY);
        token.and(user)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    token: Option<String>,
    user: Option<CachedUser>,
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    state: Mutex<MemoryState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::default();
        store.lock().token = Some(token.into());
        store
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.lock().token.clone())
    }

    fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.lock().token = Some(token.to_string());
        Ok(())
    }

    fn current_user(&self) -> Result<Option<CachedUser>, StorageError> {
        Ok(self.lock().user.clone())
    }

    fn set_current_user(&self, user: &UserInfo) -> Result<(), StorageError> {
        self.lock().user = Some(CachedUser::new(user.clone()));
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut state = self.lock();
        state.token = None;
        state.user = None;
        Ok(())
    }
}

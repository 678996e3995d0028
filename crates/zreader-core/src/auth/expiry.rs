//! Reaction to session expiry.
//!
//! The client clears the session store and fails the call with
//! `ApiError::SessionExpired`. It never navigates. `ExpiryGuard` sits at the
//! orchestrator level and turns that error into a navigation to the root
//! entry point, where the user can log in again.

use std::sync::Arc;

use tracing::info;

use crate::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Application entry point; the login screen when unauthenticated
    Root,
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

#[derive(Clone)]
pub struct ExpiryGuard {
    navigator: Arc<dyn Navigator>,
}

impl ExpiryGuard {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }

    /// Pass a call result through, navigating to the root on session expiry.
    /// The result itself is returned unchanged.
    pub fn observe<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(ApiError::SessionExpired) = &result {
            info!("Session expired, navigating to entry point");
            self.navigator.navigate(Route::Root);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingNavigator {
        routes: Mutex<Vec<Route>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: Route) {
            self.routes.lock().expect("lock").push(route);
        }
    }

    #[test]
    fn test_navigates_only_on_session_expired() {
        let navigator = Arc::new(RecordingNavigator::default());
        let guard = ExpiryGuard::new(navigator.clone());

        assert_eq!(guard.observe::<u32>(Ok(1)).expect("ok passes through"), 1);
        let business = guard.observe::<u32>(Err(ApiError::Business {
            code: "A1001".to_string(),
            message: "bad password".to_string(),
        }));
        assert!(matches!(business, Err(ApiError::Business { .. })));
        assert!(navigator.routes.lock().expect("lock").is_empty());

        let expired = guard.observe::<u32>(Err(ApiError::SessionExpired));
        assert!(matches!(expired, Err(ApiError::SessionExpired)));
        assert_eq!(*navigator.routes.lock().expect("lock"), vec![Route::Root]);
    }
}

use std::sync::atomic::{AtomicBool, Ordering};

use zreader_core::{codes, Navigator, Route};

/// Terminal counterpart of a page navigation.
///
/// Going to the root while logged out means the login prompt, so a root
/// navigation is recorded and the app offers a fresh login once the current
/// command has unwound.
#[derive(Debug, Default)]
pub struct CliNavigator {
    login_requested: AtomicBool,
}

impl CliNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending login request, resetting it
    pub fn take_login_request(&self) -> bool {
        self.login_requested.swap(false, Ordering::SeqCst)
    }
}

impl Navigator for CliNavigator {
    fn navigate(&self, route: Route) {
        match route {
            Route::Root => {
                eprintln!("{}", codes::message_for(codes::SESSION_EXPIRED));
                self.login_requested.store(true, Ordering::SeqCst);
            }
        }
    }
}

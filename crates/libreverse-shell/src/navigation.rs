//! In-page navigation policy for the Viewer
//!
//! The Viewer only follows links within the origin it was loaded with.
//! Anything else goes to the user's default browser.

use libreverse_core::Address;
use std::sync::{Arc, Mutex};
use url::{Origin, Url};

/// What to do with a navigation request inside the Viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Same origin, let the webview proceed
    Allow,
    /// Cancel in the Viewer and hand the URL to the system browser
    OpenExternal(String),
    /// Cancel and do nothing else
    Cancel,
}

impl NavigationDecision {
    /// The boolean a webview navigation handler expects
    pub fn proceeds(&self) -> bool {
        matches!(self, NavigationDecision::Allow)
    }
}

/// Origin the Viewer is pinned to
#[derive(Debug, Clone)]
pub struct OriginGuard {
    origin: Origin,
}

impl OriginGuard {
    pub fn new(address: &Address) -> Self {
        Self {
            origin: address.origin(),
        }
    }

    pub fn check(&self, target: &str) -> NavigationDecision {
        match Url::parse(target) {
            Ok(url) if url.origin() == self.origin => NavigationDecision::Allow,
            Ok(_) => NavigationDecision::OpenExternal(target.to_string()),
            Err(e) => {
                log::error!("Navigation error for {}: {}", target, e);
                NavigationDecision::Cancel
            }
        }
    }
}

/// Shared guard handle read by the webview's navigation callback.
///
/// The callback is a `'static` closure owned by the webview, so the guard
/// lives behind a mutex that the host updates on every load.
#[derive(Debug, Clone, Default)]
pub struct ViewerNavigation {
    guard: Arc<Mutex<Option<OriginGuard>>>,
}

impl ViewerNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the Viewer to `address`'s origin.
    pub fn set_origin(&self, address: &Address) {
        if let Ok(mut guard) = self.guard.lock() {
            *guard = Some(OriginGuard::new(address));
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.guard.lock() {
            *guard = None;
        }
    }

    /// Decide a navigation; with no origin pinned nothing is allowed.
    pub fn decide(&self, target: &str) -> NavigationDecision {
        match self.guard.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(origin) => origin.check(target),
                None => NavigationDecision::Cancel,
            },
            Err(_) => NavigationDecision::Cancel,
        }
    }
}

//! Window session state
//!
//! The host owns exactly one [`Session`]. It records which windows exist
//! and which one the user is looking at; every create/destroy goes through
//! it so the at-most-one-of-each invariant is checked in one place.

use crate::bridge::BridgeEvent;
use crate::navigation::ViewerNavigation;
use libreverse_core::{Address, LauncherResult, WindowKind};

/// Lifecycle states of the host process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No window exists (startup, or resident with every window closed)
    NoWindows,
    /// The launcher is the window in front
    LauncherVisible,
    /// The viewer is shown and the launcher hidden
    ViewerVisible,
    /// The process is shutting down
    Closed,
}

/// What the event loop should do after the launcher closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownDecision {
    Exit,
    /// Keep running without windows until the app is reactivated
    StayResident,
}

/// Everything the host needs from the windowing toolkit.
///
/// Implemented over tao/wry in the app and by recording fakes in tests.
pub trait WindowBackend {
    /// Create the launcher window (hidden until its page finishes loading)
    fn create_launcher(&mut self) -> LauncherResult<()>;

    /// Create the viewer window pointed at `address`, hidden until loaded
    fn create_viewer(&mut self, address: &Address, navigation: ViewerNavigation)
        -> LauncherResult<()>;

    /// Load `address` into the existing viewer
    fn navigate_viewer(&mut self, address: &Address) -> LauncherResult<()>;

    fn show_window(&mut self, kind: WindowKind);

    fn hide_window(&mut self, kind: WindowKind);

    /// Destroy a window and its webview
    fn close_window(&mut self, kind: WindowKind);

    /// Force the launcher page out of its loading state
    fn reset_launcher_loading(&mut self);

    /// Apply a new launcher height, keeping position and width
    fn set_launcher_height(&mut self, height: u32);

    /// Logical height of the primary display's usable area
    fn primary_screen_height(&self) -> Option<u32>;

    /// Deliver an event to the launcher page
    fn emit(&mut self, event: BridgeEvent);

    /// Open `url` in the user's default browser
    fn open_external(&mut self, url: &str) -> LauncherResult<()>;

    /// Show a modal error dialog
    fn show_error_dialog(&mut self, title: &str, message: &str) -> LauncherResult<()>;
}

/// Which windows exist and which is in front
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    launcher_open: bool,
    viewer: Option<ViewerSlot>,
}

#[derive(Debug)]
struct ViewerSlot {
    address: Address,
    shown: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::NoWindows,
            launcher_open: false,
            viewer: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn has_launcher(&self) -> bool {
        self.launcher_open
    }

    pub fn has_viewer(&self) -> bool {
        self.viewer.is_some()
    }

    pub fn viewer_shown(&self) -> bool {
        self.viewer.as_ref().is_some_and(|viewer| viewer.shown)
    }

    pub fn viewer_address(&self) -> Option<&Address> {
        self.viewer.as_ref().map(|viewer| &viewer.address)
    }

    pub fn launcher_opened(&mut self) {
        self.launcher_open = true;
        self.state = SessionState::LauncherVisible;
    }

    pub fn viewer_opened(&mut self, address: Address) {
        debug_assert!(self.viewer.is_none(), "second viewer created");
        self.viewer = Some(ViewerSlot {
            address,
            shown: false,
        });
    }

    pub fn viewer_navigated(&mut self, address: Address) {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.address = address;
        }
    }

    pub fn viewer_shown_now(&mut self) {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.shown = true;
            self.state = SessionState::ViewerVisible;
        }
    }

    /// Viewer destroyed; the launcher (if any) is back in front.
    pub fn viewer_gone(&mut self) {
        self.viewer = None;
        self.state = if self.launcher_open {
            SessionState::LauncherVisible
        } else {
            SessionState::NoWindows
        };
    }

    /// Launcher destroyed; the viewer is expected to be gone as well.
    pub fn launcher_gone(&mut self, decision: ShutdownDecision) {
        self.launcher_open = false;
        self.viewer = None;
        self.state = match decision {
            ShutdownDecision::Exit => SessionState::Closed,
            ShutdownDecision::StayResident => SessionState::NoWindows,
        };
    }
}

//! Recording fakes shared by the unit tests

use crate::bridge::BridgeEvent;
use crate::navigation::ViewerNavigation;
use crate::session::WindowBackend;
use crate::updater::UpdateNotifier;
use libreverse_core::{Address, LauncherError, LauncherResult, WindowKind};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateLauncher,
    CreateViewer(String),
    NavigateViewer(String),
    Show(WindowKind),
    Hide(WindowKind),
    Close(WindowKind),
    ResetLoading,
    SetHeight(u32),
    Emit(BridgeEvent),
    OpenExternal(String),
    Dialog(String, String),
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    pub calls: Vec<Call>,
    pub screen_height: Option<u32>,
    pub fail_viewer_creation: bool,
    pub fail_dialogs: bool,
    pub fail_external: bool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            screen_height: Some(1080),
            ..Self::default()
        }
    }

    pub fn viewers_created(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::CreateViewer(_)))
            .count()
    }

    pub fn heights(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SetHeight(height) => Some(*height),
                _ => None,
            })
            .collect()
    }

    pub fn events(&self) -> Vec<BridgeEvent> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Emit(event) => Some(event.clone()),
                _ => None,
            })
            .collect()
    }
}

impl WindowBackend for FakeBackend {
    fn create_launcher(&mut self) -> LauncherResult<()> {
        self.calls.push(Call::CreateLauncher);
        Ok(())
    }

    fn create_viewer(&mut self, address: &Address, _navigation: ViewerNavigation) -> LauncherResult<()> {
        if self.fail_viewer_creation {
            return Err(LauncherError::window("webview creation failed"));
        }
        self.calls.push(Call::CreateViewer(address.as_str().to_string()));
        Ok(())
    }

    fn navigate_viewer(&mut self, address: &Address) -> LauncherResult<()> {
        self.calls.push(Call::NavigateViewer(address.as_str().to_string()));
        Ok(())
    }

    fn show_window(&mut self, kind: WindowKind) {
        self.calls.push(Call::Show(kind));
    }

    fn hide_window(&mut self, kind: WindowKind) {
        self.calls.push(Call::Hide(kind));
    }

    fn close_window(&mut self, kind: WindowKind) {
        self.calls.push(Call::Close(kind));
    }

    fn reset_launcher_loading(&mut self) {
        self.calls.push(Call::ResetLoading);
    }

    fn set_launcher_height(&mut self, height: u32) {
        self.calls.push(Call::SetHeight(height));
    }

    fn primary_screen_height(&self) -> Option<u32> {
        self.screen_height
    }

    fn emit(&mut self, event: BridgeEvent) {
        self.calls.push(Call::Emit(event));
    }

    fn open_external(&mut self, url: &str) -> LauncherResult<()> {
        self.calls.push(Call::OpenExternal(url.to_string()));
        if self.fail_external {
            return Err(LauncherError::navigation("no browser"));
        }
        Ok(())
    }

    fn show_error_dialog(&mut self, title: &str, message: &str) -> LauncherResult<()> {
        self.calls.push(Call::Dialog(title.to_string(), message.to_string()));
        if self.fail_dialogs {
            return Err(LauncherError::dialog("no display"));
        }
        Ok(())
    }
}

/// Notifier that only counts how often it was asked to check
#[derive(Debug, Default)]
pub struct CountingNotifier {
    pub checks: Rc<Cell<u32>>,
    pub unreachable: bool,
}

impl UpdateNotifier for CountingNotifier {
    fn check_for_updates(&mut self) -> LauncherResult<()> {
        self.checks.set(self.checks.get() + 1);
        if self.unreachable {
            return Err(LauncherError::update("feed unreachable"));
        }
        Ok(())
    }
}

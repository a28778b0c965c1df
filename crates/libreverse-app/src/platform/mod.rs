//! Platform abstraction layer
//!
//! Window chrome, menus, external links and dialogs differ across macOS,
//! Windows, and Linux. Everything OS-specific sits behind
//! [`PlatformManager`] so the rest of the app stays platform-agnostic.

#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "linux")]
mod linux;

use muda::{Menu, PredefinedMenuItem, Submenu};
use rfd::{MessageButtons, MessageDialog, MessageLevel};
use tao::window::{Window, WindowBuilder};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Result type for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Platform-specific error types
#[derive(Error, Debug, Clone)]
pub enum PlatformError {
    /// Menu initialization failed
    #[error("Menu initialization failed: {0}")]
    MenuInitFailed(String),
    /// Failed to open external URL
    #[error("Failed to open external: {0}")]
    OpenExternalFailed(String),
    /// The URL scheme is not one we hand to the OS
    #[error("Refusing to open {0}")]
    SchemeNotAllowed(String),
}

/// How window chrome is drawn on this platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleBarStyle {
    /// Native title bar hidden, traffic lights inset over the content
    HiddenInset,
    /// No OS decorations; the page supplies a drag region
    Frameless,
}

/// Platform-specific capabilities
#[derive(Debug, Clone)]
pub struct PlatformCapabilities {
    /// Whether a native menu is required for clipboard operations (macOS)
    pub native_menu_required_for_clipboard: bool,
    /// Whether the app keeps running after its last window closes
    pub keeps_running_without_windows: bool,
    pub title_bar: TitleBarStyle,
    /// Whether the viewer keeps the native window frame
    pub framed_viewer: bool,
    /// Platform name for logging/debugging
    pub platform_name: &'static str,
}

/// Trait for platform-specific operations
pub trait PlatformManager: Send + Sync {
    /// Initialize the native menu for the window
    ///
    /// On macOS this installs the app-wide menu, without which Cmd+C/V do
    /// nothing inside a webview. Elsewhere the menu is only attached to
    /// decorated windows.
    fn initialize_menu(&self, window: &Window, menu: &Menu) -> PlatformResult<()>;

    /// Open a URL in the system's default browser
    fn open_external(&self, url: &str) -> PlatformResult<()> {
        open_with_system(url)
    }

    /// Apply this platform's title bar treatment to a window under construction
    fn window_chrome(&self, builder: WindowBuilder) -> WindowBuilder;

    /// Title bar treatment for the viewer.
    ///
    /// Instance pages draw no window controls, so the viewer keeps the
    /// native frame unless the platform overlays its own buttons.
    fn viewer_chrome(&self, builder: WindowBuilder) -> WindowBuilder {
        if self.capabilities().framed_viewer {
            builder.with_decorations(true)
        } else {
            self.window_chrome(builder)
        }
    }

    /// Get the platform's capabilities
    fn capabilities(&self) -> &PlatformCapabilities;

    /// Show a blocking error dialog
    fn show_error_dialog(&self, title: &str, message: &str) -> PlatformResult<()> {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
        Ok(())
    }

    fn keeps_running_without_windows(&self) -> bool {
        self.capabilities().keeps_running_without_windows
    }

    /// Get the platform name for logging
    fn platform_name(&self) -> &'static str {
        self.capabilities().platform_name
    }
}

/// Get the platform manager for the current operating system
pub fn get_platform_manager() -> Box<dyn PlatformManager> {
    #[cfg(target_os = "macos")]
    {
        Box::new(macos::MacOSPlatform::new())
    }

    #[cfg(target_os = "windows")]
    {
        Box::new(windows::WindowsPlatform::new())
    }

    #[cfg(target_os = "linux")]
    {
        Box::new(linux::LinuxPlatform::new())
    }
}

/// Schemes that may leave the app for the system handler
const EXTERNAL_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Check that `url` is safe to hand to the OS opener.
///
/// Remote pages can ask for anything; only web and mail links get through.
pub fn check_external_url(url: &str) -> PlatformResult<Url> {
    match Url::parse(url) {
        Ok(parsed) if EXTERNAL_SCHEMES.contains(&parsed.scheme()) => Ok(parsed),
        _ => Err(PlatformError::SchemeNotAllowed(url.to_string())),
    }
}

/// Hand `url` to the desktop's default handler.
///
/// The `open` crate goes through ShellExecuteW on Windows, so no shell
/// ever parses the URL. It waits for xdg-open/open on Unix, which reaps
/// the helper; that wait happens on a short-lived thread off the event loop.
pub(crate) fn open_with_system(url: &str) -> PlatformResult<()> {
    dispatch_external(url, |target| {
        std::thread::Builder::new()
            .name("open-external".to_string())
            .spawn(move || {
                if let Err(e) = open::that(&target) {
                    warn!("System opener failed for {}: {}", target, e);
                }
            })
            .map(|_| ())
    })
}

/// Validate `url` and pass the whole serialized URL to `launch` as one value.
fn dispatch_external<F>(url: &str, launch: F) -> PlatformResult<()>
where
    F: FnOnce(String) -> std::io::Result<()>,
{
    let target = check_external_url(url)?;
    debug!("Opening external URL: {}", target);
    launch(target.into()).map_err(|e| PlatformError::OpenExternalFailed(format!("{}: {}", url, e)))
}

/// Edit menu with clipboard operations, shared by every platform
pub(crate) fn create_edit_menu(menu: &Menu) -> PlatformResult<()> {
    let edit_menu = Submenu::new("Edit", true);

    let items = [
        PredefinedMenuItem::undo(None),
        PredefinedMenuItem::redo(None),
        PredefinedMenuItem::separator(),
        PredefinedMenuItem::cut(None),
        PredefinedMenuItem::copy(None),
        PredefinedMenuItem::paste(None),
        PredefinedMenuItem::select_all(None),
    ];
    for item in &items {
        edit_menu
            .append(item)
            .map_err(|e| PlatformError::MenuInitFailed(format!("Failed to add Edit item: {}", e)))?;
    }

    menu.append(&edit_menu)
        .map_err(|e| PlatformError::MenuInitFailed(format!("Failed to append edit menu: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_urls_limited_to_web_and_mail() {
        assert!(check_external_url("https://example.com/page").is_ok());
        assert!(check_external_url("http://localhost:3000").is_ok());
        assert!(check_external_url("mailto:team@example.com").is_ok());

        assert!(check_external_url("file:///etc/passwd").is_err());
        assert!(check_external_url("javascript:alert(1)").is_err());
        assert!(check_external_url("not a url").is_err());
    }

    #[test]
    fn test_scheme_error_names_url() {
        let err = check_external_url("smb://share").unwrap_err();
        assert_eq!(err.to_string(), "Refusing to open smb://share");
    }

    #[test]
    fn test_external_url_reaches_opener_whole() {
        let mut launched = Vec::new();
        let url = "https://evil.example/?a&calc.exe&x=%PATH%|more^";
        dispatch_external(url, |target| {
            launched.push(target);
            Ok(())
        })
        .unwrap();

        assert_eq!(launched.len(), 1);
        assert!(launched[0].starts_with("https://evil.example/?a&calc.exe&x=%PATH%"));
    }

    #[test]
    fn test_refused_scheme_never_launches() {
        let mut launched = 0;
        let result = dispatch_external("file:///etc/passwd", |_| {
            launched += 1;
            Ok(())
        });
        assert!(matches!(result, Err(PlatformError::SchemeNotAllowed(_))));
        assert_eq!(launched, 0);
    }

    #[test]
    fn test_opener_failure_reported() {
        let err = dispatch_external("https://example.com/", |_| {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no handler"))
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to open external: https://example.com/: no handler"
        );
    }

    #[test]
    fn test_viewer_chrome_follows_capabilities() {
        let platform = get_platform_manager();
        let builder = platform.viewer_chrome(WindowBuilder::new().with_decorations(false));
        if platform.capabilities().framed_viewer {
            assert!(builder.window.decorations);
        }
    }

    #[test]
    fn test_current_platform_is_consistent() {
        let platform = get_platform_manager();
        let caps = platform.capabilities();
        assert_eq!(
            platform.keeps_running_without_windows(),
            caps.keeps_running_without_windows
        );
        assert!(!platform.platform_name().is_empty());
    }
}

//! Windows platform implementation
//!
//! Frameless launcher and natively framed viewer, as on Linux. WebView2
//! handles clipboard shortcuts on its own, so a menu is only attached to
//! decorated windows.

use super::{
    create_edit_menu, PlatformCapabilities, PlatformError, PlatformManager, PlatformResult,
    TitleBarStyle,
};
use muda::Menu;
use tao::window::{Window, WindowBuilder};
use tracing::debug;

/// Windows platform manager
pub struct WindowsPlatform {
    capabilities: PlatformCapabilities,
}

impl WindowsPlatform {
    pub fn new() -> Self {
        Self {
            capabilities: PlatformCapabilities {
                native_menu_required_for_clipboard: false,
                keeps_running_without_windows: false,
                framed_viewer: true,
                title_bar: TitleBarStyle::Frameless,
                platform_name: "Windows",
            },
        }
    }
}

impl Default for WindowsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformManager for WindowsPlatform {
    fn initialize_menu(&self, window: &Window, menu: &Menu) -> PlatformResult<()> {
        if !window.is_decorated() {
            debug!("Frameless window, skipping menu bar");
            return Ok(());
        }

        create_edit_menu(menu)?;

        use tao::platform::windows::WindowExtWindows;
        unsafe {
            menu.init_for_hwnd(window.hwnd() as _)
                .map_err(|e| PlatformError::MenuInitFailed(format!("HWND init failed: {}", e)))?;
        }

        debug!("Windows menu initialized successfully");
        Ok(())
    }

    fn window_chrome(&self, builder: WindowBuilder) -> WindowBuilder {
        builder.with_decorations(false)
    }

    fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }
}

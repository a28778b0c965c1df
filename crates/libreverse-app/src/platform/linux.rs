//! Linux platform implementation
//!
//! The launcher is frameless and draws its own title bar buttons; the
//! viewer keeps the GTK frame. The Edit menu is only attached to decorated
//! windows, since GTK entries already handle clipboard shortcuts.

use super::{
    create_edit_menu, PlatformCapabilities, PlatformError, PlatformManager, PlatformResult,
    TitleBarStyle,
};
use muda::Menu;
use tao::window::{Window, WindowBuilder};
use tracing::{debug, warn};

/// Linux platform manager
pub struct LinuxPlatform {
    capabilities: PlatformCapabilities,
}

impl LinuxPlatform {
    pub fn new() -> Self {
        Self {
            capabilities: PlatformCapabilities {
                native_menu_required_for_clipboard: false,
                keeps_running_without_windows: false,
                framed_viewer: true,
                title_bar: TitleBarStyle::Frameless,
                platform_name: "Linux",
            },
        }
    }
}

impl Default for LinuxPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformManager for LinuxPlatform {
    fn initialize_menu(&self, window: &Window, menu: &Menu) -> PlatformResult<()> {
        if !window.is_decorated() {
            debug!("Frameless window, skipping menu bar");
            return Ok(());
        }

        create_edit_menu(menu)?;

        use tao::platform::unix::WindowExtUnix;

        // The vbox may be missing in headless environments
        match window.default_vbox() {
            Some(vbox) => {
                menu.init_for_gtk_window(window.gtk_window(), Some(vbox))
                    .map_err(|e| PlatformError::MenuInitFailed(format!("GTK init failed: {}", e)))?;
            }
            None => {
                warn!("GTK container not available for menu initialization");
            }
        }

        debug!("Linux menu initialized successfully");
        Ok(())
    }

    fn window_chrome(&self, builder: WindowBuilder) -> WindowBuilder {
        builder.with_decorations(false)
    }

    fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }
}

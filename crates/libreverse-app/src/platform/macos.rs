//! macOS platform implementation
//!
//! macOS needs a native menu for clipboard shortcuts to reach the webview,
//! keeps the app alive after the last window closes, and uses an inset
//! title bar that leaves the traffic lights floating over the page.

use super::{
    create_edit_menu, PlatformCapabilities, PlatformError, PlatformManager, PlatformResult,
    TitleBarStyle,
};
use muda::{Menu, PredefinedMenuItem, Submenu};
use tao::platform::macos::WindowBuilderExtMacOS;
use tao::window::{Window, WindowBuilder};
use tracing::debug;

/// macOS platform manager
pub struct MacOSPlatform {
    capabilities: PlatformCapabilities,
}

impl MacOSPlatform {
    pub fn new() -> Self {
        Self {
            capabilities: PlatformCapabilities {
                native_menu_required_for_clipboard: true,
                keeps_running_without_windows: true,
                framed_viewer: false,
                title_bar: TitleBarStyle::HiddenInset,
                platform_name: "macOS",
            },
        }
    }

    fn create_app_menu(&self, menu: &Menu) -> PlatformResult<()> {
        let app_menu = Submenu::new("Libreverse Desktop", true);

        let items = [
            PredefinedMenuItem::about(Some("About Libreverse Desktop"), None),
            PredefinedMenuItem::separator(),
            PredefinedMenuItem::services(None),
            PredefinedMenuItem::separator(),
            PredefinedMenuItem::hide(None),
            PredefinedMenuItem::hide_others(None),
            PredefinedMenuItem::show_all(None),
            PredefinedMenuItem::separator(),
            PredefinedMenuItem::quit(None),
        ];
        for item in &items {
            app_menu
                .append(item)
                .map_err(|e| PlatformError::MenuInitFailed(format!("Failed to add app item: {}", e)))?;
        }

        menu.append(&app_menu)
            .map_err(|e| PlatformError::MenuInitFailed(format!("Failed to append app menu: {}", e)))?;

        Ok(())
    }

    fn create_window_menu(&self, menu: &Menu) -> PlatformResult<()> {
        let window_menu = Submenu::new("Window", true);

        let items = [
            PredefinedMenuItem::minimize(None),
            PredefinedMenuItem::maximize(None),
            PredefinedMenuItem::separator(),
            PredefinedMenuItem::close_window(None),
        ];
        for item in &items {
            window_menu
                .append(item)
                .map_err(|e| PlatformError::MenuInitFailed(format!("Failed to add window item: {}", e)))?;
        }

        menu.append(&window_menu)
            .map_err(|e| PlatformError::MenuInitFailed(format!("Failed to append window menu: {}", e)))?;

        Ok(())
    }
}

impl Default for MacOSPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformManager for MacOSPlatform {
    fn initialize_menu(&self, _window: &Window, menu: &Menu) -> PlatformResult<()> {
        self.create_app_menu(menu)?;
        create_edit_menu(menu)?;
        self.create_window_menu(menu)?;

        // The menu is app-wide on macOS
        menu.init_for_nsapp();

        debug!("macOS menu initialized");
        Ok(())
    }

    fn window_chrome(&self, builder: WindowBuilder) -> WindowBuilder {
        builder
            .with_titlebar_transparent(true)
            .with_title_hidden(true)
            .with_fullsize_content_view(true)
    }

    fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }
}

//! tao/wry implementation of the host's window backend
//!
//! Windows live in [`AppWindows`] for the whole run of the event loop.
//! A [`WryBackend`] is a short-lived view over them plus the loop target,
//! built for each event that needs to touch a window.

use crate::ipc::{platform_script, LAUNCHER_BRIDGE, RESET_LOADING_SCRIPT, VIEWER_CHROME_SCRIPT};
use crate::platform::{PlatformManager, TitleBarStyle};
use crate::UserEvent;
use libreverse_core::{Address, LauncherConfig, LauncherError, LauncherResult, WindowKind};
use libreverse_shell::bridge::{event_script, reply_script, BridgeEvent, BridgeReply, ChromeMessage, IpcResponse};
use libreverse_shell::{NavigationDecision, ViewerNavigation, WindowBackend};
use tao::dpi::{LogicalPosition, LogicalSize};
use tao::event_loop::{EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Window, WindowBuilder, WindowId};
use tracing::{debug, error, warn};
use wry::{PageLoadEvent, WebView, WebViewBuilder};

/// The HTML for the launcher page
const LAUNCHER_HTML: &str = include_str!("ui/launcher.html");

/// A window and the webview filling it
struct WindowSlot {
    // Declared first so the webview drops before its window
    webview: WebView,
    window: Window,
}

/// The (at most) two windows of the app
#[derive(Default)]
pub struct AppWindows {
    launcher: Option<WindowSlot>,
    viewer: Option<WindowSlot>,
}

impl AppWindows {
    fn slot(&self, kind: WindowKind) -> Option<&WindowSlot> {
        match kind {
            WindowKind::Launcher => self.launcher.as_ref(),
            WindowKind::Viewer => self.viewer.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: WindowKind) -> &mut Option<WindowSlot> {
        match kind {
            WindowKind::Launcher => &mut self.launcher,
            WindowKind::Viewer => &mut self.viewer,
        }
    }

    pub fn window(&self, kind: WindowKind) -> Option<&Window> {
        self.slot(kind).map(|slot| &slot.window)
    }

    /// Which of our windows `id` belongs to
    pub fn kind_of(&self, id: WindowId) -> Option<WindowKind> {
        [WindowKind::Launcher, WindowKind::Viewer]
            .into_iter()
            .find(|kind| self.window(*kind).is_some_and(|window| window.id() == id))
    }

    fn evaluate(&self, kind: WindowKind, script: &str) {
        if let Some(slot) = self.slot(kind) {
            if let Err(e) = slot.webview.evaluate_script(script) {
                error!("Failed to run script in {}: {}", kind.as_str(), e);
            }
        }
    }

    /// Add the drag strip to the page the viewer just finished loading
    pub fn install_viewer_chrome(&self) {
        self.evaluate(WindowKind::Viewer, VIEWER_CHROME_SCRIPT);
    }

    /// Settle a pending launcher request
    pub fn reply(&self, id: u64, response: IpcResponse) {
        let script = reply_script(&BridgeReply { id, response });
        self.evaluate(WindowKind::Launcher, &script);
    }

    /// Carry out a window-chrome message from `kind`.
    ///
    /// Returns true when the message asks for the window to close; the
    /// caller routes that through the same path as the OS close button.
    pub fn apply_chrome(&self, kind: WindowKind, message: ChromeMessage) -> bool {
        let Some(window) = self.window(kind) else {
            return false;
        };
        match message {
            ChromeMessage::StartWindowDrag => {
                if let Err(e) = window.drag_window() {
                    warn!("Window drag failed: {}", e);
                }
                false
            }
            ChromeMessage::MinimizeWindow => {
                window.set_minimized(true);
                false
            }
            ChromeMessage::CloseWindow => true,
        }
    }
}

/// [`WindowBackend`] over tao windows and wry webviews
pub struct WryBackend<'a> {
    target: &'a EventLoopWindowTarget<UserEvent>,
    windows: &'a mut AppWindows,
    proxy: &'a EventLoopProxy<UserEvent>,
    config: &'a LauncherConfig,
    platform: &'a dyn PlatformManager,
}

impl<'a> WryBackend<'a> {
    pub fn new(
        target: &'a EventLoopWindowTarget<UserEvent>,
        windows: &'a mut AppWindows,
        proxy: &'a EventLoopProxy<UserEvent>,
        config: &'a LauncherConfig,
        platform: &'a dyn PlatformManager,
    ) -> Self {
        Self {
            target,
            windows,
            proxy,
            config,
            platform,
        }
    }

    /// Hidden window centered on the primary monitor
    fn build_window(&self, builder: WindowBuilder, width: u32, height: u32) -> LauncherResult<Window> {
        let mut builder = builder
            .with_inner_size(LogicalSize::new(width, height))
            .with_visible(false);

        if let Some(monitor) = self.target.primary_monitor() {
            let scale = monitor.scale_factor();
            let size = monitor.size().to_logical::<f64>(scale);
            let origin = monitor.position().to_logical::<f64>(scale);
            let x = origin.x + (size.width - width as f64).max(0.0) / 2.0;
            let y = origin.y + (size.height - height as f64).max(0.0) / 2.0;
            builder = builder.with_position(LogicalPosition::new(x, y));
        }

        builder
            .build(self.target)
            .map_err(|e| LauncherError::window(e.to_string()))
    }
}

/// Attach a webview to `window`, using the GTK container on Linux
fn attach(builder: WebViewBuilder<'_>, window: &Window) -> LauncherResult<WebView> {
    #[cfg(target_os = "linux")]
    let built = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        match window.default_vbox() {
            Some(vbox) => builder.build_gtk(vbox),
            None => builder.build(window),
        }
    };
    #[cfg(not(target_os = "linux"))]
    let built = builder.build(window);

    built.map_err(|e| LauncherError::webview(e.to_string()))
}

fn title_bar_name(style: TitleBarStyle) -> &'static str {
    match style {
        TitleBarStyle::HiddenInset => "hidden-inset",
        TitleBarStyle::Frameless => "frameless",
    }
}

impl WindowBackend for WryBackend<'_> {
    fn create_launcher(&mut self) -> LauncherResult<()> {
        let launcher = &self.config.launcher;
        let mut builder = self
            .platform
            .window_chrome(WindowBuilder::new())
            .with_title(&launcher.title)
            .with_resizable(false)
            .with_min_inner_size(LogicalSize::new(launcher.width, launcher.min_height));
        if let Some(screen) = self.primary_screen_height() {
            let max_height = (screen as f64 * launcher.max_height_ratio).floor();
            builder = builder.with_max_inner_size(LogicalSize::new(launcher.width as f64, max_height));
        }
        let window = self.build_window(builder, launcher.width, launcher.height)?;

        let ipc_proxy = self.proxy.clone();
        let load_proxy = self.proxy.clone();
        let webview = attach(
            WebViewBuilder::new()
                .with_html(LAUNCHER_HTML)
                .with_devtools(self.config.devtools)
                .with_clipboard(true)
                .with_initialization_script(LAUNCHER_BRIDGE)
                .with_initialization_script(&platform_script(title_bar_name(
                    self.platform.capabilities().title_bar,
                )))
                .with_ipc_handler(move |request| {
                    let _ = ipc_proxy.send_event(UserEvent::LauncherMessage(request.body().clone()));
                })
                .with_on_page_load_handler(move |event, _url| {
                    if let PageLoadEvent::Finished = event {
                        let _ = load_proxy.send_event(UserEvent::PageLoaded(WindowKind::Launcher));
                    }
                }),
            &window,
        )?;

        self.windows.launcher = Some(WindowSlot { webview, window });
        Ok(())
    }

    fn create_viewer(&mut self, address: &Address, navigation: ViewerNavigation) -> LauncherResult<()> {
        let viewer = &self.config.viewer;
        let builder = self
            .platform
            .viewer_chrome(WindowBuilder::new())
            .with_title(&viewer.title);
        let window = self.build_window(builder, viewer.width, viewer.height)?;

        let nav_proxy = self.proxy.clone();
        let popup_proxy = self.proxy.clone();
        let ipc_proxy = self.proxy.clone();
        let load_proxy = self.proxy.clone();
        let webview = attach(
            WebViewBuilder::new()
                .with_url(address.as_str())
                .with_devtools(self.config.devtools)
                .with_clipboard(true)
                .with_navigation_handler(move |url| match navigation.decide(&url) {
                    NavigationDecision::Allow => true,
                    NavigationDecision::OpenExternal(url) => {
                        let _ = nav_proxy.send_event(UserEvent::OpenExternal(url));
                        false
                    }
                    NavigationDecision::Cancel => false,
                })
                .with_new_window_req_handler(move |url| {
                    debug!("Viewer asked for a new window: {}", url);
                    let _ = popup_proxy.send_event(UserEvent::OpenExternal(url));
                    false
                })
                .with_ipc_handler(move |request| {
                    let _ = ipc_proxy.send_event(UserEvent::ViewerMessage(request.body().clone()));
                })
                .with_on_page_load_handler(move |event, _url| {
                    if let PageLoadEvent::Finished = event {
                        let _ = load_proxy.send_event(UserEvent::PageLoaded(WindowKind::Viewer));
                    }
                }),
            &window,
        )?;

        self.windows.viewer = Some(WindowSlot { webview, window });
        Ok(())
    }

    fn navigate_viewer(&mut self, address: &Address) -> LauncherResult<()> {
        let slot = self
            .windows
            .viewer
            .as_ref()
            .ok_or_else(|| LauncherError::window("viewer does not exist"))?;
        slot.webview
            .load_url(address.as_str())
            .map_err(|e| LauncherError::webview(e.to_string()))
    }

    fn show_window(&mut self, kind: WindowKind) {
        if let Some(window) = self.windows.window(kind) {
            window.set_visible(true);
            window.set_focus();
        }
    }

    fn hide_window(&mut self, kind: WindowKind) {
        if let Some(window) = self.windows.window(kind) {
            window.set_visible(false);
        }
    }

    fn close_window(&mut self, kind: WindowKind) {
        if self.windows.slot_mut(kind).take().is_some() {
            debug!("Destroyed {} window", kind.as_str());
        }
    }

    fn reset_launcher_loading(&mut self) {
        self.windows.evaluate(WindowKind::Launcher, RESET_LOADING_SCRIPT);
    }

    fn set_launcher_height(&mut self, height: u32) {
        if let Some(window) = self.windows.window(WindowKind::Launcher) {
            let width = window.inner_size().to_logical::<f64>(window.scale_factor()).width;
            window.set_inner_size(LogicalSize::new(width, height as f64));
        }
    }

    fn primary_screen_height(&self) -> Option<u32> {
        let monitor = self.target.primary_monitor()?;
        let size = monitor.size().to_logical::<f64>(monitor.scale_factor());
        Some(size.height as u32)
    }

    fn emit(&mut self, event: BridgeEvent) {
        self.windows.evaluate(WindowKind::Launcher, &event_script(&event));
    }

    fn open_external(&mut self, url: &str) -> LauncherResult<()> {
        self.platform
            .open_external(url)
            .map_err(|e| LauncherError::navigation(e.to_string()))
    }

    fn show_error_dialog(&mut self, title: &str, message: &str) -> LauncherResult<()> {
        self.platform
            .show_error_dialog(title, message)
            .map_err(|e| LauncherError::dialog(e.to_string()))
    }
}

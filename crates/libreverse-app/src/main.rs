//! Libreverse Desktop - Main Application Entry Point
//!
//! Two windows: a small Launcher where the user picks an instance, and a
//! Viewer that shows it. All decisions live in `libreverse_shell`; this file
//! wires tao events into the host and owns the event loop.

mod backend;
mod ipc;
mod platform;

use backend::{AppWindows, WryBackend};
use ipc::LauncherMessage;
use libreverse_core::{LauncherConfig, LauncherError, WindowKind};
use libreverse_shell::bridge::{parse_chrome_message, IpcResponse};
use libreverse_shell::{HostProcess, NullNotifier, PerfMonitor, ShutdownDecision, UpdateSignal};
use libreverse_store::RecentUrlStore;
use muda::Menu;
use platform::get_platform_manager;
use std::time::Instant;
use tao::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_INIT_TIMER: &str = "App Initialization";

/// Events delivered to the loop from webview callbacks and the updater
#[derive(Debug)]
enum UserEvent {
    /// Raw IPC body from the launcher page
    LauncherMessage(String),
    /// Raw IPC body from the viewer page
    ViewerMessage(String),
    PageLoaded(WindowKind),
    OpenExternal(String),
    Update(UpdateSignal),
}

fn init_logging() {
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to set log tracer: {}", e);
    }
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set subscriber: {}", e);
    }
}

fn open_store(config: &LauncherConfig) -> Option<RecentUrlStore> {
    match RecentUrlStore::open(config.store_path()) {
        Ok(store) => Some(store.with_capacity(config.max_recent_urls)),
        Err(e) => {
            warn!("Recent URL store unavailable, continuing without it: {}", e);
            None
        }
    }
}

/// Route a close request for `kind` through the host.
fn close_requested(host: &mut HostProcess, backend: &mut WryBackend<'_>, kind: WindowKind) -> ControlFlow {
    match kind {
        WindowKind::Viewer => {
            host.viewer_closed(backend);
            ControlFlow::Wait
        }
        WindowKind::Launcher => match host.launcher_closed(backend) {
            ShutdownDecision::Exit => ControlFlow::Exit,
            ShutdownDecision::StayResident => ControlFlow::Wait,
        },
    }
}

fn main() {
    init_logging();

    let config = LauncherConfig::load();
    let mut perf = PerfMonitor::new(config.perf_logging);
    perf.start_timer(APP_INIT_TIMER);

    info!("Starting {} {}...", config.app_name, APP_VERSION);

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let platform = get_platform_manager();
    info!("Platform: {}", platform.platform_name());

    let update_proxy = proxy.clone();
    let notifier = NullNotifier::new(APP_VERSION, move |signal| {
        update_proxy
            .send_event(UserEvent::Update(signal))
            .map_err(|_| LauncherError::update("event loop closed"))
    });

    let mut host = HostProcess::new(
        config.clone(),
        APP_VERSION,
        open_store(&config),
        Box::new(notifier),
        platform.keeps_running_without_windows(),
        Instant::now(),
    );

    let mut windows = AppWindows::default();
    {
        let mut backend = WryBackend::new(&event_loop, &mut windows, &proxy, &config, platform.as_ref());
        if let Err(e) = host.start(&mut backend) {
            error!("Failed to create launcher: {}", e);
            std::process::exit(1);
        }
    }

    // Menu must outlive the loop; on macOS clipboard shortcuts depend on it
    let menu_bar = Menu::new();
    if let Some(window) = windows.window(WindowKind::Launcher) {
        if let Err(e) = platform.initialize_menu(window, &menu_bar) {
            error!("Failed to initialize menu: {}", e);
        }
    }

    event_loop.run(move |event, target, control_flow| {
        if *control_flow == ControlFlow::Exit {
            return;
        }

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                window_id,
                ..
            } => {
                if let Some(kind) = windows.kind_of(window_id) {
                    info!("{} close requested", kind.as_str());
                    let mut backend = WryBackend::new(target, &mut windows, &proxy, &config, platform.as_ref());
                    if close_requested(&mut host, &mut backend, kind) == ControlFlow::Exit {
                        info!("Shutting down");
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                }
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(true),
                ..
            } => {
                host.window_focused(Instant::now());
            }
            Event::Reopen { .. } => {
                let mut backend = WryBackend::new(target, &mut windows, &proxy, &config, platform.as_ref());
                if let Err(e) = host.reactivate(&mut backend) {
                    error!("Failed to recreate launcher: {}", e);
                }
            }
            Event::UserEvent(user_event) => match user_event {
                UserEvent::LauncherMessage(body) => match ipc::classify(&body) {
                    LauncherMessage::Request(request) => {
                        let mut backend =
                            WryBackend::new(target, &mut windows, &proxy, &config, platform.as_ref());
                        let response = host.handle_command(&mut backend, request.command, Instant::now());
                        windows.reply(request.id, response);
                    }
                    LauncherMessage::Chrome(message) => {
                        if windows.apply_chrome(WindowKind::Launcher, message) {
                            let mut backend =
                                WryBackend::new(target, &mut windows, &proxy, &config, platform.as_ref());
                            if close_requested(&mut host, &mut backend, WindowKind::Launcher) == ControlFlow::Exit {
                                *control_flow = ControlFlow::Exit;
                                return;
                            }
                        }
                    }
                    LauncherMessage::Rejected(rejected) => {
                        warn!("Rejected launcher message: {}", rejected.reason);
                        if let Some(id) = rejected.id {
                            windows.reply(id, IpcResponse::error(rejected.reason));
                        }
                    }
                },
                UserEvent::ViewerMessage(body) => match parse_chrome_message(&body) {
                    Some(message) => {
                        if windows.apply_chrome(WindowKind::Viewer, message) {
                            let mut backend =
                                WryBackend::new(target, &mut windows, &proxy, &config, platform.as_ref());
                            close_requested(&mut host, &mut backend, WindowKind::Viewer);
                        }
                    }
                    None => warn!("Ignoring message from viewer content"),
                },
                UserEvent::PageLoaded(WindowKind::Launcher) => {
                    let mut backend = WryBackend::new(target, &mut windows, &proxy, &config, platform.as_ref());
                    host.launcher_loaded(&mut backend);
                    perf.end_timer(APP_INIT_TIMER);
                }
                UserEvent::PageLoaded(WindowKind::Viewer) => {
                    if !platform.capabilities().framed_viewer {
                        windows.install_viewer_chrome();
                    }
                    let mut backend = WryBackend::new(target, &mut windows, &proxy, &config, platform.as_ref());
                    host.viewer_loaded(&mut backend);
                }
                UserEvent::OpenExternal(url) => {
                    let mut backend = WryBackend::new(target, &mut windows, &proxy, &config, platform.as_ref());
                    host.open_external(&mut backend, &url);
                }
                UserEvent::Update(signal) => {
                    let mut backend = WryBackend::new(target, &mut windows, &proxy, &config, platform.as_ref());
                    host.handle_update_signal(&mut backend, signal);
                }
            },
            Event::MainEventsCleared => {
                let mut backend = WryBackend::new(target, &mut windows, &proxy, &config, platform.as_ref());
                host.tick(&mut backend, Instant::now());
            }
            _ => {}
        }

        *control_flow = match host.next_deadline() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
    });
}

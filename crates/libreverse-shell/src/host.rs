//! Host process: window lifecycle and the privileged command surface
//!
//! Everything the launcher page can ask for is handled here, and every
//! handler swallows its own failures. A bad address comes back as
//! `{success: false, error}`, a missing store as an empty list, a broken
//! dialog as a log line. Nothing raised in here crosses the bridge.

use crate::bridge::{BridgeEvent, Command, IpcResponse};
use crate::debounce::{clamp_launcher_height, Debouncer};
use crate::navigation::{NavigationDecision, ViewerNavigation};
use crate::perf::PerfMonitor;
use crate::session::{Session, SessionState, ShutdownDecision, WindowBackend};
use crate::updater::{UpdateNotifier, UpdateRelay, UpdateScheduler, UpdateSignal};
use libreverse_core::{
    Address, LauncherConfig, LauncherError, LauncherResult, LoadOutcome, UpdateState, WindowKind,
};
use libreverse_store::RecentUrlStore;
use serde_json::Value;
use std::time::{Duration, Instant};

const VIEWER_LOAD_TIMER: &str = "Viewer Load";

/// The host side of the launcher
pub struct HostProcess {
    config: LauncherConfig,
    app_version: String,
    session: Session,
    store: Option<RecentUrlStore>,
    resize: Debouncer<i64>,
    navigation: ViewerNavigation,
    updates: UpdateScheduler,
    relay: UpdateRelay,
    notifier: Box<dyn UpdateNotifier>,
    perf: PerfMonitor,
    stays_resident: bool,
}

impl HostProcess {
    /// `store` is `None` when the store could not be opened; commands then
    /// degrade to empty lists. `stays_resident` is true on platforms where
    /// apps keep running with no windows open.
    pub fn new(
        config: LauncherConfig,
        app_version: impl Into<String>,
        store: Option<RecentUrlStore>,
        notifier: Box<dyn UpdateNotifier>,
        stays_resident: bool,
        now: Instant,
    ) -> Self {
        Self {
            resize: Debouncer::new(Duration::from_millis(config.resize_debounce_ms)),
            updates: UpdateScheduler::new(&config.updates, now),
            perf: PerfMonitor::new(config.perf_logging),
            app_version: app_version.into(),
            session: Session::new(),
            store,
            navigation: ViewerNavigation::new(),
            relay: UpdateRelay::new(),
            notifier,
            stays_resident,
            config,
        }
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn update_state(&self) -> &UpdateState {
        self.relay.state()
    }

    /// Handle for the viewer's navigation callback
    pub fn navigation(&self) -> &ViewerNavigation {
        &self.navigation
    }

    // ------------------------------------------------------------------
    // Window lifecycle
    // ------------------------------------------------------------------

    /// Create the launcher. It becomes visible once its page has loaded.
    pub fn start(&mut self, backend: &mut dyn WindowBackend) -> LauncherResult<()> {
        if self.session.has_launcher() {
            return Ok(());
        }
        backend.create_launcher()?;
        self.session.launcher_opened();
        log::info!("Launcher created");
        Ok(())
    }

    pub fn launcher_loaded(&mut self, backend: &mut dyn WindowBackend) {
        if self.session.has_launcher() && !self.session.has_viewer() {
            backend.show_window(WindowKind::Launcher);
        }
    }

    /// Validate `url` and show it in the single viewer window.
    pub fn load_instance(&mut self, backend: &mut dyn WindowBackend, url: &str) -> LoadOutcome {
        let address = match Address::parse(url) {
            Ok(address) => address,
            Err(e) => {
                log::warn!("Rejected load of {:?}: {}", url, e);
                return LoadOutcome::failed(e.to_string());
            }
        };

        // Pin the origin before the webview sees the navigation so the
        // programmatic load itself passes the guard.
        self.navigation.set_origin(&address);

        if self.session.has_viewer() {
            if let Err(e) = backend.navigate_viewer(&address) {
                log::error!("Failed to navigate viewer to {}: {}", address, e);
                self.restore_origin();
                return LoadOutcome::failed(e.to_string());
            }
            log::info!("Viewer navigated to {}", address);
            self.session.viewer_navigated(address);
            self.reveal_viewer(backend);
        } else {
            self.perf.start_timer(VIEWER_LOAD_TIMER);
            if let Err(e) = backend.create_viewer(&address, self.navigation.clone()) {
                log::error!("Failed to create viewer for {}: {}", address, e);
                self.navigation.clear();
                return LoadOutcome::failed(e.to_string());
            }
            log::info!("Viewer created for {}", address);
            self.session.viewer_opened(address);
        }

        LoadOutcome::ok()
    }

    /// The viewer's page finished loading.
    pub fn viewer_loaded(&mut self, backend: &mut dyn WindowBackend) {
        if !self.session.has_viewer() {
            return;
        }
        self.perf.end_timer(VIEWER_LOAD_TIMER);
        if !self.session.viewer_shown() {
            self.reveal_viewer(backend);
        }
    }

    /// The user closed the viewer; bring the launcher back.
    pub fn viewer_closed(&mut self, backend: &mut dyn WindowBackend) {
        if !self.session.has_viewer() {
            return;
        }
        backend.close_window(WindowKind::Viewer);
        self.navigation.clear();
        self.session.viewer_gone();
        log::info!("Viewer closed");

        if self.session.has_launcher() {
            backend.show_window(WindowKind::Launcher);
            // The page may still think a load is pending
            backend.reset_launcher_loading();
            backend.emit(BridgeEvent::VisibilityChanged(true));
        }
    }

    /// The user closed the launcher; the viewer goes with it.
    pub fn launcher_closed(&mut self, backend: &mut dyn WindowBackend) -> ShutdownDecision {
        if self.session.has_viewer() {
            backend.close_window(WindowKind::Viewer);
            self.navigation.clear();
        }
        if self.session.has_launcher() {
            backend.close_window(WindowKind::Launcher);
        }
        self.resize.cancel();

        let decision = if self.stays_resident {
            ShutdownDecision::StayResident
        } else {
            ShutdownDecision::Exit
        };
        self.session.launcher_gone(decision);
        log::info!("Launcher closed ({:?})", decision);
        decision
    }

    /// The app was reactivated (dock click) with no windows open.
    pub fn reactivate(&mut self, backend: &mut dyn WindowBackend) -> LauncherResult<()> {
        if self.session.state() == SessionState::NoWindows {
            log::info!("Reactivated with no windows, recreating launcher");
            self.start(backend)?;
        }
        Ok(())
    }

    /// Any of our windows gained focus.
    pub fn window_focused(&mut self, now: Instant) {
        if self.updates.on_focus(now) {
            self.run_update_check();
        }
    }

    fn reveal_viewer(&mut self, backend: &mut dyn WindowBackend) {
        backend.show_window(WindowKind::Viewer);
        self.session.viewer_shown_now();
        if self.session.has_launcher() {
            backend.hide_window(WindowKind::Launcher);
            backend.emit(BridgeEvent::VisibilityChanged(false));
        }
    }

    fn restore_origin(&self) {
        match self.session.viewer_address() {
            Some(previous) => self.navigation.set_origin(previous),
            None => self.navigation.clear(),
        }
    }

    // ------------------------------------------------------------------
    // Command surface
    // ------------------------------------------------------------------

    /// Handle one bridge command and return its response
    pub fn handle_command(
        &mut self,
        backend: &mut dyn WindowBackend,
        command: Command,
        now: Instant,
    ) -> IpcResponse {
        log::debug!("Handling command {}", command.name());
        match command {
            Command::GetStoredAddresses => IpcResponse::success(self.stored_addresses()),
            Command::SaveAddress { url } => IpcResponse::success(self.save_address(&url)),
            Command::ClearAddresses => IpcResponse::success(self.clear_addresses()),
            Command::LoadInstance { url } => IpcResponse::success(self.load_instance(backend, &url)),
            Command::ShowErrorDialog { message } => {
                self.show_error_dialog(backend, &message);
                IpcResponse::success(Value::Null)
            }
            Command::ResizeLauncher { content_height } => {
                self.request_resize(content_height, now);
                IpcResponse::success(Value::Null)
            }
            Command::GetAppVersion => IpcResponse::success(&self.app_version),
        }
    }

    fn store(&self) -> LauncherResult<&RecentUrlStore> {
        self.store
            .as_ref()
            .ok_or_else(|| LauncherError::storage_unavailable("Store not initialized yet"))
    }

    fn store_mut(&mut self) -> LauncherResult<&mut RecentUrlStore> {
        self.store
            .as_mut()
            .ok_or_else(|| LauncherError::storage_unavailable("Store not initialized yet"))
    }

    pub fn stored_addresses(&self) -> Vec<String> {
        match self.store() {
            Ok(store) => store.recent_urls().to_vec(),
            Err(e) => {
                log::warn!("{}", e);
                Vec::new()
            }
        }
    }

    pub fn save_address(&mut self, url: &str) -> Vec<String> {
        let store = match self.store_mut() {
            Ok(store) => store,
            Err(e) => {
                log::warn!("{}", e);
                return Vec::new();
            }
        };
        if let Err(e) = Address::parse(url) {
            log::warn!("Not saving invalid address {:?}: {}", url, e);
            return store.recent_urls().to_vec();
        }
        match store.save(url) {
            Ok(list) => list,
            Err(e) => {
                log::error!("Error saving URL: {}", e);
                store.recent_urls().to_vec()
            }
        }
    }

    pub fn clear_addresses(&mut self) -> Vec<String> {
        let store = match self.store_mut() {
            Ok(store) => store,
            Err(e) => {
                log::warn!("{}", e);
                return Vec::new();
            }
        };
        match store.clear() {
            Ok(list) => list,
            Err(e) => {
                log::error!("Error clearing URLs: {}", e);
                store.recent_urls().to_vec()
            }
        }
    }

    pub fn show_error_dialog(&mut self, backend: &mut dyn WindowBackend, message: &str) {
        if let Err(e) = backend.show_error_dialog("Error", message) {
            log::error!("Error showing dialog: {}", e);
        }
    }

    /// Queue a launcher resize; only the last request in a burst is applied.
    pub fn request_resize(&mut self, content_height: i64, now: Instant) {
        self.resize.schedule(content_height, now);
    }

    fn apply_resize(&mut self, backend: &mut dyn WindowBackend, requested: i64) {
        if !self.session.has_launcher() {
            return;
        }
        let launcher = &self.config.launcher;
        let height = match backend.primary_screen_height() {
            Some(screen) => clamp_launcher_height(
                requested,
                launcher.min_height,
                screen,
                launcher.max_height_ratio,
            ),
            None => requested.max(launcher.min_height as i64) as u32,
        };
        log::debug!("Resizing launcher to {} (requested {})", height, requested);
        backend.set_launcher_height(height);
    }

    // ------------------------------------------------------------------
    // Viewer navigation and external links
    // ------------------------------------------------------------------

    pub fn decide_navigation(&self, target: &str) -> NavigationDecision {
        self.navigation.decide(target)
    }

    pub fn open_external(&mut self, backend: &mut dyn WindowBackend, url: &str) {
        log::info!("Opening {} in the default browser", url);
        if let Err(e) = backend.open_external(url) {
            log::error!("Failed to open external link: {}", e);
        }
    }

    // ------------------------------------------------------------------
    // Updates and timers
    // ------------------------------------------------------------------

    pub fn handle_update_signal(&mut self, backend: &mut dyn WindowBackend, signal: UpdateSignal) {
        if let Some(event) = self.relay.apply(signal) {
            if self.session.has_launcher() {
                backend.emit(event);
            }
        }
    }

    fn run_update_check(&mut self) {
        if let Err(e) = self.notifier.check_for_updates() {
            self.relay.apply(UpdateSignal::Error(e.to_string()));
        }
    }

    /// Fire whatever timers are due at `now`.
    pub fn tick(&mut self, backend: &mut dyn WindowBackend, now: Instant) {
        if let Some(height) = self.resize.poll(now) {
            self.apply_resize(backend, height);
        }
        if self.updates.poll(now) {
            self.run_update_check();
        }
    }

    /// Earliest pending timer, for the event loop's wait deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.resize.deadline(), self.updates.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, CountingNotifier, FakeBackend};
    use libreverse_core::{UpdateInfo, UpdateProgress};

    fn host_with(store: Option<RecentUrlStore>, stays_resident: bool) -> (HostProcess, FakeBackend) {
        let mut config = LauncherConfig::default();
        config.updates.enabled = false;
        let mut host = HostProcess::new(
            config,
            "1.0.0",
            store,
            Box::new(CountingNotifier::default()),
            stays_resident,
            Instant::now(),
        );
        let mut backend = FakeBackend::new();
        host.start(&mut backend).unwrap();
        host.launcher_loaded(&mut backend);
        backend.calls.clear();
        (host, backend)
    }

    fn host() -> (HostProcess, FakeBackend) {
        host_with(Some(RecentUrlStore::in_memory()), false)
    }

    fn list(response: IpcResponse) -> Vec<String> {
        serde_json::from_value(response.data().unwrap().clone()).unwrap()
    }

    #[test]
    fn test_start_creates_hidden_launcher_then_shows() {
        let mut config = LauncherConfig::default();
        config.updates.enabled = false;
        let mut host = HostProcess::new(
            config,
            "1.0.0",
            None,
            Box::new(CountingNotifier::default()),
            false,
            Instant::now(),
        );
        let mut backend = FakeBackend::new();

        host.start(&mut backend).unwrap();
        assert_eq!(backend.calls, vec![Call::CreateLauncher]);
        assert_eq!(host.session().state(), SessionState::LauncherVisible);

        host.launcher_loaded(&mut backend);
        assert_eq!(backend.calls.last(), Some(&Call::Show(WindowKind::Launcher)));
    }

    #[test]
    fn test_save_dedupes_and_moves_to_front() {
        let (mut host, mut backend) = host();
        let now = Instant::now();
        for url in ["https://a", "https://b", "https://a"] {
            host.handle_command(&mut backend, Command::SaveAddress { url: url.into() }, now);
        }
        let stored = list(host.handle_command(&mut backend, Command::GetStoredAddresses, now));
        assert_eq!(stored, vec!["https://a", "https://b"]);
    }

    #[test]
    fn test_save_caps_at_ten() {
        let (mut host, mut backend) = host();
        let now = Instant::now();
        let mut last = Vec::new();
        for i in 0..11 {
            last = list(host.handle_command(
                &mut backend,
                Command::SaveAddress {
                    url: format!("https://{}.example", i),
                },
                now,
            ));
        }
        assert_eq!(last.len(), 10);
        assert_eq!(last.first().unwrap(), "https://10.example");
        assert_eq!(last.last().unwrap(), "https://1.example");
    }

    #[test]
    fn test_clear_returns_empty() {
        let (mut host, mut backend) = host();
        let now = Instant::now();
        host.handle_command(&mut backend, Command::SaveAddress { url: "https://a".into() }, now);
        let cleared = list(host.handle_command(&mut backend, Command::ClearAddresses, now));
        assert!(cleared.is_empty());
        assert!(host.stored_addresses().is_empty());
    }

    #[test]
    fn test_missing_store_degrades_to_empty() {
        let (mut host, mut backend) = host_with(None, false);
        let now = Instant::now();
        assert!(list(host.handle_command(&mut backend, Command::GetStoredAddresses, now)).is_empty());
        assert!(list(host.handle_command(
            &mut backend,
            Command::SaveAddress { url: "https://a".into() },
            now
        ))
        .is_empty());
        assert!(list(host.handle_command(&mut backend, Command::ClearAddresses, now)).is_empty());
        assert!(matches!(host.store(), Err(LauncherError::StorageUnavailable(_))));
    }

    #[test]
    fn test_invalid_address_rejected_without_window_change() {
        let (mut host, mut backend) = host();
        let response = host.handle_command(
            &mut backend,
            Command::LoadInstance {
                url: " not a url ".into(),
            },
            Instant::now(),
        );
        let outcome: LoadOutcome = serde_json::from_value(response.data().unwrap().clone()).unwrap();

        assert!(!outcome.success);
        assert!(outcome.error.is_some());
        assert!(backend.calls.is_empty());
        assert!(!host.session().has_viewer());
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let (mut host, mut backend) = host();
        let outcome = host.load_instance(&mut backend, "file:///etc/hosts");
        assert_eq!(outcome, LoadOutcome::failed("Invalid protocol"));
        assert_eq!(backend.viewers_created(), 0);
    }

    #[test]
    fn test_first_load_creates_viewer_shown_on_load() {
        let (mut host, mut backend) = host();
        assert!(host.load_instance(&mut backend, "https://a.example").success);
        assert_eq!(
            backend.calls,
            vec![Call::CreateViewer("https://a.example".into())]
        );
        assert_eq!(host.session().state(), SessionState::LauncherVisible);

        host.viewer_loaded(&mut backend);
        assert_eq!(
            &backend.calls[1..],
            &[
                Call::Show(WindowKind::Viewer),
                Call::Hide(WindowKind::Launcher),
                Call::Emit(BridgeEvent::VisibilityChanged(false)),
            ]
        );
        assert_eq!(host.session().state(), SessionState::ViewerVisible);
    }

    #[test]
    fn test_second_load_reuses_viewer() {
        let (mut host, mut backend) = host();
        assert!(host.load_instance(&mut backend, "https://a.example").success);
        assert!(host.load_instance(&mut backend, "https://b.example").success);

        assert_eq!(backend.viewers_created(), 1);
        assert!(backend
            .calls
            .contains(&Call::NavigateViewer("https://b.example".into())));
        assert_eq!(
            host.session().viewer_address().unwrap().as_str(),
            "https://b.example"
        );
        // Reuse reveals immediately
        assert_eq!(host.session().state(), SessionState::ViewerVisible);
    }

    #[test]
    fn test_failed_viewer_creation_reports_error() {
        let (mut host, mut backend) = host();
        backend.fail_viewer_creation = true;
        let outcome = host.load_instance(&mut backend, "https://a.example");
        assert!(!outcome.success);
        assert!(!host.session().has_viewer());
        assert_eq!(host.decide_navigation("https://a.example/"), NavigationDecision::Cancel);
    }

    #[test]
    fn test_closing_viewer_restores_launcher() {
        let (mut host, mut backend) = host();
        host.load_instance(&mut backend, "https://a.example");
        host.viewer_loaded(&mut backend);
        backend.calls.clear();

        host.viewer_closed(&mut backend);
        assert_eq!(
            backend.calls,
            vec![
                Call::Close(WindowKind::Viewer),
                Call::Show(WindowKind::Launcher),
                Call::ResetLoading,
                Call::Emit(BridgeEvent::VisibilityChanged(true)),
            ]
        );
        assert_eq!(host.session().state(), SessionState::LauncherVisible);
        assert!(!host.session().has_viewer());
    }

    #[test]
    fn test_closing_viewer_before_it_loaded_still_resets() {
        let (mut host, mut backend) = host();
        host.load_instance(&mut backend, "https://slow.example");
        host.viewer_closed(&mut backend);
        assert!(backend.calls.contains(&Call::ResetLoading));
        assert_eq!(host.session().state(), SessionState::LauncherVisible);

        // A fresh viewer is created on the next load
        host.load_instance(&mut backend, "https://slow.example");
        assert_eq!(backend.viewers_created(), 2);
    }

    #[test]
    fn test_navigation_guard_follows_viewer_origin() {
        let (mut host, mut backend) = host();
        host.load_instance(&mut backend, "https://a.example/home");

        assert_eq!(
            host.decide_navigation("https://a.example/about"),
            NavigationDecision::Allow
        );
        assert_eq!(
            host.decide_navigation("https://elsewhere.example/"),
            NavigationDecision::OpenExternal("https://elsewhere.example/".into())
        );
        assert_eq!(host.decide_navigation("::::"), NavigationDecision::Cancel);

        host.viewer_closed(&mut backend);
        assert_eq!(host.decide_navigation("https://a.example/"), NavigationDecision::Cancel);
    }

    #[test]
    fn test_open_external_failure_is_logged_only() {
        let (mut host, mut backend) = host();
        backend.fail_external = true;
        host.open_external(&mut backend, "https://elsewhere.example/");
        assert_eq!(
            backend.calls,
            vec![Call::OpenExternal("https://elsewhere.example/".into())]
        );
    }

    #[test]
    fn test_launcher_close_closes_viewer_and_exits() {
        let (mut host, mut backend) = host();
        host.load_instance(&mut backend, "https://a.example");
        backend.calls.clear();

        let decision = host.launcher_closed(&mut backend);
        assert_eq!(decision, ShutdownDecision::Exit);
        assert_eq!(
            backend.calls,
            vec![Call::Close(WindowKind::Viewer), Call::Close(WindowKind::Launcher)]
        );
        assert_eq!(host.session().state(), SessionState::Closed);
    }

    #[test]
    fn test_resident_platform_recreates_launcher_on_reactivate() {
        let (mut host, mut backend) = host_with(Some(RecentUrlStore::in_memory()), true);
        assert_eq!(host.launcher_closed(&mut backend), ShutdownDecision::StayResident);
        assert_eq!(host.session().state(), SessionState::NoWindows);
        backend.calls.clear();

        host.reactivate(&mut backend).unwrap();
        assert_eq!(backend.calls, vec![Call::CreateLauncher]);
        assert_eq!(host.session().state(), SessionState::LauncherVisible);

        // Reactivating with a launcher present does nothing
        host.reactivate(&mut backend).unwrap();
        assert_eq!(backend.calls.len(), 1);
    }

    #[test]
    fn test_resize_burst_applies_once_clamped() {
        let (mut host, mut backend) = host();
        backend.screen_height = Some(1000);
        let start = Instant::now();

        for (i, height) in [420, 500, 2000, 800, 1200].into_iter().enumerate() {
            let now = start + Duration::from_millis(i as u64 * 3);
            host.handle_command(
                &mut backend,
                Command::ResizeLauncher {
                    content_height: height,
                },
                now,
            );
            host.tick(&mut backend, now);
        }
        host.tick(&mut backend, start + Duration::from_millis(200));

        assert_eq!(backend.heights(), vec![900]);
    }

    #[test]
    fn test_resize_below_minimum_clamped_up() {
        let (mut host, mut backend) = host();
        backend.screen_height = Some(1000);
        let now = Instant::now();
        host.request_resize(120, now);
        assert_eq!(host.next_deadline(), Some(now + Duration::from_millis(16)));
        host.tick(&mut backend, now + Duration::from_millis(16));
        assert_eq!(backend.heights(), vec![400]);
    }

    #[test]
    fn test_dialog_failure_is_not_fatal() {
        let (mut host, mut backend) = host();
        backend.fail_dialogs = true;
        let response = host.handle_command(
            &mut backend,
            Command::ShowErrorDialog {
                message: "boom".into(),
            },
            Instant::now(),
        );
        assert_eq!(response, IpcResponse::success(Value::Null));
    }

    #[test]
    fn test_app_version() {
        let (mut host, mut backend) = host();
        let response = host.handle_command(&mut backend, Command::GetAppVersion, Instant::now());
        assert_eq!(response.data(), Some(&Value::String("1.0.0".into())));
    }

    #[test]
    fn test_update_signals_relayed_to_launcher() {
        let (mut host, mut backend) = host();
        let progress = UpdateProgress {
            percent: 10.0,
            bytes_per_second: 100,
            transferred: 1,
            total: 10,
        };
        host.handle_update_signal(&mut backend, UpdateSignal::Checking);
        host.handle_update_signal(&mut backend, UpdateSignal::Progress(progress.clone()));
        host.handle_update_signal(
            &mut backend,
            UpdateSignal::Downloaded(UpdateInfo {
                version: "2.0.0".into(),
            }),
        );
        host.handle_update_signal(&mut backend, UpdateSignal::Error("late".into()));

        assert_eq!(
            backend.calls,
            vec![
                Call::Emit(BridgeEvent::UpdateDownloadProgress(progress)),
                Call::Emit(BridgeEvent::UpdateReady(UpdateInfo {
                    version: "2.0.0".into()
                })),
            ]
        );
        assert_eq!(host.update_state(), &UpdateState::Errored);
    }

    #[test]
    fn test_failed_update_check_marks_errored() {
        let notifier = CountingNotifier {
            unreachable: true,
            ..CountingNotifier::default()
        };
        let mut config = LauncherConfig::default();
        config.updates.enabled = true;
        let start = Instant::now();
        let mut host = HostProcess::new(config, "1.0.0", None, Box::new(notifier), false, start);
        let mut backend = FakeBackend::new();

        host.tick(&mut backend, start + Duration::from_secs(3));
        assert_eq!(host.update_state(), &UpdateState::Errored);
        assert!(backend.calls.is_empty());
    }

    #[test]
    fn test_update_checks_on_timer_and_focus() {
        let notifier = CountingNotifier::default();
        let checks = notifier.checks.clone();
        let mut config = LauncherConfig::default();
        config.updates.enabled = true;
        let start = Instant::now();
        let mut host = HostProcess::new(config, "1.0.0", None, Box::new(notifier), false, start);
        let mut backend = FakeBackend::new();

        host.tick(&mut backend, start + Duration::from_secs(1));
        assert_eq!(checks.get(), 0);
        host.tick(&mut backend, start + Duration::from_secs(3));
        assert_eq!(checks.get(), 1);

        host.window_focused(start + Duration::from_secs(4));
        host.window_focused(start + Duration::from_secs(5));
        assert_eq!(checks.get(), 2);

        host.tick(&mut backend, start + Duration::from_secs(3 + 3600));
        assert_eq!(checks.get(), 3);
    }
}

//! Background update checks
//!
//! The notifier that actually talks to a release feed is an external
//! collaborator. This module decides *when* to ask it to check and turns
//! its signals into launcher events and log lines.

use crate::bridge::BridgeEvent;
use libreverse_core::config::UpdateConfig;
use libreverse_core::{LauncherResult, UpdateInfo, UpdateProgress, UpdateState};
use std::time::{Duration, Instant};

/// Lifecycle signals emitted by an update notifier
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateSignal {
    Checking,
    Available { version: String },
    NotAvailable { version: String },
    Progress(UpdateProgress),
    Downloaded(UpdateInfo),
    Error(String),
}

/// An auto-update facility.
///
/// Implementations report back asynchronously through whatever sink they
/// were built with; a check requested while one is running should no-op.
pub trait UpdateNotifier {
    fn check_for_updates(&mut self) -> LauncherResult<()>;
}

/// Delivers notifier signals back to the host; fails once nobody listens.
pub type UpdateSink = Box<dyn FnMut(UpdateSignal) -> LauncherResult<()>>;

/// Notifier used when no release feed is configured
pub struct NullNotifier {
    current_version: String,
    sink: UpdateSink,
}

impl NullNotifier {
    pub fn new(
        current_version: impl Into<String>,
        sink: impl FnMut(UpdateSignal) -> LauncherResult<()> + 'static,
    ) -> Self {
        Self {
            current_version: current_version.into(),
            sink: Box::new(sink),
        }
    }
}

impl UpdateNotifier for NullNotifier {
    fn check_for_updates(&mut self) -> LauncherResult<()> {
        (self.sink)(UpdateSignal::Checking)?;
        (self.sink)(UpdateSignal::NotAvailable {
            version: self.current_version.clone(),
        })
    }
}

/// Decides when the three independent check triggers fire
#[derive(Debug)]
pub struct UpdateScheduler {
    enabled: bool,
    interval: Duration,
    focus_throttle: Duration,
    next_check: Option<Instant>,
    last_focus_check: Option<Instant>,
}

/// Shortest gap allowed between timed or focus-triggered checks
pub const MIN_CHECK_GAP: Duration = Duration::from_secs(60);

impl UpdateScheduler {
    /// Intervals below [`MIN_CHECK_GAP`] in the config are raised to it.
    pub fn new(config: &UpdateConfig, started: Instant) -> Self {
        Self {
            enabled: config.enabled,
            interval: Duration::from_secs(config.interval_secs).max(MIN_CHECK_GAP),
            focus_throttle: Duration::from_secs(config.focus_throttle_secs).max(MIN_CHECK_GAP),
            next_check: config
                .enabled
                .then(|| started + Duration::from_secs(config.startup_delay_secs)),
            last_focus_check: None,
        }
    }

    /// Deadline of the next timed check (startup delay, then hourly)
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_check
    }

    /// True when a timed check is due; re-arms the hourly timer.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_check {
            Some(deadline) if now >= deadline => {
                self.next_check = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// True when a window regaining focus should trigger a check.
    pub fn on_focus(&mut self, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }
        let due = match self.last_focus_check {
            Some(last) => now.duration_since(last) > self.focus_throttle,
            None => true,
        };
        if due {
            self.last_focus_check = Some(now);
        }
        due
    }
}

/// Tracks [`UpdateState`] and forwards the signals the launcher cares about
#[derive(Debug, Default)]
pub struct UpdateRelay {
    state: UpdateState,
}

impl UpdateRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UpdateState {
        &self.state
    }

    /// Apply a signal; progress and downloaded come back as events to relay.
    pub fn apply(&mut self, signal: UpdateSignal) -> Option<BridgeEvent> {
        match signal {
            UpdateSignal::Checking => {
                log::info!("Checking for update...");
                self.state = UpdateState::Checking;
                None
            }
            UpdateSignal::Available { version } => {
                log::info!("Update available: {} - downloading in background...", version);
                self.state = UpdateState::Downloading { percent: 0.0 };
                None
            }
            UpdateSignal::NotAvailable { version } => {
                log::info!("Update not available. Current version: {}", version);
                self.state = UpdateState::Idle;
                None
            }
            UpdateSignal::Progress(progress) => {
                log::info!(
                    "Download speed: {} - Downloaded {}% ({}/{})",
                    progress.bytes_per_second,
                    progress.percent,
                    progress.transferred,
                    progress.total
                );
                self.state = UpdateState::Downloading {
                    percent: progress.percent,
                };
                Some(BridgeEvent::UpdateDownloadProgress(progress))
            }
            UpdateSignal::Downloaded(info) => {
                log::info!(
                    "Update downloaded silently. Will install on next restart. Version: {}",
                    info.version
                );
                self.state = UpdateState::Downloaded {
                    version: info.version.clone(),
                };
                Some(BridgeEvent::UpdateReady(info))
            }
            UpdateSignal::Error(message) => {
                log::error!("Error in auto-updater: {}", message);
                self.state = UpdateState::Errored;
                None
            }
        }
    }
}

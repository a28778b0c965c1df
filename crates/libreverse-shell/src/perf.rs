//! Development timing helper

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Named stopwatch timers that log their duration when stopped
#[derive(Debug, Default)]
pub struct PerfMonitor {
    enabled: bool,
    timers: HashMap<String, Instant>,
}

impl PerfMonitor {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timers: HashMap::new(),
        }
    }

    pub fn start_timer(&mut self, label: &str) {
        self.start_timer_at(label, Instant::now());
    }

    pub fn start_timer_at(&mut self, label: &str, now: Instant) {
        if self.enabled {
            self.timers.insert(label.to_string(), now);
        }
    }

    pub fn end_timer(&mut self, label: &str) -> Option<Duration> {
        self.end_timer_at(label, Instant::now())
    }

    /// Stop `label` and log how long it ran. Unknown labels return `None`.
    pub fn end_timer_at(&mut self, label: &str, now: Instant) -> Option<Duration> {
        let started = self.timers.remove(label)?;
        let duration = now.saturating_duration_since(started);
        log::info!("{}: {:.2}ms", label, duration.as_secs_f64() * 1000.0);
        Some(duration)
    }
}

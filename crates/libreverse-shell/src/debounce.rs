//! Trailing-edge debounce timer
//!
//! Time is passed in explicitly so the event loop decides when to poll and
//! tests can step through it deterministically.

use std::time::{Duration, Instant};

/// Holds at most one pending value until its deadline passes.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `value`, replacing (cancelling) whatever was pending.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Drop the pending value without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Take the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if now >= deadline => self.cancel(),
            _ => None,
        }
    }
}

/// Clamp a requested launcher height into `[min, floor(ratio * screen)]`.
///
/// When the two bounds cross (tiny screens) the upper bound wins.
pub fn clamp_launcher_height(requested: i64, min_height: u32, screen_height: u32, ratio: f64) -> u32 {
    let max_height = (screen_height as f64 * ratio).floor() as i64;
    requested.max(min_height as i64).min(max_height).max(0) as u32
}

//! Launcher shell - window session, bridge contract, host logic
//!
//! Nothing in here touches a real window. The app crate implements
//! [`WindowBackend`] over tao and wry and feeds events into [`HostProcess`].

pub mod bridge;
pub mod debounce;
pub mod host;
pub mod launcher;
pub mod navigation;
pub mod perf;
pub mod session;
pub mod updater;

#[cfg(test)]
mod testing;

pub use bridge::{BridgeClient, BridgeEvent, BridgeReply, BridgeRequest, ChromeMessage, Command, IpcResponse};
pub use debounce::Debouncer;
pub use host::HostProcess;
pub use launcher::LauncherView;
pub use navigation::{NavigationDecision, ViewerNavigation};
pub use perf::PerfMonitor;
pub use session::{Session, SessionState, ShutdownDecision, WindowBackend};
pub use updater::{NullNotifier, UpdateNotifier, UpdateSignal};

//! Launcher display model
//!
//! [`LauncherView`] mirrors what the launcher page does: it owns the form
//! state (input, loading flag, field error, recent list) and talks to the
//! host only through a [`BridgeClient`]. The shipped page implements the
//! same flow in JavaScript; this model is what the flow is tested against.

use crate::bridge::{BridgeClient, BridgeEvent, Command, IpcResponse};
use libreverse_core::{Address, LoadOutcome};
use serde::de::DeserializeOwned;

pub const CONNECT_LABEL: &str = "Connect";
pub const CONNECTING_LABEL: &str = "Connecting...";
pub const EMPTY_LIST_MESSAGE: &str = "No recent instances";

/// Height of everything except the recent list
const CHROME_HEIGHT: i64 = 320;
const ROW_HEIGHT: i64 = 44;
const EMPTY_LIST_HEIGHT: i64 = 56;

/// A load that has been started but whose result has not been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLoad {
    token: u64,
    address: String,
}

impl PendingLoad {
    /// The normalized address being loaded
    pub fn address(&self) -> &str {
        &self.address
    }
}

/// State of the launcher page
pub struct LauncherView<C: BridgeClient> {
    client: C,
    input: String,
    focused: bool,
    loading: bool,
    field_error: bool,
    recent: Vec<String>,
    next_token: u64,
    in_flight: Option<u64>,
    last_error: Option<String>,
}

impl<C: BridgeClient> LauncherView<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            input: String::new(),
            focused: false,
            loading: false,
            field_error: false,
            recent: Vec::new(),
            next_token: 0,
            in_flight: None,
            last_error: None,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Label on the connect button
    pub fn button_label(&self) -> &'static str {
        if self.loading {
            CONNECTING_LABEL
        } else {
            CONNECT_LABEL
        }
    }

    /// Whether the address field carries error styling
    pub fn has_field_error(&self) -> bool {
        self.field_error
    }

    pub fn recent(&self) -> &[String] {
        &self.recent
    }

    /// Message shown in place of the list when it is empty
    pub fn empty_message(&self) -> Option<&'static str> {
        self.recent.is_empty().then_some(EMPTY_LIST_MESSAGE)
    }

    /// Last message handed to the error dialog
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Page finished loading: fetch the list and focus the field.
    pub fn ready(&mut self) {
        self.refresh_recent();
        self.focused = true;
    }

    /// The user typed into the address field
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// The error styling times out
    pub fn clear_field_error(&mut self) {
        self.field_error = false;
    }

    /// Connect button or Enter: run the whole load flow.
    pub fn submit(&mut self) {
        let Some(pending) = self.start_load() else {
            return;
        };
        let outcome = self.request_load(pending.address());
        self.complete_load(pending, outcome);
    }

    /// Click on a recent entry
    pub fn select_recent(&mut self, index: usize) {
        let Some(url) = self.recent.get(index).cloned() else {
            return;
        };
        self.input = url;
        self.submit();
    }

    /// Validate the field and enter the loading state.
    ///
    /// Returns `None` when the field is empty (error shown) or a load is
    /// already running.
    pub fn start_load(&mut self) -> Option<PendingLoad> {
        if self.loading {
            return None;
        }
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            self.show_error("Please enter a URL");
            return None;
        }
        let address = Address::normalize(trimmed);

        self.next_token += 1;
        self.in_flight = Some(self.next_token);
        self.loading = true;
        Some(PendingLoad {
            token: self.next_token,
            address,
        })
    }

    /// Apply the host's answer to `pending`.
    ///
    /// A result that arrives after the launcher came back into view belongs
    /// to a load the user already abandoned, and is dropped.
    pub fn complete_load(&mut self, pending: PendingLoad, outcome: Result<LoadOutcome, String>) {
        if self.in_flight != Some(pending.token) {
            log::debug!("Dropping stale load result for {}", pending.address);
            return;
        }
        match outcome {
            Ok(outcome) if outcome.success => {
                self.invoke(Command::SaveAddress {
                    url: pending.address.clone(),
                });
                self.refresh_recent();
                self.input.clear();
                // Loading stays on until the launcher is shown again
            }
            Ok(outcome) => {
                let reason = outcome.error.unwrap_or_default();
                self.show_error(&format!("Failed to load instance: {}", reason));
                self.finish_loading();
            }
            Err(message) => {
                self.show_error(&format!("Connection error: {}", message));
                self.finish_loading();
            }
        }
    }

    pub fn clear_recent(&mut self) {
        self.invoke(Command::ClearAddresses);
        self.refresh_recent();
    }

    pub fn on_event(&mut self, event: &BridgeEvent) {
        match event {
            BridgeEvent::VisibilityChanged(true) => self.finish_loading(),
            BridgeEvent::VisibilityChanged(false) => {}
            BridgeEvent::UpdateDownloadProgress(progress) => {
                log::debug!("Update download at {}%", progress.percent);
            }
            BridgeEvent::UpdateReady(info) => {
                log::info!("Update {} will install on next restart", info.version);
            }
        }
    }

    /// Rough pixel height of the page for the current list
    pub fn content_height(&self) -> i64 {
        let list = if self.recent.is_empty() {
            EMPTY_LIST_HEIGHT
        } else {
            self.recent.len() as i64 * ROW_HEIGHT
        };
        CHROME_HEIGHT + list
    }

    fn request_load(&mut self, address: &str) -> Result<LoadOutcome, String> {
        let response = self.client.invoke(Command::LoadInstance {
            url: address.to_string(),
        });
        decode(response)
    }

    fn refresh_recent(&mut self) {
        let response = self.client.invoke(Command::GetStoredAddresses);
        match decode::<Vec<String>>(response) {
            Ok(list) => self.recent = list,
            Err(e) => log::error!("Failed to load recent URLs: {}", e),
        }
        self.invoke(Command::ResizeLauncher {
            content_height: self.content_height(),
        });
    }

    fn finish_loading(&mut self) {
        self.loading = false;
        self.in_flight = None;
    }

    fn show_error(&mut self, message: &str) {
        self.field_error = true;
        self.last_error = Some(message.to_string());
        self.invoke(Command::ShowErrorDialog {
            message: message.to_string(),
        });
    }

    fn invoke(&mut self, command: Command) {
        let name = command.name();
        if let IpcResponse::Error { message } = self.client.invoke(command) {
            log::error!("{} failed: {}", name, message);
        }
    }
}

fn decode<T: DeserializeOwned>(response: IpcResponse) -> Result<T, String> {
    match response {
        IpcResponse::Success { data } => serde_json::from_value(data).map_err(|e| e.to_string()),
        IpcResponse::Error { message } => Err(message),
    }
}

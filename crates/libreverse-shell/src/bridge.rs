//! Bridge contract between the launcher page and the host process
//!
//! The launcher page can only reach the host through the closed [`Command`]
//! set and only hears back through [`BridgeEvent`]. Window chrome (dragging
//! a frameless window, minimize, close) travels on a separate, smaller
//! allow-list, [`ChromeMessage`], which is the only thing the Viewer's
//! remote content may send.

use libreverse_core::{UpdateInfo, UpdateProgress};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire names of every command, in the order the page API exposes them
pub const COMMAND_NAMES: [&str; 7] = [
    "get-stored-urls",
    "save-url",
    "clear-recent-urls",
    "load-instance",
    "show-error-dialog",
    "resize-window",
    "get-app-version",
];

/// Wire names of every event the host emits
pub const EVENT_NAMES: [&str; 3] = ["visibility-changed", "silent-download-progress", "update-ready"];

/// Command from the launcher page to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd")]
pub enum Command {
    #[serde(rename = "get-stored-urls")]
    GetStoredAddresses,
    #[serde(rename = "save-url")]
    SaveAddress { url: String },
    #[serde(rename = "clear-recent-urls")]
    ClearAddresses,
    #[serde(rename = "load-instance")]
    LoadInstance { url: String },
    #[serde(rename = "show-error-dialog")]
    ShowErrorDialog { message: String },
    #[serde(rename = "resize-window")]
    ResizeLauncher {
        #[serde(rename = "contentHeight")]
        content_height: i64,
    },
    #[serde(rename = "get-app-version")]
    GetAppVersion,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetStoredAddresses => "get-stored-urls",
            Command::SaveAddress { .. } => "save-url",
            Command::ClearAddresses => "clear-recent-urls",
            Command::LoadInstance { .. } => "load-instance",
            Command::ShowErrorDialog { .. } => "show-error-dialog",
            Command::ResizeLauncher { .. } => "resize-window",
            Command::GetAppVersion => "get-app-version",
        }
    }
}

/// Request envelope; `id` correlates the reply with the page's promise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeRequest {
    pub id: u64,
    pub command: Command,
}

/// IPC response from the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IpcResponse {
    Success { data: Value },
    Error { message: String },
}

impl IpcResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        IpcResponse::Success {
            data: serde_json::to_value(data).unwrap_or(Value::Null),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        IpcResponse::Error {
            message: message.into(),
        }
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            IpcResponse::Success { data } => Some(data),
            IpcResponse::Error { .. } => None,
        }
    }
}

/// Reply envelope delivered back into the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeReply {
    pub id: u64,
    pub response: IpcResponse,
}

/// Fire-and-forget notification from the host to the launcher page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")]
pub enum BridgeEvent {
    #[serde(rename = "visibility-changed")]
    VisibilityChanged(bool),
    #[serde(rename = "silent-download-progress")]
    UpdateDownloadProgress(UpdateProgress),
    #[serde(rename = "update-ready")]
    UpdateReady(UpdateInfo),
}

/// Window-chrome messages accepted from either window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "kebab-case")]
pub enum ChromeMessage {
    StartWindowDrag,
    MinimizeWindow,
    CloseWindow,
}

/// Why an incoming message was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// Request id, when one could be read, so the page promise can settle
    pub id: Option<u64>,
    pub reason: String,
}

/// Parse a launcher request, keeping the id even when the command is bad.
pub fn parse_request(body: &str) -> Result<BridgeRequest, Rejected> {
    let value: Value = serde_json::from_str(body).map_err(|e| Rejected {
        id: None,
        reason: format!("malformed message: {}", e),
    })?;
    let id = value.get("id").and_then(Value::as_u64);
    let Some(id) = id else {
        return Err(Rejected {
            id: None,
            reason: "missing request id".to_string(),
        });
    };
    let command = value
        .get("command")
        .cloned()
        .ok_or_else(|| Rejected {
            id: Some(id),
            reason: "missing command".to_string(),
        })?;
    let command: Command = serde_json::from_value(command).map_err(|e| Rejected {
        id: Some(id),
        reason: format!("command not allowed: {}", e),
    })?;
    Ok(BridgeRequest { id, command })
}

/// Parse a chrome message; anything off the list is `None`.
pub fn parse_chrome_message(body: &str) -> Option<ChromeMessage> {
    serde_json::from_str(body).ok()
}

/// Script that settles the page promise for `reply`
pub fn reply_script(reply: &BridgeReply) -> String {
    let json = serde_json::to_string(reply).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.__libreverseBridge && window.__libreverseBridge.resolve({});",
        json
    )
}

/// Script that dispatches `event` to the page's listeners
pub fn event_script(event: &BridgeEvent) -> String {
    let json = serde_json::to_string(event).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.__libreverseBridge && window.__libreverseBridge.emit({});",
        json
    )
}

/// Something that can carry a command to the host and return its response
pub trait BridgeClient {
    fn invoke(&mut self, command: Command) -> IpcResponse;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_load_instance() {
        let request =
            parse_request(r#"{"id":7,"command":{"cmd":"load-instance","url":"https://a"}}"#)
                .unwrap();
        assert_eq!(request.id, 7);
        assert_eq!(
            request.command,
            Command::LoadInstance {
                url: "https://a".to_string()
            }
        );
    }

    #[test]
    fn test_parse_resize_uses_camel_case_argument() {
        let request =
            parse_request(r#"{"id":1,"command":{"cmd":"resize-window","contentHeight":512}}"#)
                .unwrap();
        assert_eq!(
            request.command,
            Command::ResizeLauncher {
                content_height: 512
            }
        );
    }

    #[test]
    fn test_unknown_command_rejected_with_id() {
        let err = parse_request(r#"{"id":3,"command":{"cmd":"read-file","path":"/etc"}}"#)
            .unwrap_err();
        assert_eq!(err.id, Some(3));
        assert!(err.reason.starts_with("command not allowed"));
    }

    #[test]
    fn test_garbage_rejected_without_id() {
        assert_eq!(parse_request("not json").unwrap_err().id, None);
        assert_eq!(
            parse_request(r#"{"command":{"cmd":"get-app-version"}}"#)
                .unwrap_err()
                .id,
            None
        );
    }

    #[test]
    fn test_command_names_match_wire() {
        let commands = [
            Command::GetStoredAddresses,
            Command::SaveAddress { url: "u".into() },
            Command::ClearAddresses,
            Command::LoadInstance { url: "u".into() },
            Command::ShowErrorDialog { message: "m".into() },
            Command::ResizeLauncher { content_height: 1 },
            Command::GetAppVersion,
        ];
        for (command, name) in commands.iter().zip(COMMAND_NAMES) {
            assert_eq!(command.name(), name);
            let wire = serde_json::to_value(command).unwrap();
            assert_eq!(wire["cmd"], name);
        }
    }

    #[test]
    fn test_event_wire_shape() {
        let event = serde_json::to_value(BridgeEvent::VisibilityChanged(true)).unwrap();
        assert_eq!(event, json!({ "event": "visibility-changed", "payload": true }));

        let ready = serde_json::to_value(BridgeEvent::UpdateReady(UpdateInfo {
            version: "1.2.0".into(),
        }))
        .unwrap();
        assert_eq!(ready["event"], EVENT_NAMES[2]);
        assert_eq!(ready["payload"]["version"], "1.2.0");
    }

    #[test]
    fn test_chrome_allow_list() {
        assert_eq!(
            parse_chrome_message(r#"{"cmd":"start-window-drag"}"#),
            Some(ChromeMessage::StartWindowDrag)
        );
        assert_eq!(parse_chrome_message(r#"{"cmd":"load-instance","url":"x"}"#), None);
        assert_eq!(parse_chrome_message("{}"), None);
    }

    #[test]
    fn test_scripts_embed_json() {
        let script = reply_script(&BridgeReply {
            id: 4,
            response: IpcResponse::success(vec!["https://a"]),
        });
        assert!(script.contains(r#""id":4"#));
        assert!(script.contains("resolve("));

        let script = event_script(&BridgeEvent::VisibilityChanged(false));
        assert!(script.contains("emit("));
        assert!(script.contains(r#""payload":false"#));
    }
}

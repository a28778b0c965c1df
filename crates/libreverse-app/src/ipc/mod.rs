//! IPC module for the launcher and viewer webviews
//!
//! The launcher page gets `window.libreverseAPI`, a promise-based wrapper
//! around the bridge commands. Requests carry an id; the host answers by
//! evaluating `__libreverseBridge.resolve(reply)` in the page. Events go
//! through `__libreverseBridge.emit(event)`.
//!
//! The viewer gets no API at all. Where its title bar is overlaid on the
//! page it also gets a drag strip, whose messages are limited to the
//! window-chrome allow-list.

use libreverse_shell::bridge::{parse_chrome_message, parse_request, BridgeRequest, ChromeMessage, Rejected};

/// Anything that arrived on the launcher's IPC channel
#[derive(Debug, PartialEq)]
pub enum LauncherMessage {
    Chrome(ChromeMessage),
    Request(BridgeRequest),
    Rejected(Rejected),
}

/// Sort a raw launcher IPC body into chrome, request, or rejection.
pub fn classify(body: &str) -> LauncherMessage {
    if let Some(chrome) = parse_chrome_message(body) {
        return LauncherMessage::Chrome(chrome);
    }
    match parse_request(body) {
        Ok(request) => LauncherMessage::Request(request),
        Err(rejected) => LauncherMessage::Rejected(rejected),
    }
}

/// Bridge installed into the launcher page before its scripts run
pub const LAUNCHER_BRIDGE: &str = r#"
(function() {
    const pending = new Map();
    const listeners = {
        'visibility-changed': new Set(),
        'silent-download-progress': new Set(),
        'update-ready': new Set(),
    };
    let nextId = 1;

    function post(message) {
        window.ipc.postMessage(JSON.stringify(message));
    }

    function invoke(command) {
        return new Promise((resolve, reject) => {
            const id = nextId++;
            pending.set(id, { resolve, reject });
            post({ id, command });
        });
    }

    function subscribe(name, callback) {
        listeners[name].add(callback);
        return () => listeners[name].delete(callback);
    }

    window.__libreverseBridge = {
        resolve(reply) {
            const entry = pending.get(reply.id);
            if (!entry) return;
            pending.delete(reply.id);
            if (reply.response.type === 'success') {
                entry.resolve(reply.response.data);
            } else {
                entry.reject(new Error(reply.response.message));
            }
        },
        emit(event) {
            const set = listeners[event.event];
            if (!set) return;
            set.forEach((callback) => {
                try {
                    callback(event.payload);
                } catch (err) {
                    console.error('Listener for ' + event.event + ' failed:', err);
                }
            });
        },
    };

    window.libreverseAPI = Object.freeze({
        getStoredUrls: () => invoke({ cmd: 'get-stored-urls' }),
        saveUrl: (url) => invoke({ cmd: 'save-url', url }),
        clearRecentUrls: () => invoke({ cmd: 'clear-recent-urls' }),
        loadInstance: (url) => invoke({ cmd: 'load-instance', url }),
        showErrorDialog: (message) => invoke({ cmd: 'show-error-dialog', message }),
        resizeWindow: (contentHeight) => invoke({ cmd: 'resize-window', contentHeight: Math.round(contentHeight) }),
        getAppVersion: () => invoke({ cmd: 'get-app-version' }),

        onVisibilityChange: (callback) => subscribe('visibility-changed', callback),
        onSilentUpdateProgress: (callback) => subscribe('silent-download-progress', callback),
        onUpdateReady: (callback) => subscribe('update-ready', callback),

        startWindowDrag: () => post({ cmd: 'start-window-drag' }),
        minimizeWindow: () => post({ cmd: 'minimize-window' }),
        closeWindow: () => post({ cmd: 'close-window' }),
    });
})();
"#;

/// Forces the launcher page out of its loading state
pub const RESET_LOADING_SCRIPT: &str = r#"
(function() {
    const overlay = document.getElementById('loadingOverlay');
    if (overlay) overlay.classList.remove('active');
    document.body.classList.remove('loading');
    if (window.libreverseLauncher) window.libreverseLauncher.setLoading(false);
})();
"#;

/// Drag strip added to every page an overlaid-title-bar viewer loads
pub const VIEWER_CHROME_SCRIPT: &str = r#"
(function() {
    if (document.querySelector('.libreverse-titlebar')) return;

    const style = document.createElement('style');
    style.textContent = `
        .libreverse-titlebar {
            height: 30px !important;
            width: 100% !important;
            position: fixed !important;
            top: 0 !important;
            left: 0 !important;
            z-index: 2147483647 !important;
            background: transparent !important;
            cursor: default;
        }
    `;
    document.head.appendChild(style);

    const titlebar = document.createElement('div');
    titlebar.className = 'libreverse-titlebar';
    titlebar.addEventListener('mousedown', (event) => {
        if (event.button !== 0) return;
        if (event.detail === 2) return;
        window.ipc.postMessage(JSON.stringify({ cmd: 'start-window-drag' }));
    });
    document.body.insertBefore(titlebar, document.body.firstChild);
})();
"#;

/// Tells the launcher page which title bar treatment the window has
pub fn platform_script(title_bar: &str) -> String {
    format!(
        "document.addEventListener('DOMContentLoaded', () => document.body.dataset.titlebar = {});",
        serde_json::to_string(title_bar).unwrap_or_else(|_| "\"frameless\"".to_string())
    )
}

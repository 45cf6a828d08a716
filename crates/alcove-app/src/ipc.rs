//! IPC protocol between the shell webview and Rust.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: the shell calls `window.alcove.ipc.send(kind, payload)`,
//!   which posts a JSON string through the webview's `ipc_handler`.
//! - **Rust -> JS**: Rust evaluates a small dispatch snippet that invokes
//!   the handler the shell registered for that kind.

use serde::{Deserialize, Serialize};

/// A typed IPC message from the shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    /// The message type / channel name.
    pub kind: String,
    /// The message payload (arbitrary JSON, `null` when omitted).
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// JavaScript snippet that sets up the IPC bridge on the JS side.
/// Injected as an initialization script into the shell webview. Hash
/// navigation is reported back so views can hide under full-window
/// overlay routes.
pub const SHELL_INIT_SCRIPT: &str = r#"
(function() {
    window.alcove = window.alcove || {};
    window.alcove.ipc = {
        send: function(kind, payload) {
            window.ipc.postMessage(JSON.stringify({
                kind: kind,
                payload: payload === undefined ? null : payload
            }));
        },
        _handlers: {},
        on: function(kind, callback) {
            this._handlers[kind] = callback;
        },
        _dispatch: function(kind, payload) {
            var handler = this._handlers[kind];
            if (handler) {
                handler(payload);
            }
        }
    };
    window.addEventListener('hashchange', function() {
        window.alcove.ipc.send('shell-navigated', location.href);
    });
})();
"#;

/// Generate a JS snippet that dispatches a message to the shell's handler.
pub fn js_dispatch_message(kind: &str, payload: &serde_json::Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.alcove.ipc._dispatch({}, {});",
        serde_json::to_string(kind).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_message_with_payload() {
        let msg = IpcMessage::from_json(r#"{"kind":"reload-service","payload":{"serviceId":"a"}}"#)
            .unwrap();
        assert_eq!(msg.kind, "reload-service");
        assert_eq!(msg.payload, json!({"serviceId": "a"}));
    }

    #[test]
    fn missing_payload_defaults_to_null() {
        let msg = IpcMessage::from_json(r#"{"kind":"hide-all-services"}"#).unwrap();
        assert_eq!(msg.kind, "hide-all-services");
        assert!(msg.payload.is_null());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(IpcMessage::from_json("not json").is_none());
        assert!(IpcMessage::from_json(r#"{"payload": 1}"#).is_none());
    }

    #[test]
    fn dispatch_snippet_quotes_kind_and_payload() {
        let js = js_dispatch_message("active-surface-id", &json!(7));
        assert_eq!(js, "window.alcove.ipc._dispatch(\"active-surface-id\", 7);");
    }

    #[test]
    fn dispatch_snippet_escapes_strings() {
        let js = js_dispatch_message("x", &json!("quote\"inside"));
        assert!(js.contains("\\\"inside"));
    }
}

//! IPC message validation and dispatch from the shell to the view manager.

use std::time::Instant;

use serde_json::{json, Value};
use tracing::{debug, warn};

use alcove_common::commands::COMMAND_KINDS;
use alcove_common::{ServiceDescriptor, SurfaceId, ViewCommand};

use crate::ipc::IpcMessage;

use super::core::AlcoveApp;

// =============================================================================
// IPC ALLOWLIST
// =============================================================================

/// Request/response and event kinds handled outside the command table.
const REQUEST_KINDS: &[&str] = &[
    "browser-view-manager",
    "todos-fetch-surface-id",
    "get-active-surface-id",
    "shell-navigated",
];

/// Check whether an IPC message kind is handled at all.
/// Any message with a `kind` not in this list is rejected and logged.
pub fn is_ipc_kind_allowed(kind: &str) -> bool {
    COMMAND_KINDS.contains(&kind) || REQUEST_KINDS.contains(&kind)
}

fn surface_id_payload(id: Option<SurfaceId>) -> Value {
    match id {
        Some(id) => json!(id.0),
        None => Value::Null,
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

impl AlcoveApp {
    /// Handle a single IPC message from the shell webview.
    pub(super) fn handle_ipc_message(&mut self, body: &str, now: Instant) {
        let msg = match IpcMessage::from_json(body) {
            Some(m) => m,
            None => {
                warn!(body_len = body.len(), "IPC message rejected: failed to parse");
                return;
            }
        };

        if !is_ipc_kind_allowed(&msg.kind) {
            warn!(kind = %msg.kind, "IPC message rejected: unknown kind");
            return;
        }

        let Some(manager) = self.manager.as_mut() else {
            warn!(kind = %msg.kind, "IPC message dropped: views not initialized");
            return;
        };

        debug!(kind = %msg.kind, "IPC message dispatched");

        match msg.kind.as_str() {
            "browser-view-manager" => {
                let descriptors: Vec<ServiceDescriptor> = match serde_json::from_value(msg.payload)
                {
                    Ok(d) => d,
                    Err(e) => {
                        warn!(error = %e, "reconcile payload rejected");
                        return;
                    }
                };
                let mapping = manager.reconcile(&descriptors, now);
                let result: Vec<Value> = mapping
                    .iter()
                    .map(|(id, surface)| {
                        json!({"serviceId": id.as_str(), "surfaceId": surface.0})
                    })
                    .collect();
                if let Some(shell) = &self.shell {
                    shell.send("browser-view-manager-result", &Value::Array(result));
                }
            }

            "todos-fetch-surface-id" => {
                let id = manager.todos_surface_id();
                if let Some(shell) = &self.shell {
                    shell.send("todos-surface-id", &surface_id_payload(id));
                }
            }

            "get-active-surface-id" => {
                let id = manager.active_surface_id();
                if let Some(shell) = &self.shell {
                    shell.send("active-surface-id", &surface_id_payload(id));
                }
            }

            "shell-navigated" => {
                if let Some(url) = msg.payload.as_str() {
                    manager.host_navigated(url);
                }
            }

            kind => match ViewCommand::from_ipc(kind, &msg.payload) {
                Some(cmd) => manager.dispatch(cmd, now),
                None => {
                    // Kind was allowlisted but the payload didn't parse;
                    // `from_ipc` already logged the reason.
                }
            },
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

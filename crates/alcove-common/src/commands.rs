//! One-shot view commands.
//!
//! Every fire-and-forget message the shell can send about views resolves to
//! a [`ViewCommand`]. The IPC bridge maps a message `kind` + JSON payload to
//! a command with [`ViewCommand::from_ipc`]; the dispatcher in
//! `alcove-views` matches on the enum to route to the registry.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::types::{Bounds, ServiceId};

/// IPC kinds for each command, in dispatch-table order.
pub const COMMAND_KINDS: &[&str] = &[
    "open-service-dev-tools",
    "todos-open-dev-tools",
    "reload-service",
    "todos-reload",
    "navigate-service-to",
    "resize-service-views",
    "resize-todo-view",
    "hide-all-services",
    "show-all-services",
    "user-login-status",
];

/// A discrete one-shot command against the view registry.
///
/// Commands are advisory: an unresolvable target is a silent no-op, and no
/// command reports a result back to the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    OpenDevTools { service_id: Option<ServiceId> },
    OpenTodosDevTools,
    ReloadService { service_id: Option<ServiceId> },
    ReloadTodos,
    NavigateService { service_id: ServiceId, url: String },
    ResizeServices { bounds: Bounds },
    ResizeTodos { bounds: Bounds },
    HideAll,
    ShowAll,
    UserLoginStatus { logged_in: bool },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceIdArg {
    #[serde(default)]
    service_id: Option<ServiceId>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NavigateArgs {
    service_id: ServiceId,
    url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginStatusArg {
    logged_in: bool,
}

impl ViewCommand {
    /// Parse a command from its IPC kind and JSON payload.
    ///
    /// Returns `None` for unknown kinds and for payloads that don't match
    /// the command's shape; malformed payloads for a known kind are logged.
    pub fn from_ipc(kind: &str, payload: &Value) -> Option<ViewCommand> {
        let parsed = match kind {
            "open-service-dev-tools" => optional_id(payload)
                .map(|service_id| ViewCommand::OpenDevTools { service_id }),
            "todos-open-dev-tools" => Ok(ViewCommand::OpenTodosDevTools),
            "reload-service" => optional_id(payload)
                .map(|service_id| ViewCommand::ReloadService { service_id }),
            "todos-reload" => Ok(ViewCommand::ReloadTodos),
            "navigate-service-to" => serde_json::from_value::<NavigateArgs>(payload.clone())
                .map(|args| ViewCommand::NavigateService {
                    service_id: args.service_id,
                    url: args.url,
                })
                .map_err(|e| e.to_string()),
            "resize-service-views" => parse_bounds(payload)
                .map(|bounds| ViewCommand::ResizeServices { bounds }),
            "resize-todo-view" => {
                parse_bounds(payload).map(|bounds| ViewCommand::ResizeTodos { bounds })
            }
            "hide-all-services" => Ok(ViewCommand::HideAll),
            "show-all-services" => Ok(ViewCommand::ShowAll),
            "user-login-status" => parse_login_status(payload)
                .map(|logged_in| ViewCommand::UserLoginStatus { logged_in }),
            _ => return None,
        };

        match parsed {
            Ok(cmd) => Some(cmd),
            Err(reason) => {
                warn!(kind, %reason, "command payload rejected");
                None
            }
        }
    }

    /// The IPC kind this command travels under.
    pub fn kind(&self) -> &'static str {
        match self {
            ViewCommand::OpenDevTools { .. } => "open-service-dev-tools",
            ViewCommand::OpenTodosDevTools => "todos-open-dev-tools",
            ViewCommand::ReloadService { .. } => "reload-service",
            ViewCommand::ReloadTodos => "todos-reload",
            ViewCommand::NavigateService { .. } => "navigate-service-to",
            ViewCommand::ResizeServices { .. } => "resize-service-views",
            ViewCommand::ResizeTodos { .. } => "resize-todo-view",
            ViewCommand::HideAll => "hide-all-services",
            ViewCommand::ShowAll => "show-all-services",
            ViewCommand::UserLoginStatus { .. } => "user-login-status",
        }
    }
}

/// Payload is either absent, `null`, a bare id string, or
/// `{"serviceId": "..."}`.
fn optional_id(payload: &Value) -> Result<Option<ServiceId>, String> {
    if payload.is_null() {
        return Ok(None);
    }
    if let Some(id) = payload.as_str() {
        return Ok(Some(ServiceId::new(id)));
    }
    serde_json::from_value::<ServiceIdArg>(payload.clone())
        .map(|arg| arg.service_id)
        .map_err(|e| e.to_string())
}

fn parse_bounds(payload: &Value) -> Result<Bounds, String> {
    serde_json::from_value::<Bounds>(payload.clone()).map_err(|e| e.to_string())
}

/// Payload is either a bare boolean or `{"loggedIn": bool}`.
fn parse_login_status(payload: &Value) -> Result<bool, String> {
    if let Some(flag) = payload.as_bool() {
        return Ok(flag);
    }
    serde_json::from_value::<LoginStatusArg>(payload.clone())
        .map(|arg| arg.logged_in)
        .map_err(|e| e.to_string())
}

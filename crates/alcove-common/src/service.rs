//! Service descriptor types.
//!
//! A [`ServiceDescriptor`] is the shell's desired configuration and state
//! for one service view. Descriptors arrive over the shell IPC bridge as
//! camelCase JSON, one full list per reconcile request; they are transient
//! inputs, never stored.

use serde::{Deserialize, Serialize};

use crate::types::ServiceId;

/// Desired configuration + state for one service view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub id: ServiceId,
    pub name: String,
    pub url: String,
    /// Storage partition the service's browsing context is bound to.
    pub partition: String,
    pub state: ServiceState,
    /// Behavior identifier for the service's recipe.
    pub recipe_id: String,
}

/// Mutable state bundle for one service, replaced wholesale on every
/// reconcile of the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceState {
    pub is_active: bool,
    pub is_spellchecker_enabled: bool,
    pub spellchecker_language: String,
    pub is_dark_mode_enabled: bool,
    pub team: String,
    pub has_custom_icon: bool,
    pub is_restricted: bool,
    pub is_hibernating: bool,
}

impl Default for ServiceState {
    fn default() -> Self {
        Self {
            is_active: false,
            is_spellchecker_enabled: true,
            spellchecker_language: "en-US".into(),
            is_dark_mode_enabled: false,
            team: String::new(),
            has_custom_icon: false,
            is_restricted: false,
            is_hibernating: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ServiceDescriptor {
        ServiceDescriptor {
            id: ServiceId::new("slack-1"),
            name: "Slack".into(),
            url: "https://app.slack.com".into(),
            partition: "persist:slack-1".into(),
            state: ServiceState {
                is_active: true,
                team: "acme".into(),
                ..Default::default()
            },
            recipe_id: "slack".into(),
        }
    }

    #[test]
    fn state_defaults() {
        let state = ServiceState::default();
        assert!(!state.is_active);
        assert!(state.is_spellchecker_enabled);
        assert_eq!(state.spellchecker_language, "en-US");
        assert!(!state.is_restricted);
    }

    #[test]
    fn descriptor_serde_roundtrip() {
        let d = descriptor();
        let json = serde_json::to_string(&d).unwrap();
        let back: ServiceDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(d, back);
    }

    #[test]
    fn descriptor_uses_camel_case_on_the_wire() {
        let json = serde_json::to_value(descriptor()).unwrap();
        assert!(json.get("recipeId").is_some());
        let state = json.get("state").unwrap();
        assert!(state.get("isActive").is_some());
        assert!(state.get("isSpellcheckerEnabled").is_some());
        assert!(state.get("hasCustomIcon").is_some());
    }

    #[test]
    fn descriptor_parses_shell_payload() {
        let raw = r#"{
            "id": "gmail",
            "name": "Gmail",
            "url": "https://mail.google.com",
            "partition": "persist:gmail",
            "state": {
                "isActive": false,
                "isSpellcheckerEnabled": true,
                "spellcheckerLanguage": "de-DE",
                "isDarkModeEnabled": true,
                "team": "",
                "hasCustomIcon": false,
                "isRestricted": false,
                "isHibernating": true
            },
            "recipeId": "gmail"
        }"#;
        let d: ServiceDescriptor = serde_json::from_str(raw).unwrap();
        assert_eq!(d.id.as_str(), "gmail");
        assert_eq!(d.state.spellchecker_language, "de-DE");
        assert!(d.state.is_hibernating);
    }

    #[test]
    fn state_fields_default_when_missing() {
        let raw = r#"{
            "id": "x",
            "name": "X",
            "url": "https://example.com",
            "partition": "persist:x",
            "state": { "isActive": true },
            "recipeId": "x"
        }"#;
        let d: ServiceDescriptor = serde_json::from_str(raw).unwrap();
        assert!(d.state.is_active);
        assert_eq!(d.state.spellchecker_language, "en-US");
    }
}

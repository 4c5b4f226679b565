//! Persisted profile records
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Legacy keys merged after load, so files carrying both forms parse
//! - 1.1.0: Accept legacy `name` / `last_independence_year` keys
//! - 1.0.0: Initial schema

use serde::{Deserialize, Serialize};

/// Everything the assistant remembers between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredProfile")]
pub struct Profile {
    pub identity: Option<String>,
    pub reminders: Vec<Reminder>,
    pub last_annual_alert_year: i32,
}

/// On-disk shape, current and legacy keys side by side
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredProfile {
    identity: Option<String>,
    name: Option<String>,
    reminders: Vec<Reminder>,
    last_annual_alert_year: i32,
    last_independence_year: i32,
}

impl From<StoredProfile> for Profile {
    fn from(stored: StoredProfile) -> Self {
        Profile {
            identity: stored.identity.or(stored.name),
            reminders: stored.reminders,
            last_annual_alert_year: stored
                .last_annual_alert_year
                .max(stored.last_independence_year),
        }
    }
}

/// A remembered note, optionally firing once at a wall-clock minute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(default)]
    pub text: String,
    /// 24-hour `HH:MM`; `None` means the reminder never fires
    #[serde(default)]
    pub time: Option<String>,
}

impl Reminder {
    pub fn new(text: impl Into<String>, time: Option<String>) -> Self {
        Reminder {
            text: text.into(),
            time,
        }
    }

    /// Whether this reminder fires at the given `HH:MM`
    pub fn is_due_at(&self, hhmm: &str) -> bool {
        self.time.as_deref() == Some(hhmm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_take_defaults() {
        let profile: Profile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, Profile::default());
        assert_eq!(profile.last_annual_alert_year, 0);
    }

    #[test]
    fn test_legacy_keys_and_unknown_fields() {
        let json = r#"{
            "name": "ali",
            "chat_history": [],
            "reminders": [{"text": "call sam", "time": "18:00"}, {"text": "buy milk", "time": null}],
            "last_independence_year": 2024
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.identity.as_deref(), Some("ali"));
        assert_eq!(profile.last_annual_alert_year, 2024);
        assert_eq!(profile.reminders.len(), 2);
        assert_eq!(profile.reminders[1].time, None);
    }

    #[test]
    fn test_current_and_legacy_keys_together() {
        let json = r#"{
            "identity": "sara",
            "name": "ali",
            "last_annual_alert_year": 2023,
            "last_independence_year": 2025
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.identity.as_deref(), Some("sara"));
        assert_eq!(profile.last_annual_alert_year, 2025);
    }

    #[test]
    fn test_saved_profile_uses_current_keys() {
        let profile = Profile {
            identity: Some("ali".to_string()),
            ..Profile::default()
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"identity\":\"ali\""));
        assert!(!json.contains("\"name\""));
        assert_eq!(serde_json::from_str::<Profile>(&json).unwrap(), profile);
    }

    #[test]
    fn test_reminder_due_check_is_exact() {
        let reminder = Reminder::new("stretch", Some("18:00".to_string()));
        assert!(reminder.is_due_at("18:00"));
        assert!(!reminder.is_due_at("18:01"));
        assert!(!Reminder::new("inert", None).is_due_at("18:00"));
    }
}

//! # Features Layer
//!
//! Each feature lives in its own module with a version header. The registry
//! below is logged at startup.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod assistant;
pub mod dispatch;
pub mod fallback;
pub mod intents;
pub mod lookup;
pub mod profile;
pub mod reminders;
pub mod speech;
pub mod system;

pub use assistant::{Assistant, Session, SessionState};
pub use dispatch::{Collaborators, Dispatcher};
pub use fallback::{CannedResponder, FallbackResponder, NoFallback};
pub use intents::{normalize, Intent, IntentClassifier, KnowledgeBase};
pub use profile::{Profile, ProfileStore, Reminder};
pub use reminders::{Announcer, ReminderScheduler, SchedulerHandle};

use crate::core::Config;

/// Registry entry for one feature
#[derive(Debug, Clone)]
pub struct FeatureInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub toggleable: bool,
}

pub fn get_features() -> Vec<FeatureInfo> {
    vec![
        FeatureInfo {
            id: "intents",
            name: "Intent Classification",
            version: "1.2.0",
            toggleable: false,
        },
        FeatureInfo {
            id: "dispatch",
            name: "Action Dispatch",
            version: "1.3.0",
            toggleable: false,
        },
        FeatureInfo {
            id: "profile",
            name: "Persistent Profile",
            version: "1.2.0",
            toggleable: false,
        },
        FeatureInfo {
            id: "reminders",
            name: "Reminders",
            version: "2.0.0",
            toggleable: false,
        },
        FeatureInfo {
            id: "speech",
            name: "Speech I/O",
            version: "1.1.0",
            toggleable: true,
        },
        FeatureInfo {
            id: "weather",
            name: "Weather",
            version: "1.1.0",
            toggleable: true,
        },
        FeatureInfo {
            id: "encyclopedia",
            name: "Encyclopedia",
            version: "1.1.0",
            toggleable: false,
        },
        FeatureInfo {
            id: "system",
            name: "System Integration",
            version: "1.2.0",
            toggleable: false,
        },
        FeatureInfo {
            id: "fallback",
            name: "Conversational Fallback",
            version: "1.0.0",
            toggleable: true,
        },
    ]
}

/// Whether a toggleable feature is switched on by this configuration
pub fn is_enabled(feature: &FeatureInfo, config: &Config) -> bool {
    match feature.id {
        "speech" => config.stt_command.is_some() || config.tts_command.is_some(),
        "weather" => config.weather_enabled(),
        _ => true,
    }
}

pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_ids_unique() {
        let features = get_features();
        let mut ids: Vec<_> = features.iter().map(|f| f.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), features.len());
    }

    #[test]
    fn test_weather_enabled_by_key() {
        let weather = get_features().into_iter().find(|f| f.id == "weather").unwrap();
        let mut config = Config::default();
        assert!(!is_enabled(&weather, &config));
        config.weather_api_key = Some("key".to_string());
        assert!(is_enabled(&weather, &config));
    }

    #[test]
    fn test_version_matches_package() {
        assert_eq!(get_version(), "1.0.0");
    }
}

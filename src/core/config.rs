//! Runtime configuration
//!
//! Values come from an optional YAML file (`JARVIS_CONFIG_PATH`, or
//! `jarvis.yaml` when present) and are then overridden by environment
//! variables, which may themselves come from a `.env` file via dotenvy.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: YAML base file with environment overrides
//! - 1.0.0: Environment-only configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "jarvis.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root folder scanned for playable music
    pub music_folder: PathBuf,
    /// Code editor launched by "open vscode"
    pub editor_path: PathBuf,
    /// OpenWeatherMap key; weather is disabled without it
    pub weather_api_key: Option<String>,
    pub weather_city: String,
    /// Bound on each spoken command acquisition
    pub listen_timeout_seconds: u64,
    /// Bound on the dictation round of two-phase commands
    pub dictation_timeout_seconds: u64,
    /// Persisted profile location
    pub memory_file: PathBuf,
    /// Where notes and application templates are written
    pub notes_dir: PathBuf,
    /// External speech-to-text command; prints the transcript on stdout
    pub stt_command: Option<String>,
    /// External text-to-speech command; receives the text as its last argument
    pub tts_command: Option<String>,
    pub reminder_check_seconds: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let music_folder = env::var("HOME")
            .map(|home| Path::new(&home).join("Music"))
            .unwrap_or_else(|_| PathBuf::from("Music"));

        Config {
            music_folder,
            editor_path: PathBuf::from("code"),
            weather_api_key: None,
            weather_city: "Islamabad".to_string(),
            listen_timeout_seconds: 8,
            dictation_timeout_seconds: 12,
            memory_file: PathBuf::from("jarvis_memory.json"),
            notes_dir: PathBuf::from("."),
            stt_command: None,
            tts_command: None,
            reminder_check_seconds: 60,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Build configuration from the optional YAML file plus environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = match env::var("JARVIS_CONFIG_PATH") {
            Ok(path) => Self::load(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE)?,
            Err(_) => Config::default(),
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file; missing keys take defaults
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {path}"))?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production)
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("JARVIS_MUSIC_FOLDER") {
            self.music_folder = PathBuf::from(v);
        }
        if let Some(v) = lookup("JARVIS_EDITOR_PATH") {
            self.editor_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("JARVIS_WEATHER_API_KEY") {
            self.weather_api_key = Some(v).filter(|k| !k.trim().is_empty());
        }
        if let Some(v) = lookup("JARVIS_WEATHER_CITY") {
            self.weather_city = v;
        }
        if let Some(v) = lookup("JARVIS_LISTEN_TIMEOUT") {
            self.listen_timeout_seconds = v
                .parse()
                .with_context(|| format!("JARVIS_LISTEN_TIMEOUT must be a number, got {v:?}"))?;
        }
        if let Some(v) = lookup("JARVIS_DICTATION_TIMEOUT") {
            self.dictation_timeout_seconds = v.parse().with_context(|| {
                format!("JARVIS_DICTATION_TIMEOUT must be a number, got {v:?}")
            })?;
        }
        if let Some(v) = lookup("JARVIS_MEMORY_FILE") {
            self.memory_file = PathBuf::from(v);
        }
        if let Some(v) = lookup("JARVIS_NOTES_DIR") {
            self.notes_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("JARVIS_STT_COMMAND") {
            self.stt_command = Some(v).filter(|c| !c.trim().is_empty());
        }
        if let Some(v) = lookup("JARVIS_TTS_COMMAND") {
            self.tts_command = Some(v).filter(|c| !c.trim().is_empty());
        }
        if let Some(v) = lookup("JARVIS_REMINDER_INTERVAL") {
            self.reminder_check_seconds = v.parse().with_context(|| {
                format!("JARVIS_REMINDER_INTERVAL must be a number, got {v:?}")
            })?;
        }
        if let Some(v) = lookup("RUST_LOG_LEVEL") {
            self.log_level = v;
        }
        Ok(())
    }

    /// Reject values the assistant cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.listen_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("listen_timeout_seconds must be greater than 0"));
        }
        if self.dictation_timeout_seconds == 0 {
            return Err(anyhow::anyhow!(
                "dictation_timeout_seconds must be greater than 0"
            ));
        }
        if self.reminder_check_seconds == 0 {
            return Err(anyhow::anyhow!("reminder_check_seconds must be greater than 0"));
        }
        if self.memory_file.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("memory_file must not be empty"));
        }
        Ok(())
    }

    /// Weather is only available with both a key and a city
    pub fn weather_enabled(&self) -> bool {
        self.weather_api_key.is_some() && !self.weather_city.trim().is_empty()
    }

    pub fn listen_timeout(&self) -> Duration {
        Duration::from_secs(self.listen_timeout_seconds)
    }

    pub fn dictation_timeout(&self) -> Duration {
        Duration::from_secs(self.dictation_timeout_seconds)
    }

    pub fn reminder_interval(&self) -> Duration {
        Duration::from_secs(self.reminder_check_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reminder_check_seconds, 60);
        assert_eq!(config.memory_file, PathBuf::from("jarvis_memory.json"));
        assert!(!config.weather_enabled());
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup_from(&[
                ("JARVIS_WEATHER_API_KEY", "abc123"),
                ("JARVIS_WEATHER_CITY", "Lahore"),
                ("JARVIS_LISTEN_TIMEOUT", "5"),
                ("JARVIS_MEMORY_FILE", "/tmp/mem.json"),
            ]))
            .unwrap();

        assert!(config.weather_enabled());
        assert_eq!(config.weather_city, "Lahore");
        assert_eq!(config.listen_timeout(), Duration::from_secs(5));
        assert_eq!(config.memory_file, PathBuf::from("/tmp/mem.json"));
    }

    #[test]
    fn test_blank_weather_key_keeps_weather_disabled() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup_from(&[("JARVIS_WEATHER_API_KEY", "  ")]))
            .unwrap();
        assert!(!config.weather_enabled());
    }

    #[test]
    fn test_non_numeric_timeout_is_rejected() {
        let mut config = Config::default();
        let result = config.apply_overrides(lookup_from(&[("JARVIS_LISTEN_TIMEOUT", "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_interval_fails_validation() {
        let config = Config {
            reminder_check_seconds: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_file_with_partial_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jarvis.yaml");
        std::fs::write(&path, "weather_city: Karachi\nlisten_timeout_seconds: 3\n").unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.weather_city, "Karachi");
        assert_eq!(config.listen_timeout_seconds, 3);
        assert_eq!(config.dictation_timeout_seconds, 12);
    }
}

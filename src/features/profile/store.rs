//! Write-through profile store
//!
//! One `Profile` behind one async mutex. Every mutation holds the lock across
//! the file write, so the interaction loop and the reminder scheduler never
//! observe in-memory state that differs from what is on disk.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Atomic temp-file-then-rename persistence
//! - 1.1.0: Corrupt memory files are backed up instead of overwritten
//! - 1.0.0: Initial release

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use super::model::{Profile, Reminder};

#[derive(Clone)]
pub struct ProfileStore {
    profile: Arc<Mutex<Profile>>,
    path: Arc<PathBuf>,
}

impl ProfileStore {
    /// Load the profile from `path` (or start empty) and verify it is writable
    ///
    /// An unreadable or unwritable memory file is a startup failure. A file
    /// that exists but does not parse is backed up and replaced by an empty
    /// profile; if the backup fails the file is left untouched and opening
    /// fails.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let profile = match fs::read_to_string(&path).await {
            Ok(contents) => match serde_json::from_str::<Profile>(&contents) {
                Ok(profile) => {
                    info!(
                        "Loaded memory from {} ({} reminders)",
                        path.display(),
                        profile.reminders.len()
                    );
                    profile
                }
                Err(e) => {
                    warn!("Memory file {} is not valid JSON: {e}", path.display());
                    let backup = backup_path(&path);
                    fs::copy(&path, &backup).await.with_context(|| {
                        format!(
                            "Memory file {} is unreadable and could not be backed up to {}",
                            path.display(),
                            backup.display()
                        )
                    })?;
                    warn!("Backed up unreadable memory to {}", backup.display());
                    Profile::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No memory file at {}, starting fresh", path.display());
                Profile::default()
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read memory file {}", path.display()))
            }
        };

        write_profile(&path, &profile)
            .await
            .with_context(|| format!("Memory file {} is not writable", path.display()))?;

        Ok(ProfileStore {
            profile: Arc::new(Mutex::new(profile)),
            path: Arc::new(path),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the current profile
    pub async fn snapshot(&self) -> Profile {
        self.profile.lock().await.clone()
    }

    pub async fn identity(&self) -> Option<String> {
        self.profile.lock().await.identity.clone()
    }

    pub async fn set_identity(&self, name: &str) {
        let mut profile = self.profile.lock().await;
        profile.identity = Some(name.to_string());
        self.persist(&profile).await;
    }

    pub async fn reminders(&self) -> Vec<Reminder> {
        self.profile.lock().await.reminders.clone()
    }

    pub async fn add_reminder(&self, reminder: Reminder) {
        let mut profile = self.profile.lock().await;
        profile.reminders.push(reminder);
        self.persist(&profile).await;
    }

    /// Remove and return every reminder due at `hhmm`
    ///
    /// Persists only when something was removed.
    pub async fn take_due_reminders(&self, hhmm: &str) -> Vec<Reminder> {
        let mut profile = self.profile.lock().await;
        if !profile.reminders.iter().any(|r| r.is_due_at(hhmm)) {
            return Vec::new();
        }

        let (due, remaining): (Vec<Reminder>, Vec<Reminder>) = profile
            .reminders
            .drain(..)
            .partition(|r| r.is_due_at(hhmm));
        profile.reminders = remaining;
        self.persist(&profile).await;
        due
    }

    /// Record the annual alert for `year`, returning false if already recorded
    pub async fn claim_annual_alert(&self, year: i32) -> bool {
        let mut profile = self.profile.lock().await;
        if profile.last_annual_alert_year == year {
            return false;
        }
        profile.last_annual_alert_year = year;
        self.persist(&profile).await;
        true
    }

    /// Durable write while the caller still holds the lock
    ///
    /// Failures are logged; the in-memory profile keeps the change.
    async fn persist(&self, profile: &Profile) {
        match write_profile(&self.path, profile).await {
            Ok(()) => debug!("Memory saved to {}", self.path.display()),
            Err(e) => error!("Could not save memory: {e:#}"),
        }
    }
}

async fn write_profile(path: &Path, profile: &Profile) -> Result<()> {
    let json = serde_json::to_string_pretty(profile)?;
    let tmp = temp_path(path);
    fs::write(&tmp, json)
        .await
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .await
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

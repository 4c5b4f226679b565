//! Periodic reminder and annual-alert checks
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Cancellable task with a stop handle; pure `tick` step
//! - 1.1.0: Annual alert claimed once per calendar year
//! - 1.0.0: Initial release

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::announcer::Announcer;
use crate::features::profile::ProfileStore;

pub const ANNUAL_ALERT: &str =
    "Happy Independence Day! Today is 14th August, Pakistan's Independence Day.";

pub fn is_annual_alert_day(date: NaiveDate) -> bool {
    date.month() == 8 && date.day() == 14
}

/// Alert text if today is the alert day and this year's alert is unclaimed
///
/// Claiming persists the year, so the loop's startup check and the scheduler
/// never both announce in the same year.
pub async fn claim_annual_alert(store: &ProfileStore, today: NaiveDate) -> Option<&'static str> {
    if !is_annual_alert_day(today) {
        return None;
    }
    if store.claim_annual_alert(today.year()).await {
        info!("Annual alert claimed for {}", today.year());
        Some(ANNUAL_ALERT)
    } else {
        None
    }
}

pub struct ReminderScheduler {
    store: ProfileStore,
    announcer: Announcer,
    period: Duration,
}

impl ReminderScheduler {
    pub fn new(store: ProfileStore, announcer: Announcer, period: Duration) -> Self {
        ReminderScheduler {
            store,
            announcer,
            period,
        }
    }

    /// One check at `now`; returns (and enqueues) everything announced
    pub async fn tick(&self, now: NaiveDateTime) -> Vec<String> {
        let mut announced = Vec::new();

        if let Some(alert) = claim_annual_alert(&self.store, now.date()).await {
            announced.push(alert.to_string());
        }

        let hhmm = now.format("%H:%M").to_string();
        for reminder in self.store.take_due_reminders(&hhmm).await {
            info!("Reminder due at {hhmm}: {}", reminder.text);
            announced.push(format!("Reminder: {}", reminder.text));
        }

        for text in &announced {
            self.announcer.announce(text.clone());
        }
        announced
    }

    /// Run on a background task until the handle is stopped
    pub fn start(self) -> SchedulerHandle {
        let (shutdown, receiver) = watch::channel(false);
        let task = tokio::spawn(self.run(receiver));
        SchedulerHandle { shutdown, task }
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(self.period);
        info!("Reminder scheduler started (interval: {:?})", self.period);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let announced = self.tick(Local::now().naive_local()).await;
                    debug!("Reminder check announced {} item(s)", announced.len());
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Reminder scheduler stopped");
    }
}

pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signal the task and wait for it to finish its current check
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!("Reminder scheduler ended abnormally: {e}");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

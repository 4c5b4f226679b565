//! # Feature: Reminders
//!
//! Background checks that fire timed reminders and the yearly 14 August
//! alert, delivered through a queued announcer.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Announcement queue and stoppable scheduler
//! - 1.0.0: Initial release

pub mod announcer;
pub mod scheduler;

pub use announcer::Announcer;
pub use scheduler::{claim_annual_alert, ReminderScheduler, SchedulerHandle, ANNUAL_ALERT};

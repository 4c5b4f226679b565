//! # Feature: Persistent Profile
//!
//! Durable memory shared by the interaction loop and the reminder scheduler:
//! the user's name, stored reminders and the last annual-alert year.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod model;
pub mod store;

pub use model::{Profile, Reminder};
pub use store::ProfileStore;

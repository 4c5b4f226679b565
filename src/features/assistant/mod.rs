//! # Feature: Interaction Loop
//!
//! Startup greeting, the per-round session state machine and orderly
//! shutdown of the reminder scheduler.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Two-phase interactions as an explicit state machine
//! - 1.0.0: Initial release

pub mod runner;
pub mod session;

pub use runner::Assistant;
pub use session::{Session, SessionState, Step, Timeouts};

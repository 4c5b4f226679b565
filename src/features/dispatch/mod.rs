//! # Feature: Action Dispatch
//!
//! Executes classified intents against the profile store and the system,
//! lookup and fallback collaborators.
//!
//! - **Version**: 1.3.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.3.0: Follow-up completion for two-phase intents
//! - 1.2.0: Collaborator failures reported as spoken notices
//! - 1.1.0: Weather and encyclopedia lookups
//! - 1.0.0: Initial release

pub mod dispatcher;
pub mod templates;

pub use dispatcher::{Collaborators, Dispatcher};
pub use templates::{template_for_title, Template};

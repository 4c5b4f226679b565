//! # Feature: Intent Classification
//!
//! Rule-based mapping from a normalized utterance to a structured [`Intent`].
//! Only deterministic precedence is guaranteed; this is not general NLU.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Rule chain introspection (`rule_names`, `matching_rule`)
//! - 1.1.0: Offline knowledge aliases, strict reminder time parsing
//! - 1.0.0: Initial release

pub mod classifier;
pub mod intent;
pub mod knowledge;
pub mod reminder_parser;
pub mod rules;

pub use classifier::{normalize, IntentClassifier};
pub use intent::{AppId, Intent, ReminderRequest, ReminderTime, SystemCommand};
pub use knowledge::KnowledgeBase;
pub use rules::Rule;

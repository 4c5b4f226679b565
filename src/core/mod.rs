//! # Core Module
//!
//! Configuration and the shared response types used across features.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Response module now holds dispatch results and sentence trimming
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use response::{
    first_sentences, DispatchResult, FollowUpKind, GOODBYE, MISSED_COMMAND,
    NOT_UNDERSTOOD,
};

//! # Feature: System Integration
//!
//! Launching apps and power controls, the local music library and writing
//! documents for the user to edit.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Cross-platform command tables
//! - 1.1.0: Music library scan via walkdir
//! - 1.0.0: Initial release

pub mod documents;
pub mod launcher;
pub mod media;

pub use documents::{DocumentWriter, NotesWriter};
pub use launcher::{ActionLauncher, OsLauncher, SystemAction};
pub use media::{FolderLibrary, MediaLibrary};

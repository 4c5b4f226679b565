//! Notes and application templates written to disk and opened for editing
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;

use super::launcher::{ActionLauncher, SystemAction};

#[async_trait]
pub trait DocumentWriter: Send + Sync {
    /// Write `content` to `filename` and open it; returns the written path
    async fn write_and_open(&self, content: &str, filename: &str) -> Result<PathBuf>;
}

/// Writes into the configured notes folder, replacing any existing file
#[derive(Clone)]
pub struct NotesWriter {
    dir: PathBuf,
    launcher: Arc<dyn ActionLauncher>,
}

impl NotesWriter {
    pub fn new(dir: impl Into<PathBuf>, launcher: Arc<dyn ActionLauncher>) -> Self {
        NotesWriter {
            dir: dir.into(),
            launcher,
        }
    }
}

#[async_trait]
impl DocumentWriter for NotesWriter {
    async fn write_and_open(&self, content: &str, filename: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let path = self.dir.join(filename);
        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        let path = fs::canonicalize(&path).await.unwrap_or(path);
        info!("Wrote {} bytes to {}", content.len(), path.display());

        self.launcher
            .launch(SystemAction::OpenFile(path.clone()))
            .await?;
        Ok(path)
    }
}

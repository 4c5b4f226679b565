//! Local music library
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use rand::seq::IndexedRandom;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const TRACK_EXTENSIONS: &[&str] = &["mp3", "wav"];

#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// A uniformly random track, or `None` if the library is empty
    async fn pick_track(&self) -> Result<Option<PathBuf>>;
}

/// Every `.mp3`/`.wav` below a root folder, scanned on each pick
#[derive(Clone)]
pub struct FolderLibrary {
    root: PathBuf,
}

impl FolderLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FolderLibrary { root: root.into() }
    }
}

#[async_trait]
impl MediaLibrary for FolderLibrary {
    async fn pick_track(&self) -> Result<Option<PathBuf>> {
        let root = self.root.clone();
        let tracks = tokio::task::spawn_blocking(move || scan_tracks(&root))
            .await
            .context("Music scan task failed")?;

        debug!("Found {} tracks under {}", tracks.len(), self.root.display());
        Ok(tracks.choose(&mut rand::rng()).cloned())
    }
}

fn is_track(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| TRACK_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Recursive scan; unreadable entries are skipped
pub fn scan_tracks(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        warn!("Music folder {} does not exist", root.display());
        return Vec::new();
    }

    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable music entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_track(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_is_recursive_and_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("albums/one")).unwrap();
        fs::write(dir.path().join("a.mp3"), b"").unwrap();
        fs::write(dir.path().join("albums/one/b.WAV"), b"").unwrap();
        fs::write(dir.path().join("cover.jpg"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let mut tracks = scan_tracks(dir.path());
        tracks.sort();
        assert_eq!(tracks.len(), 2);
        assert!(tracks.iter().all(|t| is_track(t)));
    }

    #[tokio::test]
    async fn test_empty_and_missing_folders() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(FolderLibrary::new(dir.path()).pick_track().await.unwrap(), None);
        assert_eq!(
            FolderLibrary::new(dir.path().join("missing"))
                .pick_track()
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_pick_returns_a_track() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("only.mp3"), b"").unwrap();
        let track = FolderLibrary::new(dir.path()).pick_track().await.unwrap();
        assert_eq!(track, Some(dir.path().join("only.mp3")));
    }
}

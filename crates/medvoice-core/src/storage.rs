//! File storage for uploads, keyword records, and synthesized speech
//!
//! Uploads and synthesized audio get per-request unique names so concurrent
//! requests never touch the same path. Keyword records are named by capture
//! time at second resolution; two transcriptions in the same second overwrite
//! each other.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::StorageConfig;
use crate::error::Result;

/// Delay before retrying a failed file deletion.
const REMOVE_RETRY_DELAY: Duration = Duration::from_millis(500);

/// File-backed store for the three content kinds the backend persists.
#[derive(Debug, Clone)]
pub struct FileStore {
    upload_dir: PathBuf,
    keywords_dir: PathBuf,
    audio_dir: PathBuf,
}

impl FileStore {
    /// Create the store, making sure all directories exist.
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let store = Self {
            upload_dir: PathBuf::from(&config.upload_dir),
            keywords_dir: PathBuf::from(&config.keywords_dir),
            audio_dir: PathBuf::from(&config.audio_dir),
        };

        tokio::fs::create_dir_all(&store.upload_dir).await?;
        tokio::fs::create_dir_all(&store.keywords_dir).await?;
        tokio::fs::create_dir_all(&store.audio_dir).await?;

        Ok(store)
    }

    /// Persist an audio upload under a unique name, returning its path.
    pub async fn save_upload(&self, data: &[u8]) -> Result<PathBuf> {
        let path = self
            .upload_dir
            .join(format!("{}.wav", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, data).await?;
        debug!("Saved upload: {} ({} bytes)", path.display(), data.len());
        Ok(path)
    }

    /// Delete an uploaded audio file, best-effort.
    ///
    /// One retry after a short delay covers transient file-in-use conditions.
    /// Failures are logged, never surfaced.
    pub async fn remove_upload(&self, path: &Path) {
        if let Err(first) = tokio::fs::remove_file(path).await {
            if first.kind() == std::io::ErrorKind::NotFound {
                return;
            }
            tokio::time::sleep(REMOVE_RETRY_DELAY).await;
            if let Err(e) = tokio::fs::remove_file(path).await {
                warn!("Failed to delete audio file {}: {}", path.display(), e);
            }
        }
    }

    /// Persist extracted keywords, returning the generated file name.
    ///
    /// Files are named `patient_<YYYYMMDDHHMMSS>.txt` from the given UTC
    /// timestamp.
    pub async fn save_keywords(&self, timestamp: &str, keywords: &str) -> Result<String> {
        let filename = format!("patient_{}.txt", timestamp);
        let path = self.keywords_dir.join(&filename);
        tokio::fs::write(&path, keywords).await?;
        debug!("Saved keywords: {}", path.display());
        Ok(filename)
    }

    /// Path of a keyword record by file name.
    pub fn keywords_path(&self, filename: &str) -> PathBuf {
        self.keywords_dir.join(filename)
    }

    /// Persist synthesized speech under a unique name, returning its path.
    pub async fn save_audio(&self, data: &[u8]) -> Result<PathBuf> {
        let path = self
            .audio_dir
            .join(format!("speech_{}.mp3", uuid::Uuid::new_v4().simple()));
        tokio::fs::write(&path, data).await?;
        debug!("Saved audio: {} ({} bytes)", path.display(), data.len());
        Ok(path)
    }

    /// Directory holding uploaded audio.
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }
}

/// Current UTC time formatted for keyword file names (second resolution).
pub fn capture_timestamp() -> String {
    chrono::Utc::now().format("%Y%m%d%H%M%S").to_string()
}

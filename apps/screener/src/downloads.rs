use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::ClientError;

/// File name of the score export, whatever the backend calls it.
pub const EXPORT_FILE_NAME: &str = "resume_scores.csv";

/// Where client-initiated downloads land.
#[derive(Debug, Clone)]
pub struct DownloadDir {
    dir: PathBuf,
}

impl DownloadDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Writes `contents` verbatim as `file_name`, replacing any earlier download.
    pub async fn save(&self, file_name: &str, contents: &[u8]) -> Result<PathBuf, ClientError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let target = self.dir.join(file_name);
        tokio::fs::write(&target, contents).await?;
        info!("Saved {} bytes to {}", contents.len(), target.display());
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_writes_bytes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = DownloadDir::new(dir.path());

        let path = downloads
            .save(EXPORT_FILE_NAME, b"jd_name,resume_name\npy-job,alice.pdf\n")
            .await
            .unwrap();

        assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
        let written = tokio::fs::read(&path).await.unwrap();
        assert_eq!(written, b"jd_name,resume_name\npy-job,alice.pdf\n");
    }

    #[tokio::test]
    async fn test_save_creates_missing_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = DownloadDir::new(dir.path().join("exports"));

        downloads.save(EXPORT_FILE_NAME, b"first").await.unwrap();
        let path = downloads.save(EXPORT_FILE_NAME, b"second").await.unwrap();

        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"second");
    }
}

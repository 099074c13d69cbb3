//! JSON file persistence for the list mapping.

use std::path::PathBuf;

use log::{debug, info};
use tokio::fs;

use crate::error::Result;
use crate::store::ListSnapshot;

#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the stored mapping; `None` if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on unreadable or malformed files.
    pub async fn load(&self) -> Result<Option<ListSnapshot>> {
        match fs::read(&self.path).await {
            Ok(bytes) => {
                let snapshot: ListSnapshot = serde_json::from_slice(&bytes)?;
                info!(
                    "Loaded {} lists from {}",
                    snapshot.len(),
                    self.path.display()
                );
                Ok(Some(snapshot))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No list file at {}; starting empty", self.path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write the mapping as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, snapshot: &ListSnapshot) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        fs::write(&self.path, bytes).await?;
        debug!(
            "Saved {} lists to {}",
            snapshot.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_loads_as_none() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let backend = FileBackend::new(dir.path().join("lists.json"));
        assert!(backend.load().await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn save_then_load_round_trips() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let backend = FileBackend::new(dir.path().join("lists.json"));

        let mut snapshot = ListSnapshot::new();
        snapshot.insert("eng".to_string(), vec!["alice".to_string(), "&infra".to_string()]);
        snapshot.insert("infra".to_string(), vec!["bob".to_string()]);

        backend.save(&snapshot).await?;
        assert_eq!(backend.load().await?, Some(snapshot));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("lists.json");
        fs::write(&path, b"not json").await?;

        let backend = FileBackend::new(path);
        assert!(backend.load().await.is_err());
        Ok(())
    }
}

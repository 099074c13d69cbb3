//! Durable storage for the list mapping.
//!
//! One backend is selected at startup from configuration. The bot loads the
//! snapshot once before accepting commands and saves after every mutating
//! command; save failures are logged by the caller and never block message
//! handling.

mod file;
mod s3;

use log::info;

use crate::config::StorageConfig;
use crate::error::Result;
use crate::store::ListSnapshot;

pub use file::FileBackend;
pub use s3::S3Backend;

/// Configured persistence backend.
#[derive(Debug)]
pub enum PersistBackend {
    File(FileBackend),
    S3(S3Backend),
}

impl PersistBackend {
    /// Build the backend named by configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the AWS config or credentials cannot be loaded.
    pub async fn from_config(config: &StorageConfig) -> Result<Self> {
        match config {
            StorageConfig::File { path } => {
                info!("Persisting lists to file {path}");
                Ok(Self::File(FileBackend::new(path.clone())))
            }
            StorageConfig::S3(s3_config) => {
                info!(
                    "Persisting lists to s3://{}/{}",
                    s3_config.bucket, s3_config.key
                );
                Ok(Self::S3(S3Backend::from_config(s3_config).await?))
            }
        }
    }

    /// Load the persisted snapshot, or `None` if nothing was stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored data exists but cannot be read or
    /// parsed.
    pub async fn load(&self) -> Result<Option<ListSnapshot>> {
        match self {
            Self::File(backend) => backend.load().await,
            Self::S3(backend) => backend.load().await,
        }
    }

    /// Durably save the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub async fn save(&self, snapshot: &ListSnapshot) -> Result<()> {
        match self {
            Self::File(backend) => backend.save(snapshot).await,
            Self::S3(backend) => backend.save(snapshot).await,
        }
    }
}

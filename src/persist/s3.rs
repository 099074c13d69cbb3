//! S3 object persistence for the list mapping.
//!
//! The whole mapping lives in a single JSON object, fetched once at startup
//! and rewritten on every save.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use log::{debug, info};

use crate::config::S3Config;
use crate::error::{BotError, Result};
use crate::store::ListSnapshot;

#[derive(Debug)]
pub struct S3Backend {
    client: Client,
    bucket: String,
    key: String,
}

impl S3Backend {
    /// Build a new S3 backend from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the AWS config or credentials cannot be loaded.
    pub async fn from_config(config: &S3Config) -> Result<Self> {
        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(config.endpoint.clone())
            .load()
            .await;

        Ok(Self {
            client: Client::new(&shared_config),
            bucket: config.bucket.clone(),
            key: config.key.clone(),
        })
    }

    /// Fetch and parse the stored mapping; `None` if the object is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails for any other reason, or the body
    /// is malformed.
    pub async fn load(&self) -> Result<Option<ListSnapshot>> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .send()
            .await;

        let output = match response {
            Ok(output) => output,
            Err(err) => {
                let service = err.into_service_error();
                if service.is_no_such_key() {
                    info!(
                        "No list object at s3://{}/{}; starting empty",
                        self.bucket, self.key
                    );
                    return Ok(None);
                }
                return Err(BotError::S3(service.to_string()));
            }
        };

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| BotError::S3(e.to_string()))?
            .into_bytes();
        let snapshot: ListSnapshot = serde_json::from_slice(&bytes)?;
        info!(
            "Loaded {} lists from s3://{}/{}",
            snapshot.len(),
            self.bucket,
            self.key
        );
        Ok(Some(snapshot))
    }

    /// Rewrite the stored object with the current mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the upload fails.
    pub async fn save(&self, snapshot: &ListSnapshot) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&self.key)
            .content_type("application/json")
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| BotError::S3(e.into_service_error().to_string()))?;

        debug!(
            "Saved {} lists to s3://{}/{}",
            snapshot.len(),
            self.bucket,
            self.key
        );
        Ok(())
    }
}

use std::collections::HashSet;
use std::env;

use log::{debug, error, info};

use crate::error::{BotError, Result};
use crate::expand::Decorator;

/// Where the list mapping is persisted.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// JSON file on local disk.
    File { path: String },
    /// Single JSON object in an S3 bucket.
    S3(S3Config),
}

#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub endpoint: String,
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub decorator: Decorator,
    pub prepend_username: bool,
    pub recurse: bool,
    pub admins: HashSet<String>,
    pub storage: StorageConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        let discord_token = env::var("DISCORD_TOKEN").map_err(|e| {
            error!("Failed to load DISCORD_TOKEN from environment: {}", e);
            e
        })?;

        let decorator = match env::var("LIST_DECORATOR") {
            Ok(raw) => raw.parse::<Decorator>().map_err(|_| {
                error!("Invalid LIST_DECORATOR value: {}", raw);
                BotError::Config(format!(
                    "LIST_DECORATOR must be one of none, <, (, [, {{ (got {raw:?})"
                ))
            })?,
            Err(_) => Decorator::None,
        };

        let prepend_username = env_flag("LIST_PREPEND_USERNAME", false);
        let recurse = env_flag("LIST_RECURSE", true);

        let admins: HashSet<String> = env::var("LIST_ADMINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(ToString::to_string)
            .collect();
        if admins.is_empty() {
            info!("LIST_ADMINS is empty; all restricted commands will be denied");
        }

        let storage = if let Ok(bucket) = env::var("LIST_S3_BUCKET") {
            let region = env::var("LIST_S3_REGION").map_err(|e| {
                error!("LIST_S3_BUCKET is set but LIST_S3_REGION is missing: {}", e);
                e
            })?;
            let endpoint = env::var("LIST_S3_ENDPOINT").map_err(|e| {
                error!("LIST_S3_BUCKET is set but LIST_S3_ENDPOINT is missing: {}", e);
                e
            })?;
            let key = env::var("LIST_S3_KEY").unwrap_or_else(|_| "lists.json".to_string());
            StorageConfig::S3(S3Config {
                bucket,
                region,
                endpoint,
                key,
            })
        } else {
            let path = env::var("LIST_STORE_PATH").unwrap_or_else(|_| "lists.json".to_string());
            StorageConfig::File { path }
        };

        info!("Configuration loaded successfully");
        debug!("Discord token length: {} characters", discord_token.len());
        debug!(
            "Decorator: {:?}, prepend_username: {}, recurse: {}, admins: {}",
            decorator,
            prepend_username,
            recurse,
            admins.len()
        );

        Ok(Self {
            discord_token,
            decorator,
            prepend_username,
            recurse,
            admins,
            storage,
        })
    }
}

fn env_flag(var: &str, default: bool) -> bool {
    match env::var(var) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

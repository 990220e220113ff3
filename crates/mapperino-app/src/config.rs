//! Configuration management for mapperino
//!
//! Optional file at: ~/.config/mapperino/config.json
//! Environment variables take precedence over the file.

use std::path::{Path, PathBuf};

use mapperino_infra::{AwsCredentials, CloudinaryCredentials};
use mapperino_types::{ConfigError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BUCKET: &str = "mapperino";
pub const DEFAULT_REGION: &str = "eu-central-1";

/// Credentials and defaults for the upload services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Imgur application client id
    #[serde(default)]
    pub imgur_client_id: Option<String>,

    #[serde(default = "default_bucket")]
    pub s3_bucket: String,

    #[serde(default = "default_region")]
    pub s3_region: String,

    /// S3-compatible endpoint override (e.g. a MinIO server)
    #[serde(default)]
    pub s3_endpoint: Option<String>,

    #[serde(default)]
    pub aws_access_key_id: Option<String>,

    #[serde(default)]
    pub aws_secret_access_key: Option<String>,

    #[serde(default)]
    pub aws_session_token: Option<String>,

    /// `cloudinary://<api_key>:<api_secret>@<cloud_name>`
    #[serde(default)]
    pub cloudinary_url: Option<String>,

    #[serde(default)]
    pub cloudinary_cloud_name: Option<String>,

    #[serde(default)]
    pub cloudinary_api_key: Option<String>,

    #[serde(default)]
    pub cloudinary_api_secret: Option<String>,
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            imgur_client_id: None,
            s3_bucket: default_bucket(),
            s3_region: default_region(),
            s3_endpoint: None,
            aws_access_key_id: None,
            aws_secret_access_key: None,
            aws_session_token: None,
            cloudinary_url: None,
            cloudinary_cloud_name: None,
            cloudinary_api_key: None,
            cloudinary_api_secret: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::ParseError("no config directory on this platform".to_string()))?
            .join("mapperino");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load the config file (if any), then apply the process environment
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Ok(path) => Self::load_from(&path)?,
            Err(_) => Config::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from a file, or defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Override fields from environment-style lookups.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("IMGUR_CLIENT_ID") {
            self.imgur_client_id = Some(v);
        }
        if let Some(v) = get("S3_BUCKET_NAME") {
            self.s3_bucket = v;
        }
        if let Some(v) = get("S3_REGION").or_else(|| get("AWS_REGION")) {
            self.s3_region = v;
        }
        if let Some(v) = get("S3_ENDPOINT_URL") {
            self.s3_endpoint = Some(v);
        }
        if let Some(v) = get("AWS_ACCESS_KEY_ID") {
            self.aws_access_key_id = Some(v);
        }
        if let Some(v) = get("AWS_SECRET_ACCESS_KEY") {
            self.aws_secret_access_key = Some(v);
        }
        if let Some(v) = get("AWS_SESSION_TOKEN") {
            self.aws_session_token = Some(v);
        }
        if let Some(v) = get("CLOUDINARY_URL") {
            self.cloudinary_url = Some(v);
        }
        if let Some(v) = get("CLOUDINARY_CLOUD_NAME") {
            self.cloudinary_cloud_name = Some(v);
        }
        if let Some(v) = get("CLOUDINARY_API_KEY") {
            self.cloudinary_api_key = Some(v);
        }
        if let Some(v) = get("CLOUDINARY_API_SECRET") {
            self.cloudinary_api_secret = Some(v);
        }
    }

    pub fn imgur_client_id(&self) -> Result<&str> {
        self.imgur_client_id.as_deref().ok_or_else(|| {
            ConfigError::MissingCredential {
                service: "imgur",
                variable: "IMGUR_CLIENT_ID",
            }
            .into()
        })
    }

    pub fn aws_credentials(&self) -> Result<AwsCredentials> {
        let access_key_id = self.aws_access_key_id.clone().ok_or(ConfigError::MissingCredential {
            service: "s3",
            variable: "AWS_ACCESS_KEY_ID",
        })?;
        let secret_access_key =
            self.aws_secret_access_key.clone().ok_or(ConfigError::MissingCredential {
                service: "s3",
                variable: "AWS_SECRET_ACCESS_KEY",
            })?;
        Ok(AwsCredentials {
            access_key_id,
            secret_access_key,
            session_token: self.aws_session_token.clone(),
        })
    }

    /// `CLOUDINARY_URL` wins over the separate variables
    pub fn cloudinary_credentials(&self) -> Result<CloudinaryCredentials> {
        if let Some(ref url) = self.cloudinary_url {
            return CloudinaryCredentials::from_url(url).ok_or_else(|| {
                ConfigError::ParseError(
                    "CLOUDINARY_URL must look like cloudinary://<api_key>:<api_secret>@<cloud_name>"
                        .to_string(),
                )
                .into()
            });
        }

        let missing = |variable| ConfigError::MissingCredential {
            service: "cloudinary",
            variable,
        };
        Ok(CloudinaryCredentials {
            cloud_name: self
                .cloudinary_cloud_name
                .clone()
                .ok_or_else(|| missing("CLOUDINARY_CLOUD_NAME"))?,
            api_key: self
                .cloudinary_api_key
                .clone()
                .ok_or_else(|| missing("CLOUDINARY_API_KEY"))?,
            api_secret: self
                .cloudinary_api_secret
                .clone()
                .ok_or_else(|| missing("CLOUDINARY_API_SECRET"))?,
        })
    }
}

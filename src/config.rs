//! Runtime configuration for the lister.
//!
//! Everything is read from the process environment once, at start-up.

use crate::resources::listing::DEFAULT_MAX_KEYS;

pub const DEFAULT_BUCKET: &str = "media-cdn-test-bucket";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListerConfig {
    /// Bucket whose keys are listed on every invocation
    pub bucket: String,

    /// Page size for list requests
    pub max_keys: i32,

    /// AWS region of the bucket
    pub region: String,

    /// Custom endpoint URL (LocalStack, MinIO)
    pub endpoint: Option<String>,

    /// Explicit access key, used together with `secret_access_key`
    pub access_key_id: Option<String>,

    pub secret_access_key: Option<String>,

    /// Attempts per request, including the first one
    pub max_attempts: u32,
}

impl Default for ListerConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            max_keys: DEFAULT_MAX_KEYS,
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl ListerConfig {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    /// Load the configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load the configuration through `lookup`, which maps a variable name
    /// to its value. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|value| !value.is_empty());
        let mut config = Self::default();

        if let Some(bucket) = get("BUCKET_NAME") {
            config.bucket = bucket;
        }
        if let Some(max_keys) = get("MAX_KEYS") {
            config.max_keys = parse("MAX_KEYS", max_keys)?;
        }
        if let Some(region) = get("AWS_REGION") {
            config.region = region;
        }
        if let Some(max_attempts) = get("S3_MAX_ATTEMPTS") {
            config = config.with_max_attempts(parse("S3_MAX_ATTEMPTS", max_attempts)?);
        }
        config.endpoint = get("S3_ENDPOINT_URL");
        config.access_key_id = get("S3_ACCESS_KEY_ID");
        config.secret_access_key = get("S3_SECRET_ACCESS_KEY");

        Ok(config)
    }

    pub fn with_max_keys(mut self, max_keys: i32) -> Self {
        self.max_keys = max_keys;
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set a custom endpoint (for LocalStack).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

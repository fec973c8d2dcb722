use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{retry::RetryConfig, Credentials, Region};
use tracing::info;

use super::bucket::Bucket;
use crate::config::ListerConfig;

pub struct S3 {
    client: aws_sdk_s3::Client,
}

impl S3 {
    /// Create an `S3` resource from the lister configuration.
    ///
    /// Explicit keys win over the default credential chain, but only when both
    /// halves are present.
    pub async fn with_config(config: &ListerConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .retry_config(RetryConfig::standard().with_max_attempts(config.max_attempts));

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "s3-bucket-lister",
            ));
        }

        let aws_sdk_config = loader.load().await;
        info!(region = %config.region, endpoint = ?config.endpoint, "created s3 client");

        // Custom endpoints (LocalStack, MinIO) generally need path-style URLs.
        Self::with_aws_sdk_config(&aws_sdk_config, config.endpoint.is_some())
    }

    /// Create an `S3` resource with the provided AWS `config`.
    pub fn with_aws_sdk_config(config: &aws_config::SdkConfig, force_path_style: bool) -> Self {
        let s3_config = aws_sdk_s3::config::Builder::from(config)
            .force_path_style(force_path_style)
            .build();
        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
        }
    }

    pub fn bucket(&self, name: String) -> Bucket {
        Bucket::new(name, self.client.clone())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bucket_keeps_name() {
        let s3 = testing::unreachable_s3().await;
        let bucket = s3.bucket("media-cdn-test-bucket".into());
        assert_eq!(bucket.name, "media-cdn-test-bucket");
    }

    #[tokio::test]
    async fn test_client_uses_configured_region() {
        let config = ListerConfig::new("media")
            .with_region("eu-west-1")
            .with_credentials("a", "b");
        let s3 = S3::with_config(&config).await;
        assert_eq!(
            s3.client.config().region().map(|r| r.to_string()),
            Some("eu-west-1".to_string())
        );
    }

    #[test]
    fn test_client_from_sdk_config_keeps_region() {
        let sdk_config = aws_config::SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("ap-south-1"))
            .build();
        let s3 = S3::with_aws_sdk_config(&sdk_config, true);
        assert_eq!(
            s3.client.config().region().map(|r| r.to_string()),
            Some("ap-south-1".to_string())
        );
        assert_eq!(s3.bucket("media".into()).name, "media");
    }
}

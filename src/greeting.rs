//! Upload and download of a fixed greeting object.
//!
//! Neither helper is part of an invocation. Both report their own failures
//! and never propagate them.

use tracing::{error, info};

use crate::resources::bucket::Bucket;
use crate::resources::object::{ObjectContents, PutAck};

pub const GREETING_KEY: &str = "hello-s3.txt";
pub const GREETING_BODY: &str = "Hello S3!";

pub async fn put_greeting(bucket: &Bucket) -> Option<PutAck> {
    match bucket.object(GREETING_KEY.into()).put(GREETING_BODY).await {
        Ok(ack) => {
            info!(bucket = %bucket.name, key = GREETING_KEY, e_tag = ?ack.e_tag, "uploaded object");
            Some(ack)
        }
        Err(err) => {
            error!(bucket = %bucket.name, key = GREETING_KEY, "failed to upload object: {err}");
            None
        }
    }
}

pub async fn get_greeting(bucket: &Bucket) -> Option<ObjectContents> {
    match bucket.object(GREETING_KEY.into()).get().await {
        Ok(contents) => {
            info!(
                bucket = %bucket.name,
                key = GREETING_KEY,
                body = %String::from_utf8_lossy(&contents.body),
                "downloaded object"
            );
            Some(contents)
        }
        Err(err) => {
            error!(bucket = %bucket.name, key = GREETING_KEY, "failed to download object: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::s3::testing::unreachable_s3;

    #[tokio::test]
    async fn test_put_greeting_reports_failure() {
        let bucket = unreachable_s3().await.bucket("media".into());
        assert!(put_greeting(&bucket).await.is_none());
    }

    #[tokio::test]
    async fn test_get_greeting_reports_failure() {
        let bucket = unreachable_s3().await.bucket("media".into());
        assert!(get_greeting(&bucket).await.is_none());
    }
}

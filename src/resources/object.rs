use aws_sdk_s3::{
    error::SdkError,
    operation::{get_object::GetObjectError, put_object::PutObjectError},
    primitives::{ByteStream, ByteStreamError},
};

pub struct Object {
    pub bucket_name: String,
    pub key: String,
    client: aws_sdk_s3::Client,
}

/// Acknowledgement of a successful upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutAck {
    pub e_tag: Option<String>,
    pub version_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub content_length: Option<i64>,
    pub content_type: Option<String>,
    pub e_tag: Option<String>,
    pub last_modified: Option<aws_sdk_s3::primitives::DateTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectContents {
    pub body: Vec<u8>,
    pub metadata: ObjectMetadata,
}

impl Object {
    pub(crate) fn new(bucket_name: String, key: String, client: aws_sdk_s3::Client) -> Self {
        Self {
            bucket_name,
            key,
            client,
        }
    }

    pub async fn put(&self, body: impl Into<Vec<u8>>) -> Result<PutAck, ObjectOperationError> {
        let put_object_request = self
            .client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&self.key)
            .body(ByteStream::from(body.into()));
        let response = put_object_request.send().await?;
        Ok(PutAck {
            e_tag: response.e_tag().map(str::to_owned),
            version_id: response.version_id().map(str::to_owned),
        })
    }

    /// Download the whole object along with its metadata.
    pub async fn get(&self) -> Result<ObjectContents, ObjectOperationError> {
        let get_object_request = self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(&self.key);
        let response = get_object_request.send().await?;
        let metadata = ObjectMetadata {
            content_length: response.content_length(),
            content_type: response.content_type().map(str::to_owned),
            e_tag: response.e_tag().map(str::to_owned),
            last_modified: response.last_modified().cloned(),
        };
        let body = response.body.collect().await?.into_bytes().to_vec();
        Ok(ObjectContents { body, metadata })
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ObjectOperationError {
    #[error(transparent)]
    GetObject(#[from] SdkError<GetObjectError>),
    #[error(transparent)]
    PutObject(#[from] SdkError<PutObjectError>),
    #[error("failed to read object body")]
    ReadBody(#[from] ByteStreamError),
}

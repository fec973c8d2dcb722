//! Lists every object key of an S3 bucket from inside a Lambda invocation.

pub mod config;
pub mod greeting;
pub mod handler;
mod resources;

pub use crate::config::{ConfigError, ListerConfig};
pub use crate::handler::function_handler;
pub use crate::resources::{
    bucket::Bucket,
    listing::{
        BucketLister, ListPages, ListingError, ListingPage, ListingRequest, ObjectDescriptor,
        DEFAULT_MAX_KEYS,
    },
    object::{Object, ObjectContents, ObjectMetadata, ObjectOperationError, PutAck},
    s3::S3,
};

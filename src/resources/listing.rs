use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

/// Largest page the provider will return for a single list request.
pub const DEFAULT_MAX_KEYS: i32 = 1000;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Parameters of a single list request. The continuation token is replaced
/// after every truncated page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub bucket: String,
    pub max_keys: i32,
    pub continuation_token: Option<String>,
}

impl ListingRequest {
    pub fn new(bucket: impl Into<String>, max_keys: i32) -> Self {
        Self {
            bucket: bucket.into(),
            max_keys,
            continuation_token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDescriptor {
    pub key: String,
    pub size: Option<i64>,
}

impl ObjectDescriptor {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size: None,
        }
    }
}

/// One page of a listing as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub descriptors: Vec<ObjectDescriptor>,
    pub is_truncated: bool,
    pub next_token: Option<String>,
}

impl ListingPage {
    /// Token to continue with, if the provider says there is more to fetch.
    ///
    /// A truncated page without a usable token is treated as the last one.
    fn continuation(&self) -> Option<&str> {
        match self.next_token.as_deref() {
            Some(token) if self.is_truncated && !token.is_empty() => Some(token),
            _ => None,
        }
    }

    /// Bytes covered by the page, counting only descriptors with a known size.
    pub fn total_size(&self) -> i64 {
        self.descriptors.iter().filter_map(|d| d.size).sum()
    }
}

/// Anything that can fetch a single page of object descriptors.
#[async_trait]
pub trait ListPages: Send + Sync {
    async fn list_page(&self, request: &ListingRequest) -> Result<ListingPage, ListingError>;
}

#[async_trait]
impl ListPages for aws_sdk_s3::Client {
    async fn list_page(&self, request: &ListingRequest) -> Result<ListingPage, ListingError> {
        let output = self
            .list_objects_v2()
            .bucket(&request.bucket)
            .max_keys(request.max_keys)
            .set_continuation_token(request.continuation_token.clone())
            .send()
            .await
            .map_err(|err| ListingError::Request {
                bucket: request.bucket.clone(),
                source: Box::new(err),
            })?;

        let descriptors = output
            .contents()
            .iter()
            .filter_map(|object| {
                object.key().map(|key| ObjectDescriptor {
                    key: key.to_owned(),
                    size: object.size(),
                })
            })
            .collect();

        Ok(ListingPage {
            descriptors,
            is_truncated: output.is_truncated().unwrap_or(false),
            next_token: output.next_continuation_token().map(str::to_owned),
        })
    }
}

/// Collects every key of a bucket by following continuation tokens, one page
/// at a time.
pub struct BucketLister<P> {
    pager: P,
    bucket: String,
    max_keys: i32,
}

impl<P: ListPages> BucketLister<P> {
    pub fn new(pager: P, bucket: impl Into<String>) -> Self {
        Self {
            pager,
            bucket: bucket.into(),
            max_keys: DEFAULT_MAX_KEYS,
        }
    }

    /// Set the page size, clamped to what the provider accepts.
    pub fn with_max_keys(mut self, max_keys: i32) -> Self {
        self.max_keys = max_keys.clamp(1, DEFAULT_MAX_KEYS);
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn max_keys(&self) -> i32 {
        self.max_keys
    }

    /// List every key in the bucket, in page order then in-page order.
    ///
    /// Any failed page aborts the whole listing; keys gathered from earlier
    /// pages are dropped.
    pub async fn list_all_keys(&self) -> Result<Vec<String>, ListingError> {
        if self.bucket.is_empty() {
            return Err(ListingError::EmptyBucketName);
        }

        let mut keys = Vec::new();
        let mut request = ListingRequest::new(&self.bucket, self.max_keys);
        let mut page_number = 0usize;
        loop {
            let page = self.pager.list_page(&request).await?;
            page_number += 1;
            debug!(
                bucket = %self.bucket,
                page = page_number,
                objects = page.descriptors.len(),
                bytes = page.total_size(),
                truncated = page.is_truncated,
                "received listing page"
            );

            let next = page.continuation().map(str::to_owned);
            keys.extend(page.descriptors.into_iter().map(|d| d.key));
            match next {
                Some(token) => request.continuation_token = Some(token),
                None => break,
            }
        }
        Ok(keys)
    }

    /// Like [`Self::list_all_keys`], but gives up once `budget` has elapsed.
    pub async fn list_all_keys_within(&self, budget: Duration) -> Result<Vec<String>, ListingError> {
        tokio::time::timeout(budget, self.list_all_keys())
            .await
            .map_err(|_| ListingError::DeadlineExceeded {
                bucket: self.bucket.clone(),
                budget,
            })?
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ListingError {
    #[error("failed to list objects in bucket {bucket}")]
    Request {
        bucket: String,
        #[source]
        source: BoxError,
    },
    #[error("listing bucket {bucket} did not finish within {budget:?}")]
    DeadlineExceeded { bucket: String, budget: Duration },
    #[error("bucket name must not be empty")]
    EmptyBucketName,
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Serves a fixed set of keys, paginated like the provider would.
    pub(crate) struct PagedBucket {
        keys: Vec<String>,
        pub(crate) requests: Mutex<Vec<ListingRequest>>,
    }

    impl PagedBucket {
        pub(crate) fn with_keys(count: usize) -> Self {
            Self {
                keys: (0..count).map(|i| format!("object-{i:05}")).collect(),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn keys(&self) -> &[String] {
            &self.keys
        }
    }

    #[async_trait]
    impl ListPages for PagedBucket {
        async fn list_page(&self, request: &ListingRequest) -> Result<ListingPage, ListingError> {
            self.requests.lock().unwrap().push(request.clone());
            let start: usize = request
                .continuation_token
                .as_deref()
                .map(|token| token.parse().unwrap())
                .unwrap_or(0);
            let end = (start + request.max_keys as usize).min(self.keys.len());
            let is_truncated = end < self.keys.len();
            Ok(ListingPage {
                descriptors: self.keys[start..end]
                    .iter()
                    .map(ObjectDescriptor::new)
                    .collect(),
                is_truncated,
                next_token: is_truncated.then(|| end.to_string()),
            })
        }
    }

    /// Replays a scripted sequence of pages, `None` standing for a failure.
    pub(crate) struct ScriptedPager {
        pages: Vec<Option<ListingPage>>,
        pub(crate) calls: Mutex<usize>,
    }

    impl ScriptedPager {
        pub(crate) fn new(pages: Vec<Option<ListingPage>>) -> Self {
            Self {
                pages,
                calls: Mutex::new(0),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl ListPages for ScriptedPager {
        async fn list_page(&self, request: &ListingRequest) -> Result<ListingPage, ListingError> {
            let index = {
                let mut calls = self.calls.lock().unwrap();
                *calls += 1;
                *calls - 1
            };
            match self.pages.get(index).cloned().flatten() {
                Some(page) => Ok(page),
                None => Err(ListingError::Request {
                    bucket: request.bucket.clone(),
                    source: format!("page {} unavailable", index + 1).into(),
                }),
            }
        }
    }

    pub(crate) fn page(keys: &[&str], is_truncated: bool, next_token: Option<&str>) -> ListingPage {
        ListingPage {
            descriptors: keys.iter().copied().map(ObjectDescriptor::new).collect(),
            is_truncated,
            next_token: next_token.map(str::to_owned),
        }
    }
}

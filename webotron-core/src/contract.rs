//! # contract: the storage seam between webotron and an object store
//!
//! This module defines a single trait (`BucketStore`) and the plain data types
//! that flow through it. Everything in this crate talks to storage only through
//! this trait, so the same orchestration runs against Amazon S3, an S3-compatible
//! service, or a mock in tests.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`, so `MockBucketStore` is available to
//!   tests (and to downstream crates while the `test-export-mocks` feature is on).
//!
//! ## Errors
//! - Every method returns [`StorageError`], a boxed error. Implementations hand the
//!   underlying service or filesystem error back unchanged; callers stop at the
//!   first failure.

use std::path::PathBuf;

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Boxed error returned by every storage operation.
pub type StorageError = Box<dyn std::error::Error + Send + Sync>;

/// The region S3 treats as its default. Buckets there must be created without a
/// location constraint.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Where a new bucket should be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketLocation {
    /// The service default (`us-east-1`); no location constraint is sent.
    Default,
    /// An explicit region, sent as the bucket's location constraint.
    Region(String),
}

impl BucketLocation {
    /// Picks the creation location for a session region. A missing region is
    /// treated the same as `us-east-1`.
    pub fn for_region(region: Option<&str>) -> Self {
        match region {
            None => BucketLocation::Default,
            Some(r) if r == DEFAULT_REGION => BucketLocation::Default,
            Some(r) => BucketLocation::Region(r.to_string()),
        }
    }
}

/// Static website hosting settings for a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebsiteConfig {
    /// Suffix served for directory requests (`index.html`).
    #[serde(default = "default_index_document")]
    pub index_document: String,
    /// Object key served on 4xx errors (`error.html`).
    #[serde(default = "default_error_document")]
    pub error_document: String,
}

fn default_index_document() -> String {
    "index.html".to_string()
}

fn default_error_document() -> String {
    "error.html".to_string()
}

impl Default for WebsiteConfig {
    fn default() -> Self {
        Self {
            index_document: default_index_document(),
            error_document: default_error_document(),
        }
    }
}

/// A single file upload: the local file is stored under `key` in `bucket`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub bucket: String,
    /// Local file whose bytes become the object body.
    pub path: PathBuf,
    pub key: String,
    pub content_type: String,
}

/// Operations webotron needs from an object store.
///
/// Implemented by the AWS-backed client in the CLI crate and by `MockBucketStore`
/// in tests.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait BucketStore: Send + Sync {
    /// Names of every bucket visible to the configured credentials.
    async fn list_buckets(&self) -> Result<Vec<String>, StorageError>;

    /// Every object key in `bucket`.
    async fn list_objects(&self, bucket: &str) -> Result<Vec<String>, StorageError>;

    /// Create `bucket` at `location`.
    async fn create_bucket(
        &self,
        bucket: &str,
        location: &BucketLocation,
    ) -> Result<(), StorageError>;

    /// Attach (replace) the access policy document of `bucket`.
    async fn put_bucket_policy(&self, bucket: &str, policy: &str) -> Result<(), StorageError>;

    /// Enable static website hosting on `bucket`.
    async fn put_bucket_website(
        &self,
        bucket: &str,
        config: &WebsiteConfig,
    ) -> Result<(), StorageError>;

    /// Store one local file as an object. Overwrites an existing object with the same key.
    async fn upload(&self, request: UploadRequest) -> Result<(), StorageError>;
}

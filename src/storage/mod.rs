//! Storage client adapter
//!
//! Everything the command executor needs from the object store goes through
//! the [`Storage`] trait. The S3 compatible implementation lives in
//! [`crate::s3`], tests drive the executor with in-memory doubles.

use async_trait::async_trait;
use bytes::Bytes;
use std::{fmt, path::Path};

mod error;
pub use self::error::ServiceError;

/// Canned access policy applied to buckets and completed uploads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Acl {
    #[default]
    Private,
}

impl Acl {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Acl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An object as returned by a listing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    pub last_modified: String,
}

impl ObjectSummary {
    #[must_use]
    pub fn new(key: &str, size: u64, last_modified: &str) -> Self {
        Self {
            key: key.to_string(),
            size,
            last_modified: last_modified.to_string(),
        }
    }
}

/// One page of a listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    pub objects: Vec<ObjectSummary>,
    pub next_marker: String,
    pub is_truncated: bool,
}

/// A successfully uploaded part, as submitted when completing the upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedPart {
    pub number: u32,
    pub etag: String,
}

#[async_trait]
pub trait Storage: Send + Sync {
    /// Create the bucket with the given canned ACL
    async fn create_bucket(&self, bucket: &str, acl: Acl) -> Result<(), ServiceError>;

    /// List one page of objects, optionally restricted to `prefix` and starting after `marker`
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        marker: Option<&str>,
    ) -> Result<ListPage, ServiceError>;

    /// Download `key` into `dest`, returns the number of bytes written
    async fn get_object(&self, bucket: &str, key: &str, dest: &Path) -> Result<u64, ServiceError>;

    /// Upload the whole file at `src` under `key`, returns the `ETag`
    async fn put_object(&self, bucket: &str, key: &str, src: &Path)
    -> Result<String, ServiceError>;

    /// Start a multipart session, returns the upload id
    async fn initiate_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<String, ServiceError>;

    /// Upload one part of a multipart session, returns the part `ETag`
    async fn upload_part(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: u32,
        body: Bytes,
    ) -> Result<String, ServiceError>;

    /// Assemble the uploaded parts, returns the object `ETag`
    async fn complete_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: &[CompletedPart],
        acl: Acl,
    ) -> Result<String, ServiceError>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ServiceError>;

    /// `Ok(false)` when the object does not exist, `Err` only for service failures
    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, ServiceError>;
}

//! S3 compatible storage client
//!
//! Speaks the S3 REST API (also served by Alibaba OSS and MinIO), every request
//! signed with AWS Signature Version 4.

pub mod actions;
pub mod credentials;
pub mod region;
pub mod request;
pub mod responses;
pub mod signature;
pub mod tools;
pub use self::{credentials::Credentials, region::Region, signature::Signature};

use crate::storage::{Acl, CompletedPart, ListPage, ObjectSummary, ServiceError, Storage};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::{fmt, path::Path};
use url::Url;

#[derive(Debug)]
pub struct S3 {
    // AccessKeyId / AccessKeySecret
    credentials: Credentials,
    // signing region and endpoint
    region: Region,
    // bucket.endpoint/key instead of endpoint/bucket/key
    virtual_hosted: bool,
    // one client (connection pool) for the life of the process
    client: Client,
}

// Amazon S3 API Reference
// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_Operations.html>
impl S3 {
    /// # Errors
    ///
    /// Will return `Err` if the endpoint is invalid or the HTTP client can not be built
    pub fn new(credentials: Credentials, region: Region, virtual_hosted: bool) -> Result<Self> {
        // fail early on a bad endpoint
        region.url()?;

        Ok(Self {
            credentials,
            region,
            virtual_hosted,
            client: Client::builder().build()?,
        })
    }

    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Base URL for the bucket
    ///
    /// # Errors
    ///
    /// Will return `Err` if the endpoint can not be used as a base URL
    pub fn endpoint(&self, bucket: &str) -> Result<Url> {
        let mut url = self.region.url()?;

        if self.virtual_hosted {
            let host = format!(
                "{bucket}.{}",
                url.host_str()
                    .ok_or_else(|| anyhow!("missing host in endpoint"))?
            );
            url.set_host(Some(&host))?;
        } else {
            url.path_segments_mut()
                .map_err(|()| anyhow!("endpoint cannot be a base URL"))?
                .push(bucket);
        }

        Ok(url)
    }
}

impl fmt::Display for S3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "endpoint: {}\nregion: {}\naccess key id: {}\nvirtual hosted: {}",
            self.region.endpoint(),
            self.region.name(),
            self.credentials.access_key_id(),
            self.virtual_hosted
        )
    }
}

#[async_trait]
impl Storage for S3 {
    async fn create_bucket(&self, bucket: &str, acl: Acl) -> Result<(), ServiceError> {
        Ok(actions::CreateBucket::new(acl).request(self, bucket).await?)
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        marker: Option<&str>,
    ) -> Result<ListPage, ServiceError> {
        let rs = actions::ListObjects::new(prefix, marker)
            .request(self, bucket)
            .await?;

        // NextMarker is only returned by some services, fall back to the last key
        let next_marker = match rs.next_marker.filter(|m| !m.is_empty()) {
            Some(marker) => marker,
            None if rs.is_truncated => rs
                .contents
                .last()
                .map(|o| o.key.clone())
                .unwrap_or_default(),
            None => String::new(),
        };

        Ok(ListPage {
            objects: rs
                .contents
                .iter()
                .map(|o| ObjectSummary::new(&o.key, o.size, &o.last_modified))
                .collect(),
            next_marker,
            is_truncated: rs.is_truncated,
        })
    }

    async fn get_object(&self, bucket: &str, key: &str, dest: &Path) -> Result<u64, ServiceError> {
        Ok(actions::GetObject::new(key)
            .download(self, bucket, dest)
            .await?)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        src: &Path,
    ) -> Result<String, ServiceError> {
        Ok(actions::PutObject::new(key, src).request(self, bucket).await?)
    }

    async fn initiate_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<String, ServiceError> {
        let rs = actions::CreateMultipartUpload::new(key)
            .request(self, bucket)
            .await?;
        Ok(rs.upload_id)
    }

    async fn upload_part(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: u32,
        body: Bytes,
    ) -> Result<String, ServiceError> {
        Ok(actions::UploadPart::new(key, upload_id, part_number, body)
            .request(self, bucket)
            .await?)
    }

    async fn complete_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: &[CompletedPart],
        acl: Acl,
    ) -> Result<String, ServiceError> {
        let rs = actions::CompleteMultipartUpload::new(key, upload_id, parts, acl)
            .request(self, bucket)
            .await?;
        Ok(rs.e_tag)
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ServiceError> {
        Ok(actions::DeleteObject::new(key).request(self, bucket).await?)
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, ServiceError> {
        Ok(actions::HeadObject::new(key).exists(self, bucket).await?)
    }
}

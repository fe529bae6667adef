//! Multipart upload limits
//! Maximum number of parts per upload 10,000
//! <https://docs.aws.amazon.com/AmazonS3/latest/userguide/qfacts.html>

use crate::{
    s3::actions::{Action, body_error, key_segments, request_id, response_error},
    s3::{S3, request, responses::CompleteMultipartUploadResult, tools},
    storage::{Acl, CompletedPart},
};
use anyhow::Result;
use bytes::Bytes;
use quick_xml::{de::from_str, se::to_string};
use reqwest::Method;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
#[serde(rename = "CompleteMultipartUpload")]
struct CompleteMultipartUploadBody<'a> {
    #[serde(rename = "Part")]
    parts: Vec<PartEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct PartEntry<'a> {
    #[serde(rename = "PartNumber")]
    number: u32,
    #[serde(rename = "ETag")]
    etag: &'a str,
}

#[derive(Debug)]
pub struct CompleteMultipartUpload<'a> {
    key: &'a str,
    upload_id: &'a str,
    parts: &'a [CompletedPart],
    acl: Acl,
}

impl<'a> CompleteMultipartUpload<'a> {
    #[must_use]
    pub const fn new(key: &'a str, upload_id: &'a str, parts: &'a [CompletedPart], acl: Acl) -> Self {
        Self {
            key,
            upload_id,
            parts,
            acl,
        }
    }

    /// XML body listing the parts in ascending part number order
    ///
    /// # Errors
    ///
    /// Will return `Err` if the body can not be serialized
    pub fn body(&self) -> Result<String> {
        let mut parts: Vec<PartEntry> = self
            .parts
            .iter()
            .map(|p| PartEntry {
                number: p.number,
                etag: &p.etag,
            })
            .collect();
        parts.sort_by_key(|p| p.number);

        Ok(to_string(&CompleteMultipartUploadBody { parts })?)
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request or parse the response
    pub async fn request(self, s3: &S3, bucket: &str) -> Result<CompleteMultipartUploadResult> {
        let body = self.body()?;

        let (url, headers) = &self.sign(
            s3,
            bucket,
            tools::sha256_digest(&body).as_ref(),
            None,
            Some(body.len()),
        )?;

        let response = request::request(
            s3.client(),
            url.clone(),
            self.http_method()?,
            headers,
            Some(Bytes::from(body)),
        )
        .await?;

        if response.status().is_success() {
            let status = response.status();
            let request_id = request_id(&response);
            let body = response.text().await?;

            // a 200 answer may still carry an <Error> document
            match from_str::<CompleteMultipartUploadResult>(&body) {
                Ok(rs) => Ok(rs),
                Err(err) => match body_error(&body, &request_id, status) {
                    Some(service_error) => Err(service_error.into()),
                    None => Err(err.into()),
                },
            }
        } else {
            Err(response_error(response).await.into())
        }
    }
}

impl Action for CompleteMultipartUpload<'_> {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::POST)
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        let mut map: BTreeMap<&str, &str> = BTreeMap::new();
        map.insert("x-amz-acl", self.acl.as_str());
        Some(map)
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        let mut map: BTreeMap<&str, &str> = BTreeMap::new();
        map.insert("uploadId", self.upload_id);
        Some(map)
    }

    fn path(&self) -> Option<Vec<&str>> {
        Some(key_segments(self.key))
    }
}

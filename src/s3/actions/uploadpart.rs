use crate::{
    s3::actions::{Action, key_segments, response_error},
    s3::{S3, request, tools},
};
use anyhow::{Result, anyhow};
use bytes::Bytes;
use reqwest::Method;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct UploadPart<'a> {
    key: &'a str,
    upload_id: &'a str,
    part_number: String,
    body: Bytes,
}

impl<'a> UploadPart<'a> {
    #[must_use]
    pub fn new(key: &'a str, upload_id: &'a str, part_number: u32, body: Bytes) -> Self {
        Self {
            key,
            upload_id,
            part_number: part_number.to_string(),
            body,
        }
    }

    /// Upload the part, returns its `ETag`
    ///
    /// # Errors
    ///
    /// Will return `Err` if can not make the request or the `ETag` is missing
    pub async fn request(self, s3: &S3, bucket: &str) -> Result<String> {
        let sha = tools::sha256_digest(&self.body);
        let md5 = tools::md5_digest(&self.body);

        let (url, headers) = &self.sign(
            s3,
            bucket,
            sha.as_ref(),
            Some(md5.as_ref()),
            Some(self.body.len()),
        )?;

        let response = request::request(
            s3.client(),
            url.clone(),
            self.http_method()?,
            headers,
            Some(self.body.clone()),
        )
        .await?;

        if response.status().is_success() {
            let etag = response
                .headers()
                .get("ETag")
                .ok_or_else(|| anyhow!("missing ETag for part {}", self.part_number))?
                .to_str()?
                .to_string();
            log::debug!("part {} ETag: {etag}", self.part_number);
            Ok(etag)
        } else {
            Err(response_error(response).await.into())
        }
    }
}

impl Action for UploadPart<'_> {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::PUT)
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        let mut map: BTreeMap<&str, &str> = BTreeMap::new();
        map.insert("partNumber", &self.part_number);
        map.insert("uploadId", self.upload_id);
        Some(map)
    }

    fn path(&self) -> Option<Vec<&str>> {
        Some(key_segments(self.key))
    }
}

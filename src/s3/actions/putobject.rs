use crate::{
    s3::actions::{Action, key_segments, response_error},
    s3::{S3, request, tools::sha256_md5_digest},
};
use anyhow::Result;
use reqwest::Method;
use std::{collections::BTreeMap, path::Path};

#[derive(Debug)]
pub struct PutObject<'a> {
    key: &'a str,
    file: &'a Path,
}

impl<'a> PutObject<'a> {
    #[must_use]
    pub const fn new(key: &'a str, file: &'a Path) -> Self {
        Self { key, file }
    }

    /// Upload the whole file in one request, returns the `ETag`
    ///
    /// # Errors
    ///
    /// Will return `Err` if can not read the file or make the request
    pub async fn request(self, s3: &S3, bucket: &str) -> Result<String> {
        let (sha, md5, length) = sha256_md5_digest(self.file).await?;

        let (url, headers) =
            &self.sign(s3, bucket, sha.as_ref(), Some(md5.as_ref()), Some(length))?;

        let response = request::upload(
            s3.client(),
            url.clone(),
            self.http_method()?,
            headers,
            self.file,
        )
        .await?;

        if response.status().is_success() {
            let etag = match response.headers().get("ETag") {
                Some(etag) => etag.to_str()?.to_string(),
                None => String::new(),
            };
            Ok(etag)
        } else {
            Err(response_error(response).await.into())
        }
    }
}

impl Action for PutObject<'_> {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::PUT)
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn path(&self) -> Option<Vec<&str>> {
        Some(key_segments(self.key))
    }
}

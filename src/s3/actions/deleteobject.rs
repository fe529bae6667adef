use crate::{
    s3::actions::{Action, key_segments, response_error},
    s3::{S3, request, tools},
};
use anyhow::Result;
use reqwest::Method;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct DeleteObject<'a> {
    key: &'a str,
}

impl<'a> DeleteObject<'a> {
    #[must_use]
    pub const fn new(key: &'a str) -> Self {
        Self { key }
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request
    pub async fn request(self, s3: &S3, bucket: &str) -> Result<()> {
        let (url, headers) = &self.sign(s3, bucket, tools::sha256_digest("").as_ref(), None, None)?;

        let response =
            request::request(s3.client(), url.clone(), self.http_method()?, headers, None).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(response_error(response).await.into())
        }
    }
}

impl Action for DeleteObject<'_> {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::DELETE)
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

use crate::{
    s3::actions::{Action, key_segments, response_error},
    s3::{S3, request, tools},
};
use anyhow::Result;
use reqwest::{Method, StatusCode};
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct HeadObject<'a> {
    key: &'a str,
}

impl<'a> HeadObject<'a> {
    #[must_use]
    pub const fn new(key: &'a str) -> Self {
        Self { key }
    }

    /// `Ok(false)` on 404, any other failure is an error
    ///
    /// # Errors
    ///
    /// Will return `Err` if can not make the request or the service fails
    pub async fn exists(&self, s3: &S3, bucket: &str) -> Result<bool> {
        let (url, headers) = &self.sign(s3, bucket, tools::sha256_digest("").as_ref(), None, None)?;

        let response =
            request::request(s3.client(), url.clone(), self.http_method()?, headers, None).await?;

        let status = response.status();

        if status.is_success() {
            Ok(true)
        } else if status == StatusCode::NOT_FOUND {
            log::debug!("HEAD {url}: {status}");
            Ok(false)
        } else {
            Err(response_error(response).await.into())
        }
    }
}

impl Action for HeadObject<'_> {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::HEAD)
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

use crate::{
    s3::actions::{Action, key_segments, response_error},
    s3::{S3, request, responses::InitiateMultipartUploadResult, tools},
};
use anyhow::Result;
use quick_xml::de::from_str;
use reqwest::Method;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct CreateMultipartUpload<'a> {
    key: &'a str,
}

impl<'a> CreateMultipartUpload<'a> {
    #[must_use]
    pub const fn new(key: &'a str) -> Self {
        Self { key }
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request or parse the response
    pub async fn request(self, s3: &S3, bucket: &str) -> Result<InitiateMultipartUploadResult> {
        let (url, headers) = &self.sign(s3, bucket, tools::sha256_digest("").as_ref(), None, None)?;

        let response =
            request::request(s3.client(), url.clone(), self.http_method()?, headers, None).await?;

        if response.status().is_success() {
            let rs: InitiateMultipartUploadResult = from_str(&response.text().await?)?;
            log::info!("upload id: {}", rs.upload_id);
            Ok(rs)
        } else {
            Err(response_error(response).await.into())
        }
    }
}

impl Action for CreateMultipartUpload<'_> {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::POST)
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        let mut map: BTreeMap<&str, &str> = BTreeMap::new();
        map.insert("uploads", "");
        Some(map)
    }

    fn path(&self) -> Option<Vec<&str>> {
        Some(key_segments(self.key))
    }
}

use crate::{
    s3::actions::{Action, response_error},
    s3::{S3, request, responses::ListBucketResult, tools},
};
use anyhow::Result;
use quick_xml::de::from_str;
use reqwest::Method;
use std::collections::BTreeMap;

/// One page of `ListObjects` (version 1, marker based)
#[derive(Debug, Default)]
pub struct ListObjects<'a> {
    prefix: Option<&'a str>,
    marker: Option<&'a str>,
}

impl<'a> ListObjects<'a> {
    #[must_use]
    pub fn new(prefix: Option<&'a str>, marker: Option<&'a str>) -> Self {
        Self {
            prefix: prefix.filter(|p| !p.is_empty()),
            marker: marker.filter(|m| !m.is_empty()),
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request or parse the response
    pub async fn request(&self, s3: &S3, bucket: &str) -> Result<ListBucketResult> {
        let (url, headers) = &self.sign(s3, bucket, tools::sha256_digest("").as_ref(), None, None)?;

        let response =
            request::request(s3.client(), url.clone(), self.http_method()?, headers, None).await?;

        if response.status().is_success() {
            let rs: ListBucketResult = from_str(&response.text().await?)?;
            log::debug!(
                "listed {} objects, truncated: {}",
                rs.contents.len(),
                rs.is_truncated
            );
            Ok(rs)
        } else {
            Err(response_error(response).await.into())
        }
    }
}

impl Action for ListObjects<'_> {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::GET)
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        let mut map: BTreeMap<&str, &str> = BTreeMap::new();

        if let Some(prefix) = self.prefix {
            map.insert("prefix", prefix);
        }

        if let Some(marker) = self.marker {
            map.insert("marker", marker);
        }

        Some(map)
    }

    fn path(&self) -> Option<Vec<&str>> {
        None
    }
}

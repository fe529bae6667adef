use crate::{
    s3::actions::{Action, response_error},
    s3::{S3, region::DEFAULT_REGION, request, tools},
    storage::Acl,
};
use anyhow::Result;
use bytes::Bytes;
use reqwest::Method;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct CreateBucket {
    acl: Acl,
}

impl CreateBucket {
    #[must_use]
    pub const fn new(acl: Acl) -> Self {
        Self { acl }
    }

    /// Request body, empty for the default region
    #[must_use]
    pub fn configuration(region: &str) -> String {
        if region == DEFAULT_REGION {
            String::new()
        } else {
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<CreateBucketConfiguration xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
    <LocationConstraint>{region}</LocationConstraint>
</CreateBucketConfiguration>"#
            )
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request
    pub async fn request(self, s3: &S3, bucket: &str) -> Result<()> {
        let xml = Self::configuration(s3.region().name());

        let (url, headers) = &self.sign(
            s3,
            bucket,
            tools::sha256_digest(&xml).as_ref(),
            None,
            Some(xml.len()),
        )?;

        let response = request::request(
            s3.client(),
            url.clone(),
            self.http_method()?,
            headers,
            Some(Bytes::from(xml)),
        )
        .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(response_error(response).await.into())
        }
    }
}

impl Action for CreateBucket {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::PUT)
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        let mut map: BTreeMap<&str, &str> = BTreeMap::new();

        map.insert("x-amz-acl", self.acl.as_str());

        Some(map)
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn path(&self) -> Option<Vec<&str>> {
        None
    }
}

use crate::{
    s3::actions::{Action, key_segments, response_error},
    s3::{S3, request, tools},
};
use anyhow::Result;
use futures::stream::StreamExt;
use reqwest::Method;
use std::{collections::BTreeMap, path::Path};
use tokio::{fs::File, io::AsyncWriteExt};

#[derive(Debug)]
pub struct GetObject<'a> {
    key: &'a str,
}

impl<'a> GetObject<'a> {
    #[must_use]
    pub const fn new(key: &'a str) -> Self {
        Self { key }
    }

    /// Download the object into `dest`, the file is only created once the
    /// service answered with the object
    ///
    /// # Errors
    ///
    /// Will return `Err` if can not make the request or write the file
    pub async fn download(&self, s3: &S3, bucket: &str, dest: &Path) -> Result<u64> {
        let (url, headers) = &self.sign(s3, bucket, tools::sha256_digest("").as_ref(), None, None)?;

        let response =
            request::request(s3.client(), url.clone(), self.http_method()?, headers, None).await?;

        if !response.status().is_success() {
            return Err(response_error(response).await.into());
        }

        let mut file = File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(bytes) = stream.next().await {
            let bytes = bytes?;
            file.write_all(&bytes).await?;
            written += bytes.len() as u64;
        }

        file.flush().await?;

        log::info!("downloaded {} bytes into {}", written, dest.display());

        Ok(written)
    }
}

impl Action for GetObject<'_> {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::GET)
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

//! Actions
//! <https://docs.aws.amazon.com/AmazonS3/latest/API/API_Operations.html>

use crate::{
    s3::{S3, responses::ErrorResponse, signature::Signature},
    storage::ServiceError,
};
use anyhow::{Result, anyhow};
use quick_xml::de::from_str;
use reqwest::{Method, Response, StatusCode};
use std::collections::BTreeMap;
use url::Url;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_ListObjects.html>
mod listobjects;
pub use self::listobjects::ListObjects;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_HeadObject.html>
mod headobject;
pub use self::headobject::HeadObject;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_GetObject.html>
mod getobject;
pub use self::getobject::GetObject;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_PutObject.html>
mod putobject;
pub use self::putobject::PutObject;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_CreateMultipartUpload.html>
mod createmultipartupload;
pub use self::createmultipartupload::CreateMultipartUpload;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_UploadPart.html>
mod uploadpart;
pub use self::uploadpart::UploadPart;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_CompleteMultipartUpload.html>
mod completemultipartupload;
pub use self::completemultipartupload::CompleteMultipartUpload;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_DeleteObject.html>
mod deleteobject;
pub use self::deleteobject::DeleteObject;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_CreateBucket.html>
mod createbucket;
pub use self::createbucket::CreateBucket;

pub trait Action {
    // headers to send in the request
    fn headers(&self) -> Option<BTreeMap<&str, &str>>;

    // method to use GET/PUT...
    fn http_method(&self) -> Result<Method>;

    // URL query pairs
    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>>;

    // URL path, the object key split by '/'
    fn path(&self) -> Option<Vec<&str>>;

    /// # Errors
    ///
    /// Will return `Err` if the signature can not be created
    fn sign(
        &self,
        s3: &S3,
        bucket: &str,
        hash_payload: &[u8],
        md5: Option<&[u8]>,
        content_length: Option<usize>,
    ) -> Result<(Url, BTreeMap<String, String>)> {
        let mut url = s3.endpoint(bucket)?;

        if let Some(path) = self.path() {
            if matches!(path.as_slice(), [] | [""]) {
                return Err(anyhow!("object key can not be empty"));
            }

            if path.iter().any(|segment| matches!(*segment, "." | "..")) {
                return Err(anyhow!("object key can not have . or .. segments"));
            }

            url.path_segments_mut()
                .map_err(|()| anyhow!("endpoint cannot be a base URL"))?
                .pop_if_empty()
                .extend(path);
        }

        if let Some(pairs) = &self.query_pairs() {
            for (k, v) in pairs {
                url.query_pairs_mut().append_pair(k, v);
            }
        }

        let mut signature = Signature::new(s3, "s3", self.http_method()?);
        let headers = signature.sign(&url, hash_payload, md5, content_length, self.headers())?;
        Ok((url, headers))
    }
}

/// Path segments of an object key
///
/// Only one leading `/` is dropped, empty segments are kept so `dir/` and
/// `a//b` address exactly those objects.
#[must_use]
pub fn key_segments(key: &str) -> Vec<&str> {
    key.strip_prefix('/').unwrap_or(key).split('/').collect()
}

/// Turn a failed response into a [`ServiceError`]
pub async fn response_error(response: Response) -> ServiceError {
    let status = response.status();
    let request_id = request_id(&response);
    let body = response.text().await.unwrap_or_default();

    if let Some(service_error) = body_error(&body, &request_id, status) {
        service_error
    } else {
        let code = status
            .canonical_reason()
            .map_or_else(|| status.as_str().to_string(), |r| r.replace(' ', ""));
        let message = if body.is_empty() {
            status.to_string()
        } else {
            body
        };
        ServiceError::new(&code, &message, &request_id, Some(status.as_u16()))
    }
}

/// Request id sent back by S3 or OSS, empty when missing
#[must_use]
pub fn request_id(response: &Response) -> String {
    ["x-amz-request-id", "x-oss-request-id"]
        .iter()
        .find_map(|h| response.headers().get(*h))
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// The `<Error>` document in a response body, if there is one
#[must_use]
pub fn body_error(body: &str, request_id: &str, status: StatusCode) -> Option<ServiceError> {
    from_str::<ErrorResponse>(body).ok().map(|e| {
        ServiceError::new(
            &e.code,
            &e.message,
            e.request_id.as_deref().unwrap_or(request_id),
            Some(status.as_u16()),
        )
    })
}

use serde::Deserialize;

/// An individual object in a `ListBucketResult`
#[derive(Deserialize, Debug, Clone)]
pub struct Object {
    #[serde(rename = "Key")]
    /// The object's key
    pub key: String,
    #[serde(rename = "LastModified")]
    /// Date and time the object was last modified.
    pub last_modified: String,
    #[serde(rename = "ETag", default)]
    pub e_tag: Option<String>,
    #[serde(rename = "Size")]
    /// Size in bytes of the object.
    pub size: u64,
    #[serde(rename = "StorageClass", default)]
    pub storage_class: Option<String>,
}

/// The parsed result of a bucket listing (`ListObjects` v1)
#[derive(Deserialize, Debug, Clone)]
pub struct ListBucketResult {
    #[serde(rename = "Name")]
    /// Name of the bucket.
    pub name: String,
    #[serde(rename = "Prefix", default)]
    pub prefix: Option<String>,
    #[serde(rename = "Marker", default)]
    pub marker: Option<String>,
    #[serde(rename = "NextMarker", default)]
    /// When the response is truncated, the key to use as marker in the subsequent
    /// request. Only returned by some services, or when a delimiter is used.
    pub next_marker: Option<String>,
    #[serde(rename = "IsTruncated")]
    ///  Specifies whether (true) or not (false) all of the results were returned.
    pub is_truncated: bool,
    #[serde(rename = "Contents", default)]
    /// Metadata about each object returned.
    pub contents: Vec<Object>,
}

#[derive(Deserialize, Debug)]
pub struct ErrorResponse {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "Resource", default)]
    pub resource: Option<String>,
    #[serde(rename = "RequestId", default)]
    pub request_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct InitiateMultipartUploadResult {
    #[serde(rename = "Bucket")]
    pub bucket: String,
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "UploadId")]
    pub upload_id: String,
}

#[derive(Deserialize, Debug)]
pub struct CompleteMultipartUploadResult {
    #[serde(rename = "Location", default)]
    pub location: Option<String>,
    #[serde(rename = "Bucket")]
    pub bucket: String,
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "ETag")]
    pub e_tag: String,
}

//! Common test helpers
//!
//! - `MemoryStorage`: in-memory `Storage` that records every call
//! - Config file and local file helpers

#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc)]

use async_trait::async_trait;
use bytes::Bytes;
use osscli::storage::{Acl, CompletedPart, ListPage, ObjectSummary, ServiceError, Storage};
use std::{
    collections::{HashSet, VecDeque},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tempfile::NamedTempFile;

pub const UPLOAD_ID: &str = "0004B9894A22E5B1888A1E29F823";

/// A storage call as seen by the adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateBucket {
        bucket: String,
        acl: Acl,
    },
    ListObjects {
        bucket: String,
        prefix: Option<String>,
        marker: String,
    },
    GetObject {
        bucket: String,
        key: String,
        dest: PathBuf,
    },
    PutObject {
        bucket: String,
        key: String,
        src: PathBuf,
    },
    InitiateMultipartUpload {
        bucket: String,
        key: String,
    },
    UploadPart {
        key: String,
        upload_id: String,
        part_number: u32,
        body: Bytes,
    },
    CompleteMultipartUpload {
        key: String,
        upload_id: String,
        parts: Vec<CompletedPart>,
        acl: Acl,
    },
    DeleteObject {
        bucket: String,
        key: String,
    },
    ObjectExists {
        bucket: String,
        key: String,
    },
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    pages: VecDeque<ListPage>,
    existing: HashSet<String>,
    failing_ops: HashSet<String>,
    failing_keys: HashSet<String>,
    failing_parts: HashSet<u32>,
}

/// Cloning shares the recorded state, keep a clone to inspect the calls
/// after the executor consumed its copy
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<State>>,
}

pub fn service_error(code: &str) -> ServiceError {
    ServiceError::new(code, "mocked failure", "5F1A2B3C", Some(500))
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages returned by consecutive `list_objects` calls
    pub fn with_pages(self, pages: Vec<ListPage>) -> Self {
        self.state.lock().unwrap().pages = pages.into();
        self
    }

    /// Keys reported as existing
    pub fn with_objects(self, keys: &[&str]) -> Self {
        self.state
            .lock()
            .unwrap()
            .existing
            .extend(keys.iter().map(ToString::to_string));
        self
    }

    /// Every call of the named storage method fails
    pub fn fail_op(self, op: &str) -> Self {
        self.state.lock().unwrap().failing_ops.insert(op.to_string());
        self
    }

    /// Every call about this key fails
    pub fn fail_key(self, key: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_keys
            .insert(key.to_string());
        self
    }

    pub fn fail_part(self, number: u32) -> Self {
        self.state.lock().unwrap().failing_parts.insert(number);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, op: &str, key: Option<&str>, call: Call) -> Result<(), ServiceError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);

        if state.failing_ops.contains(op) || key.is_some_and(|k| state.failing_keys.contains(k)) {
            return Err(service_error("InternalError"));
        }

        Ok(())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_bucket(&self, bucket: &str, acl: Acl) -> Result<(), ServiceError> {
        self.record(
            "create_bucket",
            None,
            Call::CreateBucket {
                bucket: bucket.to_string(),
                acl,
            },
        )
    }

    async fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        marker: Option<&str>,
    ) -> Result<ListPage, ServiceError> {
        self.record(
            "list_objects",
            None,
            Call::ListObjects {
                bucket: bucket.to_string(),
                prefix: prefix.map(ToString::to_string),
                marker: marker.unwrap_or_default().to_string(),
            },
        )?;

        let page = self.state.lock().unwrap().pages.pop_front();

        page.ok_or_else(|| service_error("NoMorePages"))
    }

    async fn get_object(&self, bucket: &str, key: &str, dest: &Path) -> Result<u64, ServiceError> {
        self.record(
            "get_object",
            Some(key),
            Call::GetObject {
                bucket: bucket.to_string(),
                key: key.to_string(),
                dest: dest.to_path_buf(),
            },
        )?;

        std::fs::write(dest, key.as_bytes())?;

        Ok(key.len() as u64)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        src: &Path,
    ) -> Result<String, ServiceError> {
        self.record(
            "put_object",
            Some(key),
            Call::PutObject {
                bucket: bucket.to_string(),
                key: key.to_string(),
                src: src.to_path_buf(),
            },
        )?;

        Ok("\"etag\"".to_string())
    }

    async fn initiate_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<String, ServiceError> {
        self.record(
            "initiate_multipart_upload",
            None,
            Call::InitiateMultipartUpload {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
        )?;

        Ok(UPLOAD_ID.to_string())
    }

    async fn upload_part(
        &self,
        _bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: u32,
        body: Bytes,
    ) -> Result<String, ServiceError> {
        self.record(
            "upload_part",
            None,
            Call::UploadPart {
                key: key.to_string(),
                upload_id: upload_id.to_string(),
                part_number,
                body,
            },
        )?;

        if self
            .state
            .lock()
            .unwrap()
            .failing_parts
            .contains(&part_number)
        {
            return Err(service_error("RequestTimeout"));
        }

        Ok(format!("etag-{part_number}"))
    }

    async fn complete_multipart_upload(
        &self,
        _bucket: &str,
        key: &str,
        upload_id: &str,
        parts: &[CompletedPart],
        acl: Acl,
    ) -> Result<String, ServiceError> {
        self.record(
            "complete_multipart_upload",
            None,
            Call::CompleteMultipartUpload {
                key: key.to_string(),
                upload_id: upload_id.to_string(),
                parts: parts.to_vec(),
                acl,
            },
        )?;

        Ok("\"etag-multipart\"".to_string())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), ServiceError> {
        self.record(
            "delete_object",
            Some(key),
            Call::DeleteObject {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
        )
    }

    async fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, ServiceError> {
        self.record(
            "object_exists",
            Some(key),
            Call::ObjectExists {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
        )?;

        Ok(self.state.lock().unwrap().existing.contains(key))
    }
}

pub fn page(keys: &[&str], next_marker: &str, is_truncated: bool) -> ListPage {
    ListPage {
        objects: keys
            .iter()
            .map(|k| ObjectSummary::new(k, 1, "2020-01-01T00:00:00.000Z"))
            .collect(),
        next_marker: next_marker.to_string(),
        is_truncated,
    }
}

/// Temporary local file with the given content
pub fn local_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

/// Temporary config.json file
pub fn config_file(endpoint: &str, access_key_id: &str, access_key_secret: &str) -> NamedTempFile {
    let content = format!(
        r#"{{
    "Endpoint": "{endpoint}",
    "AccessKeyId": "{access_key_id}",
    "AccessKeySecret": "{access_key_secret}"
}}"#
    );
    local_file(content.as_bytes())
}

//! osscli
//!
//! Command line client for S3 compatible object storage (Alibaba OSS, MinIO,
//! AWS S3): create buckets, list, get, put (single-shot or multipart), delete,
//! existence checks and prefix scans.

pub mod cli;
pub mod s3;
pub mod storage;
pub mod transfer;

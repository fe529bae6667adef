use crate::storage::CompletedPart;
use std::collections::BTreeMap;

/// A byte range of the source file uploaded as one part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Part {
    number: u32,
    seek: u64,
    chunk: u64,
}

impl Part {
    #[must_use]
    pub const fn new(number: u32, seek: u64, chunk: u64) -> Self {
        Self {
            number,
            seek,
            chunk,
        }
    }

    #[must_use]
    pub const fn get_number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub const fn get_seek(&self) -> u64 {
        self.seek
    }

    #[must_use]
    pub const fn get_chunk(&self) -> u64 {
        self.chunk
    }
}

/// Accumulator threaded through the part uploads.
///
/// Only parts acknowledged by the service are recorded; failed part numbers
/// are kept apart so they can be reported before completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartResults {
    uploaded: BTreeMap<u32, String>,
    failed: Vec<u32>,
}

impl PartResults {
    #[must_use]
    pub fn record(mut self, number: u32, etag: String) -> Self {
        self.uploaded.insert(number, etag);
        self
    }

    #[must_use]
    pub fn fail(mut self, number: u32) -> Self {
        self.failed.push(number);
        self
    }

    /// Parts to submit on completion, ascending by part number
    #[must_use]
    pub fn completed(&self) -> Vec<CompletedPart> {
        self.uploaded
            .iter()
            .map(|(number, etag)| CompletedPart {
                number: *number,
                etag: etag.clone(),
            })
            .collect()
    }

    #[must_use]
    pub fn failed(&self) -> &[u32] {
        &self.failed
    }

    #[must_use]
    pub fn uploaded(&self) -> usize {
        self.uploaded.len()
    }
}

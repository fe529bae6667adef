use std::{cmp::min, iter::Iterator};

/// Yields `(number, seek, chunk)` for every part of a file, 1-indexed and contiguous
pub struct PartIterator {
    seek: u64,
    chunk_size: u64,
    file_size: u64,
    number: u32,
}

impl PartIterator {
    #[must_use]
    pub const fn new(file_size: u64, chunk_size: u64) -> Self {
        Self {
            seek: 0,
            chunk_size,
            file_size,
            number: 1,
        }
    }
}

impl Iterator for PartIterator {
    type Item = (u32, u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.seek >= self.file_size || self.chunk_size == 0 {
            return None;
        }

        let chunk = min(self.chunk_size, self.file_size - self.seek);

        let result = Some((self.number, self.seek, chunk));

        self.seek += chunk;
        self.number += 1;

        result
    }
}

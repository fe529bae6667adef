//! Transfer planner
//!
//! Decides how a local file is uploaded: one `PutObject` call when it is
//! smaller than the threshold, otherwise a multipart upload split into
//! contiguous fixed size parts (the last one may be shorter).

mod iterator;
pub use self::iterator::PartIterator;

mod part;
pub use self::part::{Part, PartResults};

use thiserror::Error;

/// Files of this size or bigger are uploaded in parts (1 GiB)
pub const MULTIPART_THRESHOLD: u64 = 1024 * 1024 * 1024;

/// Size of every part but the last one (1 MiB)
pub const PART_SIZE: u64 = 1024 * 1024;

/// Most parts a multipart upload can have, numbered 1 to 10,000
/// <https://docs.aws.amazon.com/AmazonS3/latest/userguide/qfacts.html>
pub const MAX_PARTS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("part size must be at least 1 byte")]
    ZeroPartSize,

    #[error(
        "a file of {file_size} bytes needs {parts} parts of {part_size} bytes, at most 10000 parts are allowed, try a bigger --part-size"
    )]
    TooManyParts {
        file_size: u64,
        part_size: u64,
        parts: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Single,
    Multipart(UploadPlan),
}

/// Part layout of a multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPlan {
    file_size: u64,
    part_size: u64,
    parts: Vec<Part>,
}

impl UploadPlan {
    #[must_use]
    pub fn new(file_size: u64, part_size: u64) -> Self {
        let parts = PartIterator::new(file_size, part_size)
            .map(|(number, seek, chunk)| Part::new(number, seek, chunk))
            .collect();

        Self {
            file_size,
            part_size,
            parts,
        }
    }

    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub const fn file_size(&self) -> u64 {
        self.file_size
    }

    #[must_use]
    pub const fn part_size(&self) -> u64 {
        self.part_size
    }
}

/// Pick the upload strategy for a file of `file_size` bytes
///
/// # Errors
///
/// Will return `Err` if a multipart upload would need a zero part size or
/// more than [`MAX_PARTS`] parts, nothing should be uploaded then
pub fn plan(file_size: u64, threshold: u64, part_size: u64) -> Result<Strategy, PlanError> {
    if file_size < threshold {
        log::info!("file size: {file_size} < threshold: {threshold}, single upload");
        return Ok(Strategy::Single);
    }

    if part_size == 0 {
        return Err(PlanError::ZeroPartSize);
    }

    // checked before the parts are built
    let parts = file_size.div_ceil(part_size);
    if parts > MAX_PARTS {
        return Err(PlanError::TooManyParts {
            file_size,
            part_size,
            parts,
        });
    }

    let plan = UploadPlan::new(file_size, part_size);
    log::info!(
        "file size: {file_size} >= threshold: {threshold}, multipart upload, parts: {}, part size: {part_size}",
        plan.part_count()
    );
    Ok(Strategy::Multipart(plan))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers(plan: &UploadPlan) {
        let mut expected_seek = 0;
        for (i, part) in plan.parts().iter().enumerate() {
            assert_eq!(part.get_number() as usize, i + 1);
            assert_eq!(part.get_seek(), expected_seek);
            assert!(part.get_chunk() > 0);
            assert!(part.get_chunk() <= plan.part_size());
            expected_seek += part.get_chunk();
        }
        assert_eq!(expected_seek, plan.file_size());
    }

    #[test]
    fn test_plan_coverage() {
        let sizes = [1, 2, 99, 100, 101, 1000, 1023, 1024, 1025, 4096 * 3 + 7];
        let part_sizes = [1, 7, 100, 1024];
        for size in sizes {
            for part_size in part_sizes {
                let plan = UploadPlan::new(size, part_size);
                assert_eq!(plan.part_count() as u64, size.div_ceil(part_size));
                assert_eq!(
                    plan.parts().iter().map(Part::get_chunk).sum::<u64>(),
                    size
                );
                assert_covers(&plan);
            }
        }
    }

    #[test]
    fn test_plan_last_part_is_short() {
        let plan = UploadPlan::new(2 * PART_SIZE + 10, PART_SIZE);
        assert_eq!(plan.part_count(), 3);
        let last = plan.parts().last().unwrap();
        assert_eq!(last.get_number(), 3);
        assert_eq!(last.get_seek(), 2 * PART_SIZE);
        assert_eq!(last.get_chunk(), 10);
    }

    #[test]
    fn test_plan_threshold_boundary() {
        assert_eq!(
            plan(0, MULTIPART_THRESHOLD, PART_SIZE),
            Ok(Strategy::Single)
        );
        assert_eq!(
            plan(MULTIPART_THRESHOLD - 1, MULTIPART_THRESHOLD, PART_SIZE),
            Ok(Strategy::Single)
        );

        match plan(MULTIPART_THRESHOLD, MULTIPART_THRESHOLD, PART_SIZE).unwrap() {
            Strategy::Multipart(plan) => {
                assert_eq!(plan.part_count(), 1024);
                assert_covers(&plan);
            }
            Strategy::Single => panic!("expected multipart"),
        }
    }

    #[test]
    fn test_plan_small_threshold() {
        match plan(10, 4, 3).unwrap() {
            Strategy::Multipart(plan) => {
                let layout: Vec<(u32, u64, u64)> = plan
                    .parts()
                    .iter()
                    .map(|p| (p.get_number(), p.get_seek(), p.get_chunk()))
                    .collect();
                assert_eq!(layout, vec![(1, 0, 3), (2, 3, 3), (3, 6, 3), (4, 9, 1)]);
            }
            Strategy::Single => panic!("expected multipart"),
        }
    }

    #[test]
    fn test_plan_max_parts() {
        match plan(MAX_PARTS * PART_SIZE, MULTIPART_THRESHOLD, PART_SIZE).unwrap() {
            Strategy::Multipart(plan) => {
                assert_eq!(plan.part_count() as u64, MAX_PARTS);
                assert_eq!(plan.parts().last().unwrap().get_number(), 10_000);
            }
            Strategy::Single => panic!("expected multipart"),
        }

        assert_eq!(
            plan(MAX_PARTS * PART_SIZE + 1, MULTIPART_THRESHOLD, PART_SIZE),
            Err(PlanError::TooManyParts {
                file_size: MAX_PARTS * PART_SIZE + 1,
                part_size: PART_SIZE,
                parts: MAX_PARTS + 1,
            })
        );

        // never builds the part list
        assert!(matches!(
            plan(u64::MAX, 1, 1),
            Err(PlanError::TooManyParts { .. })
        ));

        assert_eq!(plan(10, 4, 0), Err(PlanError::ZeroPartSize));
        assert_eq!(plan(3, 4, 0), Ok(Strategy::Single));
    }
}

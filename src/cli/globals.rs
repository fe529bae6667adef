use crate::transfer::{MULTIPART_THRESHOLD, PART_SIZE};

// Define the global arguments
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub part_size: u64,
    pub threshold: u64,
    pub quiet: bool,
}

impl Default for GlobalArgs {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalArgs {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            part_size: PART_SIZE,
            threshold: MULTIPART_THRESHOLD,
            quiet: false,
        }
    }

    // 0 keeps the default
    pub const fn set_part_size(&mut self, part_size: u64) {
        if part_size > 0 {
            self.part_size = part_size;
        }
    }

    // 0 keeps the default
    pub const fn set_threshold(&mut self, threshold: u64) {
        if threshold > 0 {
            self.threshold = threshold;
        }
    }
}

use std::path::PathBuf;
use std::time::Duration;

use validator::Validate;

use crate::utils::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_INPUT_FILE, MAX_WORKERS, MIN_CHUNK_SIZE};

/// Validated run configuration assembled from the command line.
#[derive(Debug, Clone, Validate)]
pub struct ProcessingOptions {
    pub input: PathBuf,

    #[validate(range(min = 1, max = MAX_WORKERS))]
    pub workers: usize,

    #[validate(range(min = MIN_CHUNK_SIZE))]
    pub chunk_size: usize,

    /// Deadline in milliseconds
    #[validate(range(min = 1))]
    pub timeout_ms: Option<u64>,

    pub show_progress: bool,
}

impl ProcessingOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            workers: num_cpus::get().clamp(1, MAX_WORKERS),
            chunk_size: DEFAULT_CHUNK_SIZE,
            timeout_ms: None,
            show_progress: false,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout_ms = timeout.map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn is_sequential(&self) -> bool {
        self.workers <= 1
    }
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_FILE)
    }
}

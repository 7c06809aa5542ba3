use crate::error::{ProcessingError, RecordError, Result};
use crate::processors::StationAggregator;
use crate::readers::{parse_record, LineReader, MappedInput, Partition, PartitionLines};
use crate::utils::constants::{CANCEL_CHECK_INTERVAL, DEFAULT_CHUNK_SIZE, EXPECTED_STATIONS};
use crate::utils::progress::ProgressReporter;
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Runs the read → parse → aggregate pipeline over one input file.
///
/// With a single worker the file is streamed line by line. With more workers
/// it is memory-mapped, split into line-aligned partitions, and each partition
/// is aggregated independently before the partial tables are merged.
pub struct ParallelProcessor {
    max_workers: usize,
    chunk_size: usize,
    cancel: Option<Arc<AtomicBool>>,
}

/// Failure inside one partition, located by byte offset.
#[derive(Debug)]
enum PartitionError {
    Record {
        offset: usize,
        line: String,
        reason: RecordError,
    },
    Utf8 {
        offset: usize,
        source: std::str::Utf8Error,
    },
    Cancelled,
}

impl ParallelProcessor {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
            chunk_size: DEFAULT_CHUNK_SIZE,
            cancel: None,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Share a flag that aborts processing once it is set.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Aggregate every record in `path`.
    pub fn process_file(
        &self,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<StationAggregator> {
        if self.max_workers == 1 {
            self.process_sequential(path, progress)
        } else {
            self.process_partitioned(path, progress)
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Single pass over a streamed file.
    pub fn process_sequential(
        &self,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<StationAggregator> {
        info!(path = %path.display(), "Streaming input sequentially");

        let reader = LineReader::open(path)?;
        let mut aggregator = StationAggregator::with_capacity(EXPECTED_STATIONS);
        let mut records = 0usize;

        for line in reader {
            let line = line?;

            let record = parse_record(&line.text).map_err(|reason| {
                ProcessingError::MalformedRecord {
                    path: path.to_path_buf(),
                    line_number: line.number,
                    line: line.text.clone(),
                    reason,
                }
            })?;
            aggregator.update(record.station, record.temperature);

            records += 1;
            if records % CANCEL_CHECK_INTERVAL == 0 {
                if self.is_cancelled() {
                    return Err(ProcessingError::Cancelled);
                }
                if let Some(p) = progress {
                    p.set_message(&format!("Aggregated {} records", records));
                }
            }
        }

        if self.is_cancelled() {
            return Err(ProcessingError::Cancelled);
        }

        info!(records, stations = aggregator.len(), "Sequential pass complete");
        Ok(aggregator)
    }

    /// Memory-mapped pass over line-aligned partitions on a rayon pool.
    pub fn process_partitioned(
        &self,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<StationAggregator> {
        let input = MappedInput::open(path)?;
        let partitions = input.partitions(self.chunk_size);

        if partitions.is_empty() {
            info!(path = %path.display(), "Input is empty");
            return Ok(StationAggregator::new());
        }

        let threads = self.max_workers.min(partitions.len());
        info!(
            path = %path.display(),
            bytes = input.len(),
            partitions = partitions.len(),
            threads,
            "Processing partitions"
        );

        if let Some(p) = progress {
            p.set_length(input.len() as u64);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        let results: Vec<std::result::Result<StationAggregator, PartitionError>> =
            pool.install(|| {
                partitions
                    .par_iter()
                    .map(|partition| {
                        let result = self.aggregate_partition(input.bytes(), partition);

                        if let Some(p) = progress {
                            p.increment(partition.len() as u64);
                        }

                        result
                    })
                    .collect()
            });

        // Barrier: every partition has finished. Report the failure closest to
        // the start of the file so the error does not depend on scheduling.
        let mut merged = StationAggregator::with_capacity(EXPECTED_STATIONS);
        for result in results {
            let partial = result.map_err(|e| self.resolve_error(&input, e))?;
            merged.merge(partial);
        }

        info!(stations = merged.len(), "Merged partition results");
        Ok(merged)
    }

    fn aggregate_partition(
        &self,
        data: &[u8],
        partition: &Partition,
    ) -> std::result::Result<StationAggregator, PartitionError> {
        let mut aggregator = StationAggregator::with_capacity(EXPECTED_STATIONS);

        for (i, raw) in PartitionLines::new(data, partition.range.clone()).enumerate() {
            if i % CANCEL_CHECK_INTERVAL == 0 && self.is_cancelled() {
                return Err(PartitionError::Cancelled);
            }

            let text = match raw.text() {
                Ok(Some(text)) => text,
                Ok(None) => continue,
                Err(source) => {
                    return Err(PartitionError::Utf8 {
                        offset: raw.offset,
                        source,
                    })
                }
            };

            let record = parse_record(text).map_err(|reason| PartitionError::Record {
                offset: raw.offset,
                line: text.to_string(),
                reason,
            })?;
            aggregator.update(record.station, record.temperature);
        }

        debug!(
            partition = partition.index,
            bytes = partition.len(),
            stations = aggregator.len(),
            "Partition aggregated"
        );
        Ok(aggregator)
    }

    fn resolve_error(&self, input: &MappedInput, error: PartitionError) -> ProcessingError {
        match error {
            PartitionError::Record {
                offset,
                line,
                reason,
            } => ProcessingError::MalformedRecord {
                path: input.path().to_path_buf(),
                line_number: input.line_number_at(offset),
                line,
                reason,
            },
            PartitionError::Utf8 { offset, source } => ProcessingError::io(
                input.path(),
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!(
                        "line {} is not valid UTF-8: {}",
                        input.line_number_at(offset),
                        source
                    ),
                ),
            ),
            PartitionError::Cancelled => ProcessingError::Cancelled,
        }
    }
}

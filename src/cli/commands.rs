use crate::cli::args::Cli;
use crate::error::{ProcessingError, Result};
use crate::processors::{ParallelProcessor, StationAggregator};
use crate::utils::progress::ProgressReporter;
use crate::writers::SummaryWriter;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn, Level};
use validator::Validate;

/// Route logs to stderr; stdout carries only the summary line.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

pub async fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    execute(cli, &mut handle).await
}

/// Aggregate the input named by `cli` and write the summary to `out`.
///
/// Nothing is written unless the whole input was processed successfully.
pub async fn execute<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    init_logging(cli.verbose);

    let options = cli.options();
    options.validate()?;

    info!(
        input = %options.input.display(),
        workers = options.workers,
        chunk_size = options.chunk_size,
        "Starting aggregation"
    );

    let cancel = Arc::new(AtomicBool::new(false));
    let processor = ParallelProcessor::new(options.workers)
        .with_chunk_size(options.chunk_size)
        .with_cancel_flag(cancel.clone());

    let input = options.input.clone();
    let sequential = options.is_sequential();
    let silent = !options.show_progress;

    let task = tokio::task::spawn_blocking(move || -> Result<StationAggregator> {
        let progress = if sequential {
            ProgressReporter::new_spinner("Aggregating measurements...", silent)
        } else {
            ProgressReporter::new(0, "Aggregating measurements...", silent)
        };

        let result = processor.process_file(&input, Some(&progress));
        progress.clear();
        result
    });

    let aggregator = match options.timeout() {
        Some(deadline) => match tokio::time::timeout(deadline, task).await {
            Ok(joined) => joined??,
            Err(_) => {
                cancel.store(true, Ordering::Relaxed);
                let millis = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX);
                warn!(millis, "Deadline exceeded, cancelling");
                return Err(ProcessingError::Timeout { millis });
            }
        },
        None => task.await??,
    };

    if aggregator.is_empty() {
        warn!(input = %options.input.display(), "No records found, writing empty summary");
    }

    info!(
        stations = aggregator.len(),
        records = aggregator.observation_count(),
        "Writing summary"
    );

    SummaryWriter::new()
        .write_summary(&aggregator, out)
        .map_err(|e| ProcessingError::io("<stdout>", e))
}

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::ProcessingOptions;
use crate::utils::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_INPUT_FILE, MAX_WORKERS};

#[derive(Parser, Debug)]
#[command(name = "brc-processor")]
#[command(about = "Per-station min/mean/max temperature summary of a station;temperature file")]
#[command(version)]
pub struct Cli {
    /// Measurements file, one `station;temperature` record per line
    #[arg(default_value = DEFAULT_INPUT_FILE)]
    pub input: PathBuf,

    /// Worker threads; 1 streams the file on a single thread
    #[arg(default_value_t = num_cpus::get().min(MAX_WORKERS))]
    pub workers: usize,

    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE, help = "Target partition size in bytes")]
    pub chunk_size: usize,

    #[arg(long, value_name = "SECONDS", help = "Abort the run if it takes longer than this")]
    pub timeout: Option<u64>,

    #[arg(
        long,
        value_name = "MILLIS",
        conflicts_with = "timeout",
        help = "Like --timeout, in milliseconds"
    )]
    pub timeout_ms: Option<u64>,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, help = "Show a progress bar on stderr")]
    pub progress: bool,
}

impl Cli {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .map(Duration::from_millis)
            .or_else(|| self.timeout.map(Duration::from_secs))
    }

    pub fn options(&self) -> ProcessingOptions {
        ProcessingOptions::new(&self.input)
            .with_workers(self.workers)
            .with_chunk_size(self.chunk_size)
            .with_timeout(self.timeout())
            .with_progress(self.progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["brc-processor"]);
        assert_eq!(cli.input, PathBuf::from("measurements.txt"));
        assert_eq!(cli.workers, num_cpus::get().min(MAX_WORKERS));
        assert_eq!(cli.chunk_size, 4 * 1024 * 1024);
        assert_eq!(cli.timeout, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::parse_from(["brc-processor", "data/weather.txt", "8"]);
        assert_eq!(cli.input, PathBuf::from("data/weather.txt"));
        assert_eq!(cli.workers, 8);

        let options = cli.options();
        assert_eq!(options.workers, 8);
        assert!(!options.is_sequential());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "brc-processor",
            "in.txt",
            "1",
            "--chunk-size",
            "1024",
            "--timeout",
            "30",
            "-v",
            "--progress",
        ]);

        let options = cli.options();
        assert!(options.is_sequential());
        assert_eq!(options.chunk_size, 1024);
        assert_eq!(options.timeout(), Some(Duration::from_secs(30)));
        assert!(options.show_progress);
        assert!(cli.verbose);
    }

    #[test]
    fn test_timeout_in_milliseconds() {
        let cli = Cli::parse_from(["brc-processor", "in.txt", "--timeout-ms", "250"]);
        assert_eq!(cli.options().timeout(), Some(Duration::from_millis(250)));

        let both = Cli::try_parse_from(["brc-processor", "--timeout", "1", "--timeout-ms", "5"]);
        assert!(both.is_err());
    }
}

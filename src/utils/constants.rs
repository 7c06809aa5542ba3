/// Input file used when no path is given on the command line
pub const DEFAULT_INPUT_FILE: &str = "measurements.txt";

/// Field delimiter between station name and temperature
pub const FIELD_DELIMITER: char = ';';

/// Processing defaults
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024 * 1024; // 4MB
pub const MIN_CHUNK_SIZE: usize = 64;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const MAX_WORKERS: usize = 1024;

/// Expected station cardinality, used to pre-size per-partition maps
pub const EXPECTED_STATIONS: usize = 1024;

/// Lines between cancellation checks inside a partition
pub const CANCEL_CHECK_INTERVAL: usize = 4096;

/// Summary rendering
pub const SUMMARY_OPEN: &str = "{";
pub const SUMMARY_CLOSE: &str = "}";
pub const STATION_SEPARATOR: &str = ", ";

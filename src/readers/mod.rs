pub mod line_reader;
pub mod mapped_reader;
pub mod record_parser;

pub use line_reader::{LineReader, SourceLine};
pub use mapped_reader::{plan_partitions, MappedInput, Partition, PartitionLines, RawLine};
pub use record_parser::{parse_record, ParsedRecord};

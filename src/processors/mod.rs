pub mod aggregator;
pub mod parallel_processor;

pub use aggregator::StationAggregator;
pub use parallel_processor::ParallelProcessor;

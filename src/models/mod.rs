pub mod options;
pub mod station;
pub mod temperature;

pub use options::ProcessingOptions;
pub use station::StationStats;
pub use temperature::Tenths;

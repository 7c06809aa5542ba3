use crate::models::StationStats;
use crate::processors::StationAggregator;
use crate::utils::constants::{STATION_SEPARATOR, SUMMARY_CLOSE, SUMMARY_OPEN};
use std::io::Write;

/// Renders the `{station=min/mean/max, ...}` summary line.
pub struct SummaryWriter {
    estimated_entry_len: usize,
}

impl SummaryWriter {
    pub fn new() -> Self {
        Self {
            estimated_entry_len: 32,
        }
    }

    /// `name=min/mean/max` for one station, or `None` for a record with no
    /// observations.
    pub fn format_station(&self, name: &str, stats: &StationStats) -> Option<String> {
        let (min, mean, max) = (stats.min()?, stats.mean()?, stats.max()?);
        Some(format!("{}={}/{}/{}", name, min, mean, max))
    }

    /// The full summary without a trailing newline.
    pub fn render(&self, aggregator: &StationAggregator) -> String {
        let mut out = String::with_capacity(aggregator.len() * self.estimated_entry_len + 2);
        out.push_str(SUMMARY_OPEN);

        let mut first = true;
        for (name, stats) in aggregator.sorted() {
            let Some(entry) = self.format_station(name, stats) else {
                continue;
            };
            if !first {
                out.push_str(STATION_SEPARATOR);
            }
            first = false;
            out.push_str(&entry);
        }

        out.push_str(SUMMARY_CLOSE);
        out
    }

    /// Write the summary followed by a newline and flush.
    pub fn write_summary<W: Write>(
        &self,
        aggregator: &StationAggregator,
        writer: &mut W,
    ) -> std::io::Result<()> {
        writeln!(writer, "{}", self.render(aggregator))?;
        writer.flush()
    }
}

impl Default for SummaryWriter {
    fn default() -> Self {
        Self::new()
    }
}

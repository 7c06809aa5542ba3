use crate::models::{StationStats, Tenths};
use std::collections::HashMap;

/// Owned per-station statistics table.
///
/// Each partition of the input builds its own aggregator; partial results are
/// combined with [`StationAggregator::merge`] once every partition is done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationAggregator {
    stations: HashMap<String, StationStats>,
}

impl StationAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stations: HashMap::with_capacity(capacity),
        }
    }

    /// Record one observation for `station`.
    #[inline]
    pub fn update(&mut self, station: &str, value: Tenths) {
        match self.stations.get_mut(station) {
            Some(stats) => stats.update(value),
            None => {
                self.stations
                    .insert(station.to_string(), StationStats::from_value(value));
            }
        }
    }

    /// Fold another partial table into this one.
    pub fn merge(&mut self, other: StationAggregator) {
        if self.stations.is_empty() {
            self.stations = other.stations;
            return;
        }

        for (station, stats) in other.stations {
            self.stations.entry(station).or_default().merge(&stats);
        }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn get(&self, station: &str) -> Option<&StationStats> {
        self.stations.get(station)
    }

    /// Total observations across all stations.
    pub fn observation_count(&self) -> u64 {
        self.stations.values().map(|s| s.count).sum()
    }

    /// Stations in ascending byte order of their names.
    pub fn sorted(&self) -> Vec<(&str, &StationStats)> {
        let mut entries: Vec<(&str, &StationStats)> = self
            .stations
            .iter()
            .map(|(name, stats)| (name.as_str(), stats))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<'a> Extend<(&'a str, Tenths)> for StationAggregator {
    fn extend<I: IntoIterator<Item = (&'a str, Tenths)>>(&mut self, iter: I) {
        for (station, value) in iter {
            self.update(station, value);
        }
    }
}

impl<'a> FromIterator<(&'a str, Tenths)> for StationAggregator {
    fn from_iter<I: IntoIterator<Item = (&'a str, Tenths)>>(iter: I) -> Self {
        let mut aggregator = StationAggregator::new();
        aggregator.extend(iter);
        aggregator
    }
}

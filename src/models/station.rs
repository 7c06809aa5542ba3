use crate::models::Tenths;

/// Running min/max/sum/count for one station, all in tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationStats {
    pub min: i64,
    pub max: i64,
    pub sum: i128,
    pub count: u64,
}

impl Default for StationStats {
    fn default() -> Self {
        Self::new()
    }
}

impl StationStats {
    /// Empty record; `min`/`max` start at sentinels beyond any parsed value.
    pub fn new() -> Self {
        Self {
            min: i64::MAX,
            max: i64::MIN,
            sum: 0,
            count: 0,
        }
    }

    pub fn from_value(value: Tenths) -> Self {
        let mut stats = Self::new();
        stats.update(value);
        stats
    }

    #[inline]
    pub fn update(&mut self, value: Tenths) {
        let v = value.value();
        self.min = self.min.min(v);
        self.max = self.max.max(v);
        self.sum += i128::from(v);
        self.count += 1;
    }

    /// Combination rule for partial records from separate partitions.
    pub fn merge(&mut self, other: &StationStats) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn min(&self) -> Option<Tenths> {
        (!self.is_empty()).then_some(Tenths(self.min))
    }

    pub fn max(&self) -> Option<Tenths> {
        (!self.is_empty()).then_some(Tenths(self.max))
    }

    pub fn mean(&self) -> Option<Tenths> {
        Tenths::rounded_mean(self.sum, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_tracks_extremes() {
        let mut stats = StationStats::new();
        for v in [30, -15, 50, 0] {
            stats.update(Tenths(v));
        }

        assert_eq!(stats.min, -15);
        assert_eq!(stats.max, 50);
        assert_eq!(stats.sum, 65);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean(), Some(Tenths(16)));
    }

    #[test]
    fn test_empty_record_has_no_statistics() {
        let stats = StationStats::default();
        assert!(stats.is_empty());
        assert_eq!(stats.min(), None);
        assert_eq!(stats.max(), None);
        assert_eq!(stats.mean(), None);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let values = [12, -40, 7, 99, -3, 0, 15];

        let mut whole = StationStats::new();
        values.iter().for_each(|&v| whole.update(Tenths(v)));

        let mut left = StationStats::new();
        let mut right = StationStats::new();
        values[..3].iter().for_each(|&v| left.update(Tenths(v)));
        values[3..].iter().for_each(|&v| right.update(Tenths(v)));

        let mut left_then_right = left;
        left_then_right.merge(&right);
        let mut right_then_left = right;
        right_then_left.merge(&left);

        assert_eq!(left_then_right, whole);
        assert_eq!(right_then_left, whole);
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let mut stats = StationStats::from_value(Tenths(-25));
        stats.merge(&StationStats::new());
        assert_eq!(stats, StationStats::from_value(Tenths(-25)));
    }
}

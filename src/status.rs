use rand::Rng;
use std::fmt;

/// Header label appended to the table.
pub const STATUS_COLUMN: &str = "stock_status";

/// Inventory availability for a single product row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StockStatus {
    Available,
    Low,
    None,
}

impl StockStatus {
    /// Every label, in declaration order.
    pub const ALL: [StockStatus; 3] = [StockStatus::Available, StockStatus::Low, StockStatus::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Available => "AVAILABLE",
            StockStatus::Low => "LOW",
            StockStatus::None => "NONE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "AVAILABLE" => Some(StockStatus::Available),
            "LOW" => Some(StockStatus::Low),
            "NONE" => Some(StockStatus::None),
            _ => None,
        }
    }

    /// Uniform draw over [`StockStatus::ALL`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    fn index(&self) -> usize {
        match self {
            StockStatus::Available => 0,
            StockStatus::Low => 1,
            StockStatus::None => 2,
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-label counts of assigned statuses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusTally {
    counts: [usize; 3],
}

impl StatusTally {
    pub fn record(&mut self, status: StockStatus) {
        self.counts[status.index()] += 1;
    }

    pub fn get(&self, status: StockStatus) -> usize {
        self.counts[status.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_labels_round_trip_through_strings() {
        for status in StockStatus::ALL {
            assert_eq!(StockStatus::from_str(status.as_str()), Some(status));
            assert_eq!(status.to_string(), status.as_str());
        }
        assert_eq!(StockStatus::from_str(" low "), Some(StockStatus::Low));
        assert_eq!(StockStatus::from_str("OUT"), None);
    }

    #[test]
    fn test_random_covers_every_label() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut tally = StatusTally::default();
        for _ in 0..1000 {
            tally.record(StockStatus::random(&mut rng));
        }

        assert_eq!(tally.total(), 1000);
        for status in StockStatus::ALL {
            assert!(tally.get(status) > 0, "{} never drawn", status);
        }
    }

    #[test]
    fn test_seeded_draws_are_reproducible() {
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| StockStatus::random(&mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }
}

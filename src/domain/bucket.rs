//! Distribution buckets for response times and prices.
//!
//! Both bucketers use contiguous left-closed, right-open intervals, so a
//! boundary value belongs to the interval it opens. Negative and NaN inputs
//! have no bucket.

/// Response time interval in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTimeBucket {
    Under200,
    From200To300,
    From300To400,
    From400To500,
    From500To600,
    From600To800,
    From800To1000,
    From1000To1200,
    From1200To1500,
    From1500To2000,
    Over2000,
}

impl LoadTimeBucket {
    /// Label reported to the sink.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under200 => "0-200ms",
            Self::From200To300 => "0200-300ms",
            Self::From300To400 => "0300-400ms",
            Self::From400To500 => "0400-500ms",
            Self::From500To600 => "0500-600ms",
            Self::From600To800 => "0600-800ms",
            Self::From800To1000 => "0800-1000ms",
            Self::From1000To1200 => "1000-1200ms",
            Self::From1200To1500 => "1200-1500ms",
            Self::From1500To2000 => "1500-2000ms",
            Self::Over2000 => "2000ms above",
        }
    }
}

/// Price interval in currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpmBucket {
    Under0_5,
    From0_5To1,
    From1To1_5,
    From1_5To2,
    From2To2_5,
    From2_5To3,
    From3To4,
    From4To6,
    From6To8,
    Over8,
}

impl CpmBucket {
    /// Label reported to the sink.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under0_5 => "$0-0.5",
            Self::From0_5To1 => "$0.5-1",
            Self::From1To1_5 => "$1-1.5",
            Self::From1_5To2 => "$1.5-2",
            Self::From2To2_5 => "$2-2.5",
            Self::From2_5To3 => "$2.5-3",
            Self::From3To4 => "$3-4",
            Self::From4To6 => "$4-6",
            Self::From6To8 => "$6-8",
            Self::Over8 => "$8 above",
        }
    }
}

const LOAD_TIME_EDGES: [(f64, LoadTimeBucket); 10] = [
    (200.0, LoadTimeBucket::Under200),
    (300.0, LoadTimeBucket::From200To300),
    (400.0, LoadTimeBucket::From300To400),
    (500.0, LoadTimeBucket::From400To500),
    (600.0, LoadTimeBucket::From500To600),
    (800.0, LoadTimeBucket::From600To800),
    (1000.0, LoadTimeBucket::From800To1000),
    (1200.0, LoadTimeBucket::From1000To1200),
    (1500.0, LoadTimeBucket::From1200To1500),
    (2000.0, LoadTimeBucket::From1500To2000),
];

const CPM_EDGES: [(f64, CpmBucket); 9] = [
    (0.5, CpmBucket::Under0_5),
    (1.0, CpmBucket::From0_5To1),
    (1.5, CpmBucket::From1To1_5),
    (2.0, CpmBucket::From1_5To2),
    (2.5, CpmBucket::From2To2_5),
    (3.0, CpmBucket::From2_5To3),
    (4.0, CpmBucket::From3To4),
    (6.0, CpmBucket::From4To6),
    (8.0, CpmBucket::From6To8),
];

/// Bucket a response time in milliseconds.
#[must_use]
pub fn load_time_bucket(millis: f64) -> Option<LoadTimeBucket> {
    bucket(millis, &LOAD_TIME_EDGES, LoadTimeBucket::Over2000)
}

/// Bucket a bid price.
#[must_use]
pub fn cpm_bucket(cpm: f64) -> Option<CpmBucket> {
    bucket(cpm, &CPM_EDGES, CpmBucket::Over8)
}

// `edges` holds exclusive upper bounds in ascending order.
fn bucket<B: Copy>(value: f64, edges: &[(f64, B)], top: B) -> Option<B> {
    if value.is_nan() || value < 0.0 {
        return None;
    }
    let found = edges
        .iter()
        .find(|(upper, _)| value < *upper)
        .map_or(top, |(_, bucket)| *bucket);
    Some(found)
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Mean and population standard deviation of a set of timing samples, in seconds.
///
/// Serialized as a two-element `[mean, std]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct TimingStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl TimingStats {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// Compute mean and population standard deviation (divisor `n`).
    ///
    /// Returns `None` for an empty sample set, where both are undefined.
    ///
    /// # Examples
    /// ```
    /// use sfs_stats::core::types::TimingStats;
    ///
    /// let stats = TimingStats::from_samples(&[1.5, 2.5]).unwrap();
    /// assert_eq!(stats.mean, 2.0);
    /// assert_eq!(stats.std_dev, 0.5);
    /// assert!(TimingStats::from_samples(&[]).is_none());
    /// ```
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let count = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / count;
        let variance = samples
            .iter()
            .map(|sample| (sample - mean).powi(2))
            .sum::<f64>()
            / count;

        Some(Self::new(mean, variance.sqrt()))
    }

    /// Sum of two timings assuming the two distributions are independent:
    /// means add, standard deviations add in quadrature.
    pub fn combined_with(&self, other: &TimingStats) -> TimingStats {
        TimingStats::new(
            self.mean + other.mean,
            self.std_dev.hypot(other.std_dev),
        )
    }
}

impl From<[f64; 2]> for TimingStats {
    fn from([mean, std_dev]: [f64; 2]) -> Self {
        Self::new(mean, std_dev)
    }
}

impl From<TimingStats> for [f64; 2] {
    fn from(stats: TimingStats) -> Self {
        [stats.mean, stats.std_dev]
    }
}

/// Everything extracted for one algorithm. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compress: Option<TimingStats>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflate: Option<TimingStats>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
}

/// Which field of an [`AlgorithmRecord`] a log file feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    Compress,
    Inflate,
    Volume,
}

impl LogKind {
    /// Classification order; the first matching suffix wins.
    pub const ALL: [LogKind; 3] = [LogKind::Compress, LogKind::Inflate, LogKind::Volume];

    pub fn suffix(&self) -> &'static str {
        use crate::core::constants::suffixes;
        match self {
            LogKind::Compress => suffixes::COMPRESS,
            LogKind::Inflate => suffixes::INFLATE,
            LogKind::Volume => suffixes::VOLUME,
        }
    }
}

/// Value extracted from a single log file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Extracted {
    Timing(TimingStats),
    Volume(u64),
}

/// Algorithm name to record mapping, built by a single directory scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultMap {
    records: BTreeMap<String, AlgorithmRecord>,
}

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value for the field named by `kind`, creating the record if needed.
    pub fn insert_for(&mut self, algorithm: &str, kind: LogKind, value: Extracted) {
        let record = self.records.entry(algorithm.to_string()).or_default();
        match (kind, value) {
            (LogKind::Compress, Extracted::Timing(stats)) => record.compress = Some(stats),
            (LogKind::Inflate, Extracted::Timing(stats)) => record.inflate = Some(stats),
            (LogKind::Volume, Extracted::Volume(volume)) => record.volume = Some(volume),
            (kind, value) => {
                log::warn!("Ignoring {value:?} for {algorithm}: not a {kind:?} value")
            }
        }
    }

    pub fn get(&self, algorithm: &str) -> Option<&AlgorithmRecord> {
        self.records.get(algorithm)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, AlgorithmRecord> {
        self.records.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}

impl FromIterator<(String, AlgorithmRecord)> for ResultMap {
    fn from_iter<I: IntoIterator<Item = (String, AlgorithmRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultMap {
    type Item = (&'a String, &'a AlgorithmRecord);
    type IntoIter = btree_map::Iter<'a, String, AlgorithmRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

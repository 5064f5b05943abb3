use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::{Result, StatsError};
use crate::core::types::TimingStats;
use crate::extraction::read_log;

use std::path::Path;

/// One `time` report line, e.g. `real    1m2.345s`.
const REAL_TIME_PATTERN: &str = r"(?i)^real\s+(\d+)m(\d+\.\d+)s$";

static REAL_TIME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(REAL_TIME_PATTERN).expect("Failed to compile real time pattern"));

/// Elapsed seconds of every `real` line in `content`, in file order.
///
/// Lines that are not `real` reports are skipped.
pub fn parse_real_times(content: &str) -> Vec<f64> {
    content
        .lines()
        .filter_map(|line| {
            let captures = REAL_TIME_REGEX.captures(line)?;
            let minutes: f64 = captures[1].parse().ok()?;
            let seconds: f64 = captures[2].parse().ok()?;
            Some(seconds + minutes * 60.0)
        })
        .collect()
}

/// Mean and population standard deviation of the `real` times in a
/// `.compress` or `.inflate` log.
///
/// A log without any `real` line is an error.
pub fn extract_real_times(path: &Path) -> Result<TimingStats> {
    let content = read_log(path)?;
    let samples = parse_real_times(&content);

    log::debug!(
        "{}: {} timing sample(s)",
        path.display(),
        samples.len()
    );

    TimingStats::from_samples(&samples).ok_or_else(|| StatsError::EmptySample {
        path: path.to_path_buf(),
    })
}

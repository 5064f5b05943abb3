use serde::{Deserialize, Serialize};

use crate::core::constants::algorithms;
use crate::core::error::{Result, StatsError};
use crate::core::types::{AlgorithmRecord, ResultMap};

use std::cmp::Ordering;

/// One row of the statistics table. Column names match the CSV header.
///
/// Every numeric cell is optional: a cell is empty when a field it depends on
/// was never extracted for that algorithm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub method: String,
    pub compress_mean: Option<f64>,
    pub compress_std: Option<f64>,
    pub inflate_mean: Option<f64>,
    pub inflate_std: Option<f64>,
    pub ratio: Option<f64>,
    #[serde(rename = "total", default)]
    pub total_mean: Option<f64>,
    #[serde(default)]
    pub total_std: Option<f64>,
}

impl TableRow {
    /// Derive a row from a record and the baseline `raw` volume.
    pub fn from_record(method: &str, record: &AlgorithmRecord, raw_volume: u64) -> Self {
        let total = match (&record.compress, &record.inflate) {
            (Some(compress), Some(inflate)) => Some(compress.combined_with(inflate)),
            _ => None,
        };

        Self {
            method: method.to_string(),
            compress_mean: record.compress.map(|stats| stats.mean),
            compress_std: record.compress.map(|stats| stats.std_dev),
            inflate_mean: record.inflate.map(|stats| stats.mean),
            inflate_std: record.inflate.map(|stats| stats.std_dev),
            ratio: record
                .volume
                .map(|volume| volume as f64 / raw_volume as f64),
            total_mean: total.map(|stats| stats.mean),
            total_std: total.map(|stats| stats.std_dev),
        }
    }

    /// Fill `total`/`total_std` from the compress and inflate columns when a
    /// table was stored without them.
    pub fn fill_derived(&mut self) {
        if self.total_mean.is_none()
            && let (Some(compress), Some(inflate)) = (self.compress_mean, self.inflate_mean)
        {
            self.total_mean = Some(compress + inflate);
        }
        if self.total_std.is_none()
            && let (Some(compress), Some(inflate)) = (self.compress_std, self.inflate_std)
        {
            self.total_std = Some(compress.hypot(inflate));
        }
    }
}

/// Table columns that can be charted or sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Compress,
    Inflate,
    Total,
    Ratio,
}

impl Metric {
    pub fn value(&self, row: &TableRow) -> Option<f64> {
        match self {
            Metric::Compress => row.compress_mean,
            Metric::Inflate => row.inflate_mean,
            Metric::Total => row.total_mean,
            Metric::Ratio => row.ratio,
        }
    }

    /// Spread drawn as an error bar, if the metric has one.
    pub fn error(&self, row: &TableRow) -> Option<f64> {
        match self {
            Metric::Compress => row.compress_std,
            Metric::Inflate => row.inflate_std,
            Metric::Total => row.total_std,
            Metric::Ratio => None,
        }
    }
}

/// Compare two optional values for a descending sort; missing values go last.
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The flattened, immutable statistics table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultTable {
    rows: Vec<TableRow>,
}

impl ResultTable {
    /// Build the table from a completed scan, sorted by descending inflate time.
    ///
    /// Requires a `raw` record with a non-zero volume.
    pub fn from_result_map(result_map: &ResultMap) -> Result<Self> {
        let raw_volume = baseline_volume(result_map)?;

        let mut rows: Vec<TableRow> = result_map
            .iter()
            .map(|(method, record)| TableRow::from_record(method, record, raw_volume))
            .collect();
        rows.sort_by(|a, b| descending(a.inflate_mean, b.inflate_mean));

        Ok(Self { rows })
    }

    /// Wrap rows read back from a stored table, keeping their order.
    pub fn from_rows(mut rows: Vec<TableRow>) -> Self {
        rows.iter_mut().for_each(TableRow::fill_derived);
        Self { rows }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, method: &str) -> Option<&TableRow> {
        self.rows.iter().find(|row| row.method == method)
    }

    /// Rows that have a value for `metric`, largest first.
    pub fn sorted_by(&self, metric: Metric) -> Vec<&TableRow> {
        let mut rows: Vec<&TableRow> = self
            .rows
            .iter()
            .filter(|row| metric.value(row).is_some())
            .collect();
        rows.sort_by(|a, b| descending(metric.value(a), metric.value(b)));
        rows
    }

    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.method.as_str())
    }
}

fn baseline_volume(result_map: &ResultMap) -> Result<u64> {
    let raw = result_map.get(algorithms::RAW).ok_or_else(|| {
        StatsError::MissingBaseline(format!(
            "no '{}' algorithm found in results",
            algorithms::RAW
        ))
    })?;

    match raw.volume {
        None => Err(StatsError::MissingBaseline(format!(
            "'{}' has no volume",
            algorithms::RAW
        ))),
        Some(0) => Err(StatsError::MissingBaseline(format!(
            "'{}' volume is 0, ratios are undefined",
            algorithms::RAW
        ))),
        Some(volume) => Ok(volume),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::core::types::{Extracted, LogKind, TimingStats};

    fn timing(mean: f64, std_dev: f64) -> Extracted {
        Extracted::Timing(TimingStats::new(mean, std_dev))
    }

    fn sample_map() -> ResultMap {
        let mut map = ResultMap::new();
        map.insert_for("raw", LogKind::Volume, Extracted::Volume(1000));
        map.insert_for("gzip", LogKind::Volume, Extracted::Volume(400));
        map.insert_for("gzip", LogKind::Compress, timing(2.0, 0.3));
        map.insert_for("gzip", LogKind::Inflate, timing(1.0, 0.4));
        map.insert_for("xz", LogKind::Volume, Extracted::Volume(250));
        map.insert_for("xz", LogKind::Compress, timing(9.0, 0.1));
        map.insert_for("xz", LogKind::Inflate, timing(3.0, 0.2));
        map
    }

    #[test]
    fn test_from_result_map__ratio() {
        let table = ResultTable::from_result_map(&sample_map()).unwrap();
        assert_eq!(table.get("gzip").unwrap().ratio, Some(0.4));
        assert_eq!(table.get("xz").unwrap().ratio, Some(0.25));
        assert_eq!(table.get("raw").unwrap().ratio, Some(1.0));
    }

    #[test]
    fn test_from_result_map__totals() {
        let table = ResultTable::from_result_map(&sample_map()).unwrap();
        let gzip = table.get("gzip").unwrap();
        assert_eq!(gzip.total_mean, Some(3.0));
        assert!((gzip.total_std.unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_from_result_map__sorted_by_inflate_desc() {
        let table = ResultTable::from_result_map(&sample_map()).unwrap();
        let methods: Vec<&str> = table.methods().collect();
        // raw has no inflate time and goes last
        assert_eq!(methods, vec!["xz", "gzip", "raw"]);
    }

    #[test]
    fn test_from_result_map__missing_fields_leave_cells_empty() {
        let table = ResultTable::from_result_map(&sample_map()).unwrap();
        let raw = table.get("raw").unwrap();
        assert_eq!(raw.compress_mean, None);
        assert_eq!(raw.inflate_std, None);
        assert_eq!(raw.total_mean, None);
        assert_eq!(raw.total_std, None);
    }

    #[test]
    fn test_from_result_map__missing_raw() {
        let mut map = ResultMap::new();
        map.insert_for("gzip", LogKind::Volume, Extracted::Volume(400));

        let err = ResultTable::from_result_map(&map).unwrap_err();
        assert!(matches!(err, StatsError::MissingBaseline(_)));
    }

    #[test]
    fn test_from_result_map__raw_without_volume() {
        let mut map = ResultMap::new();
        map.insert_for("raw", LogKind::Compress, timing(0.1, 0.0));

        let err = ResultTable::from_result_map(&map).unwrap_err();
        assert!(matches!(err, StatsError::MissingBaseline(_)));
    }

    #[test]
    fn test_from_result_map__zero_raw_volume() {
        let mut map = ResultMap::new();
        map.insert_for("raw", LogKind::Volume, Extracted::Volume(0));

        let err = ResultTable::from_result_map(&map).unwrap_err();
        assert!(format!("{err}").contains("volume is 0"));
    }

    #[test]
    fn test_sorted_by__skips_missing_values() {
        let table = ResultTable::from_result_map(&sample_map()).unwrap();

        let by_compress: Vec<&str> = table
            .sorted_by(Metric::Compress)
            .iter()
            .map(|row| row.method.as_str())
            .collect();
        assert_eq!(by_compress, vec!["xz", "gzip"]);

        let by_ratio: Vec<&str> = table
            .sorted_by(Metric::Ratio)
            .iter()
            .map(|row| row.method.as_str())
            .collect();
        assert_eq!(by_ratio, vec!["raw", "gzip", "xz"]);
    }

    #[test]
    fn test_metric_error_columns() {
        let table = ResultTable::from_result_map(&sample_map()).unwrap();
        let gzip = table.get("gzip").unwrap();
        assert_eq!(Metric::Compress.error(gzip), Some(0.3));
        assert_eq!(Metric::Inflate.error(gzip), Some(0.4));
        assert_eq!(Metric::Ratio.error(gzip), None);
    }

    #[test]
    fn test_fill_derived__computes_missing_totals() {
        let mut row = TableRow {
            method: "lz4".to_string(),
            compress_mean: Some(2.0),
            compress_std: Some(0.3),
            inflate_mean: Some(1.0),
            inflate_std: Some(0.4),
            ratio: Some(0.5),
            total_mean: None,
            total_std: None,
        };
        row.fill_derived();
        assert_eq!(row.total_mean, Some(3.0));
        assert!((row.total_std.unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_fill_derived__keeps_existing_totals() {
        let mut row = TableRow {
            method: "lz4".to_string(),
            compress_mean: Some(2.0),
            compress_std: Some(0.3),
            inflate_mean: Some(1.0),
            inflate_std: Some(0.4),
            ratio: None,
            total_mean: Some(10.0),
            total_std: Some(1.0),
        };
        row.fill_derived();
        assert_eq!(row.total_mean, Some(10.0));
        assert_eq!(row.total_std, Some(1.0));
    }
}

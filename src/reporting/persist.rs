use crate::aggregation::{ResultTable, TableRow};
use crate::core::constants::columns;
use crate::core::error::Result;
use crate::core::types::ResultMap;

use std::path::Path;

/// Serialize the per-algorithm mapping as JSON.
pub fn result_map_json(result_map: &ResultMap) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(result_map)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Serialize the table as CSV: header row, then one row per algorithm in
/// table order. Undefined cells are left empty.
pub fn table_csv(table: &ResultTable) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(columns::ALL)?;
    for row in table.rows() {
        writer.serialize(row)?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Read a table written by [`table_csv`], keeping its row order.
///
/// Tables stored without the `total` or `total_std` columns get them
/// recomputed from the compress and inflate columns.
pub fn read_table_csv(path: &Path) -> Result<ResultTable> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize::<TableRow>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(ResultTable::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::StatsError;
    use crate::core::types::{Extracted, LogKind, TimingStats};
    use std::fs;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn sample_table() -> ResultTable {
        let mut map = ResultMap::new();
        map.insert_for("raw", LogKind::Volume, Extracted::Volume(3000));
        map.insert_for("gzip", LogKind::Volume, Extracted::Volume(1000));
        map.insert_for(
            "gzip",
            LogKind::Compress,
            Extracted::Timing(TimingStats::new(2.1, 0.3)),
        );
        map.insert_for(
            "gzip",
            LogKind::Inflate,
            Extracted::Timing(TimingStats::new(0.7, 0.01)),
        );
        map.insert_for(
            "sfs+gzip",
            LogKind::Inflate,
            Extracted::Timing(TimingStats::new(0.123456789, 0.000001)),
        );
        ResultTable::from_result_map(&map).unwrap()
    }

    fn assert_close(a: Option<f64>, b: Option<f64>) {
        match (a, b) {
            (Some(a), Some(b)) => assert!((a - b).abs() <= 1e-12 * a.abs().max(1.0), "{a} != {b}"),
            (None, None) => {}
            _ => panic!("{a:?} != {b:?}"),
        }
    }

    #[test]
    fn test_table_csv_header_and_empty_cells() -> TestResult {
        let csv = String::from_utf8(table_csv(&sample_table())?)?;
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("method,compress_mean,compress_std,inflate_mean,inflate_std,ratio,total,total_std")
        );
        let raw_line = csv.lines().find(|line| line.starts_with("raw,")).unwrap();
        assert_eq!(raw_line, "raw,,,,,1.0,,");
        Ok(())
    }

    #[test]
    fn test_table_csv_round_trip() -> TestResult {
        let table = sample_table();
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("sfs_stats.csv");
        fs::write(&path, table_csv(&table)?)?;

        let read_back = read_table_csv(&path)?;
        assert_eq!(read_back.len(), table.len());

        for (original, restored) in table.rows().iter().zip(read_back.rows()) {
            assert_eq!(original.method, restored.method);
            assert_close(original.compress_mean, restored.compress_mean);
            assert_close(original.compress_std, restored.compress_std);
            assert_close(original.inflate_mean, restored.inflate_mean);
            assert_close(original.inflate_std, restored.inflate_std);
            assert_close(original.ratio, restored.ratio);
            assert_close(original.total_mean, restored.total_mean);
            assert_close(original.total_std, restored.total_std);
        }
        Ok(())
    }

    #[test]
    fn test_read_table_csv_without_total_std() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("sfs_stats.csv");
        fs::write(
            &path,
            "method,compress_mean,compress_std,inflate_mean,inflate_std,ratio,total\n\
             xz,2.0,0.3,1.0,0.4,0.25,3.0\n",
        )?;

        let table = read_table_csv(&path)?;
        let xz = table.get("xz").unwrap();
        assert_eq!(xz.total_mean, Some(3.0));
        assert!((xz.total_std.unwrap() - 0.5).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_read_table_csv_missing_file() {
        let err = read_table_csv(Path::new("/no/such/sfs_stats.csv")).unwrap_err();
        assert!(matches!(err, StatsError::Csv(_)));
    }

    #[test]
    fn test_result_map_json_shape() -> TestResult {
        let mut map = ResultMap::new();
        map.insert_for("raw", LogKind::Volume, Extracted::Volume(1000));
        map.insert_for(
            "lz4",
            LogKind::Compress,
            Extracted::Timing(TimingStats::new(0.5, 0.25)),
        );

        let value: serde_json::Value = serde_json::from_slice(&result_map_json(&map)?)?;
        assert_eq!(value["raw"]["volume"], 1000);
        assert_eq!(value["lz4"]["compress"], serde_json::json!([0.5, 0.25]));

        let restored: ResultMap = serde_json::from_value(value)?;
        assert_eq!(restored, map);
        Ok(())
    }
}

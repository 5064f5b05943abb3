//! Reporting
//!
//! This module turns the aggregated results into artifacts: the JSON
//! mapping, the CSV table and the comparison charts, plus the structured
//! logging used throughout the application.

pub mod charts;
pub mod logging;
pub mod pairing;
pub mod persist;

use std::fs;
use std::path::{Path, PathBuf};

use crate::aggregation::{Aggregate, Metric, ResultTable};
use crate::config::Config;
use crate::core::constants::artifacts;
use crate::core::error::Result;

// Re-export commonly used items
pub use charts::{BarChart, encode_jpeg};
pub use pairing::BoosterPairs;
pub use persist::{read_table_csv, result_map_json, table_csv};

/// A fully encoded output file waiting to be written.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

/// Every artifact of a run, encoded in memory before anything touches disk.
#[derive(Debug, Default)]
pub struct Report {
    artifacts: Vec<Artifact>,
}

impl Report {
    /// Mapping dump, table and all charts.
    pub fn build(aggregate: &Aggregate, config: &Config) -> Result<Self> {
        let mut report = Self {
            artifacts: vec![
                Artifact {
                    file_name: artifacts::RESULT_MAP,
                    bytes: result_map_json(&aggregate.result_map)?,
                },
                Artifact {
                    file_name: artifacts::STATS_CSV,
                    bytes: table_csv(&aggregate.table)?,
                },
            ],
        };
        report.artifacts.extend(render_charts(&aggregate.table, config)?);
        Ok(report)
    }

    /// Charts only, for re-plotting a stored table.
    pub fn charts_only(table: &ResultTable, config: &Config) -> Result<Self> {
        Ok(Self {
            artifacts: render_charts(table, config)?,
        })
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Create `dir` if needed and write every artifact into it.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        create_output_dir(dir)?;

        let mut written = Vec::with_capacity(self.artifacts.len());
        for artifact in &self.artifacts {
            let path = dir.join(artifact.file_name);
            fs::write(&path, &artifact.bytes)?;
            logging::log_artifact_written(&path, artifact.bytes.len());
            written.push(path);
        }
        Ok(written)
    }
}

/// Render the five comparison charts.
pub fn render_charts(table: &ResultTable, config: &Config) -> Result<Vec<Artifact>> {
    let pairs = BoosterPairs::from_names(table.methods());
    for boosted in pairs.unpaired() {
        logging::log_warning(&format!(
            "No base algorithm for '{boosted}', left out of the booster chart"
        ));
    }

    let charts = [
        (
            artifacts::COMPRESS_CHART,
            BarChart::for_metric("Formatting time (s)", table, Metric::Compress),
        ),
        (
            artifacts::INFLATE_CHART,
            BarChart::for_metric("Inflating time (s)", table, Metric::Inflate),
        ),
        (
            artifacts::TOTAL_CHART,
            BarChart::for_metric("Formatting+Inflating time (s)", table, Metric::Total),
        ),
        (
            artifacts::RATIOS_CHART,
            BarChart::for_metric("Compression ratios", table, Metric::Ratio),
        ),
        (artifacts::BOOSTER_CHART, BarChart::booster(table, &pairs)),
    ];

    let (width, height) = config.chart_size();
    charts
        .into_iter()
        .map(|(file_name, chart)| {
            log::debug!(
                "Rendering {file_name}: {} bar group(s)",
                chart.categories.len()
            );
            let bytes = encode_jpeg(&chart.render(width, height), config.jpeg_quality())?;
            Ok(Artifact { file_name, bytes })
        })
        .collect()
}

#[cfg(unix)]
fn create_output_dir(dir: &Path) -> Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o755).create(dir)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregate;
    use crate::extraction::Extractor;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn small_config() -> Config {
        Config {
            chart_width: Some(200),
            chart_height: Some(150),
            ..Default::default()
        }
    }

    fn write_results(dir: &Path) -> std::io::Result<()> {
        fs::write(dir.join("raw.volume"), "-rw-r--r-- 1 u g 1000 Jan 1 00:00 in\n")?;
        fs::write(dir.join("xz.volume"), "-rw-r--r-- 1 u g 300 Jan 1 00:00 in.xz\n")?;
        fs::write(dir.join("xz.compress"), "real 0m4.000s\n")?;
        fs::write(dir.join("xz.inflate"), "real 0m1.000s\n")?;
        fs::write(dir.join("sfs+xz.volume"), "-rw-r--r-- 1 u g 280 Jan 1 00:00 in.sxz\n")?;
        fs::write(dir.join("sfs+xz.compress"), "real 0m4.500s\n")?;
        fs::write(dir.join("sfs+xz.inflate"), "real 0m0.500s\n")
    }

    #[test]
    fn test_report_build_and_write() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        write_results(temp_dir.path())?;
        let aggregate = aggregate(temp_dir.path(), &Extractor::default())?;

        let report = Report::build(&aggregate, &small_config())?;
        let names: Vec<&str> = report.artifacts().iter().map(|a| a.file_name).collect();
        assert_eq!(
            names,
            vec![
                "result_map.json",
                "sfs_stats.csv",
                "compress.jpg",
                "inflate.jpg",
                "total.jpg",
                "ratios.jpg",
                "sfs_as_booster.jpg",
            ]
        );

        let output_dir = temp_dir.path().join("output");
        let written = report.write_to(&output_dir)?;
        assert_eq!(written.len(), 7);
        for path in written {
            assert!(path.is_file(), "{} missing", path.display());
        }
        Ok(())
    }

    #[test]
    fn test_charts_only() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        write_results(temp_dir.path())?;
        let aggregate = aggregate(temp_dir.path(), &Extractor::default())?;

        let report = Report::charts_only(&aggregate.table, &small_config())?;
        assert_eq!(report.artifacts().len(), 5);
        assert!(report.artifacts().iter().all(|a| a.file_name.ends_with(".jpg")));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_output_dir_permissions() -> TestResult {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir()?;
        let output_dir = temp_dir.path().join("output");
        create_output_dir(&output_dir)?;
        // Existing directory is fine
        create_output_dir(&output_dir)?;

        let mode = fs::metadata(&output_dir)?.permissions().mode();
        // umask may only clear bits
        assert_eq!(mode & 0o700, 0o700);
        Ok(())
    }
}

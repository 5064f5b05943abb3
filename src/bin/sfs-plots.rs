use clap::Parser;
use sfs_stats::aggregation::ResultTable;
use sfs_stats::config::{Config, LoadedConfig};
use sfs_stats::core::StatsError;
use sfs_stats::core::constants::artifacts;
use sfs_stats::reporting::{Report, logging, read_table_csv};
use sfs_stats::ui::PlotsCli;

use std::path::Path;

fn main() {
    let cli = PlotsCli::parse();

    match run_plots_logic(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Re-render the charts of a stored table into the directory holding it
pub fn run_plots_logic(cli: &PlotsCli) -> Result<i32, Box<dyn std::error::Error>> {
    let LoadedConfig { config, skipped } = Config::load()?;
    logging::init_logger(config.log_level_filter());
    for (path, err) in &skipped {
        logging::log_config_skipped(path, err);
    }
    logging::log_config_info(&config);

    let table = load_stored_table(&cli.results)?;
    let report = Report::charts_only(&table, &config)?;
    report.write_to(&cli.results)?;

    Ok(0)
}

/// Read `<dir>/sfs_stats.csv`
pub fn load_stored_table(dir: &Path) -> Result<ResultTable, Box<dyn std::error::Error>> {
    if !dir.is_dir() {
        return Err(StatsError::MissingInput(dir.display().to_string()).into());
    }

    let csv_path = dir.join(artifacts::STATS_CSV);
    let table = read_table_csv(&csv_path).inspect_err(|e| {
        logging::log_error(
            &format!("Could not read '{}'", csv_path.display()),
            Some(e),
        );
    })?;
    logging::log_table_summary(table.len());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_load_stored_table_missing_dir() {
        let err = load_stored_table(Path::new("/definitely/not/a/dir")).unwrap_err();
        assert!(err.to_string().contains("No directory"));
    }

    #[test]
    fn test_load_stored_table_missing_csv() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        assert!(load_stored_table(temp_dir.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_load_stored_table() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(
            temp_dir.path().join("sfs_stats.csv"),
            "method,compress_mean,compress_std,inflate_mean,inflate_std,ratio,total,total_std\n\
             gzip,2.0,0.3,1.0,0.4,0.4,3.0,0.5\n\
             raw,,,,,1.0,,\n",
        )?;

        let table = load_stored_table(temp_dir.path())?;
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].method, "gzip");
        assert_eq!(table.get("raw").unwrap().ratio, Some(1.0));
        Ok(())
    }
}

use crate::config::Config;
use crate::core::error::StatsError;
use crate::core::types::{Extracted, LogKind};
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger. `RUST_LOG` still takes precedence over `level`.
pub fn init_logger(level: log::LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .parse_default_env();

    // A second initialisation (tests, embedding) keeps the first logger
    if builder.try_init().is_err() {
        return;
    }

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let (width, height) = config.chart_size();
    info!(
        "Configuration: charts={width}x{height}, jpeg_quality={}, precision={}",
        config.jpeg_quality(),
        config.display_precision()
    );
}

/// Log a discovered config file that could not be used
pub fn log_config_skipped(path: &Path, err: &StatsError) {
    warn!("Ignoring {}: {err}", path.display());
}

/// Log the start of a directory scan
pub fn log_scan_start(dir: &Path, file_count: usize) {
    info!(
        "Scanning {} ({file_count} top-level file(s))",
        dir.display()
    );
}

/// Log one extracted value
pub fn log_extracted(algorithm: &str, kind: LogKind, value: &Extracted) {
    match value {
        Extracted::Timing(stats) => debug!(
            "{algorithm} {kind:?}: mean={:.4}s std={:.4}s",
            stats.mean, stats.std_dev
        ),
        Extracted::Volume(volume) => debug!("{algorithm} {kind:?}: {volume} bytes"),
    }
}

/// Log the size of the aggregated table
pub fn log_table_summary(algorithms: usize) {
    info!("Aggregated {algorithms} algorithm(s)");
}

/// Log a written artifact
pub fn log_artifact_written(path: &Path, bytes: usize) {
    info!("Wrote {} ({bytes} bytes)", path.display());
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TimingStats;
    use std::io;

    #[test]
    fn test_logger_initialization_twice() {
        // Only the first call installs a logger; the second must not panic
        init_logger(log::LevelFilter::Debug);
        init_logger(log::LevelFilter::Off);
    }

    #[test]
    fn test_log_helpers() {
        log_config_info(&Config::default());
        log_scan_start(Path::new("results"), 3);
        log_extracted(
            "gzip",
            LogKind::Compress,
            &Extracted::Timing(TimingStats::new(1.0, 0.1)),
        );
        log_extracted("raw", LogKind::Volume, &Extracted::Volume(1000));
        log_table_summary(2);
        log_artifact_written(Path::new("results/output/sfs_stats.csv"), 120);
        log_warning("unpaired sfs+zstd");
        log_config_skipped(
            Path::new(".sfs-stats.toml"),
            &StatsError::Config("JPEG quality 0 is invalid".to_string()),
        );
    }

    #[test]
    fn test_log_error_with_and_without_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "missing");
        log_error("Could not read", Some(&io_error));
        log_error("Plain failure", None);
    }
}

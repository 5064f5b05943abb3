/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes file names, suffixes, column names and default
/// values used across the application.
/// Log file suffixes recognised by the directory scan
pub mod suffixes {
    /// Compression timing log suffix
    pub const COMPRESS: &str = "compress";
    /// Decompression timing log suffix
    pub const INFLATE: &str = "inflate";
    /// Output size log suffix
    pub const VOLUME: &str = "volume";
}

/// Reserved algorithm names and prefixes
pub mod algorithms {
    /// Baseline algorithm holding the size of the unmodified input
    pub const RAW: &str = "raw";
    /// Prefix marking the sfs-boosted variant of a base algorithm
    pub const BOOSTER_PREFIX: &str = "sfs+";
}

/// Output artifact names
pub mod artifacts {
    /// Directory created under the results directory
    pub const OUTPUT_DIR: &str = "output";
    /// Per-algorithm mapping dump
    pub const RESULT_MAP: &str = "result_map.json";
    /// Flattened statistics table
    pub const STATS_CSV: &str = "sfs_stats.csv";
    /// Compression time chart
    pub const COMPRESS_CHART: &str = "compress.jpg";
    /// Decompression time chart
    pub const INFLATE_CHART: &str = "inflate.jpg";
    /// Compression + decompression time chart
    pub const TOTAL_CHART: &str = "total.jpg";
    /// Compression ratio chart
    pub const RATIOS_CHART: &str = "ratios.jpg";
    /// Paired base/boosted decompression chart
    pub const BOOSTER_CHART: &str = "sfs_as_booster.jpg";
}

/// Column names of the statistics table
pub mod columns {
    pub const METHOD: &str = "method";
    pub const COMPRESS_MEAN: &str = "compress_mean";
    pub const COMPRESS_STD: &str = "compress_std";
    pub const INFLATE_MEAN: &str = "inflate_mean";
    pub const INFLATE_STD: &str = "inflate_std";
    pub const RATIO: &str = "ratio";
    pub const TOTAL: &str = "total";
    pub const TOTAL_STD: &str = "total_std";

    /// All columns in table order
    pub const ALL: [&str; 8] = [
        METHOD,
        COMPRESS_MEAN,
        COMPRESS_STD,
        INFLATE_MEAN,
        INFLATE_STD,
        RATIO,
        TOTAL,
        TOTAL_STD,
    ];
}

/// Configuration file lookup
pub mod config_files {
    /// Config file name searched in the current and parent directories
    pub const FILE_NAME: &str = ".sfs-stats.toml";
    /// Environment variable naming an explicit config file
    pub const ENV_VAR: &str = "SFS_STATS_CONFIG";
    /// Number of parent directories searched for the config file
    pub const PARENT_SEARCH_DEPTH: usize = 3;
}

/// Default configuration values
pub mod defaults {
    /// Default chart width in pixels
    pub const CHART_WIDTH: u32 = 800;
    /// Default chart height in pixels
    pub const CHART_HEIGHT: u32 = 600;
    /// Smallest accepted chart dimension
    pub const MIN_CHART_DIMENSION: u32 = 100;
    /// Largest accepted chart dimension
    pub const MAX_CHART_DIMENSION: u32 = 8000;
    /// Default JPEG quality
    pub const JPEG_QUALITY: u8 = 90;
    /// Default number of decimals in the printed table
    pub const DISPLAY_PRECISION: usize = 4;
    /// Largest meaningful precision for an f64
    pub const MAX_DISPLAY_PRECISION: usize = 17;
    /// Default log level
    pub const LOG_LEVEL: &str = "warn";
    /// Accepted log levels
    pub const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
}

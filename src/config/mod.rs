//! Configuration management
//!
//! This module handles loading and validating the optional TOML
//! configuration that controls rendering, table printing and logging.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::{config_files, defaults};
use crate::core::error::{Result, StatsError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Chart width in pixels
    pub chart_width: Option<u32>,

    /// Chart height in pixels
    pub chart_height: Option<u32>,

    /// JPEG quality for charts (1-100)
    pub jpeg_quality: Option<u8>,

    /// Decimals shown in the printed table
    pub display_precision: Option<usize>,

    /// Log level (off, error, warn, info, debug, trace)
    pub log_level: Option<String>,

    /// Print the table to stdout after a run
    pub print_table: Option<bool>,
}

/// A configuration plus the discovered files passed over on the way to it.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub skipped: Vec<(PathBuf, StatsError)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chart_width: Some(defaults::CHART_WIDTH),
            chart_height: Some(defaults::CHART_HEIGHT),
            jpeg_quality: Some(defaults::JPEG_QUALITY),
            display_precision: Some(defaults::DISPLAY_PRECISION),
            log_level: Some(defaults::LOG_LEVEL.to_string()),
            print_table: Some(true),
        }
    }
}

impl Config {
    /// Load configuration from file. Keys absent from the file keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StatsError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let loaded: Config = toml::from_str(&content).map_err(|e| {
            StatsError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::default();
        config.merge(loaded);
        config.validate()?;
        Ok(config)
    }

    /// Load the file named by `SFS_STATS_CONFIG`, or else the first
    /// `.sfs-stats.toml` found in the current directory or its parents,
    /// or else the defaults.
    ///
    /// Runs before the logger exists, so discovered files that fail to load
    /// are handed back in [`LoadedConfig::skipped`] instead of being logged.
    pub fn load() -> Result<LoadedConfig> {
        if let Some(path) = std::env::var_os(config_files::ENV_VAR) {
            return Ok(LoadedConfig {
                config: Self::load_from_file(PathBuf::from(path))?,
                skipped: Vec::new(),
            });
        }
        Ok(Self::load_from_standard_locations())
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> LoadedConfig {
        Self::discover_from(Path::new("."))
    }

    /// Search `start` and up to [`config_files::PARENT_SEARCH_DEPTH`] parents
    /// for a loadable config file.
    pub fn discover_from(start: &Path) -> LoadedConfig {
        let mut skipped = Vec::new();
        let mut dir = start.to_path_buf();

        for _ in 0..=config_files::PARENT_SEARCH_DEPTH {
            let path = dir.join(config_files::FILE_NAME);
            dir.push("..");
            if !path.is_file() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => return LoadedConfig { config, skipped },
                Err(e) => skipped.push((path, e)),
            }
        }

        // Fall back to defaults
        LoadedConfig {
            config: Self::default(),
            skipped,
        }
    }

    /// Overwrite fields that are set in `other`
    pub fn merge(&mut self, other: Config) {
        if other.chart_width.is_some() {
            self.chart_width = other.chart_width;
        }
        if other.chart_height.is_some() {
            self.chart_height = other.chart_height;
        }
        if other.jpeg_quality.is_some() {
            self.jpeg_quality = other.jpeg_quality;
        }
        if other.display_precision.is_some() {
            self.display_precision = other.display_precision;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        if other.print_table.is_some() {
            self.print_table = other.print_table;
        }
    }

    /// Chart dimensions as (width, height)
    pub fn chart_size(&self) -> (u32, u32) {
        (
            self.chart_width.unwrap_or(defaults::CHART_WIDTH),
            self.chart_height.unwrap_or(defaults::CHART_HEIGHT),
        )
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality.unwrap_or(defaults::JPEG_QUALITY)
    }

    pub fn display_precision(&self) -> usize {
        self.display_precision
            .unwrap_or(defaults::DISPLAY_PRECISION)
    }

    pub fn print_table(&self) -> bool {
        self.print_table.unwrap_or(true)
    }

    /// Log level filter for the logger
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(log::LevelFilter::Warn)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("chart_width", self.chart_width), ("chart_height", self.chart_height)] {
            if let Some(pixels) = value
                && !(defaults::MIN_CHART_DIMENSION..=defaults::MAX_CHART_DIMENSION).contains(&pixels)
            {
                return Err(StatsError::Config(format!(
                    "{name} of {pixels} pixels is out of range. Expected a value between {}-{}.",
                    defaults::MIN_CHART_DIMENSION,
                    defaults::MAX_CHART_DIMENSION
                )));
            }
        }

        if let Some(quality) = self.jpeg_quality
            && !(1..=100).contains(&quality)
        {
            return Err(StatsError::Config(format!(
                "JPEG quality {quality} is invalid. Expected a value between 1-100."
            )));
        }

        if let Some(precision) = self.display_precision
            && precision > defaults::MAX_DISPLAY_PRECISION
        {
            return Err(StatsError::Config(format!(
                "Display precision {precision} is too large. Expected at most {}.",
                defaults::MAX_DISPLAY_PRECISION
            )));
        }

        if let Some(ref level) = self.log_level
            && !defaults::LOG_LEVELS.contains(&level.to_lowercase().as_str())
        {
            return Err(StatsError::Config(format!(
                "Invalid log level '{level}'. Expected one of: {}.",
                defaults::LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

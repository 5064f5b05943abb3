use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::{Result, StatsError};
use crate::core::types::{LogKind, ResultMap};
use crate::extraction::Extract;
use crate::reporting::logging;

use std::path::{Path, PathBuf};

// Anchored at the suffix only, so algorithm names may contain dots.
static SUFFIX_PATTERNS: Lazy<Vec<(LogKind, Regex)>> = Lazy::new(|| {
    LogKind::ALL
        .iter()
        .map(|kind| {
            let pattern = format!(r"(?i)^(.+)\.{}$", regex::escape(kind.suffix()));
            let regex = Regex::new(&pattern).expect("Failed to compile suffix pattern");
            (*kind, regex)
        })
        .collect()
});

/// Split a log file name into its kind and algorithm name.
///
/// Suffixes are tried in [`LogKind::ALL`] order and the first match wins.
///
/// # Examples
/// ```
/// use sfs_stats::aggregation::scanner::classify;
/// use sfs_stats::core::LogKind;
///
/// assert_eq!(classify("sfs+xz.INFLATE"), Some((LogKind::Inflate, "sfs+xz")));
/// assert_eq!(classify("notes.txt"), None);
/// ```
pub fn classify(file_name: &str) -> Option<(LogKind, &str)> {
    SUFFIX_PATTERNS.iter().find_map(|(kind, regex)| {
        regex
            .captures(file_name)
            .and_then(|captures| captures.get(1))
            .map(|algorithm| (*kind, algorithm.as_str()))
    })
}

/// Regular files directly inside `dir`, sorted by file name. Subdirectories
/// are not entered.
pub fn list_top_level_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut builder = ignore::WalkBuilder::new(dir);
    builder
        .max_depth(Some(1))
        .standard_filters(false) // Every file counts, hidden or ignored alike
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        if entry.depth() == 0 {
            continue;
        }
        if entry.path().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Extract every recognised log directly inside `dir` into a [`ResultMap`].
///
/// Fails before reading anything when `dir` is not a directory, and on the
/// first log that cannot be extracted.
pub fn scan_directory<E: Extract>(dir: &Path, extractor: &E) -> Result<ResultMap> {
    if !dir.is_dir() {
        return Err(StatsError::MissingInput(dir.display().to_string()));
    }

    let files = list_top_level_files(dir)?;
    logging::log_scan_start(dir, files.len());

    let mut result_map = ResultMap::new();
    for path in &files {
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            logging::log_warning(&format!(
                "Skipping non UTF-8 file name: {}",
                path.display()
            ));
            continue;
        };

        let Some((kind, algorithm)) = classify(file_name) else {
            log::debug!("Ignoring {file_name}");
            continue;
        };

        let value = extractor.extract(kind, path).inspect_err(|e| {
            logging::log_error(&format!("Could not extract {}", path.display()), Some(e));
        })?;
        logging::log_extracted(algorithm, kind, &value);
        result_map.insert_for(algorithm, kind, value);
    }

    Ok(result_map)
}

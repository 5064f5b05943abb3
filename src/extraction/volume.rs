use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::{Result, StatsError};
use crate::extraction::read_log;

use std::path::Path;

/// A directory-listing row: the size is the fifth whitespace-separated token.
const VOLUME_PATTERN: &str = r"^(?:\S+\s+){4}(\d+)(?:\s|$)";

static VOLUME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(VOLUME_PATTERN).expect("Failed to compile volume pattern"));

/// Check that every non-blank line of `content` reports the same size and
/// return it. `path` is only used for error reporting.
pub fn parse_volume(path: &Path, content: &str) -> Result<u64> {
    let mut reference: Option<u64> = None;

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let malformed = || StatsError::MalformedRecord {
            path: path.to_path_buf(),
            line: index + 1,
            content: line.to_string(),
        };

        let volume: u64 = VOLUME_REGEX
            .captures(line)
            .and_then(|captures| captures[1].parse().ok())
            .ok_or_else(malformed)?;

        match reference {
            None => reference = Some(volume),
            Some(expected) if expected != volume => {
                return Err(StatsError::InconsistentVolume {
                    path: path.to_path_buf(),
                    line: index + 1,
                    expected,
                    found: volume,
                });
            }
            Some(_) => {}
        }
    }

    reference.ok_or_else(|| StatsError::EmptyVolume {
        path: path.to_path_buf(),
    })
}

/// Size reported by a `.volume` log. All trials must agree on it.
pub fn extract_volume(path: &Path) -> Result<u64> {
    let content = read_log(path)?;
    let volume = parse_volume(path, &content)?;
    log::debug!("{}: volume {volume}", path.display());
    Ok(volume)
}

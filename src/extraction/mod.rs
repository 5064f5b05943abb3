//! Log extraction
//!
//! This module turns a single benchmark log into a scalar statistic:
//! a timing summary for `.compress`/`.inflate` logs or a byte count for
//! `.volume` logs.

pub mod timing;
pub mod volume;

use std::fs;
use std::io;
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::{Extracted, LogKind};

// Re-export commonly used items
pub use timing::{extract_real_times, parse_real_times};
pub use volume::{extract_volume, parse_volume};

pub trait Extract {
    fn extract(&self, kind: LogKind, path: &Path) -> Result<Extracted>;
}

#[derive(Default, Debug)]
pub struct Extractor {}

impl Extract for Extractor {
    fn extract(&self, kind: LogKind, path: &Path) -> Result<Extracted> {
        match kind {
            LogKind::Compress | LogKind::Inflate => {
                extract_real_times(path).map(Extracted::Timing)
            }
            LogKind::Volume => extract_volume(path).map(Extracted::Volume),
        }
    }
}

/// Read a whole log file, naming the file in any IO error.
pub(crate) fn read_log(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        io::Error::new(e.kind(), format!("could not read '{}': {e}", path.display())).into()
    })
}

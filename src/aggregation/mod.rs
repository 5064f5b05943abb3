//! Result aggregation
//!
//! This module scans a results directory, feeds every recognised log to
//! the extractor and derives the flattened statistics table.

pub mod scanner;
pub mod table;

use std::path::Path;

use crate::core::error::Result;
use crate::core::types::ResultMap;
use crate::extraction::Extract;

// Re-export commonly used items
pub use scanner::{classify, list_top_level_files, scan_directory};
pub use table::{Metric, ResultTable, TableRow};

/// The per-algorithm mapping together with the table derived from it.
#[derive(Debug, Clone)]
pub struct Aggregate {
    pub result_map: ResultMap,
    pub table: ResultTable,
}

/// Scan `dir` and build both the mapping and the table.
pub fn aggregate<E: Extract>(dir: &Path, extractor: &E) -> Result<Aggregate> {
    let result_map = scan_directory(dir, extractor)?;
    let table = ResultTable::from_result_map(&result_map)?;
    Ok(Aggregate { result_map, table })
}

//! Aggregation of compression benchmark logs.
//!
//! A results directory holds one `<algorithm>.compress`,
//! `<algorithm>.inflate` and `<algorithm>.volume` log per benchmarked
//! tool. [`aggregation::aggregate`] extracts timing and size statistics
//! from them and derives a table normalized against the `raw` input size;
//! [`reporting::Report`] turns that into JSON, CSV and chart artifacts.

pub mod aggregation;
pub mod config;
pub mod core;
pub mod extraction;
pub mod reporting;
pub mod ui;

// Re-export commonly used items
pub use crate::aggregation::{Aggregate, ResultTable, TableRow, aggregate};
pub use crate::config::{Config, LoadedConfig};
pub use crate::core::{AlgorithmRecord, Result, ResultMap, StatsError, TimingStats};
pub use crate::extraction::{Extract, Extractor};
pub use crate::reporting::{BoosterPairs, Report};

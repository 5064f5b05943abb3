//! User interface
//!
//! This module contains the command-line definitions and the terminal
//! rendering of the statistics table.

pub mod cli;
pub mod output;

// Re-export commonly used items
pub use cli::{Cli, PlotsCli};
pub use output::{display_table, format_table};

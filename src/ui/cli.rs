// Command-line interface definitions for sfs-stats and sfs-plots

use clap::Parser;
use std::path::PathBuf;

/// Aggregate compression benchmark logs into a statistics table and charts
#[derive(Parser, Debug)]
#[command(name = "sfs-stats", author, version, about, long_about = None)]
pub struct Cli {
    /// Bench result directory
    pub results: PathBuf,
}

/// Render the comparison charts from an existing sfs_stats.csv
#[derive(Parser, Debug)]
#[command(name = "sfs-plots", author, version, about, long_about = None)]
pub struct PlotsCli {
    /// Directory holding sfs_stats.csv; charts are written next to it
    pub results: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definitions_are_valid() {
        Cli::command().debug_assert();
        PlotsCli::command().debug_assert();
    }

    #[test]
    fn test_cli_single_positional() {
        let cli = Cli::try_parse_from(["sfs-stats", "bench/results"]).unwrap();
        assert_eq!(cli.results, PathBuf::from("bench/results"));
    }

    #[test]
    fn test_cli_requires_directory() {
        assert!(Cli::try_parse_from(["sfs-stats"]).is_err());
    }

    #[test]
    fn test_cli_rejects_flags_and_extra_args() {
        assert!(Cli::try_parse_from(["sfs-stats", "a", "b"]).is_err());
        assert!(Cli::try_parse_from(["sfs-stats", "--recursive", "a"]).is_err());
    }
}

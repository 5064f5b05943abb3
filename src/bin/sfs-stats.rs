use clap::Parser;
use sfs_stats::aggregation::{Aggregate, aggregate};
use sfs_stats::config::{Config, LoadedConfig};
use sfs_stats::core::constants::artifacts;
use sfs_stats::extraction::Extractor;
use sfs_stats::reporting::{Report, logging};
use sfs_stats::ui::{Cli, output};

use std::path::{Path, PathBuf};

fn main() {
    let cli = Cli::parse();

    match run_stats_logic(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Whole pipeline: aggregate, encode every artifact, then write them.
pub fn run_stats_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let LoadedConfig { config, skipped } = Config::load()?;
    logging::init_logger(config.log_level_filter());
    for (path, err) in &skipped {
        logging::log_config_skipped(path, err);
    }
    logging::log_config_info(&config);

    let aggregate = aggregate_results(&cli.results)?;

    // Nothing is written unless every artifact could be produced
    let report = Report::build(&aggregate, &config).inspect_err(|e| {
        logging::log_error("Could not build report", Some(e));
    })?;

    let output_dir = output_dir_for(&cli.results);
    report.write_to(&output_dir)?;

    if config.print_table() {
        output::display_table(&aggregate.table, config.display_precision());
    }

    Ok(0)
}

/// Scan the results directory and derive the table
pub fn aggregate_results(results: &Path) -> Result<Aggregate, Box<dyn std::error::Error>> {
    let aggregate = aggregate(results, &Extractor::default()).inspect_err(|e| {
        logging::log_error(
            &format!("Could not aggregate '{}'", results.display()),
            Some(e),
        );
    })?;
    logging::log_table_summary(aggregate.table.len());
    Ok(aggregate)
}

/// Artifacts go to `<results>/output`
pub fn output_dir_for(results: &Path) -> PathBuf {
    results.join(artifacts::OUTPUT_DIR)
}

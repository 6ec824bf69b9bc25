//! Command-line interface for dendro.
//!
//! The `run` command clusters either the bundled demo dataset or a CSV file
//! and prints the partition reached after every merge.

mod commands;
mod input;

pub use commands::{
    Cli, CliError, Command, CsvArgs, ExecutionSummary, LinkageArg, MetricArg, RunCommand,
    RunSource, render_summary, run_cli,
};
pub use input::{DEMO_POINTS, demo_points};

use std::io::{self, Write};
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use dendro_core::{
    Agglomerative, AgglomerativeBuilder, DendroError, Dendrogram, EmptyInputPolicy, LinkageMethod,
    Metric, Partition, Point,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::input::{demo_points, read_csv};

const DEMO_SOURCE_NAME: &str = "demo";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "dendro",
    about = "Build an agglomerative clustering dendrogram and print every step."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster a dataset and print the partition after each merge.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Distance between two points.
    #[arg(long, value_enum, default_value_t = MetricArg::Euclidean)]
    pub metric: MetricArg,

    /// Distance between two clusters.
    #[arg(long, value_enum, default_value_t = LinkageArg::Complete)]
    pub linkage: LinkageArg,

    /// Fail on an input without points instead of printing one empty step.
    #[arg(long)]
    pub reject_empty: bool,

    /// Where the points come from.
    #[command(subcommand)]
    pub source: RunSource,
}

/// Input sources supported by `run`.
#[derive(Debug, Subcommand, Clone)]
pub enum RunSource {
    /// Cluster the bundled eleven-point one-dimensional dataset.
    Demo,
    /// Cluster points read from a comma-separated text file.
    Csv(CsvArgs),
}

/// CSV ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct CsvArgs {
    /// Path to a UTF-8 file with one comma-separated point per line.
    pub path: PathBuf,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Point metrics selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// Straight-line distance.
    Euclidean,
    /// Sum of absolute coordinate differences.
    Manhattan,
}

impl From<MetricArg> for Metric {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Euclidean => Self::Euclidean,
            MetricArg::Manhattan => Self::Manhattan,
        }
    }
}

/// Linkage policies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinkageArg {
    /// Closest pair of members.
    Single,
    /// Farthest pair of members.
    Complete,
    /// Mean over all member pairs.
    Average,
}

impl From<LinkageArg> for LinkageMethod {
    fn from(value: LinkageArg) -> Self {
        match value {
            LinkageArg::Single => Self::Single,
            LinkageArg::Complete => Self::Complete,
            LinkageArg::Average => Self::Average,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading points.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A coordinate could not be parsed as a number.
    #[error("line {line}: `{value}` is not a number: {source}")]
    Parse {
        /// 1-based line number in the input file.
        line: usize,
        /// The offending field, trimmed.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: ParseFloatError,
    },
    /// Clustering failed.
    #[error(transparent)]
    Core(#[from] DendroError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the clustered dataset.
    pub data_source: String,
    /// Every partition visited by the run.
    pub dendrogram: Dendrogram,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the points or clustering them fails.
///
/// # Examples
/// ```
/// # use dendro_cli::cli::{Cli, Command, LinkageArg, MetricArg, RunCommand, RunSource, run_cli};
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         metric: MetricArg::Euclidean,
///         linkage: LinkageArg::Complete,
///         reject_empty: false,
///         source: RunSource::Demo,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.data_source, "demo");
/// assert_eq!(summary.dendrogram.len(), 11);
/// # Ok::<(), dendro_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(metric = field::Empty, linkage = field::Empty, source = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let engine = build_engine(&command);

    let span = Span::current();
    span.record("metric", field::display(engine.metric()));
    span.record("linkage", field::display(engine.linkage()));

    let (data_source, points) = match command.source {
        RunSource::Demo => {
            span.record("source", field::display("demo"));
            (DEMO_SOURCE_NAME.to_owned(), demo_points())
        }
        RunSource::Csv(args) => {
            span.record("source", field::display("csv"));
            let CsvArgs { path, name } = args;
            let points = read_csv(&path)?;
            (derive_data_source_name(&path, name.as_deref()), points)
        }
    };

    let summary = cluster(&engine, data_source, points)?;
    info!(
        data_source = summary.data_source.as_str(),
        steps = summary.dendrogram.len(),
        "command completed"
    );
    Ok(summary)
}

pub(super) fn build_engine(command: &RunCommand) -> Agglomerative<Metric, LinkageMethod> {
    let policy = if command.reject_empty {
        EmptyInputPolicy::Reject
    } else {
        EmptyInputPolicy::SinglePartition
    };
    AgglomerativeBuilder::new()
        .with_metric(Metric::from(command.metric))
        .with_linkage(LinkageMethod::from(command.linkage))
        .with_empty_input_policy(policy)
        .build()
}

fn cluster(
    engine: &Agglomerative<Metric, LinkageMethod>,
    data_source: String,
    points: Vec<Point>,
) -> Result<ExecutionSummary, CliError> {
    let dendrogram = engine.run(points)?;
    Ok(ExecutionSummary {
        data_source,
        dendrogram,
    })
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "data_source".to_owned(), ToOwned::to_owned)
}

/// Renders every step of `summary` to `writer`.
///
/// Each step prints a header (`initial state`, then `iteration k` with the
/// merge distance) followed by one line holding the partition. A cluster is
/// written as ` [..] ` with points separated by `, ` and the coordinates of a
/// point joined by `-`.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use dendro_cli::cli::{ExecutionSummary, render_summary};
/// # use dendro_core::{LinkageMethod, Metric, hierarchical_clustering};
/// let dendrogram =
///     hierarchical_clustering([[0.0], [1.5]], &Metric::Euclidean, &LinkageMethod::Single)?;
/// let summary = ExecutionSummary { data_source: "pair".into(), dendrogram };
///
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.ends_with("iteration 1 (distance 1.5000)\n [0, 1.5] \n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "steps: {}", summary.dendrogram.len())?;
    for (index, step) in summary.dendrogram.iter().enumerate() {
        match step.merge() {
            None => writeln!(writer, "initial state")?,
            Some(merge) => writeln!(
                writer,
                "iteration {index} (distance {:.4})",
                merge.distance().value()
            )?,
        }
        write_partition(&mut writer, step.partition())?;
    }
    Ok(())
}

fn write_partition(writer: &mut impl Write, partition: &Partition) -> io::Result<()> {
    for cluster in partition {
        let members: Vec<String> = cluster.iter().map(render_point).collect();
        write!(writer, " [{}] ", members.join(", "))?;
    }
    writeln!(writer)
}

fn render_point(point: &Point) -> String {
    point
        .coordinates()
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join("-")
}

//! Point loading for the `run` command.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use dendro_core::Point;
use tracing::{Span, debug, field, instrument};

use super::commands::CliError;

/// One-dimensional dataset bundled with the `demo` source.
pub const DEMO_POINTS: [f64; 11] = [
    -1.0, -0.4, 1.0, 2.0, 3.1, 5.2, 8.45, 8.5, 9.9, 10.0, 12.5,
];

/// Returns the bundled demo dataset as points.
#[must_use]
pub fn demo_points() -> Vec<Point> {
    DEMO_POINTS.iter().map(|&value| Point::from([value])).collect()
}

#[instrument(name = "cli.read_csv", err, fields(path = field::Empty, points = field::Empty))]
pub(super) fn read_csv(path: &Path) -> Result<Vec<Point>, CliError> {
    let span = Span::current();
    span.record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let points = parse_points(BufReader::new(file), path)?;
    span.record("points", points.len());
    Ok(points)
}

/// Parses comma-separated coordinates, one point per line.
///
/// Blank lines and lines starting with `#` are skipped. Line numbers in
/// errors are 1-based.
pub(super) fn parse_points(reader: impl BufRead, path: &Path) -> Result<Vec<Point>, CliError> {
    let mut points = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        points.push(parse_line(trimmed, index + 1)?);
    }
    debug!(points = points.len(), "parsed points");
    Ok(points)
}

fn parse_line(line: &str, number: usize) -> Result<Point, CliError> {
    let coordinates = line
        .split(',')
        .map(|raw| {
            let raw = raw.trim();
            raw.parse::<f64>().map_err(|source| CliError::Parse {
                line: number,
                value: raw.to_owned(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Point::from(coordinates))
}

//! Pluggable point metrics.

use core::fmt;

use super::{
    euclidean::euclidean_distance,
    manhattan::manhattan_distance,
    types::{Distance, Result},
};

/// Computes the distance between two points.
///
/// Implementations must be deterministic and symmetric, return zero for
/// identical points, and reject points of differing length with
/// [`crate::DistanceError::DimensionMismatch`].
///
/// Any function or closure with the signature of [`euclidean_distance`]
/// implements this trait, so callers can plug in their own metric.
///
/// # Examples
/// ```
/// use dendro_core::{Distance, DistanceError, Metric, PointDistance};
///
/// let chebyshev = |left: &[f64], right: &[f64]| -> Result<Distance, DistanceError> {
///     let max = left
///         .iter()
///         .zip(right)
///         .map(|(l, r)| (l - r).abs())
///         .fold(0.0_f64, f64::max);
///     Distance::new(max)
/// };
///
/// assert_eq!(chebyshev.distance(&[0.0, 0.0], &[3.0, 4.0])?.value(), 4.0);
/// assert_eq!(Metric::Manhattan.distance(&[0.0, 0.0], &[3.0, 4.0])?.value(), 7.0);
/// # Ok::<(), DistanceError>(())
/// ```
pub trait PointDistance {
    /// Computes the distance between `left` and `right`.
    ///
    /// # Errors
    /// Returns a [`crate::DistanceError`] when the points cannot be compared.
    fn distance(&self, left: &[f64], right: &[f64]) -> Result<Distance>;

    /// Short label used in diagnostics.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> PointDistance for F
where
    F: Fn(&[f64], &[f64]) -> Result<Distance>,
{
    fn distance(&self, left: &[f64], right: &[f64]) -> Result<Distance> {
        self(left, right)
    }
}

/// Built-in point metrics.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Metric {
    /// Square root of the summed squared coordinate differences.
    #[default]
    Euclidean,
    /// Sum of absolute coordinate differences.
    Manhattan,
}

impl Metric {
    /// Returns the stable lowercase name of the metric.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PointDistance for Metric {
    fn distance(&self, left: &[f64], right: &[f64]) -> Result<Distance> {
        match self {
            Self::Euclidean => euclidean_distance(left, right),
            Self::Manhattan => manhattan_distance(left, right),
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}

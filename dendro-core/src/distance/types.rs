//! Domain primitives shared by the distance routines.

use core::{fmt, ops::Deref};

use thiserror::Error;

/// Identifies whether an error was produced while inspecting the left or right
/// point argument.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VectorKind {
    /// Value originating from the first argument.
    Left,
    /// Value originating from the second argument.
    Right,
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Errors emitted while computing distances.
///
/// Every variant describes invalid input: the caller handed the metric
/// something it cannot measure.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DistanceError {
    /// Input points had different lengths.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimensionality of the left-hand point.
        left: usize,
        /// Dimensionality of the right-hand point.
        right: usize,
    },
    /// Encountered a NaN or infinite coordinate in one of the points.
    #[error("{which} point contains a non-finite value at index {index}: {value}")]
    NonFinite {
        /// Argument holding the offending coordinate.
        which: VectorKind,
        /// Position of the offending coordinate.
        index: usize,
        /// The offending coordinate.
        value: f64,
    },
    /// A metric produced a negative or NaN distance.
    #[error("distance must be non-negative and not NaN (got {value})")]
    InvalidDistance {
        /// The rejected distance value.
        value: f64,
    },
}

/// Convenient alias for distance computations.
pub type Result<T> = core::result::Result<T, DistanceError>;

/// Coordinate slice that has been checked for finiteness.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Coordinates<'a>(&'a [f64]);

impl<'a> Coordinates<'a> {
    /// Validates and wraps a coordinate slice.
    ///
    /// Zero-dimensional points are accepted; two of them are simply at
    /// distance zero.
    pub(crate) fn new(values: &'a [f64], which: VectorKind) -> Result<Self> {
        for (index, value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(DistanceError::NonFinite {
                    which,
                    index,
                    value: *value,
                });
            }
        }

        Ok(Self(values))
    }

    pub(crate) fn dimension(&self) -> usize {
        self.0.len()
    }
}

impl Deref for Coordinates<'_> {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

/// Distance result newtype.
///
/// Values are never negative and never NaN. Positive infinity is allowed so
/// that overflowing metrics remain comparable.
///
/// # Examples
/// ```
/// use dendro_core::{Distance, DistanceError};
///
/// let distance = Distance::new(2.5)?;
/// assert_eq!(distance.value(), 2.5);
/// assert!(Distance::new(-1.0).is_err());
/// # Ok::<(), DistanceError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    /// Zero distance, as between a point and itself.
    pub const ZERO: Self = Self(0.0);

    /// Validates a distance produced by a custom metric or linkage.
    ///
    /// # Errors
    /// Returns [`DistanceError::InvalidDistance`] when `value` is negative or
    /// NaN.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() || value < 0.0 {
            return Err(DistanceError::InvalidDistance { value });
        }
        Ok(Self(value))
    }

    pub(crate) const fn from_raw(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw distance value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

//! Immutable input points.

use std::{ops::Deref, sync::Arc};

/// An ordered, fixed-length sequence of coordinates.
///
/// Points are immutable once built and share their storage, so every
/// partition recorded by a clustering run can hold its own copy of each point
/// without duplicating coordinates.
///
/// # Examples
/// ```
/// use dendro_core::Point;
///
/// let point = Point::from([1.0, 2.5]);
/// assert_eq!(point.dimension(), 2);
/// assert_eq!(point.coordinates(), &[1.0, 2.5]);
/// assert_eq!(point, Point::from(vec![1.0, 2.5]));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Point(Arc<[f64]>);

impl Point {
    /// Creates a point from its coordinates.
    #[must_use]
    pub fn new(coordinates: impl Into<Arc<[f64]>>) -> Self {
        Self(coordinates.into())
    }

    /// Returns the number of coordinates.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// Returns the coordinates in order.
    #[must_use]
    pub fn coordinates(&self) -> &[f64] {
        &self.0
    }
}

impl Deref for Point {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[f64]> for Point {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for Point {
    fn from(coordinates: Vec<f64>) -> Self {
        Self::new(coordinates)
    }
}

impl From<&[f64]> for Point {
    fn from(coordinates: &[f64]) -> Self {
        Self::new(coordinates)
    }
}

impl<const N: usize> From<[f64; N]> for Point {
    fn from(coordinates: [f64; N]) -> Self {
        Self::new(coordinates)
    }
}

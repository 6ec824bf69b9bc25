//! Non-empty collections of points.

use crate::{Point, Result, error::DendroError};

/// A non-empty, order-irrelevant collection of points.
///
/// Clusters can only be created from at least one point, so every linkage
/// function can rely on having something to compare.
///
/// # Examples
/// ```
/// use dendro_core::{Cluster, Point};
///
/// let left = Cluster::singleton(Point::from([1.0]));
/// let right = Cluster::singleton(Point::from([2.0]));
/// let merged = left.merge(&right);
/// assert_eq!(merged.size(), 2);
/// assert_eq!(merged.points()[0], Point::from([1.0]));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    points: Vec<Point>,
}

impl Cluster {
    /// Creates a cluster holding a single point.
    #[must_use]
    pub fn singleton(point: Point) -> Self {
        Self {
            points: vec![point],
        }
    }

    /// Creates a cluster from explicit points.
    ///
    /// # Errors
    /// Returns [`DendroError::EmptyCluster`] when `points` is empty.
    ///
    /// # Examples
    /// ```
    /// use dendro_core::{Cluster, DendroError, Point};
    ///
    /// let cluster = Cluster::try_from_points(vec![Point::from([0.0]), Point::from([1.0])])?;
    /// assert_eq!(cluster.size(), 2);
    /// assert_eq!(Cluster::try_from_points(Vec::new()), Err(DendroError::EmptyCluster));
    /// # Ok::<(), DendroError>(())
    /// ```
    pub fn try_from_points(points: Vec<Point>) -> Result<Self> {
        if points.is_empty() {
            return Err(DendroError::EmptyCluster);
        }
        Ok(Self { points })
    }

    /// Returns a new cluster holding this cluster's points followed by
    /// `other`'s points.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut points = Vec::with_capacity(self.points.len() + other.points.len());
        points.extend_from_slice(&self.points);
        points.extend_from_slice(&other.points);
        Self { points }
    }

    /// Returns the points in insertion order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the number of points. Always at least one.
    #[must_use]
    pub fn size(&self) -> usize {
        self.points.len()
    }

    /// Iterates over the points.
    pub fn iter(&self) -> core::slice::Iter<'_, Point> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a Cluster {
    type Item = &'a Point;
    type IntoIter = core::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

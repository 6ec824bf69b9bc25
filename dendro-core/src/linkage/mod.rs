//! Cluster-to-cluster linkage policies.
//!
//! A linkage reduces the point distances between two clusters to a single
//! value that decides merge order. Every policy here compares all
//! `|left| x |right|` point pairs exhaustively; there is no sampling or
//! approximation. The point metric is a parameter, so any metric can be
//! paired with any policy.

use core::fmt;

use crate::{
    Cluster,
    distance::{Distance, PointDistance, Result},
};

/// Computes the distance between two clusters.
///
/// Implemented by [`LinkageMethod`] and by any closure with the matching
/// signature.
///
/// # Examples
/// ```
/// use dendro_core::{Cluster, DistanceError, Linkage, LinkageMethod, Metric, Point};
///
/// let left = Cluster::try_from_points(vec![Point::from([0.0]), Point::from([2.0])])
///     .expect("cluster is non-empty");
/// let right = Cluster::singleton(Point::from([5.0]));
///
/// let single = LinkageMethod::Single.cluster_distance(&left, &right, &Metric::Euclidean)?;
/// let complete = LinkageMethod::Complete.cluster_distance(&left, &right, &Metric::Euclidean)?;
/// let average = LinkageMethod::Average.cluster_distance(&left, &right, &Metric::Euclidean)?;
/// assert_eq!((single.value(), complete.value(), average.value()), (3.0, 5.0, 4.0));
/// # Ok::<(), DistanceError>(())
/// ```
pub trait Linkage {
    /// Aggregates the point distances between `left` and `right`.
    ///
    /// # Errors
    /// Propagates the first [`crate::DistanceError`] raised by `metric`.
    fn cluster_distance(
        &self,
        left: &Cluster,
        right: &Cluster,
        metric: &dyn PointDistance,
    ) -> Result<Distance>;

    /// Short label used in diagnostics.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Linkage for F
where
    F: Fn(&Cluster, &Cluster, &dyn PointDistance) -> Result<Distance>,
{
    fn cluster_distance(
        &self,
        left: &Cluster,
        right: &Cluster,
        metric: &dyn PointDistance,
    ) -> Result<Distance> {
        self(left, right, metric)
    }
}

/// Built-in linkage policies.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum LinkageMethod {
    /// Minimum pairwise distance (single-link).
    Single,
    /// Maximum pairwise distance (complete-link).
    #[default]
    Complete,
    /// Mean of all pairwise distances (average-link).
    Average,
}

impl LinkageMethod {
    /// Returns the stable lowercase name of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Complete => "complete",
            Self::Average => "average",
        }
    }
}

impl fmt::Display for LinkageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Linkage for LinkageMethod {
    fn cluster_distance(
        &self,
        left: &Cluster,
        right: &Cluster,
        metric: &dyn PointDistance,
    ) -> Result<Distance> {
        match self {
            Self::Single => single_linkage(left, right, metric),
            Self::Complete => complete_linkage(left, right, metric),
            Self::Average => average_linkage(left, right, metric),
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}

/// Returns the smallest point distance between the two clusters.
///
/// # Errors
/// Propagates the first [`crate::DistanceError`] raised by `metric`.
pub fn single_linkage<D>(left: &Cluster, right: &Cluster, metric: &D) -> Result<Distance>
where
    D: PointDistance + ?Sized,
{
    let mut nearest = f64::INFINITY;
    for_each_pair(left, right, metric, |distance| {
        if distance < nearest {
            nearest = distance;
        }
    })?;
    Ok(Distance::from_raw(nearest))
}

/// Returns the largest point distance between the two clusters.
///
/// # Errors
/// Propagates the first [`crate::DistanceError`] raised by `metric`.
pub fn complete_linkage<D>(left: &Cluster, right: &Cluster, metric: &D) -> Result<Distance>
where
    D: PointDistance + ?Sized,
{
    let mut farthest = f64::NEG_INFINITY;
    for_each_pair(left, right, metric, |distance| {
        if distance > farthest {
            farthest = distance;
        }
    })?;
    Ok(Distance::from_raw(farthest))
}

/// Returns the mean point distance between the two clusters.
///
/// # Errors
/// Propagates the first [`crate::DistanceError`] raised by `metric`.
#[expect(
    clippy::cast_precision_loss,
    reason = "pair counts stay far below 2^52, where f64 is exact"
)]
pub fn average_linkage<D>(left: &Cluster, right: &Cluster, metric: &D) -> Result<Distance>
where
    D: PointDistance + ?Sized,
{
    let mut sum = 0.0_f64;
    for_each_pair(left, right, metric, |distance| sum += distance)?;
    // Clusters are never empty, so the divisor is at least one.
    let pairs = left.size() * right.size();
    Ok(Distance::from_raw(sum / pairs as f64))
}

fn for_each_pair<D>(
    left: &Cluster,
    right: &Cluster,
    metric: &D,
    mut visit: impl FnMut(f64),
) -> Result<()>
where
    D: PointDistance + ?Sized,
{
    for a in left {
        for b in right {
            visit(metric.distance(a, b)?.value());
        }
    }
    Ok(())
}

//! The agglomerative merge loop.
//!
//! Each iteration evaluates the linkage distance of every unordered cluster
//! pair, merges the closest pair and records the resulting partition. The
//! loop re-scans all pairs every step; no distances are carried across
//! merges. Ties resolve to the first pair in `(i, j)` scan order, so results
//! depend only on the input order.

use tracing::{debug, info, instrument, warn};

use crate::{
    Cluster, Point, Result,
    builder::EmptyInputPolicy,
    dendrogram::{Dendrogram, Merge, Partition, Step},
    distance::PointDistance,
    error::DendroError,
    linkage::Linkage,
};

/// Configured clustering engine.
///
/// Construct one through [`crate::AgglomerativeBuilder`].
///
/// # Examples
/// ```
/// use dendro_core::{AgglomerativeBuilder, LinkageMethod, Metric, Point};
///
/// let engine = AgglomerativeBuilder::new()
///     .with_metric(Metric::Manhattan)
///     .with_linkage(LinkageMethod::Single)
///     .build();
/// let dendrogram = engine.run([Point::from([0.0, 0.0]), Point::from([1.0, 1.0])])?;
/// assert_eq!(dendrogram.len(), 2);
/// # Ok::<(), dendro_core::DendroError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Agglomerative<D, L> {
    metric: D,
    linkage: L,
    empty_input: EmptyInputPolicy,
}

impl<D, L> Agglomerative<D, L> {
    pub(crate) const fn new(metric: D, linkage: L, empty_input: EmptyInputPolicy) -> Self {
        Self {
            metric,
            linkage,
            empty_input,
        }
    }

    /// Returns the configured point metric.
    #[must_use]
    pub const fn metric(&self) -> &D {
        &self.metric
    }

    /// Returns the configured linkage policy.
    #[must_use]
    pub const fn linkage(&self) -> &L {
        &self.linkage
    }

    /// Returns how empty input is handled.
    #[must_use]
    pub const fn empty_input_policy(&self) -> EmptyInputPolicy {
        self.empty_input
    }
}

impl<D, L> Agglomerative<D, L>
where
    D: PointDistance,
    L: Linkage,
{
    /// Clusters `points`, returning every intermediate partition.
    ///
    /// # Errors
    /// - [`DendroError::InvalidInput`] when two compared points cannot be
    ///   measured, for example because their lengths differ.
    /// - [`DendroError::EmptyInput`] when `points` is empty and the policy is
    ///   [`EmptyInputPolicy::Reject`].
    /// - [`DendroError::NoMergeCandidate`] when every remaining pair has an
    ///   infinite linkage distance.
    pub fn run<P>(&self, points: P) -> Result<Dendrogram>
    where
        P: IntoIterator,
        P::Item: Into<Point>,
    {
        let points = points.into_iter().map(Into::into).collect();
        agglomerate(points, &self.metric, &self.linkage, self.empty_input)
    }
}

/// Clusters `points` with an explicit point metric and linkage policy.
///
/// Empty input yields a single empty partition; use
/// [`crate::AgglomerativeBuilder`] to reject it instead.
///
/// # Errors
/// Same as [`Agglomerative::run`], minus [`DendroError::EmptyInput`].
///
/// # Examples
/// ```
/// use dendro_core::{LinkageMethod, Metric, hierarchical_clustering};
///
/// let points = [[-1.0], [-0.4], [1.0], [8.45], [8.5]];
/// let dendrogram =
///     hierarchical_clustering(points, &Metric::Euclidean, &LinkageMethod::Complete)?;
///
/// let first = dendrogram.get(1).and_then(|step| step.merge()).copied();
/// assert_eq!(first.map(|merge| (merge.left(), merge.right())), Some((3, 4)));
/// # Ok::<(), dendro_core::DendroError>(())
/// ```
pub fn hierarchical_clustering<P, D, L>(points: P, metric: &D, linkage: &L) -> Result<Dendrogram>
where
    P: IntoIterator,
    P::Item: Into<Point>,
    D: PointDistance,
    L: Linkage,
{
    let points = points.into_iter().map(Into::into).collect();
    agglomerate(points, metric, linkage, EmptyInputPolicy::default())
}

#[instrument(
    name = "core.run",
    err,
    skip_all,
    fields(
        points = points.len(),
        metric = %metric.name(),
        linkage = %linkage.name(),
        empty_input = ?empty_input,
    ),
)]
fn agglomerate(
    points: Vec<Point>,
    metric: &dyn PointDistance,
    linkage: &dyn Linkage,
    empty_input: EmptyInputPolicy,
) -> Result<Dendrogram> {
    if points.is_empty() {
        return match empty_input {
            EmptyInputPolicy::Reject => {
                warn!("input contains no points, returning error");
                Err(DendroError::EmptyInput)
            }
            EmptyInputPolicy::SinglePartition => {
                warn!("input contains no points, returning a single empty partition");
                Ok(Dendrogram::from_steps(vec![Step::new(
                    Partition::default(),
                    None,
                )]))
            }
        };
    }

    let mut current = Partition::singletons(points);
    let mut steps = Vec::with_capacity(current.cluster_count());
    let mut produced_by = None;

    while current.cluster_count() > 1 {
        let merge = closest_pair(current.clusters(), metric, linkage)?;
        let next = current
            .merged(&merge)
            .ok_or(DendroError::NoMergeCandidate {
                clusters: current.cluster_count(),
            })?;
        debug!(
            step = steps.len() + 1,
            left = merge.left(),
            right = merge.right(),
            distance = merge.distance().value(),
            clusters = next.cluster_count(),
            "merged closest clusters"
        );
        steps.push(Step::new(current, produced_by));
        current = next;
        produced_by = Some(merge);
    }
    steps.push(Step::new(current, produced_by));

    info!(steps = steps.len(), "clustering completed");
    Ok(Dendrogram::from_steps(steps))
}

/// Finds the pair `(i, j)`, `i < j`, with the strictly smallest linkage
/// distance, keeping the first pair found on ties.
fn closest_pair(
    clusters: &[Cluster],
    metric: &dyn PointDistance,
    linkage: &dyn Linkage,
) -> Result<Merge> {
    let mut best: Option<Merge> = None;
    let mut best_distance = f64::INFINITY;

    for (i, left) in clusters.iter().enumerate() {
        for (j, right) in clusters.iter().enumerate().skip(i + 1) {
            let distance = linkage.cluster_distance(left, right, metric)?;
            if distance.value() < best_distance {
                best_distance = distance.value();
                best = Some(Merge::new(i, j, distance));
            }
        }
    }

    best.ok_or(DendroError::NoMergeCandidate {
        clusters: clusters.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::{Distance, LinkageMethod, Metric};

    fn singletons(values: &[f64]) -> Vec<Cluster> {
        values
            .iter()
            .map(|&v| Cluster::singleton(Point::from([v])))
            .collect()
    }

    #[rstest]
    #[case::first_pair_wins(&[0.0, 1.0, 2.0], (0, 1))]
    #[case::later_tie_ignored(&[0.0, 10.0, 1.0, 11.0], (0, 2))]
    #[case::strictly_smaller_replaces(&[0.0, 5.0, 5.5], (1, 2))]
    fn closest_pair_resolves_ties_in_scan_order(
        #[case] values: &[f64],
        #[case] expected: (usize, usize),
    ) {
        let clusters = singletons(values);
        let merge = closest_pair(&clusters, &Metric::Euclidean, &LinkageMethod::Complete)
            .expect("a closest pair exists");
        assert_eq!((merge.left(), merge.right()), expected);
    }

    #[test]
    fn closest_pair_rejects_all_infinite_distances() {
        let unreachable = |_: &[f64], _: &[f64]| Distance::new(f64::INFINITY);
        let clusters = singletons(&[0.0, 1.0, 2.0]);

        let err = closest_pair(&clusters, &unreachable, &LinkageMethod::Single)
            .expect_err("no finite pair exists");
        assert_eq!(err, DendroError::NoMergeCandidate { clusters: 3 });
    }

    #[test]
    fn merged_partition_appends_combined_cluster() {
        let partition = Partition::singletons(vec![
            Point::from([0.0]),
            Point::from([1.0]),
            Point::from([2.0]),
        ]);
        let merge = Merge::new(0, 2, Distance::ZERO);

        let next = partition.merged(&merge).expect("indices are valid");
        let flattened: Vec<Vec<f64>> = next
            .iter()
            .map(|cluster| cluster.iter().map(|p| p[0]).collect())
            .collect();
        assert_eq!(flattened, vec![vec![1.0], vec![0.0, 2.0]]);
    }

    #[test]
    fn merged_partition_rejects_out_of_range_indices() {
        let partition = Partition::singletons(vec![Point::from([0.0])]);
        assert!(partition.merged(&Merge::new(0, 3, Distance::ZERO)).is_none());
    }
}

//! Step sequences produced by agglomerative clustering.
//!
//! A [`Dendrogram`] records every partition visited by a run, from the
//! all-singletons partition to the single root cluster. Partitions are built
//! fresh for each step and never mutated afterwards, so callers can hold on to
//! any step and cut the tree wherever they like.

use crate::{Cluster, Point, distance::Distance};

/// The pair of clusters joined to produce a step.
///
/// Indices refer to positions in the *previous* step's partition, with
/// `left < right`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Merge {
    left: usize,
    right: usize,
    distance: Distance,
}

impl Merge {
    pub(crate) const fn new(left: usize, right: usize, distance: Distance) -> Self {
        Self {
            left,
            right,
            distance,
        }
    }

    /// Index of the first merged cluster in the previous partition.
    #[must_use]
    pub const fn left(&self) -> usize {
        self.left
    }

    /// Index of the second merged cluster in the previous partition.
    #[must_use]
    pub const fn right(&self) -> usize {
        self.right
    }

    /// Linkage distance at which the two clusters merged.
    #[must_use]
    pub const fn distance(&self) -> Distance {
        self.distance
    }
}

/// Disjoint clusters that together cover every input point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Partition {
    clusters: Vec<Cluster>,
}

impl Partition {
    pub(crate) fn singletons(points: Vec<Point>) -> Self {
        Self {
            clusters: points.into_iter().map(Cluster::singleton).collect(),
        }
    }

    /// Builds the partition that results from merging `merge.left()` and
    /// `merge.right()`: the untouched clusters keep their order and the merged
    /// cluster is appended last.
    ///
    /// Returns `None` when either index is out of range.
    pub(crate) fn merged(&self, merge: &Merge) -> Option<Self> {
        let left = self.clusters.get(merge.left)?;
        let right = self.clusters.get(merge.right)?;

        let mut clusters = Vec::with_capacity(self.clusters.len().saturating_sub(1));
        clusters.extend(
            self.clusters
                .iter()
                .enumerate()
                .filter(|(index, _)| *index != merge.left && *index != merge.right)
                .map(|(_, cluster)| cluster.clone()),
        );
        clusters.push(left.merge(right));
        Some(Self { clusters })
    }

    /// Returns the clusters in partition order.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Number of clusters in the partition.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Total number of points across all clusters.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.clusters.iter().map(Cluster::size).sum()
    }

    /// Iterates over the clusters.
    pub fn iter(&self) -> core::slice::Iter<'_, Cluster> {
        self.clusters.iter()
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = &'a Cluster;
    type IntoIter = core::slice::Iter<'a, Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}

/// One entry of the step sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    partition: Partition,
    merge: Option<Merge>,
}

impl Step {
    pub(crate) const fn new(partition: Partition, merge: Option<Merge>) -> Self {
        Self { partition, merge }
    }

    /// Partition recorded at this step.
    #[must_use]
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Merge that produced this step, or `None` for the initial partition.
    #[must_use]
    pub const fn merge(&self) -> Option<&Merge> {
        self.merge.as_ref()
    }

    /// Consumes the step, returning its partition.
    #[must_use]
    pub fn into_partition(self) -> Partition {
        self.partition
    }
}

/// Full history of an agglomerative clustering run.
///
/// Step 0 holds one singleton cluster per input point; each later step holds
/// one cluster fewer; the last step holds a single cluster. For `N` input
/// points there are exactly `N` steps (one step holding an empty partition
/// when the input is empty).
///
/// # Examples
/// ```
/// use dendro_core::{LinkageMethod, Metric, Point, hierarchical_clustering};
///
/// let points = vec![Point::from([0.0]), Point::from([1.0]), Point::from([5.0])];
/// let dendrogram =
///     hierarchical_clustering(points, &Metric::Euclidean, &LinkageMethod::Complete)?;
///
/// assert_eq!(dendrogram.len(), 3);
/// let two = dendrogram.partition_with(2).expect("a two-cluster cut exists");
/// assert_eq!(two.cluster_count(), 2);
/// assert_eq!(dendrogram.final_partition().map(|p| p.point_count()), Some(3));
/// # Ok::<(), dendro_core::DendroError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Dendrogram {
    steps: Vec<Step>,
}

impl Dendrogram {
    pub(crate) const fn from_steps(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Returns every recorded step in order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns whether no step was recorded. A completed run always records
    /// at least the initial partition.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the step at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Iterates over the steps in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Returns the initial all-singletons partition.
    #[must_use]
    pub fn initial_partition(&self) -> Option<&Partition> {
        self.steps.first().map(Step::partition)
    }

    /// Returns the last partition, which holds a single cluster unless the
    /// input was empty.
    #[must_use]
    pub fn final_partition(&self) -> Option<&Partition> {
        self.steps.last().map(Step::partition)
    }

    /// Returns the partition holding exactly `clusters` clusters, cutting the
    /// tree at that level.
    #[must_use]
    pub fn partition_with(&self, clusters: usize) -> Option<&Partition> {
        self.steps
            .iter()
            .map(Step::partition)
            .find(|partition| partition.cluster_count() == clusters)
    }

    /// Iterates over the merges in the order they happened.
    pub fn merges(&self) -> impl Iterator<Item = &Merge> + '_ {
        self.steps.iter().filter_map(Step::merge)
    }

    /// Consumes the dendrogram, returning the bare partitions in step order.
    #[must_use]
    pub fn into_partitions(self) -> Vec<Partition> {
        self.steps.into_iter().map(Step::into_partition).collect()
    }
}

impl<'a> IntoIterator for &'a Dendrogram {
    type Item = &'a Step;
    type IntoIter = core::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl IntoIterator for Dendrogram {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

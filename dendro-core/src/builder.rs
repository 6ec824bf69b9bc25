//! Builder utilities for configuring agglomerative clustering.
//!
//! Exposes the empty-input policy and the builder used to choose the point
//! metric and linkage policy before constructing an [`Agglomerative`] engine.

use crate::{Agglomerative, distance::Metric, linkage::LinkageMethod};

/// Indicates how [`Agglomerative::run`] treats an input with no points.
///
/// # Examples
/// ```
/// use dendro_core::EmptyInputPolicy;
///
/// assert_eq!(EmptyInputPolicy::default(), EmptyInputPolicy::SinglePartition);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyInputPolicy {
    /// Return a step sequence holding one empty partition.
    #[default]
    SinglePartition,
    /// Fail with [`crate::DendroError::EmptyInput`].
    Reject,
}

/// Configures and constructs [`Agglomerative`] engines.
///
/// The point metric and the linkage policy are independent strategy values.
/// The defaults are [`Metric::Euclidean`] and [`LinkageMethod::Complete`];
/// either can be replaced by any [`crate::PointDistance`] or
/// [`crate::Linkage`] implementation, closures included.
///
/// # Examples
/// ```
/// use dendro_core::{AgglomerativeBuilder, EmptyInputPolicy, LinkageMethod, Metric};
///
/// let engine = AgglomerativeBuilder::new()
///     .with_metric(Metric::Manhattan)
///     .with_linkage(LinkageMethod::Average)
///     .with_empty_input_policy(EmptyInputPolicy::Reject)
///     .build();
/// assert_eq!(*engine.metric(), Metric::Manhattan);
/// assert_eq!(*engine.linkage(), LinkageMethod::Average);
/// assert_eq!(engine.empty_input_policy(), EmptyInputPolicy::Reject);
/// ```
#[derive(Debug, Clone)]
pub struct AgglomerativeBuilder<D = Metric, L = LinkageMethod> {
    metric: D,
    linkage: L,
    empty_input: EmptyInputPolicy,
}

impl Default for AgglomerativeBuilder {
    fn default() -> Self {
        Self {
            metric: Metric::Euclidean,
            linkage: LinkageMethod::Complete,
            empty_input: EmptyInputPolicy::SinglePartition,
        }
    }
}

impl AgglomerativeBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use dendro_core::{AgglomerativeBuilder, EmptyInputPolicy, LinkageMethod, Metric};
    ///
    /// let builder = AgglomerativeBuilder::new();
    /// assert_eq!(*builder.metric(), Metric::Euclidean);
    /// assert_eq!(*builder.linkage(), LinkageMethod::Complete);
    /// assert_eq!(builder.empty_input_policy(), EmptyInputPolicy::SinglePartition);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D, L> AgglomerativeBuilder<D, L> {
    /// Replaces the point metric.
    ///
    /// # Examples
    /// ```
    /// use dendro_core::{AgglomerativeBuilder, Distance, DistanceError, Point};
    ///
    /// let chebyshev = |left: &[f64], right: &[f64]| -> Result<Distance, DistanceError> {
    ///     let max = left
    ///         .iter()
    ///         .zip(right)
    ///         .map(|(l, r)| (l - r).abs())
    ///         .fold(0.0_f64, f64::max);
    ///     Distance::new(max)
    /// };
    /// let engine = AgglomerativeBuilder::new().with_metric(chebyshev).build();
    /// let dendrogram = engine.run([[0.0, 0.0], [3.0, 4.0]])?;
    /// let merge = dendrogram.merges().next().expect("two points merge once");
    /// assert_eq!(merge.distance().value(), 4.0);
    /// # Ok::<(), dendro_core::DendroError>(())
    /// ```
    #[must_use]
    pub fn with_metric<M>(self, metric: M) -> AgglomerativeBuilder<M, L> {
        AgglomerativeBuilder {
            metric,
            linkage: self.linkage,
            empty_input: self.empty_input,
        }
    }

    /// Replaces the linkage policy.
    ///
    /// # Examples
    /// ```
    /// use dendro_core::{AgglomerativeBuilder, LinkageMethod};
    ///
    /// let builder = AgglomerativeBuilder::new().with_linkage(LinkageMethod::Single);
    /// assert_eq!(*builder.linkage(), LinkageMethod::Single);
    /// ```
    #[must_use]
    pub fn with_linkage<K>(self, linkage: K) -> AgglomerativeBuilder<D, K> {
        AgglomerativeBuilder {
            metric: self.metric,
            linkage,
            empty_input: self.empty_input,
        }
    }

    /// Sets how empty input is handled.
    #[must_use]
    pub fn with_empty_input_policy(mut self, policy: EmptyInputPolicy) -> Self {
        self.empty_input = policy;
        self
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

    /// Returns the configured empty-input policy.
    #[must_use]
    pub const fn empty_input_policy(&self) -> EmptyInputPolicy {
        self.empty_input
    }

    /// Constructs the configured [`Agglomerative`] engine.
    ///
    /// # Examples
    /// ```
    /// use dendro_core::AgglomerativeBuilder;
    ///
    /// let engine = AgglomerativeBuilder::new().build();
    /// let dendrogram = engine.run(Vec::<Vec<f64>>::new())?;
    /// assert_eq!(dendrogram.len(), 1);
    /// # Ok::<(), dendro_core::DendroError>(())
    /// ```
    #[must_use]
    pub fn build(self) -> Agglomerative<D, L> {
        Agglomerative::new(self.metric, self.linkage, self.empty_input)
    }
}

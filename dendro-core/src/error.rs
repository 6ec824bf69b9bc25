//! Error types for the Dendro core library.
//!
//! Defines the error enum returned by clustering runs, stable
//! machine-readable codes for it and for [`DistanceError`], and a convenient
//! result alias.

use std::fmt;

use thiserror::Error;

use crate::distance::DistanceError;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

define_error_codes! {
    /// Stable codes describing [`DistanceError`] variants.
    enum DistanceErrorCode for DistanceError {
        /// Compared points had different dimensions.
        DimensionMismatch => DimensionMismatch { .. } => "DISTANCE_DIMENSION_MISMATCH",
        /// A point contained a NaN or infinite coordinate.
        NonFinite => NonFinite { .. } => "DISTANCE_NON_FINITE",
        /// A metric produced a negative or NaN distance.
        InvalidDistance => InvalidDistance { .. } => "DISTANCE_INVALID_VALUE",
    }
}

/// Error type produced when building clusters or running a clustering.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DendroError {
    /// Two points could not be compared.
    #[error("invalid input: {error}")]
    InvalidInput {
        #[source]
        /// Underlying distance error raised by the point metric.
        error: DistanceError,
    },
    /// The input contained no points and the run was configured to reject
    /// that.
    #[error("input contains no points")]
    EmptyInput,
    /// A cluster was requested from zero points.
    #[error("clusters must contain at least one point")]
    EmptyCluster,
    /// Every candidate pair had an infinite or NaN linkage distance, so no
    /// merge could be chosen.
    #[error("no finite merge candidate among {clusters} clusters")]
    NoMergeCandidate {
        /// Number of clusters in the partition that could not be reduced.
        clusters: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DendroError`] variants.
    enum DendroErrorCode for DendroError {
        /// Two points could not be compared.
        InvalidInput => InvalidInput { .. } => "DENDRO_INVALID_INPUT",
        /// The input contained no points.
        EmptyInput => EmptyInput => "DENDRO_EMPTY_INPUT",
        /// A cluster was requested from zero points.
        EmptyCluster => EmptyCluster => "DENDRO_EMPTY_CLUSTER",
        /// No finite merge candidate remained.
        NoMergeCandidate => NoMergeCandidate { .. } => "DENDRO_NO_MERGE_CANDIDATE",
    }
}

impl DendroError {
    /// Retrieve the inner [`DistanceErrorCode`] when the error originated in a
    /// point metric.
    #[must_use]
    pub const fn distance_code(&self) -> Option<DistanceErrorCode> {
        match self {
            Self::InvalidInput { error } => Some(error.code()),
            _ => None,
        }
    }
}

impl From<DistanceError> for DendroError {
    fn from(error: DistanceError) -> Self {
        Self::InvalidInput { error }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, DendroError>;

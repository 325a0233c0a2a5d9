//! `imbalance-nn` provides exact nearest neighbour queries for the resampling algorithms of the
//! `imbalance` workspace.
//!
//! ## The Big Picture
//!
//! Resampling algorithms such as SPIDER3 mutate the point cloud they are querying after almost
//! every decision. Instead of maintaining a mutable spatial index they rebuild a cheap index over
//! the current state of their collections and query it. This crate provides the two seams such an
//! algorithm needs: the [`NearestNeighbour`] trait, which builds an index from a batch of points,
//! and the [`NearestNeighbourIndex`] trait, which answers queries on that index.
//!
//! ## Determinism
//!
//! Results of [`NearestNeighbourIndex::k_nearest`] are sorted by increasing distance. Points at
//! exactly the same distance from the query are returned in ascending row order of the batch the
//! index was built from, so repeated queries over identical batches always produce identical
//! answers.
//!
//! ## Example
//!
//! ```rust
//! use imbalance_nn::{distance::L2Dist, LinearSearch, NearestNeighbour};
//! use ndarray::{arr1, arr2};
//!
//! let points = arr2(&[[0.0, 2.0], [10.0, 4.0], [4.0, 5.0]]);
//! let nn = LinearSearch::new().from_batch(&points, L2Dist).unwrap();
//!
//! let out = nn.k_nearest(arr1(&[0.0, 1.0]).view(), 2).unwrap();
//! let positions = out.into_iter().map(|(_, pos)| pos).collect::<Vec<_>>();
//! assert_eq!(positions, vec![0, 2]);
//! ```
use imbalance::Float;
use ndarray::{ArrayBase, ArrayView1, Data, Ix2};
use thiserror::Error;

use distance::Distance;

pub mod distance;
mod heap_elem;
mod linear;

pub use linear::*;

/// A single point of a batch
pub type Point<'a, F> = ArrayView1<'a, F>;

/// An index built over a borrowed batch of points
pub type NearestNeighbourBox<'a, F> = Box<dyn 'a + Send + Sync + NearestNeighbourIndex<F>>;

/// Error returned when building an index
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("points have dimension of 0")]
    ZeroDim,
}

/// Error returned when querying an index
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NnError {
    #[error("dimensions of query point and stored points are different")]
    WrongDimension,
    #[error("distance between query point and a stored point is not finite")]
    NonFiniteDistance,
}

/// Nearest neighbour algorithm builds an index from a batch of points.
///
/// The index borrows the batch, so it is cheap to rebuild whenever the underlying collection
/// changes.
pub trait NearestNeighbour: std::fmt::Debug + Send + Sync + Unpin {
    /// Builds an index over `batch`, whose rows are the points, using `dist_fn` as the metric.
    ///
    /// Returns an error if the points have dimensionality of 0.
    fn from_batch<'a, F: Float, DT: Data<Elem = F>, D: 'a + Distance<F>>(
        &self,
        batch: &'a ArrayBase<DT, Ix2>,
        dist_fn: D,
    ) -> Result<NearestNeighbourBox<'a, F>, BuildError>;
}

/// An index of points that answers nearest neighbour queries.
pub trait NearestNeighbourIndex<F: Float>: Send + Sync + Unpin {
    /// Returns the `k` points of the index closest to `point`, together with their row position
    /// in the batch. Points are sorted by increasing distance; equal distances are ordered by
    /// ascending row position. Fewer than `k` points are returned if the index is smaller.
    ///
    /// Returns an error if the query point has a different dimension than the stored points or
    /// if a distance cannot be ordered.
    fn k_nearest<'b>(
        &self,
        point: Point<'b, F>,
        k: usize,
    ) -> Result<Vec<(Point<F>, usize)>, NnError>;
}

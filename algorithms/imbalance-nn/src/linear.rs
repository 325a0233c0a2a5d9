use std::collections::BinaryHeap;

use imbalance::Float;
use ndarray::{ArrayBase, ArrayView2, Data, Ix2};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::{
    distance::Distance, heap_elem::MinHeapElem, BuildError, NearestNeighbour,
    NearestNeighbourBox, NearestNeighbourIndex, NnError, Point,
};

/// Spatial indexing structure created by [`LinearSearch`]
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSearchIndex<'a, F: Float, D: Distance<F>>(ArrayView2<'a, F>, D);

impl<'a, F: Float, D: Distance<F>> LinearSearchIndex<'a, F, D> {
    /// Creates a new `LinearSearchIndex` using the distance function provided.
    ///
    /// Returns an error if the points have dimensionality of 0.
    pub fn new<DT: Data<Elem = F>>(
        batch: &'a ArrayBase<DT, Ix2>,
        dist_fn: D,
    ) -> Result<Self, BuildError> {
        if batch.ncols() == 0 && batch.nrows() > 0 {
            Err(BuildError::ZeroDim)
        } else {
            Ok(Self(batch.view(), dist_fn))
        }
    }
}

impl<'a, F: Float, D: Distance<F>> NearestNeighbourIndex<F> for LinearSearchIndex<'a, F, D> {
    fn k_nearest<'b>(
        &self,
        point: Point<'b, F>,
        k: usize,
    ) -> Result<Vec<(Point<F>, usize)>, NnError> {
        if self.0.ncols() != point.len() {
            return Err(NnError::WrongDimension);
        }

        let mut heap = BinaryHeap::with_capacity(self.0.nrows());
        for (i, pt) in self.0.rows().into_iter().enumerate() {
            let dist = self.1.rdistance(point.reborrow(), pt.reborrow());
            if !dist.is_finite() {
                return Err(NnError::NonFiniteDistance);
            }
            heap.push(MinHeapElem::new(dist, i, pt));
        }

        Ok(std::iter::from_fn(|| heap.pop())
            .take(k)
            .map(|e| (e.elem, (e.dist.0).1))
            .collect())
    }
}

/// Implementation of linear search, which is the simplest nearest neighbour algorithm. All queries
/// are implemented by scanning through every point, so all of them are `O(N)`. Building the index
/// only borrows the batch, so it is `O(1)`, which suits algorithms that rebuild the index after
/// every change of their point cloud.
///
/// Equal distances are broken by row position, which makes every query fully deterministic.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct LinearSearch;

impl LinearSearch {
    /// Creates an instance of `LinearSearch`
    pub fn new() -> Self {
        Self
    }
}

impl NearestNeighbour for LinearSearch {
    fn from_batch<'a, F: Float, DT: Data<Elem = F>, D: 'a + Distance<F>>(
        &self,
        batch: &'a ArrayBase<DT, Ix2>,
        dist_fn: D,
    ) -> Result<NearestNeighbourBox<'a, F>, BuildError> {
        LinearSearchIndex::new(batch, dist_fn).map(|v| Box::new(v) as NearestNeighbourBox<F>)
    }
}

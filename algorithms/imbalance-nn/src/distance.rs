//! Distance metrics used to rank neighbours
use imbalance::Float;
use ndarray::Zip;
use ndarray_stats::DeviationExt;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::Point;

/// A distance function between two points of equal dimension.
///
/// Implementations should satisfy the triangle inequality, so squared Euclidean distance is
/// exposed only through [`rdistance`](Distance::rdistance).
pub trait Distance<F: Float>: Clone + Send + Sync + Unpin {
    /// Computes the distance between `a` and `b`.
    ///
    /// Panics if `a` and `b` are not of equal dimension.
    fn distance(&self, a: Point<F>, b: Point<F>) -> F;

    /// A cheaper "reduced" distance that ranks pairs of points in the same order as
    /// [`distance`](Distance::distance). Neighbour searches only compare reduced distances.
    fn rdistance(&self, a: Point<F>, b: Point<F>) -> F {
        self.distance(a, b)
    }

    /// Converts a reduced distance back to a distance
    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist
    }

    /// Converts a distance to a reduced distance
    fn dist_to_rdist(&self, dist: F) -> F {
        dist
    }
}

/// Manhattan distance
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct L1Dist;
impl<F: Float> Distance<F> for L1Dist {
    fn distance(&self, a: Point<F>, b: Point<F>) -> F {
        a.l1_dist(&b).unwrap()
    }
}

/// Euclidean distance, ranked through its square
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct L2Dist;
impl<F: Float> Distance<F> for L2Dist {
    fn distance(&self, a: Point<F>, b: Point<F>) -> F {
        a.sq_l2_dist(&b).unwrap().sqrt()
    }

    fn rdistance(&self, a: Point<F>, b: Point<F>) -> F {
        a.sq_l2_dist(&b).unwrap()
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist.sqrt()
    }

    fn dist_to_rdist(&self, dist: F) -> F {
        dist.powi(2)
    }
}

/// Chebyshev distance
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LInfDist;
impl<F: Float> Distance<F> for LInfDist {
    fn distance(&self, a: Point<F>, b: Point<F>) -> F {
        a.linf_dist(&b).unwrap()
    }
}

/// Minkowski distance of order `p`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LpDist<F: Float>(pub F);
impl<F: Float> Distance<F> for LpDist<F> {
    fn distance(&self, a: Point<F>, b: Point<F>) -> F {
        self.rdist_to_dist(self.rdistance(a, b))
    }

    fn rdistance(&self, a: Point<F>, b: Point<F>) -> F {
        Zip::from(&a)
            .and(&b)
            .fold(F::zero(), |acc, &a, &b| acc + (a - b).abs().powf(self.0))
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist.powf(F::one() / self.0)
    }

    fn dist_to_rdist(&self, dist: F) -> F {
        dist.powf(self.0)
    }
}

//! Neighbour queries over the working collections
//!
//! The collections change after almost every decision, so every query stacks the current
//! candidates into a fresh batch and builds a new index over it.
use imbalance::{Float, Label};
use imbalance_nn::{distance::Distance, NearestNeighbour};

use crate::error::Result;
use crate::example::{stack_features, Example};

pub(crate) struct Neighbourhood<'p, F: Float, D: Distance<F>, N: NearestNeighbour> {
    k: usize,
    nfeatures: usize,
    dist_fn: &'p D,
    nn_algo: &'p N,
    _float: std::marker::PhantomData<F>,
}

impl<'p, F: Float, D: Distance<F>, N: NearestNeighbour> Neighbourhood<'p, F, D, N> {
    pub(crate) fn new(k: usize, nfeatures: usize, dist_fn: &'p D, nn_algo: &'p N) -> Self {
        Neighbourhood {
            k,
            nfeatures,
            dist_fn,
            nn_algo,
            _float: std::marker::PhantomData,
        }
    }

    /// The `k` examples closest to `x` in the concatenation of `parts`, nearest first.
    ///
    /// Ties are resolved by position in the concatenation, so examples of an earlier part win
    /// over equally distant examples of a later one.
    pub(crate) fn k_nearest<'e, L: Label>(
        &self,
        x: &Example<F, L>,
        parts: &[&'e [Example<F, L>]],
    ) -> Result<Vec<&'e Example<F, L>>> {
        let candidates = parts.iter().flat_map(|p| p.iter()).collect::<Vec<_>>();
        let positions = self.positions(x, &candidates, self.k)?;

        Ok(positions.into_iter().map(|pos| candidates[pos]).collect())
    }

    /// Position of the member of `candidates` closest to `x`
    pub(crate) fn nearest<L: Label>(
        &self,
        x: &Example<F, L>,
        candidates: &[Example<F, L>],
    ) -> Result<Option<usize>> {
        let candidates = candidates.iter().collect::<Vec<_>>();
        let positions = self.positions(x, &candidates, 1)?;

        Ok(positions.first().copied())
    }

    fn positions<L: Label>(
        &self,
        x: &Example<F, L>,
        candidates: &[&Example<F, L>],
        k: usize,
    ) -> Result<Vec<usize>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let batch = stack_features(candidates, self.nfeatures).map_err(imbalance::error::Error::from)?;
        let index = self.nn_algo.from_batch(&batch, self.dist_fn.clone())?;
        let positions = index
            .k_nearest(x.features(), k)?
            .into_iter()
            .map(|(_, pos)| pos)
            .collect();

        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpiderError;
    use imbalance_nn::{distance::L2Dist, LinearSearch, NnError};
    use ndarray::array;

    fn ex(x: f64, y: f64, label: &'static str) -> Example<f64, &'static str> {
        Example::new(array![x, y], label)
    }

    #[test]
    fn earlier_parts_win_ties() {
        let (dist, algo) = (L2Dist, LinearSearch::new());
        let nn = Neighbourhood::new(2, 2, &dist, &algo);

        let first = vec![ex(5., 5., "a"), ex(1., 0., "a")];
        let second = vec![ex(1., 0., "b"), ex(0., 0., "b")];
        let out = nn
            .k_nearest(&ex(0., 0., "q"), &[&first, &second])
            .unwrap();
        assert_eq!(out, vec![&second[1], &first[1]]);

        let out = nn
            .k_nearest(&ex(1., 0., "q"), &[&second, &first])
            .unwrap();
        assert_eq!(out, vec![&second[0], &first[1]]);
    }

    #[test]
    fn fewer_candidates_than_k() {
        let (dist, algo) = (L2Dist, LinearSearch::new());
        let nn = Neighbourhood::new(5, 2, &dist, &algo);

        let set = vec![ex(1., 1., "a"), ex(2., 2., "a")];
        assert_eq!(nn.k_nearest(&ex(0., 0., "q"), &[&set]).unwrap().len(), 2);
        assert!(nn.k_nearest(&ex(0., 0., "q"), &[&[]]).unwrap().is_empty());
        assert_eq!(nn.nearest(&ex(3., 3., "q"), &set).unwrap(), Some(1));
        assert_eq!(nn.nearest(&ex(3., 3., "q"), &[]).unwrap(), None);
    }

    #[test]
    fn errors_are_propagated() {
        let (dist, algo) = (L2Dist, LinearSearch::new());
        let nn = Neighbourhood::new(1, 2, &dist, &algo);

        let set = vec![ex(f64::INFINITY, 0., "a")];
        let res = nn.k_nearest(&ex(0., 0., "q"), &[&set]);
        assert!(matches!(
            res,
            Err(SpiderError::NearestNeighbour(NnError::NonFiniteDistance))
        ));
    }
}

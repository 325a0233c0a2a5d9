//! Expected misclassification cost of a neighbourhood
//!
//! Given the labels of the neighbours of a point, the empirical class distribution `p` of the
//! neighbourhood is weighted with the cost matrix. Predicting class `j` then costs
//!
//! ```text
//! score(j) = sum_i p(i) * cost(i, j)
//! ```
//!
//! and the minimum cost classes are all classes attaining the smallest score.
use imbalance::{Float, Label};
use ndarray::Array1;

use crate::cost::CostModel;

impl<F: Float, L: Label> CostModel<F, L> {
    /// Expected cost of predicting each class, in cost matrix order, for a neighbourhood with
    /// the given labels.
    ///
    /// The class distribution is normalised by the number of neighbours actually given. An empty
    /// neighbourhood costs nothing for every class. Labels unknown to the model are skipped.
    pub fn scores<'a, I>(&self, neighbours: I) -> Array1<F>
    where
        I: IntoIterator<Item = &'a L>,
        L: 'a,
    {
        let mut counts = Array1::<F>::zeros(self.nclasses());
        let mut total = 0usize;
        for idx in neighbours.into_iter().filter_map(|l| self.index_of(l)) {
            counts[idx] += F::one();
            total += 1;
        }
        if total == 0 {
            return counts;
        }

        let distribution = counts / F::cast(total);
        distribution.dot(&self.cost)
    }

    /// Indices of the minimum cost classes, ascending
    pub fn min_cost_indices<'a, I>(&self, neighbours: I) -> Vec<usize>
    where
        I: IntoIterator<Item = &'a L>,
        L: 'a,
    {
        let scores = self.scores(neighbours);
        let min = scores.iter().cloned().fold(F::infinity(), F::min);

        // an exact comparison unless a tolerance was configured
        scores
            .iter()
            .enumerate()
            .filter(|(_, &s)| s <= min + self.tolerance)
            .map(|(i, _)| i)
            .collect()
    }

    /// The minimum cost classes for a neighbourhood. Ties are all included, in cost matrix order.
    pub fn min_cost_classes<'a, I>(&self, neighbours: I) -> Vec<L>
    where
        I: IntoIterator<Item = &'a L>,
        L: 'a,
    {
        self.min_cost_indices(neighbours)
            .into_iter()
            .map(|i| self.class(i).clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::cost::CostModel;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    fn symmetric() -> CostModel<f64, &'static str> {
        CostModel::new(&["MAJ"], &[], &["MIN"], array![[0., 1.], [1., 0.]], 0.)
    }

    #[test]
    fn scores_weight_distribution_with_costs() {
        let model = CostModel::new(
            &["MAJ"],
            &["INT"],
            &["MIN"],
            array![[0., 1., 2.], [3., 0., 4.], [5., 6., 0.]],
            0.,
        );

        // distribution (1/2, 1/4, 1/4)
        let scores = model.scores(&["MAJ", "MAJ", "INT", "MIN"]);
        assert_abs_diff_eq!(scores, array![2.0, 2.0, 2.0], epsilon = 1e-12);

        let scores = model.scores(&["INT"]);
        assert_abs_diff_eq!(scores, array![3., 0., 4.]);
        assert_eq!(model.min_cost_classes(&["INT"]), vec!["INT"]);
    }

    #[test]
    fn ties_are_all_returned() {
        let model = symmetric();
        assert_eq!(model.min_cost_classes(&["MIN", "MAJ"]), vec!["MAJ", "MIN"]);
        assert_eq!(model.min_cost_classes(&["MAJ", "MAJ", "MIN"]), vec!["MAJ"]);
        assert_eq!(model.min_cost_classes(&["MIN", "MIN", "MAJ"]), vec!["MIN"]);
    }

    #[test]
    fn empty_neighbourhood_makes_every_class_optimal() {
        let model = symmetric();
        assert_eq!(model.scores(&[]), array![0., 0.]);
        assert_eq!(model.min_cost_indices(&[]), vec![0, 1]);
    }

    #[test]
    fn distribution_uses_returned_count() {
        // a single neighbour, whatever k was requested, is a full vote
        let model = symmetric();
        assert_eq!(model.scores(&["MAJ"]), array![0., 1.]);
    }

    #[test]
    fn unknown_labels_are_skipped() {
        let model = symmetric();
        assert_eq!(model.scores(&["MIN", "other"]), array![1., 0.]);
    }

    #[test]
    fn tolerance_widens_the_set() {
        let cost = Array2::ones((2, 2)) - Array2::<f64>::eye(2);
        let model = CostModel::new(&["MAJ"], &[], &["MIN"], cost.clone(), 0.);
        // scores (2/3, 1/3)
        assert_eq!(model.min_cost_classes(&["MAJ", "MIN", "MIN"]), vec!["MIN"]);

        let model = CostModel::new(&["MAJ"], &[], &["MIN"], cost, 0.5);
        assert_eq!(
            model.min_cost_classes(&["MAJ", "MIN", "MIN"]),
            vec!["MAJ", "MIN"]
        );
    }

    #[test]
    fn asymmetric_costs_can_favour_the_minority() {
        // misclassifying MIN as MAJ is four times as expensive
        let model = CostModel::new(&["MAJ"], &[], &["MIN"], array![[0., 1.], [4., 0.]], 0.);
        assert_eq!(
            model.min_cost_classes(&["MAJ", "MAJ", "MIN"]),
            vec!["MIN"]
        );
    }
}

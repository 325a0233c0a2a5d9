use std::collections::HashSet;

use imbalance::{param_guard::TransformGuard, Float, Label, ParamGuard};
use imbalance_nn::{distance::Distance, NearestNeighbour};
use ndarray::Array2;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::SpiderParamsError;

/// What happens to the weak majority examples once they have been removed from the working
/// dataset.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeakSetPolicy {
    /// Forget the weak examples right after removing them. Weak examples are dropped from the
    /// output and never considered for relabeling. This is the default.
    Reset,
    /// Keep the weak examples as relabeling candidates. Weak examples close to an intermediate or
    /// minority example may be relabeled into that class; the others are dropped from the output.
    Retain,
}

impl Default for WeakSetPolicy {
    fn default() -> Self {
        WeakSetPolicy::Reset
    }
}

/// What happens when an example is still not cost-optimal after the maximal number of copies
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmplificationPolicy {
    /// Emit a warning, count the example in the summary and continue with the next one
    Warn,
    /// Abort resampling with [`SpiderError::AmplificationLimit`](crate::SpiderError::AmplificationLimit)
    Fail,
}

impl Default for AmplificationPolicy {
    fn default() -> Self {
        AmplificationPolicy::Warn
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
/// The set of hyperparameters that can be specified for the execution of
/// the [SPIDER3 algorithm](struct.Spider.html).
pub struct SpiderValidParams<F: Float, L: Label, D: Distance<F>, N: NearestNeighbour> {
    pub(crate) k: usize,
    pub(crate) cost: Array2<F>,
    pub(crate) majority_classes: Vec<L>,
    pub(crate) intermediate_classes: Vec<L>,
    pub(crate) minority_classes: Vec<L>,
    pub(crate) tolerance: F,
    pub(crate) max_amplifications: usize,
    pub(crate) amplification_policy: AmplificationPolicy,
    pub(crate) weak_set_policy: WeakSetPolicy,
    pub(crate) dist_fn: D,
    pub(crate) nn_algo: N,
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
/// Helper struct for building a set of [SPIDER3 hyperparameters](struct.SpiderValidParams.html)
pub struct SpiderParams<F: Float, L: Label, D: Distance<F>, N: NearestNeighbour>(
    pub(crate) SpiderValidParams<F, L, D, N>,
);

impl<F: Float, L: Label, D: Distance<F>, N: NearestNeighbour> SpiderParams<F, L, D, N> {
    pub(crate) fn new(k: usize, cost: Array2<F>, dist_fn: D, nn_algo: N) -> Self {
        Self(SpiderValidParams {
            k,
            cost,
            majority_classes: Vec::new(),
            intermediate_classes: Vec::new(),
            minority_classes: Vec::new(),
            tolerance: F::zero(),
            max_amplifications: 1000,
            amplification_policy: AmplificationPolicy::default(),
            weak_set_policy: WeakSetPolicy::default(),
            dist_fn,
            nn_algo,
        })
    }

    /// Set the number of neighbours inspected for every decision
    pub fn k(mut self, k: usize) -> Self {
        self.0.k = k;
        self
    }

    /// Set the cost matrix. Rows and columns follow the order of the majority, intermediate and
    /// minority classes concatenated; entry `(i, j)` is the cost of predicting class `j` for an
    /// example of class `i`.
    pub fn cost(mut self, cost: Array2<F>) -> Self {
        self.0.cost = cost;
        self
    }

    /// Set the majority classes
    pub fn majority_classes(mut self, classes: Vec<L>) -> Self {
        self.0.majority_classes = classes;
        self
    }

    /// Set the intermediate classes. They are processed before the minority classes, in the
    /// given order.
    pub fn intermediate_classes(mut self, classes: Vec<L>) -> Self {
        self.0.intermediate_classes = classes;
        self
    }

    /// Set the minority classes
    pub fn minority_classes(mut self, classes: Vec<L>) -> Self {
        self.0.minority_classes = classes;
        self
    }

    /// Set the tolerance used when collecting minimum cost classes.
    ///
    /// Defaults to `0`, which only accepts classes whose expected cost is exactly equal to the
    /// minimum. A positive tolerance also accepts classes whose cost is at most `tolerance`
    /// above the minimum.
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    /// Set the maximal number of copies added while amplifying a single example.
    ///
    /// Defaults to `1000`.
    pub fn max_amplifications(mut self, max_amplifications: usize) -> Self {
        self.0.max_amplifications = max_amplifications;
        self
    }

    /// Set the behaviour when an example reaches `max_amplifications`
    pub fn amplification_policy(mut self, policy: AmplificationPolicy) -> Self {
        self.0.amplification_policy = policy;
        self
    }

    /// Set the handling of weak majority examples
    pub fn weak_set_policy(mut self, policy: WeakSetPolicy) -> Self {
        self.0.weak_set_policy = policy;
        self
    }

    /// Set the distance metric
    pub fn dist_fn(mut self, dist_fn: D) -> Self {
        self.0.dist_fn = dist_fn;
        self
    }

    /// Set the nearest neighbour algorithm to be used
    pub fn nn_algo(mut self, nn_algo: N) -> Self {
        self.0.nn_algo = nn_algo;
        self
    }
}

impl<F: Float, L: Label, D: Distance<F>, N: NearestNeighbour> SpiderValidParams<F, L, D, N> {
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn cost(&self) -> &Array2<F> {
        &self.cost
    }

    pub fn majority_classes(&self) -> &[L] {
        &self.majority_classes
    }

    pub fn intermediate_classes(&self) -> &[L] {
        &self.intermediate_classes
    }

    pub fn minority_classes(&self) -> &[L] {
        &self.minority_classes
    }

    /// All classes in cost matrix order
    pub fn classes(&self) -> impl Iterator<Item = &L> {
        self.majority_classes
            .iter()
            .chain(self.intermediate_classes.iter())
            .chain(self.minority_classes.iter())
    }

    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    pub fn max_amplifications(&self) -> usize {
        self.max_amplifications
    }

    pub fn amplification_policy(&self) -> AmplificationPolicy {
        self.amplification_policy
    }

    pub fn weak_set_policy(&self) -> WeakSetPolicy {
        self.weak_set_policy
    }

    pub fn dist_fn(&self) -> &D {
        &self.dist_fn
    }

    pub fn nn_algo(&self) -> &N {
        &self.nn_algo
    }
}

impl<F: Float, L: Label, D: Distance<F>, N: NearestNeighbour> ParamGuard
    for SpiderParams<F, L, D, N>
{
    type Checked = SpiderValidParams<F, L, D, N>;
    type Error = SpiderParamsError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        let params = &self.0;
        if params.k == 0 {
            return Err(SpiderParamsError::InvalidK);
        }

        let mut seen = HashSet::new();
        for class in params.classes() {
            if !seen.insert(class) {
                return Err(SpiderParamsError::DuplicateClass(format!("{:?}", class)));
            }
        }
        if seen.is_empty() {
            return Err(SpiderParamsError::EmptyPartition);
        }

        let (rows, cols) = params.cost.dim();
        if rows != seen.len() || cols != seen.len() {
            Err(SpiderParamsError::CostMatrixShape {
                expected: seen.len(),
                rows,
                cols,
            })
        } else if params.cost.iter().any(|c| !c.is_finite()) {
            Err(SpiderParamsError::NonFiniteCost)
        } else if !params.tolerance.is_finite() || params.tolerance < F::zero() {
            Err(SpiderParamsError::InvalidTolerance(
                params.tolerance.to_f32().unwrap_or(f32::NAN),
            ))
        } else if params.max_amplifications == 0 {
            Err(SpiderParamsError::InvalidMaxAmplifications)
        } else {
            Ok(params)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float, L: Label, D: Distance<F>, N: NearestNeighbour> TransformGuard
    for SpiderParams<F, L, D, N>
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Spider;
    use imbalance_nn::{distance::L2Dist, LinearSearch};
    use ndarray::{array, Array2};

    fn three_classes() -> SpiderParams<f64, &'static str, L2Dist, LinearSearch> {
        Spider::params(3, Array2::ones((3, 3)) - Array2::<f64>::eye(3))
            .majority_classes(vec!["MAJ"])
            .intermediate_classes(vec!["INT"])
            .minority_classes(vec!["MIN"])
    }

    #[test]
    fn default_params_are_valid() {
        let params = three_classes().check().unwrap();
        assert_eq!(params.k(), 3);
        assert_eq!(params.tolerance(), 0.0);
        assert_eq!(params.max_amplifications(), 1000);
        assert_eq!(params.weak_set_policy(), WeakSetPolicy::Reset);
        assert_eq!(params.amplification_policy(), AmplificationPolicy::Warn);
        assert_eq!(
            params.classes().cloned().collect::<Vec<_>>(),
            vec!["MAJ", "INT", "MIN"]
        );
    }

    #[test]
    fn invalid_k() {
        assert_eq!(three_classes().k(0).check(), Err(SpiderParamsError::InvalidK));
    }

    #[test]
    fn cost_matrix_must_match_classes() {
        let res = three_classes().cost(array![[0., 1.], [1., 0.]]).check();
        assert_eq!(
            res,
            Err(SpiderParamsError::CostMatrixShape {
                expected: 3,
                rows: 2,
                cols: 2
            })
        );

        let res = three_classes().cost(Array2::zeros((3, 4))).check();
        assert!(matches!(
            res,
            Err(SpiderParamsError::CostMatrixShape { cols: 4, .. })
        ));

        let res = three_classes()
            .cost(array![[0., 1., f64::NAN], [1., 0., 1.], [1., 1., 0.]])
            .check();
        assert_eq!(res, Err(SpiderParamsError::NonFiniteCost));
    }

    #[test]
    fn classes_must_be_disjoint() {
        let res = three_classes().minority_classes(vec!["MAJ"]).check();
        assert_eq!(
            res,
            Err(SpiderParamsError::DuplicateClass("\"MAJ\"".to_string()))
        );

        let res = Spider::params::<f64, &str>(1, Array2::zeros((0, 0))).check();
        assert_eq!(res, Err(SpiderParamsError::EmptyPartition));
    }

    #[test]
    fn tolerance_and_amplification_bounds() {
        assert_eq!(
            three_classes().tolerance(-0.1).check(),
            Err(SpiderParamsError::InvalidTolerance(-0.1))
        );
        assert!(matches!(
            three_classes().tolerance(f64::INFINITY).check(),
            Err(SpiderParamsError::InvalidTolerance(_))
        ));
        assert_eq!(
            three_classes().max_amplifications(0).check(),
            Err(SpiderParamsError::InvalidMaxAmplifications)
        );
        assert!(three_classes().tolerance(1e-9).check().is_ok());
    }
}

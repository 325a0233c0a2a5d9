use imbalance::{traits::Transformer, Dataset, DatasetBase, Float, Label};
use imbalance_nn::{
    distance::{Distance, L2Dist},
    LinearSearch, NearestNeighbour,
};
use ndarray::{Array1, Array2, ArrayBase, Data, Ix1, Ix2};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cost::{ClassRole, CostModel};
use crate::error::{Result, SpiderError};
use crate::example::{difference, of_class, remove_first, stack_features, Example};
use crate::hyperparams::{AmplificationPolicy, SpiderParams, SpiderValidParams, WeakSetPolicy};
use crate::neighbourhood::Neighbourhood;

/// SPIDER3 is a selective preprocessing method for multi-class imbalanced datasets. Instead of
/// blindly over- or undersampling whole classes it only touches the examples whose
/// neighbourhood would lead to an expensive misclassification, as judged by a user supplied
/// cost matrix.
///
/// Every class is assigned one of three roles: majority, intermediate or minority. The
/// algorithm then reshapes the neighbourhoods of the intermediate and minority examples until
/// their own class is among the cheapest predictions for them.
///
/// ## The algorithm
///
/// For every example `x` the minimum cost classes are computed from the class distribution
/// `p` of its `k` nearest neighbours: predicting class `j` costs `sum_i p(i) * cost(i, j)`.
/// The resampling then proceeds as follows:
///
/// 1. Majority examples whose own class is not a minimum cost class are *weak*. They are
///    removed from the working dataset.
/// 2. For every intermediate class, followed by every minority class, and every example `x`
///    of that class:
///    - weak majority neighbours of `x` are *relabeled* into the class of `x` while a majority
///      class would still be cheapest for `x` (see [`WeakSetPolicy`]),
///    - majority neighbours of `x` are *cleaned* away while their class is a minimum cost
///      class for `x`,
///    - `x` is *amplified* by adding copies of it until its own class becomes a minimum cost
///      class.
///
/// The result contains the surviving examples in their original order, followed by the
/// relabeled and copied examples in the order they were created. Every neighbour query sees
/// the current state of the data, and ties in distance are broken by position, so the output
/// is fully deterministic.
///
/// ## Tutorial
///
/// ```rust
/// use imbalance::{Dataset, ParamGuard};
/// use imbalance_spider::Spider;
/// use ndarray::array;
///
/// // a single minority example crowded by two majority examples
/// let records = array![[0.0, 0.0], [0.1, 0.0], [0.25, 0.0], [5.0, 0.0], [5.1, 0.0], [5.2, 0.0]];
/// let targets = array!["MIN", "MAJ", "MAJ", "MAJ", "MAJ", "MAJ"];
/// let dataset = Dataset::new(records, targets);
///
/// // misclassifying either class costs the same
/// let params = Spider::params(3, array![[0., 1.], [1., 0.]])
///     .majority_classes(vec!["MAJ"])
///     .minority_classes(vec!["MIN"])
///     .check()
///     .unwrap();
///
/// let (resampled, summary) = params.resample(&dataset).unwrap();
///
/// // both close majority examples are cleaned, the minority example is copied once
/// assert_eq!(summary.cleaned, 2);
/// assert_eq!(summary.amplified, 1);
/// assert_eq!(
///     resampled.targets(),
///     &array!["MIN", "MAJ", "MAJ", "MAJ", "MIN"]
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Spider;

impl Spider {
    /// Configures the hyperparameters with the number of neighbours and the cost matrix.
    ///
    /// The class lists are empty and have to be filled in before checking. Defaults are
    /// provided for the other parameters:
    /// * `tolerance = 0`
    /// * `max_amplifications = 1000`
    /// * `amplification_policy = AmplificationPolicy::Warn`
    /// * `weak_set_policy = WeakSetPolicy::Reset`
    /// * `dist_fn = L2Dist` (Euclidean distance)
    /// * `nn_algo = LinearSearch`
    pub fn params<F: Float, L: Label>(
        k: usize,
        cost: Array2<F>,
    ) -> SpiderParams<F, L, L2Dist, LinearSearch> {
        Self::params_with(k, cost, L2Dist, LinearSearch::new())
    }

    /// Configures the hyperparameters with a custom distance metric and nearest neighbour
    /// algorithm
    pub fn params_with<F: Float, L: Label, D: Distance<F>, N: NearestNeighbour>(
        k: usize,
        cost: Array2<F>,
        dist_fn: D,
        nn_algo: N,
    ) -> SpiderParams<F, L, D, N> {
        SpiderParams::new(k, cost, dist_fn, nn_algo)
    }
}

/// Counters collected during a single resampling run
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResamplingSummary {
    /// Majority examples flagged as weak and removed from the working dataset
    pub weak: usize,
    /// Weak majority examples relabeled into an intermediate or minority class
    pub relabeled: usize,
    /// Majority examples removed from the working dataset while cleaning
    pub cleaned: usize,
    /// Copies added while amplifying
    pub amplified: usize,
    /// Examples which were still not cost-optimal after `max_amplifications` copies
    pub capped: usize,
    /// Number of examples in the resampled dataset
    pub output_len: usize,
}

/// State of a single run.
///
/// `working` starts out as the input and shrinks through weak removal and cleaning,
/// `additions` collects relabeled and copied examples, and `candidates` holds the weak majority
/// examples which may still be relabeled.
struct Resampler<'p, F: Float, L: Label, D: Distance<F>, N: NearestNeighbour> {
    params: &'p SpiderValidParams<F, L, D, N>,
    model: CostModel<F, L>,
    nn: Neighbourhood<'p, F, D, N>,
    working: Vec<Example<F, L>>,
    additions: Vec<Example<F, L>>,
    candidates: Vec<Example<F, L>>,
    summary: ResamplingSummary,
}

impl<'p, F: Float, L: Label, D: Distance<F>, N: NearestNeighbour> Resampler<'p, F, L, D, N> {
    /// Minimum cost classes of `x` with respect to the working dataset only
    fn min_cost_in_working(&self, x: &Example<F, L>) -> Result<Vec<usize>> {
        let neighbours = self.nn.k_nearest(x, &[&self.working])?;
        Ok(self.model.min_cost_indices(neighbours.iter().map(|e| e.label())))
    }

    /// Minimum cost classes of `x` with respect to all three collections
    fn min_cost_in_union(&self, x: &Example<F, L>) -> Result<Vec<usize>> {
        let neighbours = self
            .nn
            .k_nearest(x, &[&self.working, &self.additions, &self.candidates])?;
        Ok(self.model.min_cost_indices(neighbours.iter().map(|e| e.label())))
    }

    fn detect_weak_majority(&mut self) -> Result<()> {
        let mut weak = Vec::new();
        for m in self.model.majority() {
            let class = self.model.class(m);
            for x in self.working.iter().filter(|e| e.has_label(class)) {
                if !self.min_cost_in_working(x)?.contains(&m) {
                    weak.push(x.clone());
                }
            }
        }

        difference(&mut self.working, &weak);
        self.summary.weak = weak.len();
        debug!(weak = weak.len(), "removed weak majority examples");

        if self.params.weak_set_policy == WeakSetPolicy::Retain {
            self.candidates = weak;
        }

        Ok(())
    }

    /// Moves weak neighbours of `x` into class `class`
    fn relabel(&mut self, x: &Example<F, L>, class: usize) -> Result<()> {
        let mut nearby = {
            let neighbours = self
                .nn
                .k_nearest(x, &[&self.working, &self.additions, &self.candidates])?;
            // every candidate at most once, even if value-equal copies are among the neighbours
            self.candidates
                .iter()
                .filter(|c| neighbours.contains(c))
                .cloned()
                .collect::<Vec<_>>()
        };

        while !nearby.is_empty() && self.majority_is_min_cost(x)? {
            let pos = match self.nn.nearest(x, &nearby)? {
                Some(pos) => pos,
                None => break,
            };
            let mut y = nearby.remove(pos);
            remove_first(&mut self.candidates, &y);
            y.relabel(self.model.class(class).clone());
            self.additions.push(y);
            self.summary.relabeled += 1;
        }

        Ok(())
    }

    fn majority_is_min_cost(&self, x: &Example<F, L>) -> Result<bool> {
        let min_cost = self.min_cost_in_union(x)?;
        Ok(min_cost
            .into_iter()
            .any(|idx| self.model.role_of(idx) == ClassRole::Majority))
    }

    /// Removes majority neighbours of `x` while their class is cheapest for `x`
    fn clean(&mut self, x: &Example<F, L>) -> Result<()> {
        for m in self.model.majority() {
            let class = self.model.class(m).clone();
            let mut nearby = self
                .nn
                .k_nearest(x, &[&self.working, &self.additions, &self.candidates])?
                .into_iter()
                .filter(|e| e.has_label(&class))
                .cloned()
                .collect::<Vec<_>>();

            while !nearby.is_empty() && self.min_cost_in_union(x)?.contains(&m) {
                let pos = match self.nn.nearest(x, &nearby)? {
                    Some(pos) => pos,
                    None => break,
                };
                let y = nearby.remove(pos);
                remove_first(&mut self.candidates, &y);
                // weak examples already left the working set and were counted as weak
                if remove_first(&mut self.working, &y) {
                    self.summary.cleaned += 1;
                }
            }
        }

        Ok(())
    }

    /// Adds copies of `x` until its own class `class` is cheapest for it
    fn amplify(&mut self, x: &Example<F, L>, class: usize) -> Result<()> {
        let cap = self.params.max_amplifications;
        let mut copies = 0;

        while !self.min_cost_in_union(x)?.contains(&class) {
            if copies == cap {
                let label = format!("{:?}", x.label());
                match self.params.amplification_policy {
                    AmplificationPolicy::Warn => {
                        warn!(class = %label, cap, "example is not cost-optimal after amplification limit");
                        self.summary.capped += 1;
                        break;
                    }
                    AmplificationPolicy::Fail => {
                        return Err(SpiderError::AmplificationLimit { class: label, cap });
                    }
                }
            }

            self.additions.push(x.clone());
            copies += 1;
        }

        self.summary.amplified += copies;
        Ok(())
    }

    fn run(mut self) -> Result<(Vec<Example<F, L>>, ResamplingSummary)> {
        self.detect_weak_majority()?;

        for c in self.model.intermediate_and_minority() {
            let class = self.model.class(c).clone();
            let seeds = of_class(&self.working, &class);
            if seeds.is_empty() {
                debug!(class = ?class, "no examples left, skipping class");
                continue;
            }

            for x in &seeds {
                self.relabel(x, c)?;
            }

            let mut to_clean = seeds.clone();
            to_clean.extend(of_class(&self.additions, &class));
            for x in &to_clean {
                self.clean(x)?;
            }

            for x in &seeds {
                self.amplify(x, c)?;
            }

            debug!(
                class = ?class,
                relabeled = self.summary.relabeled,
                cleaned = self.summary.cleaned,
                amplified = self.summary.amplified,
                "processed class"
            );
        }

        let mut output = self.working;
        output.append(&mut self.additions);
        self.summary.output_len = output.len();

        Ok((output, self.summary))
    }
}

impl<F: Float, L: Label, D: Distance<F>, N: NearestNeighbour> SpiderValidParams<F, L, D, N> {
    /// Resamples `dataset` and reports what was changed.
    ///
    /// Every label of the dataset has to be one of the majority, intermediate or minority
    /// classes. Feature names are carried over to the resampled dataset.
    pub fn resample<DR: Data<Elem = F>, DT: Data<Elem = L>>(
        &self,
        dataset: &DatasetBase<ArrayBase<DR, Ix2>, ArrayBase<DT, Ix1>>,
    ) -> Result<(Dataset<F, L>, ResamplingSummary)> {
        dataset.check_shapes()?;

        let model = CostModel::new(
            &self.majority_classes,
            &self.intermediate_classes,
            &self.minority_classes,
            self.cost.clone(),
            self.tolerance,
        );
        if let Some(label) = dataset
            .targets()
            .iter()
            .find(|l| model.index_of(l).is_none())
        {
            return Err(SpiderError::UnrecognizedClass(format!("{:?}", label)));
        }

        let nfeatures = dataset.nfeatures();
        let working = dataset
            .records()
            .outer_iter()
            .zip(dataset.targets().iter())
            .map(|(r, l)| Example::new(r.to_owned(), l.clone()))
            .collect::<Vec<_>>();
        let ninput = working.len();

        let resampler = Resampler {
            params: self,
            model,
            nn: Neighbourhood::new(self.k, nfeatures, &self.dist_fn, &self.nn_algo),
            working,
            additions: Vec::new(),
            candidates: Vec::new(),
            summary: ResamplingSummary::default(),
        };
        let (examples, summary) = resampler.run()?;

        let records = stack_features(&examples.iter().collect::<Vec<_>>(), nfeatures)
            .map_err(imbalance::error::Error::from)?;
        let targets = examples.into_iter().map(|e| e.label).collect::<Array1<_>>();
        info!(
            input = ninput,
            output = summary.output_len,
            weak = summary.weak,
            relabeled = summary.relabeled,
            cleaned = summary.cleaned,
            amplified = summary.amplified,
            capped = summary.capped,
            "resampling finished"
        );

        let resampled =
            Dataset::from((records, targets)).with_feature_names(dataset.feature_names().to_vec());
        Ok((resampled, summary))
    }

    /// Resamples a feature matrix and the matching labels
    pub fn fit_transform<DR: Data<Elem = F>, DT: Data<Elem = L>>(
        &self,
        records: &ArrayBase<DR, Ix2>,
        targets: &ArrayBase<DT, Ix1>,
    ) -> Result<(Array2<F>, Array1<L>)> {
        let dataset = DatasetBase::new(records.view(), targets.view());
        let (resampled, _) = self.resample(&dataset)?;

        Ok((resampled.records, resampled.targets))
    }
}

impl<F: Float, L: Label, D: Distance<F>, N: NearestNeighbour, DR: Data<Elem = F>, DT: Data<Elem = L>>
    Transformer<&DatasetBase<ArrayBase<DR, Ix2>, ArrayBase<DT, Ix1>>, Result<Dataset<F, L>>>
    for SpiderValidParams<F, L, D, N>
{
    /// Resamples the dataset, dropping the summary
    fn transform(
        &self,
        dataset: &DatasetBase<ArrayBase<DR, Ix2>, ArrayBase<DT, Ix1>>,
    ) -> Result<Dataset<F, L>> {
        self.resample(dataset).map(|(resampled, _)| resampled)
    }
}

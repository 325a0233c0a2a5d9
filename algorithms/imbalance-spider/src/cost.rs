//! Class roles and the misclassification cost matrix
use std::collections::HashMap;

use imbalance::{Float, Label};
use ndarray::Array2;

/// The role a class plays in the resampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassRole {
    Majority,
    Intermediate,
    Minority,
}

/// Lookup structure built from checked hyperparameters.
///
/// Classes are indexed by their position in the concatenation of the majority, intermediate and
/// minority classes, which is also the row and column order of the cost matrix.
#[derive(Debug, Clone)]
pub struct CostModel<F, L: Label> {
    pub(crate) classes: Vec<L>,
    pub(crate) index: HashMap<L, usize>,
    pub(crate) cost: Array2<F>,
    pub(crate) n_majority: usize,
    pub(crate) n_intermediate: usize,
    pub(crate) tolerance: F,
}

impl<F: Float, L: Label> CostModel<F, L> {
    /// Builds the model from the three class lists.
    ///
    /// The lists are expected to be disjoint and the cost matrix to be square with one row per
    /// class, which is what checking the hyperparameters guarantees.
    pub fn new(
        majority: &[L],
        intermediate: &[L],
        minority: &[L],
        cost: Array2<F>,
        tolerance: F,
    ) -> Self {
        let classes = majority
            .iter()
            .chain(intermediate)
            .chain(minority)
            .cloned()
            .collect::<Vec<_>>();
        let index = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();

        CostModel {
            classes,
            index,
            cost,
            n_majority: majority.len(),
            n_intermediate: intermediate.len(),
            tolerance,
        }
    }

    /// All classes in cost matrix order
    pub fn classes(&self) -> &[L] {
        &self.classes
    }

    pub fn nclasses(&self) -> usize {
        self.classes.len()
    }

    /// Position of `class` in the cost matrix
    pub fn index_of(&self, class: &L) -> Option<usize> {
        self.index.get(class).copied()
    }

    pub fn class(&self, idx: usize) -> &L {
        &self.classes[idx]
    }

    pub fn role(&self, class: &L) -> Option<ClassRole> {
        self.index_of(class).map(|idx| self.role_of(idx))
    }

    pub(crate) fn role_of(&self, idx: usize) -> ClassRole {
        if idx < self.n_majority {
            ClassRole::Majority
        } else if idx < self.n_majority + self.n_intermediate {
            ClassRole::Intermediate
        } else {
            ClassRole::Minority
        }
    }

    /// Indices of the majority classes
    pub(crate) fn majority(&self) -> std::ops::Range<usize> {
        0..self.n_majority
    }

    /// Indices of the intermediate classes followed by the minority classes, which is the order
    /// in which they are processed
    pub(crate) fn intermediate_and_minority(&self) -> std::ops::Range<usize> {
        self.n_majority..self.classes.len()
    }

    /// Cost of predicting class `predicted` for an example of class `actual`
    pub fn cost(&self, actual: usize, predicted: usize) -> F {
        self.cost[(actual, predicted)]
    }
}

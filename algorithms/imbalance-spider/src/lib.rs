//! `imbalance-spider` implements SPIDER3, a selective preprocessing method for multi-class
//! imbalanced datasets.
//!
//! ## The big picture
//!
//! Classifiers trained on imbalanced data tend to ignore the rare classes. Resampling methods
//! counter this by changing the training set before learning. SPIDER3 does so selectively: it
//! inspects the neighbourhood of every example and, guided by a misclassification cost matrix,
//!
//! * removes majority examples that sit inside the region of another class,
//! * relabels some of those examples into the neighbouring rare class,
//! * duplicates rare examples whose neighbourhood is still dominated by other classes.
//!
//! Classes are sorted into three groups by the caller. Majority classes may lose examples,
//! intermediate and minority classes may only gain examples.
//!
//! ## Current state
//!
//! The resampling is exact and single-threaded. Every neighbour query scans the current state
//! of the data, so a run costs `O(n^2)` distance computations per processed example in the
//! worst case. A faster index can be plugged in through
//! [`NearestNeighbour`](imbalance_nn::NearestNeighbour).
//!
//! See [`Spider`] for the algorithm and a tutorial.
mod algorithm;
mod cost;
mod error;
mod example;
mod hyperparams;
mod min_cost;
mod neighbourhood;

pub use algorithm::*;
pub use cost::{ClassRole, CostModel};
pub use error::{Result, SpiderError, SpiderParamsError};
pub use example::Example;
pub use hyperparams::*;

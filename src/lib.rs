//! `imbalance` provides the shared building blocks for resampling multi-class imbalanced
//! datasets with Rust.
//!
//! It follows the structure of the `linfa` toolkit: this crate only contains the common
//! vocabulary (datasets, numeric bounds, hyperparameter checking and the `Transformer` trait),
//! while the algorithms themselves live in their own crates:
//!
//! * [`imbalance-nn`](../imbalance_nn/index.html): exact nearest neighbour queries
//! * [`imbalance-spider`](../imbalance_spider/index.html): selective preprocessing with
//!   relabeling, cleaning and amplification (SPIDER3)
//!
//! ## A typical pipeline
//!
//! ```ignore
//! use imbalance::prelude::*;
//! use imbalance_spider::Spider;
//!
//! let resampled = Spider::params(3, cost)
//!     .majority_classes(vec!["MAJ"])
//!     .intermediate_classes(vec!["INT"])
//!     .minority_classes(vec!["MIN"])
//!     .transform(&dataset)?;
//! ```

pub mod benchmarks;
pub mod dataset;
pub mod error;
pub mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, DatasetView, Float, Label};
pub use param_guard::ParamGuard;

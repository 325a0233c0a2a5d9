//! `imbalance-datasets` provides synthetic datasets ready to be used in tests, examples and
//! benchmarks of the resampling algorithms.
//!
//! ## The Big Picture
//!
//! Real-world imbalanced data sets rarely come with a known ground truth about which examples
//! are noisy, borderline or safe. The generators in [`generate`] produce labelled point clouds
//! with a controlled imbalance ratio and a controlled amount of class overlap instead, so the
//! effect of a resampling run can be inspected class by class.
//!
//! ## Using a dataset
//!
//! ```ignore
//! use rand_xoshiro::{rand_core::SeedableRng, Xoshiro256Plus};
//!
//! let mut rng = Xoshiro256Plus::seed_from_u64(42);
//! let dataset = imbalance_datasets::generate::three_class_overlap([70, 30, 10], 1.0, &mut rng);
//! ```

pub mod generate;

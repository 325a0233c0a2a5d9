//! Provide traits for different classes of algorithms
//!

/// Transformation algorithms
///
/// A transformer takes a dataset and transforms it into a different one. It has no concept of
/// state and provides therefore no method to predict new data. Resampling algorithms, which
/// relabel, remove and duplicate samples, are transformers from one dataset to another.
pub trait Transformer<R, T> {
    fn transform(&self, x: R) -> T;
}

//! Datasets
//!
//! This module implements the dataset struct and the numeric and label bounds shared by all
//! resampling algorithms.
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Data, Ix1, Ix2, ScalarOperand};

use num_traits::{FromPrimitive, NumAssignOps, NumCast, Signed};

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::Sum;

use crate::error::{Error, Result};

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. They are used in the records of a
/// dataset and as the element type of cost matrices.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Unpin
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + ScalarOperand
    + approx::AbsDiffEq
    + 'static
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// Discrete labels
///
/// Labels are comparable, hashable and printable. The printable bound is used to report
/// unknown or misconfigured classes back to the caller.
pub trait Label: PartialEq + Eq + Hash + Clone + fmt::Debug {}

impl Label for bool {}
impl Label for usize {}
impl Label for u8 {}
impl Label for i32 {}
impl Label for String {}
impl Label for char {}
impl Label for &str {}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It contains a number of records about the
/// data and their targets. Feature names are optional and carried along when a dataset is
/// transformed into another one.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nfeatures)
/// * `targets`: a one-dimensional array of labels with dimensionality (nsamples)
///
/// # Trait bounds
///
/// * `R: Records`: generic over owned feature matrices and views
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,

    feature_names: Vec<String>,
}

/// Dataset
///
/// The most commonly used typed of dataset. It contains a number of records stored as an
/// `Array2` and one label per record stored as an `Array1`.
pub type Dataset<F, L> = DatasetBase<Array2<F>, Array1<L>>;

/// DatasetView
///
/// A read only view of a Dataset
pub type DatasetView<'a, F, L> = DatasetBase<ArrayView2<'a, F>, ArrayView1<'a, L>>;

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}

impl<F, S: Data<Elem = F>> Records for ArrayBase<S, Ix2> {
    type Elem = F;

    fn nsamples(&self) -> usize {
        self.nrows()
    }

    fn nfeatures(&self) -> usize {
        self.ncols()
    }
}

impl<R: Records, T> DatasetBase<R, T> {
    /// Create a new dataset from records and targets
    pub fn new(records: R, targets: T) -> DatasetBase<R, T> {
        DatasetBase {
            records,
            targets,
            feature_names: Vec::new(),
        }
    }

    /// Returns the records of the dataset
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Returns the targets of the dataset
    pub fn targets(&self) -> &T {
        &self.targets
    }

    pub fn nsamples(&self) -> usize {
        self.records.nsamples()
    }

    pub fn nfeatures(&self) -> usize {
        self.records.nfeatures()
    }

    /// Returns feature names
    ///
    /// A feature name gives a human-readable string describing the purpose of a single feature.
    /// Empty if no names were attached.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Updates the feature names of a dataset
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> DatasetBase<R, T> {
        self.feature_names = names.into_iter().map(|x| x.into()).collect();
        self
    }

    /// Updates the records of a dataset, keeping targets and feature names
    pub fn with_records<S: Records>(self, records: S) -> DatasetBase<S, T> {
        DatasetBase {
            records,
            targets: self.targets,
            feature_names: self.feature_names,
        }
    }

    /// Updates the targets of a dataset, keeping records and feature names
    pub fn with_targets<U>(self, targets: U) -> DatasetBase<R, U> {
        DatasetBase {
            records: self.records,
            targets,
            feature_names: self.feature_names,
        }
    }
}

impl<F, L, D, S> DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>
where
    L: Label,
    D: Data<Elem = F>,
    S: Data<Elem = L>,
{
    /// Checks that there is exactly one label per record
    pub fn check_shapes(&self) -> Result<()> {
        let (nrecords, ntargets) = (self.records.nrows(), self.targets.len());
        if nrecords != ntargets {
            return Err(Error::MismatchedShapes(nrecords, ntargets));
        }
        Ok(())
    }

    /// Counts the occurences of each label
    pub fn label_frequencies(&self) -> HashMap<L, usize> {
        let mut freqs = HashMap::new();
        for label in self.targets.iter() {
            *freqs.entry(label.clone()).or_insert(0) += 1;
        }
        freqs
    }

    /// Returns a read-only view of the dataset
    pub fn view(&self) -> DatasetView<'_, F, L> {
        DatasetBase {
            records: self.records.view(),
            targets: self.targets.view(),
            feature_names: self.feature_names.clone(),
        }
    }
}

impl<F: Float, L: Label> From<(Array2<F>, Array1<L>)> for Dataset<F, L> {
    fn from(rec_tar: (Array2<F>, Array1<L>)) -> Self {
        DatasetBase::new(rec_tar.0, rec_tar.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn label_frequencies_count_every_label() {
        let dataset = Dataset::new(
            array![[0., 0.], [1., 1.], [2., 2.], [3., 3.]],
            array!["a", "b", "a", "a"],
        );

        let freqs = dataset.label_frequencies();
        assert_eq!(freqs[&"a"], 3);
        assert_eq!(freqs[&"b"], 1);
        assert_eq!(dataset.nsamples(), 4);
        assert_eq!(dataset.nfeatures(), 2);
    }

    #[test]
    fn mismatched_shapes() {
        let dataset = Dataset::new(array![[0., 0.], [1., 1.]], array![1usize]);
        assert!(matches!(
            dataset.check_shapes(),
            Err(Error::MismatchedShapes(2, 1))
        ));
    }

    #[test]
    fn feature_names_survive_record_swaps() {
        let dataset = Dataset::new(array![[0., 1.]], array![true])
            .with_feature_names(vec!["x", "y"])
            .with_records(array![[2., 3.], [4., 5.]])
            .with_targets(array![false, true]);

        assert_eq!(dataset.feature_names(), &["x".to_string(), "y".to_string()]);
        assert_eq!(dataset.view().records.nrows(), 2);
        assert_eq!(dataset.targets(), &array![false, true]);
        assert!(dataset.check_shapes().is_ok());
    }

    #[test]
    fn from_records_and_targets() {
        let dataset: Dataset<f64, usize> = (array![[0., 1.], [2., 3.]], array![0, 1]).into();

        assert_eq!(dataset.nsamples(), 2);
        assert!(dataset.feature_names().is_empty());
        assert_eq!(dataset.label_frequencies()[&1], 1);
    }
}

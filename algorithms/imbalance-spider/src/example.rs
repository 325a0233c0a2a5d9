//! Labelled examples and the multiset operations on the working collections
use imbalance::{Float, Label};
use ndarray::{Array1, Array2, ArrayView1, ShapeError};

/// A feature vector together with its current class label.
///
/// Examples are compared by value: two examples are equal if all their features and their labels
/// are equal. The working collections of the resampler are multisets of examples, so equal
/// examples may appear multiple times.
#[derive(Debug, Clone, PartialEq)]
pub struct Example<F, L> {
    pub(crate) features: Array1<F>,
    pub(crate) label: L,
}

impl<F: Float, L: Label> Example<F, L> {
    pub fn new(features: Array1<F>, label: L) -> Self {
        Example { features, label }
    }

    pub fn features(&self) -> ArrayView1<'_, F> {
        self.features.view()
    }

    pub fn label(&self) -> &L {
        &self.label
    }

    pub(crate) fn relabel(&mut self, label: L) {
        self.label = label;
    }

    pub(crate) fn has_label(&self, label: &L) -> bool {
        self.label == *label
    }
}

/// Removes the first example equal to `example`, returns whether one was found
pub(crate) fn remove_first<F: Float, L: Label>(
    set: &mut Vec<Example<F, L>>,
    example: &Example<F, L>,
) -> bool {
    match set.iter().position(|e| e == example) {
        Some(pos) => {
            set.remove(pos);
            true
        }
        None => false,
    }
}

/// Multiset difference: removes one equal example from `set` for every member of `other`
pub(crate) fn difference<F: Float, L: Label>(set: &mut Vec<Example<F, L>>, other: &[Example<F, L>]) {
    for example in other {
        remove_first(set, example);
    }
}

/// Copies the examples of a single class, keeping their order
pub(crate) fn of_class<F: Float, L: Label>(set: &[Example<F, L>], label: &L) -> Vec<Example<F, L>> {
    set.iter().filter(|e| e.has_label(label)).cloned().collect()
}

/// Stacks the features of `examples` into a `(examples.len(), nfeatures)` matrix
pub(crate) fn stack_features<F: Float, L: Label>(
    examples: &[&Example<F, L>],
    nfeatures: usize,
) -> Result<Array2<F>, ShapeError> {
    let nrows = examples.len();
    let mut flat = Vec::with_capacity(nrows * nfeatures);
    for example in examples {
        flat.extend(example.features.iter().cloned());
    }
    Array2::from_shape_vec((nrows, nfeatures), flat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn ex(x: f64, label: &'static str) -> Example<f64, &'static str> {
        Example::new(array![x, 0.], label)
    }

    #[test]
    fn equality_includes_label() {
        assert_eq!(ex(1., "a"), ex(1., "a"));
        assert_ne!(ex(1., "a"), ex(1., "b"));
        assert_ne!(ex(1., "a"), ex(2., "a"));
    }

    #[test]
    fn difference_removes_one_copy_per_member() {
        let mut set = vec![ex(1., "a"), ex(2., "a"), ex(1., "a"), ex(3., "b")];
        difference(&mut set, &[ex(1., "a"), ex(3., "b"), ex(4., "b")]);
        assert_eq!(set, vec![ex(2., "a"), ex(1., "a")]);

        assert!(!remove_first(&mut set, &ex(1., "b")));
        assert!(remove_first(&mut set, &ex(1., "a")));
        assert_eq!(set, vec![ex(2., "a")]);
    }

    #[test]
    fn of_class_keeps_order() {
        let set = vec![ex(1., "a"), ex(2., "b"), ex(3., "a")];
        assert_eq!(of_class(&set, &"a"), vec![ex(1., "a"), ex(3., "a")]);
        assert!(of_class(&set, &"c").is_empty());
    }

    #[test]
    fn stacking_features() {
        let set = vec![ex(1., "a"), ex(2., "b")];
        let stacked = stack_features(&set.iter().collect::<Vec<_>>(), 2).unwrap();
        assert_eq!(stacked, array![[1., 0.], [2., 0.]]);

        let empty: Vec<&Example<f64, &str>> = Vec::new();
        assert_eq!(stack_features(&empty, 2).unwrap().dim(), (0, 2));
    }
}

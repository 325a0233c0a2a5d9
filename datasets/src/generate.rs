//! Utility functions for randomly generating datasets

use imbalance::Dataset;
use ndarray::{concatenate, s, Array, Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2};
use ndarray_rand::{
    rand::Rng,
    rand_distr::{Distribution, Normal, StandardNormal},
    RandomExt,
};

/// Class labels used by [`three_class_overlap`], in majority, intermediate, minority order
pub const THREE_CLASS_LABELS: [&str; 3] = ["MAJ", "INT", "MIN"];

/// Special case of `blobs_with_distribution` with a standard normal distribution.
pub fn blobs(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    blobs_with_distribution(blob_size, blob_centroids, StandardNormal, rng)
}

/// Given an input matrix `blob_centroids`, with shape `(n_blobs, n_features)`,
/// generate `blob_size` data points (a "blob") around each of the blob centroids.
pub fn blobs_with_distribution(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    distribution: impl Distribution<f64> + Clone,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let (n_centroids, n_features) = blob_centroids.dim();
    let mut blobs: Array2<f64> = Array2::zeros((n_centroids * blob_size, n_features));

    for (blob_index, blob_centroid) in blob_centroids.rows().into_iter().enumerate() {
        let blob = make_blob(blob_size, &blob_centroid, distribution.clone(), rng);

        let indexes = s![blob_index * blob_size..(blob_index + 1) * blob_size, ..];
        blobs.slice_mut(indexes).assign(&blob);
    }
    blobs
}

fn make_blob(
    blob_size: usize,
    blob_centroid: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    distribution: impl Distribution<f64>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let shape = (blob_size, blob_centroid.len());
    let origin_blob: Array2<f64> = Array::random_using(shape, distribution, rng);
    origin_blob + blob_centroid
}

/// Generates a two-dimensional three class dataset with labels `MAJ`, `INT` and `MIN`.
///
/// `sizes` gives the number of samples of the majority, intermediate and minority class. The
/// classes are gaussian clouds centered on the corners of an equilateral triangle with side
/// length `3`; `overlap` is added to the base standard deviation of `0.5`, so `0.0` yields
/// well separated classes and values above `1.0` produce heavily overlapping ones.
///
/// Samples are ordered class by class.
///
/// # Panics
///
/// If `overlap` is negative or not finite.
pub fn three_class_overlap(
    sizes: [usize; 3],
    overlap: f64,
    rng: &mut impl Rng,
) -> Dataset<f64, String> {
    assert!(
        overlap.is_finite() && overlap >= 0.0,
        "overlap must be a non-negative number"
    );
    let distribution = Normal::new(0.0, 0.5 + overlap).unwrap();
    let centroids = [[0.0, 0.0], [3.0, 0.0], [1.5, 2.598]];

    let parts = sizes
        .iter()
        .zip(centroids.iter())
        .map(|(&size, centroid)| {
            make_blob(size, &Array1::from(centroid.to_vec()), distribution, &mut *rng)
        })
        .collect::<Vec<_>>();
    let views = parts.iter().map(|p| p.view()).collect::<Vec<_>>();
    let records = concatenate(Axis(0), &views).unwrap();

    let targets = sizes
        .iter()
        .zip(THREE_CLASS_LABELS.iter())
        .flat_map(|(&size, label)| std::iter::repeat(label.to_string()).take(size))
        .collect::<Array1<_>>();

    Dataset::new(records, targets).with_feature_names(vec!["x", "y"])
}

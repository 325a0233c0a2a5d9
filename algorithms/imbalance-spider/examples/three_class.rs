use std::collections::BTreeMap;

use imbalance::{Dataset, ParamGuard};
use imbalance_datasets::generate::three_class_overlap;
use imbalance_spider::Spider;
use ndarray::Array2;
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use tracing_subscriber::EnvFilter;

fn class_counts(dataset: &Dataset<f64, String>) -> BTreeMap<String, usize> {
    dataset.label_frequencies().into_iter().collect()
}

// Resample an overlapping three class problem and compare the class sizes.
// Run with `RUST_LOG=imbalance_spider=debug` to follow the individual phases.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Our random number generator, seeded for reproducibility
    let mut rng = Xoshiro256Plus::seed_from_u64(42);
    let dataset = three_class_overlap([210, 90, 30], 1.0, &mut rng);

    // every misclassification costs the same
    let params = Spider::params(3, Array2::ones((3, 3)) - Array2::<f64>::eye(3))
        .majority_classes(vec!["MAJ".to_string()])
        .intermediate_classes(vec!["INT".to_string()])
        .minority_classes(vec!["MIN".to_string()])
        .check_unwrap();

    let (resampled, summary) = params.resample(&dataset).unwrap();

    println!("Before: {:?}", class_counts(&dataset));
    println!("After:  {:?}", class_counts(&resampled));
    println!();
    println!("{:#?}", summary);
}

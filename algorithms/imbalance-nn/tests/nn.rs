use approx::assert_abs_diff_eq;
use ndarray::{arr1, arr2, aview1, stack, Array2, ArrayView1, Axis};
use ndarray_rand::{rand::SeedableRng, rand_distr::Uniform, RandomExt};
use rand_xoshiro::Xoshiro256Plus;

use imbalance_nn::{distance::*, BuildError, LinearSearch, NearestNeighbour, NnError};

fn assert_query(
    output: Vec<(ArrayView1<f64>, usize)>,
    input_data: &Array2<f64>,
    exp_pos: Vec<usize>,
) {
    let (pts, pos): (Vec<_>, Vec<_>) = output.into_iter().unzip();
    assert_eq!(pos, exp_pos);
    assert_abs_diff_eq!(
        stack(Axis(0), &pts).unwrap(),
        input_data.select(Axis(0), &exp_pos)
    );
}

#[test]
fn empty_batch_returns_nothing() {
    let points = Array2::zeros((0, 2));
    let nn = LinearSearch::new().from_batch(&points, L2Dist).unwrap();

    let out = nn.k_nearest(aview1(&[0.0, 1.0]), 2).unwrap();
    assert!(out.is_empty());
}

#[test]
fn dimension_errors() {
    let points = Array2::<f64>::zeros((4, 0));
    assert_eq!(
        LinearSearch::new().from_batch(&points, L2Dist).err(),
        Some(BuildError::ZeroDim)
    );

    let points = arr2(&[[0.0, 2.0]]);
    let nn = LinearSearch::new().from_batch(&points, L2Dist).unwrap();
    assert_eq!(nn.k_nearest(aview1(&[]), 2).err(), Some(NnError::WrongDimension));
    assert_eq!(
        nn.k_nearest(aview1(&[2.2, 4.4, 5.5]), 1).err(),
        Some(NnError::WrongDimension)
    );
}

#[test]
fn non_finite_points_are_rejected() {
    let points = arr2(&[[0.0, 2.0], [f64::INFINITY, 1.0]]);
    let nn = LinearSearch::new().from_batch(&points, L2Dist).unwrap();
    assert_eq!(
        nn.k_nearest(aview1(&[0.0, 0.0]), 1).err(),
        Some(NnError::NonFiniteDistance)
    );
}

#[test]
fn k_nearest_sorted_by_distance() {
    let points = arr2(&[[0.0, 2.0], [10.0, 4.0], [4.0, 5.0], [7.0, 1.0], [1.0, 7.2]]);
    let nn = LinearSearch::new().from_batch(&points, L2Dist).unwrap();

    let out = nn.k_nearest(aview1(&[0.0, 1.0]), 2).unwrap();
    assert_query(out, &points, vec![0, 2]);

    let out = nn.k_nearest(aview1(&[4.0, 4.0]), 3).unwrap();
    assert_query(out, &points, vec![2, 3, 4]);

    // asking for more neighbours than available returns all of them
    let out = nn.k_nearest(aview1(&[4.0, 4.0]), 10).unwrap();
    assert_query(out, &points, vec![2, 3, 4, 0, 1]);
}

#[test]
fn ties_are_broken_by_position() {
    let points = arr2(&[[1.0, 0.0], [0.0, 0.0], [-1.0, 0.0], [0.0, 0.0], [0.0, 1.0]]);
    let nn = LinearSearch::new().from_batch(&points, L2Dist).unwrap();

    let out = nn.k_nearest(aview1(&[0.0, 0.0]), 5).unwrap();
    assert_query(out, &points, vec![1, 3, 0, 2, 4]);

    let out = nn.k_nearest(aview1(&[0.0, 0.0]), 1).unwrap();
    assert_query(out, &points, vec![1]);
}

#[test]
fn degenerate_batch() {
    let points = arr2(&[[0.0, 2.0], [0.0, 2.0], [0.0, 2.0], [0.0, 2.0], [0.0, 2.0]]);
    let nn = LinearSearch::new().from_batch(&points, L1Dist).unwrap();

    let out = nn.k_nearest(aview1(&[4.0, 4.0]), 3).unwrap();
    assert_query(out, &points, vec![0, 1, 2]);
}

#[test]
fn metric_changes_ranking() {
    let points = arr2(&[[3.0, 0.0], [2.0, 2.0]]);
    let query = arr1(&[0.0, 0.0]);

    // L1: 3 vs 4, L-inf: 3 vs 2
    let nn = LinearSearch::new().from_batch(&points, L1Dist).unwrap();
    assert_query(nn.k_nearest(query.view(), 1).unwrap(), &points, vec![0]);

    let nn = LinearSearch::new().from_batch(&points, LInfDist).unwrap();
    assert_query(nn.k_nearest(query.view(), 1).unwrap(), &points, vec![1]);
}

#[test]
fn random_queries_agree_with_sorting() {
    let mut rng = Xoshiro256Plus::seed_from_u64(40);
    let points = Array2::random_using((500, 3), Uniform::new(-50., 50.), &mut rng);
    let nn = LinearSearch::new().from_batch(&points, L2Dist).unwrap();

    let pt = arr1(&[-3.4, 10., 0.95]);
    let mut expected = points
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| (L2Dist.rdistance(row, pt.view()), i))
        .collect::<Vec<_>>();
    expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let expected = expected.into_iter().take(30).map(|(_, i)| i).collect();

    assert_query(nn.k_nearest(pt.view(), 30).unwrap(), &points, expected);
}

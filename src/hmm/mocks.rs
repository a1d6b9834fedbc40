//!
//! Mock HMMs and observations for testing
//!
use crate::model::Model;
use ndarray::{array, Array1, Array2};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// 2-state 2-symbol model with observations `[0, 0, 1]`
///
/// ```text
/// pi = [0.5, 0.5]
/// T  = [[0.7, 0.3], [0.3, 0.7]]
/// E  = [[0.9, 0.1], [0.2, 0.8]]
/// ```
///
pub fn mock_two_state() -> (Model, Vec<usize>) {
    let model = Model {
        pi: array![0.5, 0.5],
        trans: array![[0.7, 0.3], [0.3, 0.7]],
        emit: array![[0.9, 0.1], [0.2, 0.8]],
    };
    (model, vec![0, 0, 1])
}

///
/// 3-state 3-symbol model with a sparse transition matrix
/// (`0 -> 2` and `2 -> 0` are impossible)
///
pub fn mock_three_state() -> (Model, Vec<usize>) {
    let model = Model {
        pi: array![0.6, 0.3, 0.1],
        trans: array![[0.8, 0.2, 0.0], [0.1, 0.7, 0.2], [0.0, 0.4, 0.6]],
        emit: array![[0.7, 0.2, 0.1], [0.1, 0.8, 0.1], [0.2, 0.2, 0.6]],
    };
    (model, vec![0, 1, 1, 2, 2, 1, 0, 0])
}

///
/// Row-stochastic model with random positive entries
///
pub fn mock_random_model(n_states: usize, n_symbols: usize, seed: u64) -> Model {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let pi = random_rows(&mut rng, 1, n_states).row(0).to_owned();
    let trans = random_rows(&mut rng, n_states, n_states);
    let emit = random_rows(&mut rng, n_states, n_symbols);
    Model { pi, trans, emit }
}

///
/// Random observations of length `n` from `n_symbols` symbols
///
pub fn mock_random_obs(n: usize, n_symbols: usize, seed: u64) -> Vec<usize> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(0..n_symbols)).collect()
}

fn random_rows<R: Rng>(rng: &mut R, n_rows: usize, n_cols: usize) -> Array2<f64> {
    let mut m = Array2::from_shape_fn((n_rows, n_cols), |_| rng.gen_range(0.05..1.0));
    for mut row in m.rows_mut() {
        let total = row.sum();
        row /= total;
    }
    m
}

///
/// Uniform model, i.e. all the entries in a row are the same
///
pub fn mock_uniform_model(n_states: usize, n_symbols: usize) -> Model {
    Model {
        pi: Array1::from_elem(n_states, 1.0 / n_states as f64),
        trans: Array2::from_elem((n_states, n_states), 1.0 / n_states as f64),
        emit: Array2::from_elem((n_states, n_symbols), 1.0 / n_symbols as f64),
    }
}

//!
//! Naive (unscaled, brute-force) calculations
//!
//! Only usable for tiny models and short sequences. Used to cross-check
//! the scaled recursions.
//!
//! `likelihood_by_enumeration` and `expected_counts_by_enumeration` expect
//! `obs` that passed `ModelView::check_observations`.
//!
use super::counts::Counts;
use crate::error::Result;
use crate::model::ModelView;
use itertools::Itertools;
use ndarray::Array2;

///
/// Unscaled forward table `F[t][i] = P(x[0..=t], state i at t)`
///
pub fn forward_unscaled(model: &ModelView, obs: &[usize]) -> Result<Array2<f64>> {
    model.check_observations(obs)?;
    let k = model.n_states();
    let mut f = Array2::<f64>::zeros((obs.len(), k));
    for i in 0..k {
        f[[0, i]] = model.pi[i] * model.emit[[i, obs[0]]];
    }
    for t in 1..obs.len() {
        for j in 0..k {
            let p: f64 = (0..k).map(|i| f[[t - 1, i]] * model.trans[[i, j]]).sum();
            f[[t, j]] = p * model.emit[[j, obs[t]]];
        }
    }
    Ok(f)
}

///
/// `P(path, obs)` of a hidden state path
///
/// `path` and `obs` are non-empty and of the same length.
///
fn path_prob(model: &ModelView, path: &[usize], obs: &[usize]) -> f64 {
    let mut p = model.pi[path[0]] * model.emit[[path[0], obs[0]]];
    for t in 1..obs.len() {
        p *= model.trans[[path[t - 1], path[t]]] * model.emit[[path[t], obs[t]]];
    }
    p
}

///
/// Iterator of all `k^L` hidden state paths
///
fn all_paths(k: usize, n: usize) -> impl Iterator<Item = Vec<usize>> {
    std::iter::repeat(0..k).take(n).multi_cartesian_product()
}

///
/// `P(obs)` by summing over all hidden state paths
///
pub fn likelihood_by_enumeration(model: &ModelView, obs: &[usize]) -> f64 {
    all_paths(model.n_states(), obs.len())
        .map(|path| path_prob(model, &path, obs))
        .sum()
}

///
/// Textbook expected counts by summing over all hidden state paths
///
/// * pi: `P(state i at 0 | obs)`
/// * trans: `sum_t P(j at t-1, s at t | obs)`
/// * emit: `sum_t P(i at t | obs) [x[t] = x]`
///
pub fn expected_counts_by_enumeration(model: &ModelView, obs: &[usize]) -> Counts {
    let k = model.n_states();
    let mut counts = Counts::zeros(k, model.n_symbols());
    let total = likelihood_by_enumeration(model, obs);
    for path in all_paths(k, obs.len()) {
        let w = path_prob(model, &path, obs) / total;
        counts.pi[path[0]] += w;
        counts.emit[[path[0], obs[0]]] += w;
        for t in 1..obs.len() {
            counts.trans[[path[t - 1], path[t]]] += w;
            counts.emit[[path[t], obs[t]]] += w;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HmmError;
    use crate::hmm::mocks::mock_two_state;

    #[test]
    fn enumeration_agrees_with_unscaled_forward() {
        let (model, obs) = mock_two_state();
        let v = model.view();
        let f = forward_unscaled(&v, &obs).unwrap();
        let p = likelihood_by_enumeration(&v, &obs);
        assert_abs_diff_eq!(f.row(obs.len() - 1).sum(), p, epsilon = 1e-12);
        assert_abs_diff_eq!(p, 0.120445, epsilon = 1e-12);
    }
    #[test]
    fn unscaled_forward_rejects_empty_and_invalid_observations() {
        let (model, _) = mock_two_state();
        let v = model.view();
        assert!(matches!(
            forward_unscaled(&v, &[]),
            Err(HmmError::ShapeMismatch(_))
        ));
        assert!(matches!(
            forward_unscaled(&v, &[0, 5]),
            Err(HmmError::InvalidObservation { position: 1, .. })
        ));
    }
    #[test]
    fn enumeration_counts_are_distributions() {
        let (model, obs) = mock_two_state();
        let c = expected_counts_by_enumeration(&model.view(), &obs);
        assert_abs_diff_eq!(c.pi.sum(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.trans.sum(), (obs.len() - 1) as f64, epsilon = 1e-12);
        assert_abs_diff_eq!(c.emit.sum(), obs.len() as f64, epsilon = 1e-12);
    }
}

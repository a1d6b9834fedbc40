//!
//! Backward algorithm definitions
//!
use super::forward::{check_scale, ForwardResult};
use crate::error::{HmmError, Result};
use crate::model::ModelView;
use ndarray::{Array2, ArrayView1};

/// Struct that stores scaled Backward algorithm result
#[derive(Debug, Clone)]
pub struct BackwardResult {
    /// `beta[t, i]`, `beta[L-1, :] = 1`
    pub beta: Array2<f64>,
}

impl<'a> ModelView<'a> {
    ///
    /// Run scaled Backward algorithm to the observations
    ///
    /// ```text
    /// beta[L-1][i] = 1
    /// beta[n-1][i] = (sum_j beta[n][j] e_j(x[n]) T[i][j]) / c[n]
    /// ```
    ///
    /// `scale` must be the scale factors `c` produced by `forward` on the
    /// same model and observations. A scale factor that is not positive fails
    /// with `ZeroProbability`.
    ///
    pub fn backward(&self, obs: &[usize], scale: ArrayView1<f64>) -> Result<BackwardResult> {
        self.check_observations(obs)?;
        if scale.len() != obs.len() {
            return Err(HmmError::ShapeMismatch(format!(
                "scale has length {} but there are {} observations",
                scale.len(),
                obs.len()
            )));
        }
        for (t, &c) in scale.iter().enumerate() {
            check_scale(c, t)?;
        }
        let k = self.n_states();
        let n = obs.len();
        let mut beta = Array2::<f64>::zeros((n, k));
        beta.row_mut(n - 1).fill(1.0);

        for t in (1..n).rev() {
            let x = obs[t];
            for i in 0..k {
                let mut p = 0.0;
                for j in 0..k {
                    p += beta[[t, j]] * self.emit[[j, x]] * self.trans[[i, j]];
                }
                beta[[t - 1, i]] = p / scale[t];
            }
        }

        Ok(BackwardResult { beta })
    }
    ///
    /// Run Backward with the scale factors of a finished forward run.
    ///
    pub fn backward_from(&self, obs: &[usize], forward: &ForwardResult) -> Result<BackwardResult> {
        self.backward(obs, forward.scale.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::mocks::{mock_three_state, mock_two_state};

    #[test]
    fn backward_last_row_is_one() {
        let (model, obs) = mock_three_state();
        let v = model.view();
        let f = v.forward(&obs).unwrap();
        let b = v.backward_from(&obs, &f).unwrap();
        for i in 0..model.n_states() {
            assert_eq!(b.beta[[obs.len() - 1, i]], 1.0);
        }
    }
    #[test]
    fn backward_single_observation() {
        let (model, _) = mock_two_state();
        let v = model.view();
        let f = v.forward(&[0]).unwrap();
        let b = v.backward_from(&[0], &f).unwrap();
        assert_eq!(b.beta.dim(), (1, 2));
        assert_eq!(b.beta.row(0).to_vec(), vec![1.0, 1.0]);
    }
    #[test]
    fn backward_golden() {
        let (model, obs) = mock_two_state();
        let v = model.view();
        let f = v.forward(&obs).unwrap();
        let b = v.backward_from(&obs, &f).unwrap();
        let expected = [
            [1.0534683880609406, 0.7593922537257669],
            [0.9046867865000622, 1.7218232388226988],
            [1.0, 1.0],
        ];
        for t in 0..3 {
            for i in 0..2 {
                assert_abs_diff_eq!(b.beta[[t, i]], expected[t][i], epsilon = 1e-12);
            }
        }
    }
    #[test]
    fn backward_rejects_zero_scale() {
        let (model, obs) = mock_two_state();
        let scale = ndarray::array![0.55, 0.0, 0.34];
        match model.view().backward(&obs, scale.view()) {
            Err(HmmError::ZeroProbability { position }) => assert_eq!(position, 1),
            r => panic!("unexpected {:?}", r),
        }
        let scale = ndarray::array![0.55, 0.64, f64::NAN];
        assert!(matches!(
            model.view().backward(&obs, scale.view()),
            Err(HmmError::ZeroProbability { position: 2 })
        ));
    }
    #[test]
    fn backward_scale_length_mismatch() {
        let (model, obs) = mock_two_state();
        let scale = ndarray::Array1::<f64>::ones(obs.len() + 1);
        let r = model.view().backward(&obs, scale.view());
        assert!(matches!(r, Err(HmmError::ShapeMismatch(_))));
    }
}

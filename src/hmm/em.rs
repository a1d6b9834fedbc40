//!
//! Public entry points: forward, forward-backward, and a single Baum-Welch step
//!
//! Each call performs at most one E-step and one M-step. Iterating until
//! the likelihood converges is left to the caller.
//!
use super::counts::{CountMode, Counts};
use super::forward::ForwardResult;
use super::normalize::DEFAULT_TOLERANCE;
use crate::error::Result;
use crate::model::{Model, ModelView};
use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

///
/// Forward and Backward tables of the same observations
///
/// `alpha` and `beta` share the scale factors, so they must always be used
/// together with the same `t`.
///
#[derive(Debug, Clone)]
pub struct ForwardBackward {
    pub alpha: Array2<f64>,
    pub beta: Array2<f64>,
    pub scale: Array1<f64>,
    pub log_likelihood: f64,
}

impl ForwardBackward {
    ///
    /// `sum_i alpha[t][i] beta[t][i]` for each `t`.
    ///
    /// This is constant (equal to 1) across `t` for a correct run.
    ///
    pub fn posterior_norms(&self) -> Array1<f64> {
        (&self.alpha * &self.beta).sum_axis(ndarray::Axis(1))
    }
    ///
    /// `P(state i at t | obs)`, each row sums to 1.
    ///
    pub fn posteriors(&self) -> Array2<f64> {
        let mut gamma = &self.alpha * &self.beta;
        for mut row in gamma.rows_mut() {
            let total = row.sum();
            row /= total;
        }
        gamma
    }
}

///
/// Options of a Baum-Welch step
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaumWelchOptions {
    /// how scale factors enter the counts
    pub mode: CountMode,
    /// accumulate the counts with rayon
    pub parallel: bool,
    /// allowed `|sum(row) - 1|` of the new trans/emit
    pub tolerance: f64,
}

impl Default for BaumWelchOptions {
    fn default() -> Self {
        BaumWelchOptions {
            mode: CountMode::default(),
            parallel: false,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

///
/// Everything produced by a Baum-Welch step
///
#[derive(Debug, Clone)]
pub struct BaumWelchOutput {
    /// re-estimated model
    pub model: Model,
    /// counts the model was normalized from
    pub counts: Counts,
    /// log likelihood of the observations under the input model
    pub log_likelihood: f64,
}

impl<'a> ModelView<'a> {
    ///
    /// Run Forward, then Backward with its scale factors.
    ///
    pub fn forward_backward(&self, obs: &[usize]) -> Result<ForwardBackward> {
        let f = self.forward(obs)?;
        let b = self.backward_from(obs, &f)?;
        Ok(ForwardBackward {
            alpha: f.alpha,
            beta: b.beta,
            scale: f.scale,
            log_likelihood: f.log_likelihood,
        })
    }
    ///
    /// One E-step and M-step.
    ///
    pub fn baum_welch(&self, obs: &[usize], opts: &BaumWelchOptions) -> Result<BaumWelchOutput> {
        let fb = self.forward_backward(obs)?;
        let counts = if opts.parallel {
            self.accumulate_parallel(
                obs,
                fb.alpha.view(),
                fb.beta.view(),
                fb.scale.view(),
                opts.mode,
            )?
        } else {
            self.accumulate(
                obs,
                fb.alpha.view(),
                fb.beta.view(),
                fb.scale.view(),
                opts.mode,
            )?
        };
        let model = counts.clone().normalize(opts.tolerance)?;
        debug!(
            "baum_welch logL={} mode={:?} parallel={}",
            fb.log_likelihood, opts.mode, opts.parallel
        );
        Ok(BaumWelchOutput {
            model,
            counts,
            log_likelihood: fb.log_likelihood,
        })
    }
}

impl Model {
    pub fn forward(&self, obs: &[usize]) -> Result<ForwardResult> {
        self.view().forward(obs)
    }
    pub fn forward_backward(&self, obs: &[usize]) -> Result<ForwardBackward> {
        self.view().forward_backward(obs)
    }
    pub fn baum_welch(&self, obs: &[usize], opts: &BaumWelchOptions) -> Result<BaumWelchOutput> {
        self.view().baum_welch(obs, opts)
    }
}

///
/// Scaled Forward algorithm: `(alpha, scale, logL)`
///
pub fn forward<'a>(
    pi: ArrayView1<'a, f64>,
    trans: ArrayView2<'a, f64>,
    emit: ArrayView2<'a, f64>,
    obs: &[usize],
) -> Result<ForwardResult> {
    ModelView::new(pi, trans, emit)?.forward(obs)
}

///
/// `log P(obs)` only
///
pub fn log_likelihood<'a>(
    pi: ArrayView1<'a, f64>,
    trans: ArrayView2<'a, f64>,
    emit: ArrayView2<'a, f64>,
    obs: &[usize],
) -> Result<f64> {
    forward(pi, trans, emit, obs).map(|f| f.log_likelihood)
}

///
/// Scaled Forward and Backward: `(alpha, beta, scale, logL)`
///
pub fn forward_backward<'a>(
    pi: ArrayView1<'a, f64>,
    trans: ArrayView2<'a, f64>,
    emit: ArrayView2<'a, f64>,
    obs: &[usize],
) -> Result<ForwardBackward> {
    ModelView::new(pi, trans, emit)?.forward_backward(obs)
}

///
/// One Baum-Welch step with the default options (`CountMode::Legacy`).
///
pub fn baum_welch<'a>(
    pi: ArrayView1<'a, f64>,
    trans: ArrayView2<'a, f64>,
    emit: ArrayView2<'a, f64>,
    obs: &[usize],
) -> Result<Model> {
    baum_welch_with(pi, trans, emit, obs, &BaumWelchOptions::default()).map(|o| o.model)
}

///
/// One Baum-Welch step with explicit options.
///
pub fn baum_welch_with<'a>(
    pi: ArrayView1<'a, f64>,
    trans: ArrayView2<'a, f64>,
    emit: ArrayView2<'a, f64>,
    obs: &[usize],
    opts: &BaumWelchOptions,
) -> Result<BaumWelchOutput> {
    ModelView::new(pi, trans, emit)?.baum_welch(obs, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HmmError;
    use crate::hmm::mocks::{mock_three_state, mock_two_state, mock_uniform_model};

    #[test]
    fn posterior_norms_are_one() {
        let (model, obs) = mock_three_state();
        let fb = model.forward_backward(&obs).unwrap();
        for &z in fb.posterior_norms().iter() {
            assert_abs_diff_eq!(z, 1.0, epsilon = 1e-9);
        }
        for row in fb.posteriors().rows() {
            assert_abs_diff_eq!(row.sum(), 1.0, epsilon = 1e-12);
        }
    }
    #[test]
    fn uniform_model_likelihood() {
        let model = mock_uniform_model(3, 4);
        let obs = vec![0, 3, 2, 2, 1];
        let f = model.forward(&obs).unwrap();
        assert_abs_diff_eq!(f.log_likelihood, 5.0 * 0.25f64.ln(), epsilon = 1e-12);
    }
    #[test]
    fn baum_welch_legacy_golden() {
        let (model, obs) = mock_two_state();
        let m = baum_welch(model.pi.view(), model.trans.view(), model.emit.view(), &obs).unwrap();
        assert_abs_diff_eq!(m.pi[0], 1.5671430566195808, epsilon = 1e-9);
        assert_abs_diff_eq!(m.pi[1], 0.21604331542696073, epsilon = 1e-9);
        assert_abs_diff_eq!(m.trans[[0, 0]], 0.6404333380597127, epsilon = 1e-9);
        assert_abs_diff_eq!(m.trans[[1, 1]], 0.6949487640107032, epsilon = 1e-9);
        assert_abs_diff_eq!(m.emit[[0, 0]], 0.9254321490560022, epsilon = 1e-9);
        assert_abs_diff_eq!(m.emit[[1, 1]], 0.6600251707142487, epsilon = 1e-9);
    }
    #[test]
    fn baum_welch_rejects_bad_shape() {
        let (model, obs) = mock_two_state();
        // pi of a 1-state model with 2x2 trans
        let r = baum_welch(
            model.pi.slice(ndarray::s![..1]),
            model.trans.view(),
            model.emit.view(),
            &obs,
        );
        assert!(matches!(r, Err(HmmError::ShapeMismatch(_))));
    }
}

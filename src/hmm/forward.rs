//!
//! Forward algorithm definitions
//!
use crate::error::{HmmError, Result};
use crate::model::ModelView;
use log::{debug, trace};
use ndarray::{Array1, Array2};

/// Struct that stores scaled Forward algorithm result
/// for the given observations
///
/// `alpha.nrows()` and `scale.len()` are equal to the length of observations.
#[derive(Debug, Clone)]
pub struct ForwardResult {
    /// `alpha[t, i]`, each row sums to 1
    pub alpha: Array2<f64>,
    /// `scale[t] > 0`, the normalizer removed from row `t`
    pub scale: Array1<f64>,
    /// `sum_t log(scale[t]) = log P(obs)`
    pub log_likelihood: f64,
}

impl ForwardResult {
    /// The number of observations that this result stores.
    pub fn n_observations(&self) -> usize {
        self.scale.len()
    }
}

impl<'a> ModelView<'a> {
    ///
    /// Run scaled Forward algorithm to the observations
    ///
    /// ```text
    /// alpha[0][i] = pi[i] e_i(x[0]) / c[0]
    /// alpha[t][j] = (sum_i T[i][j] alpha[t-1][i]) e_j(x[t]) / c[t]
    /// ```
    ///
    /// Fails with `ZeroProbability` if some `c[t]` is zero.
    ///
    pub fn forward(&self, obs: &[usize]) -> Result<ForwardResult> {
        self.check_observations(obs)?;
        let k = self.n_states();
        let n = obs.len();
        let mut alpha = Array2::<f64>::zeros((n, k));
        let mut scale = Array1::<f64>::zeros(n);

        // (1) init
        let x = obs[0];
        let mut c = 0.0;
        for i in 0..k {
            c += self.pi[i] * self.emit[[i, x]];
        }
        check_scale(c, 0)?;
        scale[0] = c;
        for i in 0..k {
            alpha[[0, i]] = self.pi[i] * self.emit[[i, x]] / c;
        }

        // (2) recursion
        let mut d = vec![0.0; k];
        for t in 1..n {
            let x = obs[t];
            for j in 0..k {
                let mut p = 0.0;
                for i in 0..k {
                    p += self.trans[[i, j]] * alpha[[t - 1, i]];
                }
                d[j] = p * self.emit[[j, x]];
            }
            let c: f64 = d.iter().sum();
            check_scale(c, t)?;
            scale[t] = c;
            for j in 0..k {
                alpha[[t, j]] = d[j] / c;
            }
            trace!("forward t={} c={}", t, c);
        }

        // (3) log likelihood
        let log_likelihood = scale.iter().map(|c| c.ln()).sum();
        debug!("forward L={} k={} logL={}", n, k, log_likelihood);

        Ok(ForwardResult {
            alpha,
            scale,
            log_likelihood,
        })
    }
}

/// `c` is rejected when zero, and also when NaN (which only a malformed model produces)
pub(crate) fn check_scale(c: f64, position: usize) -> Result<()> {
    if c > 0.0 {
        Ok(())
    } else {
        Err(HmmError::ZeroProbability { position })
    }
}

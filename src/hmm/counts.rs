//!
//! Expected usage counts (E-step of Baum-Welch)
//!
//! - **pi counts** (for each state)
//!     The posterior probability of being in the state at `t=0`.
//!
//! - **trans counts** (for each pair of states)
//!     The expected number of `j -> s` transitions while emitting the
//!     observations.
//!
//! - **emit counts** (for each state and each symbol)
//!     The expected number of times the state emitted the symbol.
//!
//! ## Count modes
//!
//! `CountMode::Legacy` keeps two quirks of the scaled recursion this crate
//! has to stay numerically compatible with:
//!
//! 1. the `t=0` occupancy is `alpha[0][i] beta[0][i] / c[i]`, where the
//!    scale factor is indexed by the *state* `i` instead of the time step.
//! 2. the transition count at `t` is not divided by `c[t]`.
//!
//! Both change the counts away from the textbook posteriors. In particular
//! `pi` counts do not sum to 1 in general.
//!
//! `CountMode::Standard` uses `gamma[0][i] = alpha[0][i] beta[0][i]` and
//! divides the transition count at `t` by `c[t]`, which gives the exact
//! expected counts.
//!
use crate::error::{HmmError, Result};
use crate::model::ModelView;
use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1, Zip};

///
/// How the scale factors enter the counts. See the module document.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMode {
    /// `t=0` divided by `c[i]`, transitions not divided by `c[t]`
    Legacy,
    /// exact posterior expectations
    Standard,
}

impl Default for CountMode {
    fn default() -> Self {
        CountMode::Legacy
    }
}

///
/// Sufficient statistics of one E-step
///
#[derive(Debug, Clone, PartialEq)]
pub struct Counts {
    /// `[k]`
    pub pi: Array1<f64>,
    /// `[k, k]`
    pub trans: Array2<f64>,
    /// `[k, Ew]`
    pub emit: Array2<f64>,
}

impl Counts {
    pub fn zeros(n_states: usize, n_symbols: usize) -> Self {
        Counts {
            pi: Array1::zeros(n_states),
            trans: Array2::zeros((n_states, n_states)),
            emit: Array2::zeros((n_states, n_symbols)),
        }
    }
}

impl<'a> ModelView<'a> {
    ///
    /// Accumulate the expected counts from Forward/Backward tables
    ///
    /// ```text
    /// t=0:
    ///   g[i] = alpha[0][i] beta[0][i] (/ c[i] in Legacy)
    ///   pi[i] = g[i]
    ///   E[i][x[0]] += g[i]
    /// t=1..L-1:
    ///   T[j][s] += alpha[t-1][j] T[j][s] e_s(x[t]) beta[t][s] (/ c[t] in Standard)
    ///   E[j][x[t]] += alpha[t][j] beta[t][j]
    /// ```
    ///
    pub fn accumulate(
        &self,
        obs: &[usize],
        alpha: ArrayView2<f64>,
        beta: ArrayView2<f64>,
        scale: ArrayView1<f64>,
        mode: CountMode,
    ) -> Result<Counts> {
        let (mut counts, init) = self.init_counts(obs, alpha, beta, scale, mode)?;
        debug!("accumulate mode={:?} L={}", mode, obs.len());
        Zip::indexed(counts.trans.rows_mut())
            .and(counts.emit.rows_mut())
            .for_each(|j, trans_row, emit_row| {
                self.fill_counts_row(j, init[j], obs, alpha, beta, scale, mode, trans_row, emit_row)
            });
        Ok(counts)
    }
    ///
    /// `accumulate` with rayon, parallel over the source states.
    ///
    /// Each row is summed in the same order as in `accumulate`.
    ///
    pub fn accumulate_parallel(
        &self,
        obs: &[usize],
        alpha: ArrayView2<f64>,
        beta: ArrayView2<f64>,
        scale: ArrayView1<f64>,
        mode: CountMode,
    ) -> Result<Counts> {
        let (mut counts, init) = self.init_counts(obs, alpha, beta, scale, mode)?;
        debug!("accumulate_parallel mode={:?} L={}", mode, obs.len());
        Zip::indexed(counts.trans.rows_mut())
            .and(counts.emit.rows_mut())
            .par_for_each(|j, trans_row, emit_row| {
                self.fill_counts_row(j, init[j], obs, alpha, beta, scale, mode, trans_row, emit_row)
            });
        Ok(counts)
    }
    ///
    /// Check the table shapes, and fill the `t=0` occupancy into pi counts.
    ///
    fn init_counts(
        &self,
        obs: &[usize],
        alpha: ArrayView2<f64>,
        beta: ArrayView2<f64>,
        scale: ArrayView1<f64>,
        mode: CountMode,
    ) -> Result<(Counts, Array1<f64>)> {
        self.check_observations(obs)?;
        let k = self.n_states();
        let n = obs.len();
        if alpha.dim() != (n, k) || beta.dim() != (n, k) || scale.len() != n {
            return Err(HmmError::ShapeMismatch(format!(
                "alpha {:?}, beta {:?} and scale [{}] do not match L={} k={}",
                alpha.dim(),
                beta.dim(),
                scale.len(),
                n,
                k
            )));
        }
        if mode == CountMode::Legacy && k > n {
            return Err(HmmError::ShapeMismatch(format!(
                "legacy counts read scale[i] for each of {} states but there are only {} scale factors",
                k, n
            )));
        }

        let init = Array1::from_shape_fn(k, |i| match mode {
            CountMode::Legacy => alpha[[0, i]] * beta[[0, i]] / scale[i],
            CountMode::Standard => alpha[[0, i]] * beta[[0, i]],
        });
        let mut counts = Counts::zeros(k, self.n_symbols());
        counts.pi.assign(&init);
        Ok((counts, init))
    }
    ///
    /// Fill the counts of transitions from `j` and emissions of `j`.
    ///
    #[allow(clippy::too_many_arguments)]
    fn fill_counts_row(
        &self,
        j: usize,
        init: f64,
        obs: &[usize],
        alpha: ArrayView2<f64>,
        beta: ArrayView2<f64>,
        scale: ArrayView1<f64>,
        mode: CountMode,
        mut trans_row: ArrayViewMut1<f64>,
        mut emit_row: ArrayViewMut1<f64>,
    ) {
        let k = self.n_states();
        emit_row[obs[0]] += init;
        for t in 1..obs.len() {
            let x = obs[t];
            let from = match mode {
                CountMode::Legacy => alpha[[t - 1, j]],
                CountMode::Standard => alpha[[t - 1, j]] / scale[t],
            };
            for s in 0..k {
                trans_row[s] += from * self.trans[[j, s]] * self.emit[[s, x]] * beta[[t, s]];
            }
            emit_row[x] += alpha[[t, j]] * beta[[t, j]];
        }
    }
}

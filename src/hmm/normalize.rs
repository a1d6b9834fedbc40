//!
//! Turn expected counts into a new model (M-step of Baum-Welch)
//!
use super::counts::Counts;
use crate::error::{HmmError, Result};
use crate::model::Model;
use log::warn;
use ndarray::{Array2, Axis};

/// Default tolerance of `|sum(row) - 1|` for re-estimated rows
pub const DEFAULT_TOLERANCE: f64 = 0.001;

impl Counts {
    ///
    /// Create the re-estimated model
    ///
    /// * `pi` is the pi counts as-is (no normalization)
    /// * `trans[i, :] = trans_counts[i, :] / sum(trans_counts[i, :])`
    /// * `emit[i, :] = emit_counts[i, :] / sum(emit_counts[i, :])`
    ///
    /// Fails with `NormalizationFailure` if a row of the new trans/emit does not
    /// sum to 1 within `tolerance`. A row with zero counts always fails.
    ///
    pub fn normalize(self, tolerance: f64) -> Result<Model> {
        let trans = normalize_rows(self.trans, "transition", tolerance)?;
        let emit = normalize_rows(self.emit, "emission", tolerance)?;
        Ok(Model {
            pi: self.pi,
            trans,
            emit,
        })
    }
}

fn normalize_rows(
    mut counts: Array2<f64>,
    matrix: &'static str,
    tolerance: f64,
) -> Result<Array2<f64>> {
    for (row, mut xs) in counts.axis_iter_mut(Axis(0)).enumerate() {
        let total = xs.sum();
        xs /= total;
        let sum = xs.sum();
        // NaN from a zero row fails here too
        if !((sum - 1.0).abs() < tolerance) {
            warn!("{} row {} sums to {} after normalization", matrix, row, sum);
            return Err(HmmError::NormalizationFailure { matrix, row, sum });
        }
    }
    Ok(counts)
}

//!
//! Error type shared by all HMM calculations
//!
use thiserror::Error;

///
/// Failures of a forward/backward or Baum-Welch call.
///
/// Every failure aborts the call. Inputs are never mutated, so the caller
/// can retry with a perturbed model or stop training.
///
#[derive(Debug, Error)]
pub enum HmmError {
    /// pi/T/E/obs dimensions are inconsistent
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// `obs[position]` is not in `[0, n_symbols)`
    #[error("invalid observation at {position}: symbol {symbol} is not in [0, {n_symbols})")]
    InvalidObservation {
        position: usize,
        symbol: usize,
        n_symbols: usize,
    },

    /// The model assigns zero probability to `obs[..=position]`
    #[error("zero probability: scale factor at t={position} is zero")]
    ZeroProbability { position: usize },

    /// A re-estimated row does not sum to 1
    #[error("normalization failure: row {row} of {matrix} sums to {sum}")]
    NormalizationFailure {
        matrix: &'static str,
        row: usize,
        sum: f64,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HmmError>;

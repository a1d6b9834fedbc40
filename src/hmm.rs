//!
//! Scaled HMM calculation
//!
//! # Overview of calculation
//!
//! x = x[0],...,x[L-1] : Observations of length L
//!
//! Forward (scaled)
//! alpha[t][i]
//!  = P(x[0..=t] and in state i at t) / (c[0] c[1] ... c[t])
//!
//! c[t] is the scale factor that makes `sum_i alpha[t][i] = 1`, so
//! `log P(x) = sum_t log c[t]`.
//!
//! Backward (scaled with the forward scale factors)
//! beta[t][i]
//!  = P(x[t+1..] | in state i at t) / (c[t+1] ... c[L-1])
//!  beta[L-1][i] = 1
//!
//! Counts (E-step)
//! alpha[t][i] beta[t][i] = P(in state i at t | x)
//!
//! Normalize (M-step)
//! new T and E are the row-normalized counts.
//!
pub mod backward;
pub mod counts;
pub mod em;
pub mod forward;
pub mod mocks;
pub mod naive;
pub mod normalize;

pub use backward::BackwardResult;
pub use counts::{CountMode, Counts};
pub use em::{BaumWelchOptions, BaumWelchOutput, ForwardBackward};
pub use forward::ForwardResult;

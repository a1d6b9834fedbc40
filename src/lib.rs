//!
//! coalhmm: scaled forward-backward and Baum-Welch for discrete HMMs
//!
//! * `forward`: scaled forward probabilities and `log P(obs)`
//! * `forward_backward`: forward and backward tables sharing the scale factors
//! * `baum_welch`: one E-step and M-step, returning a new model
//!
//! ```
//! use coalhmm::{baum_welch, forward, Model};
//!
//! let model = Model::from_vecs(
//!     vec![0.5, 0.5],
//!     vec![vec![0.7, 0.3], vec![0.3, 0.7]],
//!     vec![vec![0.9, 0.1], vec![0.2, 0.8]],
//! )
//! .unwrap();
//! let obs = [0, 0, 1];
//! let f = forward(model.pi.view(), model.trans.view(), model.emit.view(), &obs).unwrap();
//! assert!((f.log_likelihood - 0.120445f64.ln()).abs() < 1e-9);
//!
//! let new_model = baum_welch(model.pi.view(), model.trans.view(), model.emit.view(), &obs).unwrap();
//! assert_eq!(new_model.n_states(), 2);
//! ```
//!
pub mod error;
pub mod hmm;
pub mod model;

pub use error::{HmmError, Result};
pub use hmm::em::{baum_welch, baum_welch_with, forward, forward_backward, log_likelihood};
pub use hmm::{BaumWelchOptions, BaumWelchOutput, CountMode, Counts, ForwardBackward, ForwardResult};
pub use model::{Model, ModelView};

#[cfg(test)]
#[macro_use]
extern crate approx;

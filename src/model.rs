//!
//! HMM parameters
//!
//! * `pi[i]`: initial probability of state `i`
//! * `trans[i, j]`: transition probability `i -> j`
//! * `emit[i, x]`: probability that state `i` emits symbol `x`
//!
use crate::error::{HmmError, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::path::Path;

///
/// Discrete-emission HMM owned by the caller.
///
/// Treated as read-only by every calculation. Baum-Welch returns a brand-new
/// `Model` instead of updating this one.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// initial distribution `[k]`
    pub pi: Array1<f64>,
    /// transition matrix `[k, k]`
    pub trans: Array2<f64>,
    /// emission matrix `[k, Ew]`
    pub emit: Array2<f64>,
}

impl Model {
    ///
    /// Create a model after checking the shapes of pi/trans/emit.
    ///
    /// Probabilities are not checked here. Use `is_row_stochastic` for that.
    ///
    pub fn new(pi: Array1<f64>, trans: Array2<f64>, emit: Array2<f64>) -> Result<Model> {
        ModelView::new(pi.view(), trans.view(), emit.view())?;
        Ok(Model { pi, trans, emit })
    }
    ///
    /// Create a model from nested `Vec`s, e.g. literal matrices in tests.
    ///
    pub fn from_vecs(pi: Vec<f64>, trans: Vec<Vec<f64>>, emit: Vec<Vec<f64>>) -> Result<Model> {
        let pi = Array1::from(pi);
        let trans = to_array2("trans", trans)?;
        let emit = to_array2("emit", emit)?;
        Model::new(pi, trans, emit)
    }
    ///
    /// Borrow the parameters as a `ModelView`.
    ///
    pub fn view(&self) -> ModelView {
        ModelView {
            pi: self.pi.view(),
            trans: self.trans.view(),
            emit: self.emit.view(),
        }
    }
    /// Number of hidden states `k`
    pub fn n_states(&self) -> usize {
        self.pi.len()
    }
    /// Number of observable symbols `Ew`
    pub fn n_symbols(&self) -> usize {
        self.emit.ncols()
    }
    ///
    /// Check that pi and every row of trans/emit sum to 1 within `tol`
    /// and that no entry is negative.
    ///
    pub fn is_row_stochastic(&self, tol: f64) -> bool {
        let is_distribution =
            |row: ArrayView1<f64>| row.iter().all(|&p| p >= 0.0) && (row.sum() - 1.0).abs() < tol;
        is_distribution(self.pi.view())
            && self.trans.rows().into_iter().all(is_distribution)
            && self.emit.rows().into_iter().all(is_distribution)
    }
    ///
    /// Load a model from a json file written by `to_json_file`.
    ///
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Model> {
        let s = std::fs::read_to_string(path)?;
        let model: Model = serde_json::from_str(&s)?;
        // deserialization does not check cross-field shapes
        Model::new(model.pi, model.trans, model.emit)
    }
    ///
    /// Write the model as a json file.
    ///
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let s = serde_json::to_string(self)?;
        std::fs::write(path, s)?;
        Ok(())
    }
}

fn to_array2(name: &str, rows: Vec<Vec<f64>>) -> Result<Array2<f64>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, |row| row.len());
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n_cols) {
        return Err(HmmError::ShapeMismatch(format!(
            "{} row {} has length {} but row 0 has length {}",
            name,
            i,
            row.len(),
            n_cols
        )));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .map_err(|e| HmmError::ShapeMismatch(format!("{}: {}", name, e)))
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "state\tpi\ttrans\temit")?;
        for i in 0..self.n_states() {
            writeln!(
                f,
                "{}\t{:.4}\t{:.4?}\t{:.4?}",
                i,
                self.pi[i],
                self.trans.row(i).to_vec(),
                self.emit.row(i).to_vec()
            )?;
        }
        Ok(())
    }
}

///
/// Borrowed pi/trans/emit with consistent shapes.
///
/// All recursions run on this view, so callers holding plain arrays do not
/// need to build an owned `Model`.
///
#[derive(Debug, Clone, Copy)]
pub struct ModelView<'a> {
    pub pi: ArrayView1<'a, f64>,
    pub trans: ArrayView2<'a, f64>,
    pub emit: ArrayView2<'a, f64>,
}

impl<'a> ModelView<'a> {
    ///
    /// Check `pi: [k]`, `trans: [k, k]`, `emit: [k, Ew]` with `k, Ew > 0`.
    ///
    pub fn new(
        pi: ArrayView1<'a, f64>,
        trans: ArrayView2<'a, f64>,
        emit: ArrayView2<'a, f64>,
    ) -> Result<ModelView<'a>> {
        let k = pi.len();
        if k == 0 {
            return Err(HmmError::ShapeMismatch("model has no states".to_string()));
        }
        if trans.dim() != (k, k) {
            return Err(HmmError::ShapeMismatch(format!(
                "trans is {:?} but pi has {} states",
                trans.dim(),
                k
            )));
        }
        if emit.nrows() != k {
            return Err(HmmError::ShapeMismatch(format!(
                "emit has {} rows but pi has {} states",
                emit.nrows(),
                k
            )));
        }
        if emit.ncols() == 0 {
            return Err(HmmError::ShapeMismatch("emit has no symbols".to_string()));
        }
        Ok(ModelView { pi, trans, emit })
    }
    pub fn n_states(&self) -> usize {
        self.pi.len()
    }
    pub fn n_symbols(&self) -> usize {
        self.emit.ncols()
    }
    ///
    /// Check `obs` is non-empty and every symbol is in `[0, Ew)`.
    ///
    pub fn check_observations(&self, obs: &[usize]) -> Result<()> {
        if obs.is_empty() {
            return Err(HmmError::ShapeMismatch(
                "observation sequence is empty".to_string(),
            ));
        }
        let n_symbols = self.n_symbols();
        match obs.iter().position(|&x| x >= n_symbols) {
            Some(position) => Err(HmmError::InvalidObservation {
                position,
                symbol: obs[position],
                n_symbols,
            }),
            None => Ok(()),
        }
    }
    ///
    /// Copy the view into an owned `Model`.
    ///
    pub fn to_model(&self) -> Model {
        Model {
            pi: self.pi.to_owned(),
            trans: self.trans.to_owned(),
            emit: self.emit.to_owned(),
        }
    }
}

use super::ModelParameters;
use crate::Vector;
use crate::error::{RegressionError, Result};
use ndarray::{ArrayView1, ArrayView2};

#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub weights: Vector,
    pub bias: f64,
}

impl Gradient {
    /// `e = predict(x) - y`, `dw = xᵀe / n`, `db = sum(e) / n`.
    pub fn compute(
        params: &ModelParameters,
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, f64>,
    ) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(RegressionError::mismatch("batch targets", x.nrows(), y.len()));
        }
        if y.is_empty() {
            return Err(RegressionError::EmptyBatch);
        }

        let n_samples = y.len() as f64;
        let errors = params.predict(x)? - &y;
        let weights = x.t().dot(&errors) / n_samples;
        let bias = errors.sum() / n_samples;

        Ok(Self { weights, bias })
    }
}

/// One gradient-descent update on `params`, in place.
///
/// The parameters are left untouched when the batch is rejected. No
/// clipping is applied, so a learning rate that is too large diverges.
pub fn apply(
    params: &mut ModelParameters,
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
    learning_rate: f64,
) -> Result<()> {
    let gradient = Gradient::compute(params, x, y)?;
    params.weights.scaled_add(-learning_rate, &gradient.weights);
    params.bias -= learning_rate * gradient.bias;
    Ok(())
}

use crate::Vector;
use crate::error::{RegressionError, Result};
use ndarray::{ArrayView1, ArrayView2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::StandardNormal;
use rand::Rng;

const INITIAL_BIAS_RANGE: i32 = 5;

/// Weights and bias of a linear model `y = w·x + b`.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelParameters {
    pub weights: Vector,
    pub bias: f64,
}

impl ModelParameters {
    pub fn new(weights: Vector, bias: f64) -> Self {
        Self { weights, bias }
    }

    pub fn zeros(n_features: usize) -> Self {
        Self::new(Vector::zeros(n_features), 0.0)
    }

    /// Draws a starting point for iterative training: every weight from a
    /// standard normal and the bias from the integers `0..5`.
    ///
    /// This is a heuristic carried over as a default, not a principled
    /// initialization scheme.
    pub fn random<R: Rng>(n_features: usize, rng: &mut R) -> Self {
        let weights = Vector::random_using(n_features, StandardNormal, rng);
        let bias = rng.gen_range(0..INITIAL_BIAS_RANGE) as f64;
        Self::new(weights, bias)
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Vector> {
        if x.ncols() != self.weights.len() {
            return Err(RegressionError::mismatch(
                "features per sample",
                self.weights.len(),
                x.ncols(),
            ));
        }

        Ok(x.dot(&self.weights) + self.bias)
    }

    /// Half mean squared error: `sum((predict(x) - y)^2) / (2 * n)`.
    ///
    /// An empty sample set has zero loss.
    pub fn loss(&self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<f64> {
        if x.nrows() != y.len() {
            return Err(RegressionError::mismatch("targets", x.nrows(), y.len()));
        }
        if y.is_empty() {
            return Ok(0.0);
        }

        let residuals = self.predict(x)? - &y;
        let squared_sum = residuals.dot(&residuals);
        Ok(squared_sum / (2.0 * y.len() as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_predict_known_values() {
        let params = ModelParameters::new(array![2.0, -1.0], 0.5);
        let x = array![[1.0, 1.0], [3.0, 2.0], [0.0, 0.0]];

        let predictions = params.predict(x.view()).unwrap();

        assert_eq!(predictions, array![1.5, 4.5, 0.5]);
    }

    #[test]
    fn test_predict_dimension_mismatch() {
        let params = ModelParameters::new(array![1.0, 2.0, 3.0], 0.0);
        let x = crate::Matrix::zeros((4, 5));

        let err = params.predict(x.view()).unwrap_err();
        assert!(matches!(
            err,
            RegressionError::DimensionMismatch {
                expected: 3,
                got: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_predict_is_linear_in_weights() {
        let x = array![[1.0, -2.0], [0.5, 4.0], [3.0, 3.0]];
        let w = array![0.7, -1.3];
        let bias = 2.0;
        let k = 3.5;

        let base = ModelParameters::new(crate::Vector::zeros(2), bias)
            .predict(x.view())
            .unwrap();
        let delta = ModelParameters::new(w.clone(), bias).predict(x.view()).unwrap() - &base;
        let scaled_delta = ModelParameters::new(&w * k, bias).predict(x.view()).unwrap() - &base;

        assert_eq!(delta.len(), x.nrows());
        for (d, s) in delta.iter().zip(scaled_delta.iter()) {
            assert_abs_diff_eq!(d * k, *s, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_loss_zero_on_exact_fit() {
        let params = ModelParameters::new(array![2.0], 1.0);
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![3.0, 5.0, 7.0, 9.0];

        assert_eq!(params.loss(x.view(), y.view()).unwrap(), 0.0);
    }

    #[test]
    fn test_loss_is_half_mean_squared_error() {
        let params = ModelParameters::new(array![1.0], 0.0);
        let x = array![[1.0], [2.0]];
        let y = array![2.0, 4.0];

        // residuals -1 and -2: (1 + 4) / (2 * 2)
        let loss = params.loss(x.view(), y.view()).unwrap();
        assert_abs_diff_eq!(loss, 1.25, epsilon = 1e-12);
        assert!(loss > 0.0);
    }

    #[test]
    fn test_loss_target_mismatch() {
        let params = ModelParameters::new(array![1.0], 0.0);
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0, 3.0];

        assert!(matches!(
            params.loss(x.view(), y.view()),
            Err(RegressionError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_random_init_is_reproducible() {
        let a = ModelParameters::random(4, &mut StdRng::seed_from_u64(42));
        let b = ModelParameters::random(4, &mut StdRng::seed_from_u64(42));

        assert_eq!(a, b);
        assert_eq!(a.n_features(), 4);
        assert!((0.0..5.0).contains(&a.bias));
        assert_eq!(a.bias.fract(), 0.0);
    }
}

use crate::error::{RegressionError, Result};
use crate::optimizer::{ModelParameters, shuffle};
use crate::{Matrix, Vector};
use ndarray::{Axis, s};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Normal;
use rand::Rng;

#[derive(Clone, Debug)]
pub struct Dataset {
    pub features: Matrix,
    pub labels: Vector,
}

impl Dataset {
    pub fn new(features: Matrix, labels: Vector) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(RegressionError::mismatch("labels", features.nrows(), labels.len()));
        }

        Ok(Self { features, labels })
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Shuffles the samples with `rng`, then holds out the last `test_size`
    /// share (rounded) for validation.
    pub fn train_test_split<R: Rng>(&self, test_size: f64, rng: &mut R) -> Result<(Self, Self)> {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(RegressionError::invalid(format!(
                "test_size must be between 0 and 1, got {test_size}"
            )));
        }

        let n_samples = self.n_samples();
        let n_test = (n_samples as f64 * test_size).round() as usize;
        let n_train = n_samples - n_test;

        let (features, labels) = shuffle(self.features.view(), self.labels.view(), rng);

        let train = Dataset::new(
            features.slice(s![..n_train, ..]).to_owned(),
            labels.slice(s![..n_train]).to_owned(),
        )?;
        let test = Dataset::new(
            features.slice(s![n_train.., ..]).to_owned(),
            labels.slice(s![n_train..]).to_owned(),
        )?;

        Ok((train, test))
    }

    /// Noiseless synthetic regression data `y = X·w + b`.
    ///
    /// Every feature column is normal, with its mean drawn from the integers
    /// `0..10` and its standard deviation from `[0, 5)`.
    pub fn synthetic<R: Rng>(
        n_samples: usize,
        truth: &ModelParameters,
        rng: &mut R,
    ) -> Result<Self> {
        let n_features = truth.n_features();
        let mut features = Matrix::zeros((n_samples, n_features));

        for mut column in features.axis_iter_mut(Axis(1)) {
            let mean = rng.gen_range(0..10) as f64;
            let std_dev = rng.gen_range(0.0..5.0);
            let normal = Normal::new(mean, std_dev)
                .map_err(|e| RegressionError::invalid(e.to_string()))?;
            column.assign(&Vector::random_using(n_samples, normal, rng));
        }

        let labels = truth.predict(features.view())?;
        Dataset::new(features, labels)
    }
}

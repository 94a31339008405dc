use crate::error::{RegressionError, Result};
use crate::{Matrix, Vector};
use ndarray::Axis;

const MIN_STD: f64 = 1e-12;

/// Centres every feature on zero and scales it to unit variance.
#[derive(Clone, Debug, Default)]
pub struct StandardScaler {
    mean: Option<Vector>,
    std: Option<Vector>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            mean: None,
            std: None,
        }
    }

    pub fn fit(&mut self, data: &Matrix) -> Result<()> {
        let mean = data.mean_axis(Axis(0)).ok_or(RegressionError::EmptyBatch)?;
        let std = data
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > MIN_STD { s } else { 1.0 });

        self.mean = Some(mean);
        self.std = Some(std);
        Ok(())
    }

    pub fn transform(&self, data: &Matrix) -> Result<Matrix> {
        let (mean, std) = match (&self.mean, &self.std) {
            (Some(mean), Some(std)) => (mean, std),
            _ => {
                return Err(RegressionError::invalid(
                    "scaler not fitted, call fit() first",
                ));
            }
        };
        if data.ncols() != mean.len() {
            return Err(RegressionError::mismatch("scaled features", mean.len(), data.ncols()));
        }

        let mut result = data.clone();
        for mut row in result.axis_iter_mut(Axis(0)) {
            row -= mean;
            row /= std;
        }

        Ok(result)
    }

    pub fn fit_transform(&mut self, data: &Matrix) -> Result<Matrix> {
        self.fit(data)?;
        self.transform(data)
    }
}

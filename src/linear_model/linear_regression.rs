use super::TrainingHistory;
use crate::error::{RegressionError, Result};
use crate::optimizer::{self, ModelParameters, TrainingConfig, TrainingData, TrainingMode};
use crate::{Matrix, Vector};
use rand::Rng;

#[derive(Clone, Debug, Default)]
pub struct LinearRegression {
    pub parameters: Option<ModelParameters>,
    config: TrainingConfig,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self {
            parameters: None,
            config: TrainingConfig::default(),
        }
    }

    pub fn with_config(config: TrainingConfig) -> Self {
        Self {
            parameters: None,
            config,
        }
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    pub fn epochs(mut self, epochs: usize) -> Self {
        self.config.epochs = epochs;
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    pub fn mode(mut self, mode: TrainingMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn report_every(mut self, report_every: Option<usize>) -> Self {
        self.config.report_every = report_every;
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Trains from random initial parameters drawn from `rng`.
    ///
    /// If training fails part way, the parameters reached so far are kept in
    /// `self.parameters` and the error is returned.
    pub fn fit<R: Rng>(&mut self, x: &Matrix, y: &Vector, rng: &mut R) -> Result<TrainingHistory> {
        let data = TrainingData::new(x.view(), y.view())?;
        self.fit_data(&data, rng)
    }

    /// Like [`fit`](Self::fit), also reporting the loss on a held-out set.
    pub fn fit_with_validation<R: Rng>(
        &mut self,
        x: &Matrix,
        y: &Vector,
        x_val: &Matrix,
        y_val: &Vector,
        rng: &mut R,
    ) -> Result<TrainingHistory> {
        let data = TrainingData::new(x.view(), y.view())?
            .with_validation(x_val.view(), y_val.view())?;
        self.fit_data(&data, rng)
    }

    fn fit_data<R: Rng>(
        &mut self,
        data: &TrainingData<'_>,
        rng: &mut R,
    ) -> Result<TrainingHistory> {
        self.config.validate()?;

        let mut params = ModelParameters::random(data.n_features(), rng);
        let mut history = TrainingHistory::new();
        let outcome = optimizer::train(&self.config, &mut params, data, rng, &mut |report| {
            history.push(report)
        });

        self.parameters = Some(params);
        outcome.map(|()| history)
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        self.fitted()?.predict(x.view())
    }

    /// Coefficient of determination (R²) of the predictions on `x`.
    pub fn score(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        let y_pred = self.predict(x)?;
        crate::metrics::r2_score(y, &y_pred)
    }

    /// Half mean squared error, the quantity the optimizers minimize.
    pub fn loss(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        self.fitted()?.loss(x.view(), y.view())
    }

    pub fn coefficients(&self) -> Option<&Vector> {
        self.parameters.as_ref().map(|p| &p.weights)
    }

    pub fn intercept(&self) -> Option<f64> {
        self.parameters.as_ref().map(|p| p.bias)
    }

    fn fitted(&self) -> Result<&ModelParameters> {
        self.parameters
            .as_ref()
            .ok_or_else(|| RegressionError::invalid("model not fitted, call fit() first"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dataset;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_linear_regression_normal_equation() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![3.0, 5.0, 7.0, 9.0];
        let mut rng = StdRng::seed_from_u64(42);

        let mut model = LinearRegression::new().mode(TrainingMode::NormalEquation);
        let history = model.fit(&x, &y, &mut rng).unwrap();

        assert_eq!(history.len(), 2);
        assert_abs_diff_eq!(model.coefficients().unwrap()[0], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(model.intercept().unwrap(), 1.0, epsilon = 1e-9);

        let predictions = model.predict(&array![[5.0], [6.0]]).unwrap();
        assert_abs_diff_eq!(predictions[0], 11.0, epsilon = 1e-9);
        assert_abs_diff_eq!(predictions[1], 13.0, epsilon = 1e-9);
    }

    #[test]
    fn test_linear_regression_every_mode_fits() {
        let mut rng = StdRng::seed_from_u64(42);
        let truth = ModelParameters::new(array![0.8, -1.2], 2.0);
        let dataset = Dataset::synthetic(200, &truth, &mut rng).unwrap();
        let mut scaler = crate::StandardScaler::new();
        let x = scaler.fit_transform(&dataset.features).unwrap();
        // rescaling the features keeps y linear in x
        let y = dataset.labels.clone();

        for mode in TrainingMode::ALL {
            let mut model = LinearRegression::new()
                .mode(mode)
                .learning_rate(0.05)
                .epochs(400)
                .batch_size(32);
            model.fit(&x, &y, &mut rng).unwrap();

            let score = model.score(&x, &y).unwrap();
            assert!(score > 0.999, "{mode}: R² {score}");
        }
    }

    #[test]
    fn test_fit_with_validation_reports_both_losses() {
        let mut rng = StdRng::seed_from_u64(1);
        let truth = ModelParameters::new(array![1.0, 2.0], -1.0);
        let dataset = Dataset::synthetic(120, &truth, &mut rng).unwrap();
        let (train, test) = dataset.train_test_split(0.25, &mut rng).unwrap();
        let mut scaler = crate::StandardScaler::new();
        let x_train = scaler.fit_transform(&train.features).unwrap();
        let x_test = scaler.transform(&test.features).unwrap();

        let mut model = LinearRegression::new()
            .mode(TrainingMode::FullBatch)
            .learning_rate(0.1)
            .epochs(300);
        let history = model
            .fit_with_validation(&x_train, &train.labels, &x_test, &test.labels, &mut rng)
            .unwrap();

        let epochs: Vec<usize> = history.reports().iter().map(|r| r.epoch).collect();
        assert_eq!(epochs, vec![1, 100, 200, 300]);
        assert!(history.reports().iter().all(|r| r.validation_loss.is_some()));
        let losses: Vec<f64> = history.train_losses().collect();
        assert!(losses[3] < losses[0]);
    }

    #[test]
    fn test_invalid_configuration() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0];
        let mut rng = StdRng::seed_from_u64(0);

        for mut model in [
            LinearRegression::new().learning_rate(0.0),
            LinearRegression::new().epochs(0),
            LinearRegression::new().batch_size(0),
        ] {
            let err = model.fit(&x, &y, &mut rng).unwrap_err();
            assert!(matches!(err, RegressionError::InvalidConfiguration(_)));
            assert!(model.parameters.is_none());
        }
    }

    #[test]
    fn test_failed_closed_form_keeps_initial_parameters() {
        let x = array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]];
        let y = array![1.0, 2.0, 3.0];
        let mut rng = StdRng::seed_from_u64(9);

        let mut model = LinearRegression::new().mode(TrainingMode::NormalEquation);
        let err = model.fit(&x, &y, &mut rng).unwrap_err();

        assert!(matches!(err, RegressionError::SingularMatrix { .. }));
        let expected = ModelParameters::random(2, &mut StdRng::seed_from_u64(9));
        assert_eq!(model.parameters, Some(expected));
    }

    #[test]
    fn test_predict_without_fit() {
        let x = array![[1.0], [2.0]];
        let model = LinearRegression::new();

        assert!(model.predict(&x).is_err());
        assert!(model.coefficients().is_none());
    }

    #[test]
    fn test_dimension_mismatch() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0, 3.0];
        let mut rng = StdRng::seed_from_u64(0);

        let mut model = LinearRegression::new();
        assert!(matches!(
            model.fit(&x, &y, &mut rng),
            Err(RegressionError::DimensionMismatch { .. })
        ));
    }
}

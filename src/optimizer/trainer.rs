use super::config::is_report_epoch;
use super::{BatchingPolicy, ModelParameters, TrainingConfig, gradient, normal_equation};
use crate::error::{RegressionError, Result};
use log::{debug, info, warn};
use ndarray::{ArrayView1, ArrayView2};
use rand::Rng;

/// Training pair plus an optional held-out validation pair, all borrowed.
#[derive(Clone, Copy, Debug)]
pub struct TrainingData<'a> {
    pub x_train: ArrayView2<'a, f64>,
    pub y_train: ArrayView1<'a, f64>,
    pub validation: Option<(ArrayView2<'a, f64>, ArrayView1<'a, f64>)>,
}

impl<'a> TrainingData<'a> {
    pub fn new(x_train: ArrayView2<'a, f64>, y_train: ArrayView1<'a, f64>) -> Result<Self> {
        if x_train.nrows() != y_train.len() {
            return Err(RegressionError::mismatch(
                "training targets",
                x_train.nrows(),
                y_train.len(),
            ));
        }
        if x_train.ncols() == 0 {
            return Err(RegressionError::mismatch("features per sample", 1, 0));
        }

        Ok(Self {
            x_train,
            y_train,
            validation: None,
        })
    }

    pub fn with_validation(
        mut self,
        x_val: ArrayView2<'a, f64>,
        y_val: ArrayView1<'a, f64>,
    ) -> Result<Self> {
        if x_val.nrows() != y_val.len() {
            return Err(RegressionError::mismatch(
                "validation targets",
                x_val.nrows(),
                y_val.len(),
            ));
        }
        if x_val.ncols() != self.n_features() {
            return Err(RegressionError::mismatch(
                "validation features",
                self.n_features(),
                x_val.ncols(),
            ));
        }

        self.validation = Some((x_val, y_val));
        Ok(self)
    }

    pub fn n_features(&self) -> usize {
        self.x_train.ncols()
    }

    pub fn n_samples(&self) -> usize {
        self.y_train.len()
    }

    pub fn losses(&self, epoch: usize, params: &ModelParameters) -> Result<LossReport> {
        let train_loss = params.loss(self.x_train, self.y_train)?;
        let validation_loss = match self.validation {
            Some((x_val, y_val)) => Some(params.loss(x_val, y_val)?),
            None => None,
        };

        Ok(LossReport {
            epoch,
            train_loss,
            validation_loss,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LossReport {
    pub epoch: usize,
    pub train_loss: f64,
    pub validation_loss: Option<f64>,
}

/// Contract shared by every training mode: move `params` towards the least
/// squares fit of `data`.
///
/// On failure `params` holds the state left by the last successful update.
pub trait Solver {
    fn run<R: Rng>(
        &self,
        params: &mut ModelParameters,
        data: &TrainingData<'_>,
        rng: &mut R,
        on_report: &mut dyn FnMut(LossReport),
    ) -> Result<()>;
}

/// Epoch-driven gradient descent over the batches of a [`BatchingPolicy`].
#[derive(Clone, Debug, PartialEq)]
pub struct GradientDescent {
    pub learning_rate: f64,
    pub epochs: usize,
    pub policy: BatchingPolicy,
    pub report_every: Option<usize>,
}

impl GradientDescent {
    pub fn new(learning_rate: f64, epochs: usize, policy: BatchingPolicy) -> Self {
        Self {
            learning_rate,
            epochs,
            policy,
            report_every: Some(100),
        }
    }

    pub fn report_every(mut self, report_every: Option<usize>) -> Self {
        self.report_every = report_every;
        self
    }
}

impl Solver for GradientDescent {
    fn run<R: Rng>(
        &self,
        params: &mut ModelParameters,
        data: &TrainingData<'_>,
        rng: &mut R,
        on_report: &mut dyn FnMut(LossReport),
    ) -> Result<()> {
        for epoch in 1..=self.epochs {
            if is_report_epoch(self.report_every, epoch) {
                emit(data.losses(epoch, params)?, on_report);
            }

            let batches = self.policy.epoch(data.x_train, data.y_train, rng)?;
            debug!("epoch {epoch}: {} batches", batches.len());

            for batch in batches.iter() {
                gradient::apply(params, batch.features, batch.targets, self.learning_rate)?;
            }
        }

        Ok(())
    }
}

/// Closed-form fit. Reports the loss before (epoch 0) and after (epoch 1)
/// solving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NormalEquation {
    pub report: bool,
}

impl Solver for NormalEquation {
    fn run<R: Rng>(
        &self,
        params: &mut ModelParameters,
        data: &TrainingData<'_>,
        _rng: &mut R,
        on_report: &mut dyn FnMut(LossReport),
    ) -> Result<()> {
        if self.report {
            emit(data.losses(0, params)?, on_report);
        }

        *params = normal_equation::solve(data.x_train, data.y_train)?;

        if self.report {
            emit(data.losses(1, params)?, on_report);
        }
        Ok(())
    }
}

fn emit(report: LossReport, on_report: &mut dyn FnMut(LossReport)) {
    match report.validation_loss {
        Some(val) => info!(
            "epoch {}: training loss {}, validation loss {}",
            report.epoch, report.train_loss, val
        ),
        None => info!("epoch {}: training loss {}", report.epoch, report.train_loss),
    }
    if !report.train_loss.is_finite() {
        warn!(
            "training loss is {} at epoch {}, the learning rate is likely too large",
            report.train_loss, report.epoch
        );
    }
    on_report(report);
}

/// Validates `config` and runs the selected mode on `params`.
///
/// `params` must already hold a starting point with one weight per feature;
/// the closed form overwrites it.
pub fn train<R: Rng>(
    config: &TrainingConfig,
    params: &mut ModelParameters,
    data: &TrainingData<'_>,
    rng: &mut R,
    on_report: &mut dyn FnMut(LossReport),
) -> Result<()> {
    config.validate()?;
    if params.n_features() != data.n_features() {
        return Err(RegressionError::mismatch(
            "weights",
            data.n_features(),
            params.n_features(),
        ));
    }

    info!(
        "training with {} on {} samples, {} features",
        config.mode,
        data.n_samples(),
        data.n_features()
    );

    match config.mode.batching_policy(config.batch_size_nonzero()?) {
        Some(policy) => GradientDescent::new(config.learning_rate, config.epochs, policy)
            .report_every(config.report_every)
            .run(params, data, rng, on_report)?,
        None => NormalEquation {
            report: config.report_every.is_some(),
        }
        .run(params, data, rng, on_report)?,
    }

    info!("{} finished: bias {}, weights {}", config.mode, params.bias, params.weights);
    Ok(())
}

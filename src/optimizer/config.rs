use super::BatchingPolicy;
use crate::error::{RegressionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Which optimizer a training run uses.
///
/// The three gradient-descent variants share one solver and differ only in
/// their [`BatchingPolicy`]; `NormalEquation` has its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrainingMode {
    /// Batch gradient descent: one update per epoch over the whole set.
    FullBatch,
    /// Stochastic gradient descent: one update per shuffled sample.
    #[default]
    Stochastic,
    /// Mini-batch gradient descent over shuffled chunks of `batch_size`.
    MiniBatch,
    /// Closed-form least squares, no epochs.
    NormalEquation,
}

impl TrainingMode {
    pub const ALL: [TrainingMode; 4] = [
        TrainingMode::FullBatch,
        TrainingMode::Stochastic,
        TrainingMode::MiniBatch,
        TrainingMode::NormalEquation,
    ];

    pub fn is_iterative(&self) -> bool {
        !matches!(self, TrainingMode::NormalEquation)
    }

    /// Batching used by the iterative modes, `None` for the closed form.
    pub fn batching_policy(&self, batch_size: NonZeroUsize) -> Option<BatchingPolicy> {
        match self {
            TrainingMode::FullBatch => Some(BatchingPolicy::Full),
            TrainingMode::Stochastic => Some(BatchingPolicy::Single),
            TrainingMode::MiniBatch => Some(BatchingPolicy::Chunked(batch_size)),
            TrainingMode::NormalEquation => None,
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            TrainingMode::FullBatch => "BGD",
            TrainingMode::Stochastic => "SGD",
            TrainingMode::MiniBatch => "MBGD",
            TrainingMode::NormalEquation => "NE",
        }
    }
}

impl fmt::Display for TrainingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrainingMode::FullBatch => "full-batch",
            TrainingMode::Stochastic => "stochastic",
            TrainingMode::MiniBatch => "mini-batch",
            TrainingMode::NormalEquation => "normal-equation",
        };
        f.write_str(name)
    }
}

impl FromStr for TrainingMode {
    type Err = RegressionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bgd" | "full-batch" | "batch" => Ok(TrainingMode::FullBatch),
            "sgd" | "single-sample" | "stochastic" => Ok(TrainingMode::Stochastic),
            "mbgd" | "mini-batch" | "chunked" => Ok(TrainingMode::MiniBatch),
            "ne" | "normal-equation" | "closed-form" => Ok(TrainingMode::NormalEquation),
            _ => Err(RegressionError::invalid(format!("unknown training mode '{s}'"))),
        }
    }
}

/// Hyperparameters of a training run. Fixed for the whole run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    /// Only read by [`TrainingMode::MiniBatch`].
    pub batch_size: usize,
    pub mode: TrainingMode,
    /// Losses are reported at epoch 1 and at every multiple of this value.
    /// `None` turns reporting off.
    pub report_every: Option<usize>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            epochs: 300,
            batch_size: 150,
            mode: TrainingMode::default(),
            report_every: Some(100),
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(RegressionError::invalid(format!(
                "learning rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        if self.epochs == 0 {
            return Err(RegressionError::invalid("epoch count must be positive"));
        }
        if self.batch_size == 0 {
            return Err(RegressionError::invalid("batch size must be positive"));
        }
        if self.report_every == Some(0) {
            return Err(RegressionError::invalid("report cadence must be positive"));
        }
        Ok(())
    }

    pub fn reports_at(&self, epoch: usize) -> bool {
        is_report_epoch(self.report_every, epoch)
    }

    pub(crate) fn batch_size_nonzero(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.batch_size)
            .ok_or_else(|| RegressionError::invalid("batch size must be positive"))
    }
}

pub(crate) fn is_report_epoch(report_every: Option<usize>, epoch: usize) -> bool {
    match report_every {
        Some(every) => epoch == 1 || epoch % every == 0,
        None => false,
    }
}

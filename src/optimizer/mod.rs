//! Weight-update strategies for linear least squares.
//!
//! Four training modes share one prediction/loss/gradient computation:
//! - `FullBatch`: one gradient step per epoch over the whole training set
//! - `Stochastic`: one step per sample, reshuffled every epoch
//! - `MiniBatch`: one step per shuffled chunk of `batch_size` samples
//! - `NormalEquation`: the exact solution `θ = (XᵀX)⁻¹XᵀY`, no epochs
//!
//! Randomness (initialization, shuffling) always comes from an RNG handle
//! passed by the caller.
//!
//! # Examples
//!
//! ```rust
//! use linreg::optimizer::{self, ModelParameters, TrainingConfig, TrainingData, TrainingMode};
//! use ndarray::array;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let x = array![[1.0], [2.0], [3.0], [4.0]];
//! let y = array![3.0, 5.0, 7.0, 9.0];
//! let data = TrainingData::new(x.view(), y.view()).unwrap();
//!
//! let config = TrainingConfig {
//!     mode: TrainingMode::NormalEquation,
//!     ..Default::default()
//! };
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut params = ModelParameters::random(1, &mut rng);
//! optimizer::train(&config, &mut params, &data, &mut rng, &mut |report| {
//!     println!("epoch {}: {}", report.epoch, report.train_loss);
//! })
//! .unwrap();
//!
//! assert!((params.weights[0] - 2.0).abs() < 1e-9);
//! assert!((params.bias - 1.0).abs() < 1e-9);
//! ```

mod batching;
mod config;
pub mod gradient;
pub mod normal_equation;
mod predictor;
mod trainer;

pub use batching::{Batch, BatchingPolicy, EpochBatches, shuffle};
pub use config::{TrainingConfig, TrainingMode};
pub use predictor::ModelParameters;
pub use trainer::{GradientDescent, LossReport, NormalEquation, Solver, TrainingData, train};

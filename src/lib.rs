pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod dataset;
pub mod error;
pub mod linear_model;
pub mod metrics;
pub mod optimizer;
pub mod preprocessing;

pub use dataset::Dataset;
pub use error::{RegressionError, Result};
pub use linear_model::{LinearRegression, TrainingHistory};
pub use optimizer::{LossReport, ModelParameters, TrainingConfig, TrainingMode};
pub use preprocessing::StandardScaler;

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

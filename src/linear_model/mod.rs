//! Linear regression estimator.
//!
//! `LinearRegression` wraps the optimizers in a `fit`/`predict`/`score`
//! interface. The training mode is chosen on the builder:
//! - `TrainingMode::FullBatch`: batch gradient descent
//! - `TrainingMode::Stochastic`: stochastic gradient descent (default)
//! - `TrainingMode::MiniBatch`: mini-batch gradient descent
//! - `TrainingMode::NormalEquation`: closed-form least squares
//!
//! # Examples
//!
//! ## Gradient descent
//! ```rust
//! use linreg::{LinearRegression, TrainingMode};
//! use ndarray::array;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let x = array![[-1.0], [-0.5], [0.0], [0.5], [1.0]];
//! let y = array![-1.0, 0.0, 1.0, 2.0, 3.0];
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let mut model = LinearRegression::new()
//!     .mode(TrainingMode::FullBatch)
//!     .learning_rate(0.5)
//!     .epochs(1000);
//! let history = model.fit(&x, &y, &mut rng).unwrap();
//!
//! for report in history.reports() {
//!     println!("epoch {}: {:.6}", report.epoch, report.train_loss);
//! }
//! let predictions = model.predict(&x).unwrap();
//! ```
//!
//! ## Normal equation
//! ```rust
//! use linreg::{LinearRegression, TrainingMode};
//! use ndarray::array;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let x = array![[1.0], [2.0], [3.0], [4.0]];
//! let y = array![3.0, 5.0, 7.0, 9.0];
//!
//! let mut model = LinearRegression::new().mode(TrainingMode::NormalEquation);
//! model.fit(&x, &y, &mut StdRng::seed_from_u64(0)).unwrap();
//!
//! assert!((model.coefficients().unwrap()[0] - 2.0).abs() < 1e-9);
//! assert!((model.intercept().unwrap() - 1.0).abs() < 1e-9);
//! ```

mod history;
mod linear_regression;

pub use history::TrainingHistory;
pub use linear_regression::LinearRegression;

//! Error type shared by every module of the crate.

pub type Result<T> = std::result::Result<T, RegressionError>;

/// Everything that can go wrong while preparing data, training or predicting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegressionError {
    /// Two shapes that must agree don't (samples vs targets, weights vs features).
    #[error("dimension mismatch: {what} expected {expected}, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("empty batch: at least one sample is required")]
    EmptyBatch,

    /// The normal-equation matrix has a pivot too small to eliminate.
    #[error(
        "normal equation matrix is singular or nearly singular (pivot {pivot:e} at column {column})"
    )]
    SingularMatrix { column: usize, pivot: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl RegressionError {
    pub(crate) fn mismatch(what: &'static str, expected: usize, got: usize) -> Self {
        Self::DimensionMismatch {
            what,
            expected,
            got,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

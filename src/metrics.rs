use crate::Vector;
use crate::error::{RegressionError, Result};

fn check_lengths(y_true: &Vector, y_pred: &Vector) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(RegressionError::mismatch("predictions", y_true.len(), y_pred.len()));
    }
    if y_true.is_empty() {
        return Err(RegressionError::EmptyBatch);
    }
    Ok(())
}

pub fn mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let diff = y_true - y_pred;
    Ok(diff.dot(&diff) / diff.len() as f64)
}

pub fn mean_absolute_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let diff = y_true - y_pred;
    Ok(diff.mapv(f64::abs).sum() / diff.len() as f64)
}

pub fn r2_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let y_mean = y_true.sum() / y_true.len() as f64;
    let ss_res = (y_true - y_pred).mapv(|x| x * x).sum();
    let ss_tot = y_true.mapv(|x| (x - y_mean) * (x - y_mean)).sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }

    Ok(1.0 - ss_res / ss_tot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_mean_squared_error() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![1.0, 2.0, 5.0];

        let mse = mean_squared_error(&y_true, &y_pred).unwrap();
        assert!((mse - 4.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_mean_absolute_error() {
        let y_true = array![1.0, 2.0, 3.0, 4.0];
        let y_pred = array![2.0, 2.0, 1.0, 4.0];

        let mae = mean_absolute_error(&y_true, &y_pred).unwrap();
        assert!((mae - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_r2_score() {
        let y_true = array![1.0, 2.0, 3.0, 4.0];
        let y_pred = array![1.0, 2.0, 3.0, 4.0];

        let r2 = r2_score(&y_true, &y_pred).unwrap();
        assert!((r2 - 1.0).abs() < 1e-10);

        let mean_pred = array![2.5, 2.5, 2.5, 2.5];
        let r2 = r2_score(&y_true, &mean_pred).unwrap();
        assert!(r2.abs() < 1e-10);
    }

    #[test]
    fn test_metrics_length_mismatch() {
        let y_true = array![1.0, 2.0];
        let y_pred = array![1.0];

        assert!(mean_squared_error(&y_true, &y_pred).is_err());
        assert!(mean_absolute_error(&y_true, &y_pred).is_err());
        assert!(r2_score(&y_true, &y_pred).is_err());
    }
}

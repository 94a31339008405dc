use super::ModelParameters;
use crate::error::{RegressionError, Result};
use crate::{Matrix, Vector};
use ndarray::{ArrayView1, ArrayView2, Axis, s};

/// Pivots of the unit-diagonal scaled system smaller than this are treated
/// as zero.
const SINGULARITY_TOLERANCE: f64 = 1e-10;

/// Ordinary least squares through the normal equation `(XᵀX)θ = XᵀY`.
///
/// A column of ones is prepended to `x` so the bias is `θ[0]` and the
/// weights are `θ[1..]`.
pub fn solve(x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<ModelParameters> {
    if x.nrows() != y.len() {
        return Err(RegressionError::mismatch("targets", x.nrows(), y.len()));
    }

    let x_b = with_bias_column(x);
    let xt = x_b.t();
    let xtx = xt.dot(&x_b);
    let xty = xt.dot(&y);

    // Scale to a unit diagonal so each pivot is judged against its own column.
    let d = xtx.diag().mapv(f64::sqrt);
    if let Some(column) = d.iter().position(|v| !(*v > 0.0)) {
        let pivot = xtx[(column, column)];
        return Err(RegressionError::SingularMatrix { column, pivot });
    }
    let outer = &d.view().insert_axis(Axis(1)) * &d;
    let scaled = &xtx / &outer;

    let theta = solve_linear_system(&scaled, &(&xty / &d))? / &d;
    let bias = theta[0];
    let weights = theta.slice(s![1..]).to_owned();

    Ok(ModelParameters::new(weights, bias))
}

fn with_bias_column(x: ArrayView2<'_, f64>) -> Matrix {
    let mut x_b = Matrix::ones((x.nrows(), x.ncols() + 1));
    x_b.slice_mut(s![.., 1..]).assign(&x);
    x_b
}

/// Gaussian elimination with partial pivoting on the augmented matrix `[a | b]`.
fn solve_linear_system(a: &Matrix, b: &Vector) -> Result<Vector> {
    let n = a.nrows();
    let mut aug = Matrix::zeros((n, n + 1));
    aug.slice_mut(s![.., ..n]).assign(a);
    aug.column_mut(n).assign(b);

    let scale = a.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let tolerance = SINGULARITY_TOLERANCE * scale.max(1.0);

    for i in 0..n {
        let mut max_row = i;
        for k in (i + 1)..n {
            if aug[(k, i)].abs() > aug[(max_row, i)].abs() {
                max_row = k;
            }
        }

        let pivot = aug[(max_row, i)];
        // NaN pivots fail as well
        if !(pivot.abs() >= tolerance) {
            return Err(RegressionError::SingularMatrix { column: i, pivot });
        }

        if max_row != i {
            for j in 0..=n {
                aug.swap((i, j), (max_row, j));
            }
        }

        for k in (i + 1)..n {
            let factor = aug[(k, i)] / aug[(i, i)];
            for j in i..=n {
                aug[(k, j)] -= factor * aug[(i, j)];
            }
        }
    }

    let mut x = Vector::zeros(n);
    for i in (0..n).rev() {
        x[i] = aug[(i, n)];
        for j in (i + 1)..n {
            x[i] -= aug[(i, j)] * x[j];
        }
        x[i] /= aug[(i, i)];
    }

    Ok(x)
}

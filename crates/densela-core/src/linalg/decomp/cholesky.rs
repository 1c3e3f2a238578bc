//! Cholesky decomposition for symmetric positive-definite matrices.
//!
//! Decomposes a symmetric positive-definite matrix `A` into `A = L L^T`
//! where `L` is lower triangular with positive diagonal entries.

use crate::Matrix;
use crate::error::{MatrixError, Result};

/// Result of a Cholesky decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct CholeskyDecomposition {
    /// Lower triangular factor.
    l: Matrix,
}

#[allow(clippy::many_single_char_names)]
impl CholeskyDecomposition {
    /// Compute the Cholesky decomposition of a symmetric positive-definite matrix.
    ///
    /// Errors:
    /// - [`MatrixError::InvalidDomain`] if `a` is not square
    /// - [`MatrixError::NotPositiveDefinite`] if `a` is not symmetric, or a
    ///   non-positive value shows up under a square root
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// # use densela_core::linalg::decomp::CholeskyDecomposition;
    /// let a = Matrix::from_rows(&[&[4.0, 0.0], &[0.0, 9.0]]).unwrap();
    /// let chol = CholeskyDecomposition::decompose(&a).unwrap();
    /// assert_eq!(chol.l().as_slice(), &[2.0, 0.0, 0.0, 3.0]);
    /// ```
    pub fn decompose(a: &Matrix) -> Result<Self> {
        a.require_square("Cholesky decomposition requires a square matrix")?;
        if !a.is_symmetric() {
            return Err(MatrixError::NotPositiveDefinite);
        }
        Ok(Self { l: factor(a)? })
    }

    /// The lower triangular factor `L`.
    pub fn l(&self) -> &Matrix {
        &self.l
    }

    /// Solve `A X = B` using the factorization.
    ///
    /// Since `A = L L^T`, solves `L Y = B` (forward) then `L^T X = Y` (backward).
    pub fn solve(&self, b: &Matrix) -> Result<Matrix> {
        let n = self.l.rows();
        if b.rows() != n {
            return Err(MatrixError::DimensionMismatch {
                expected: (n, b.cols()),
                got: b.shape(),
            });
        }

        let mut x = b.clone();
        self.substitute(&mut x);
        Ok(x)
    }

    /// Overwrite every column of `x` with the solution of `L L^T x = b`.
    fn substitute(&self, x: &mut Matrix) {
        let l = &self.l;
        let n = l.rows();
        for c in 0..x.cols() {
            // Forward substitution: L y = b
            for i in 0..n {
                let mut s = x.at(i, c);
                for j in 0..i {
                    s -= l.at(i, j) * x.at(j, c);
                }
                *x.at_mut(i, c) = s / l.at(i, i);
            }
            // Back substitution: L^T x = y
            for i in (0..n).rev() {
                let mut s = x.at(i, c);
                for j in (i + 1)..n {
                    s -= l.at(j, i) * x.at(j, c);
                }
                *x.at_mut(i, c) = s / l.at(i, i);
            }
        }
    }

    /// Compute the inverse using the factorization.
    pub fn inverse(&self) -> Matrix {
        let mut inv = Matrix::identity(self.l.rows());
        self.substitute(&mut inv);
        inv
    }

    /// Compute the log-determinant (useful for avoiding overflow).
    ///
    /// `log(det(A)) = 2 * sum(log(diag(L)))`
    pub fn log_det(&self) -> f64 {
        2.0 * self.l.diag().iter().map(|d| d.ln()).sum::<f64>()
    }

    /// Consume the result, returning `L`.
    pub fn into_parts(self) -> Matrix {
        self.l
    }
}

/// Column-by-column Cholesky recurrence on the lower triangle of `a`.
///
/// Assumes `a` is square and symmetric; only entries on or below the
/// diagonal are read.
pub(crate) fn factor(a: &Matrix) -> Result<Matrix> {
    let n = a.rows();
    let mut l = Matrix::zeros(n, n);

    for j in 0..n {
        // Diagonal element
        let mut sum = a.at(j, j);
        for k in 0..j {
            sum -= l.at(j, k) * l.at(j, k);
        }
        // also rejects NaN
        if sum.is_nan() || sum <= 0.0 {
            return Err(MatrixError::NotPositiveDefinite);
        }
        let diag = sum.sqrt();
        *l.at_mut(j, j) = diag;

        // Off-diagonal elements
        for i in (j + 1)..n {
            let mut sum = a.at(i, j);
            for k in 0..j {
                sum -= l.at(i, k) * l.at(j, k);
            }
            *l.at_mut(i, j) = sum / diag;
        }
    }

    Ok(l)
}

impl Matrix {
    /// Cholesky decomposition. See [`CholeskyDecomposition`].
    pub fn cholesky(&self) -> Result<CholeskyDecomposition> {
        CholeskyDecomposition::decompose(self)
    }
}

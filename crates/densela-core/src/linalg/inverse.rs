//! Inverse, pseudo-inverse, and linear solves.

use crate::Matrix;
use crate::error::{MatrixError, Result};
use crate::linalg::decomp::{LuDecomposition, QrDecomposition, SvdDecomposition};
use crate::tol;

impl Matrix {
    /// Inverse of a square matrix via LU decomposition.
    ///
    /// Fails with [`MatrixError::SingularMatrix`] when LU finds no usable
    /// pivot or `|det(A)| < 1e-12`.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let a = Matrix::from_rows(&[&[2.0, 1.0], &[1.0, 4.0]]).unwrap();
    /// let inv = a.inverse().unwrap();
    /// assert!(a.multiply(&inv).unwrap().approx_eq(&Matrix::identity(2), 1e-12));
    /// assert!(Matrix::zeros(2, 2).inverse().is_err());
    /// ```
    pub fn inverse(&self) -> Result<Matrix> {
        self.require_square("inverse requires a square matrix")?;
        let lu = LuDecomposition::decompose(self)?;
        let det = lu.det();
        if det.is_nan() || det.abs() < tol::SINGULAR {
            return Err(MatrixError::SingularMatrix);
        }
        Ok(lu.inverse())
    }

    /// Moore-Penrose pseudo-inverse `V S⁺ U^T` (shape `cols x rows`).
    ///
    /// Singular values at or below `1e-12 * σ_max` are treated as zero.
    pub fn pseudo_inverse(&self) -> Result<Matrix> {
        let svd = SvdDecomposition::decompose(self)?;
        let s = svd.singular_values();
        let cutoff = tol::PINV_RELATIVE * s.first().copied().unwrap_or(0.0);
        let s_plus: Vec<f64> = s
            .iter()
            .map(|&sv| if sv > cutoff { 1.0 / sv } else { 0.0 })
            .collect();

        let v_s = svd.v().multiply(&Matrix::diagonal(&s_plus))?;
        v_s.multiply(&svd.u().transpose())
    }

    /// Solve `A X = B` for square `A` via LU decomposition.
    pub fn solve(&self, b: &Matrix) -> Result<Matrix> {
        LuDecomposition::decompose(self)?.solve(b)
    }

    /// Least-squares solution of `min ||A X - B||_2` via QR decomposition.
    pub fn lstsq(&self, b: &Matrix) -> Result<Matrix> {
        QrDecomposition::decompose(self)?.solve(b)
    }
}

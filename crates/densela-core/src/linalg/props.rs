//! Structural predicates and scalar properties of a matrix.
//!
//! | Query | Method | Backed by |
//! |-------|--------|-----------|
//! | shape / symmetry / triangularity | `is_*` | element comparisons, tolerance [`tol::STRUCTURE`] |
//! | orthogonality | [`Matrix::is_orthogonal`] | `A^T A ≈ I` |
//! | definiteness | [`Matrix::is_positive_definite`], [`Matrix::is_positive_semidefinite`] | Cholesky / eigenvalues |
//! | determinant | [`Matrix::determinant`] | closed form for `n <= 2`, LU otherwise |
//! | rank | [`Matrix::rank`] | SVD |
//! | norms | [`Matrix::norm`] | see [`Norm`] |
//! | condition number | [`Matrix::condition`] | `‖A‖₁ ‖A⁻¹‖₁` |

use crate::Matrix;
use crate::error::{MatrixError, Result};
use crate::linalg::decomp::cholesky;
use crate::linalg::decomp::{EigenDecomposition, LuDecomposition, SvdDecomposition};
use crate::tol;

/// Matrix norms supported by [`Matrix::norm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Norm {
    /// Maximum absolute column sum.
    One,
    /// Maximum absolute row sum.
    Infinity,
    /// Square root of the sum of squared entries.
    Frobenius,
    /// Spectral norm: the largest singular value.
    Two,
}

// ======================================================================
// Predicates
// ======================================================================

impl Matrix {
    /// Square and `|a_ij - a_ji| <= 1e-10` for every pair.
    pub fn is_symmetric(&self) -> bool {
        self.is_square()
            && (0..self.rows()).all(|i| {
                ((i + 1)..self.cols())
                    .all(|j| (self.at(i, j) - self.at(j, i)).abs() <= tol::STRUCTURE)
            })
    }

    /// Square with every off-diagonal entry within `1e-10` of zero.
    pub fn is_diagonal(&self) -> bool {
        self.is_square() && self.is_upper_triangular() && self.is_lower_triangular()
    }

    /// Every entry below the main diagonal is within `1e-10` of zero.
    ///
    /// Rectangular matrices are allowed.
    pub fn is_upper_triangular(&self) -> bool {
        (0..self.rows())
            .all(|i| (0..i.min(self.cols())).all(|j| self.at(i, j).abs() <= tol::STRUCTURE))
    }

    /// Every entry above the main diagonal is within `1e-10` of zero.
    ///
    /// Rectangular matrices are allowed.
    pub fn is_lower_triangular(&self) -> bool {
        (0..self.rows())
            .all(|i| ((i + 1)..self.cols()).all(|j| self.at(i, j).abs() <= tol::STRUCTURE))
    }

    /// Square with `A^T A` equal to the identity within `1e-10`.
    pub fn is_orthogonal(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        self.transpose()
            .multiply(self)
            .is_ok_and(|ata| ata.approx_eq(&Matrix::identity(self.rows()), tol::STRUCTURE))
    }

    /// Square, symmetric, and Cholesky elimination succeeds.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// assert!(Matrix::hilbert(4).is_positive_definite());
    /// assert!(!Matrix::from_rows(&[&[1.0, 2.0], &[2.0, 1.0]]).unwrap().is_positive_definite());
    /// ```
    pub fn is_positive_definite(&self) -> bool {
        self.is_symmetric() && cholesky::factor(self).is_ok()
    }

    /// Symmetric with every eigenvalue `>= -1e-10`.
    pub fn is_positive_semidefinite(&self) -> bool {
        self.is_symmetric()
            && EigenDecomposition::decompose(self)
                .is_ok_and(|eig| eig.eigenvalues().iter().all(|&l| l >= -tol::STRUCTURE))
    }
}

// ======================================================================
// Scalar properties
// ======================================================================

impl Matrix {
    /// Determinant of a square matrix.
    ///
    /// Closed forms for `n <= 2`, LU otherwise. A matrix LU rejects as
    /// singular has determinant `0.0`; a matrix holding NaN is an error.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let a = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
    /// assert_eq!(a.determinant().unwrap(), -2.0);
    /// ```
    pub fn determinant(&self) -> Result<f64> {
        let n = self.require_square("determinant requires a square matrix")?;
        if self.iter().any(|x| x.is_nan()) {
            return Err(MatrixError::SingularMatrix);
        }
        match n {
            0 => Ok(1.0),
            1 => Ok(self.at(0, 0)),
            2 => Ok(self.at(0, 0) * self.at(1, 1) - self.at(0, 1) * self.at(1, 0)),
            _ => match LuDecomposition::decompose(self) {
                Ok(lu) => Ok(lu.det()),
                Err(MatrixError::SingularMatrix) => Ok(0.0),
                Err(e) => Err(e),
            },
        }
    }

    /// Sum of the main diagonal of a square matrix.
    pub fn trace(&self) -> Result<f64> {
        self.require_square("trace requires a square matrix")?;
        Ok(self.diag().iter().sum())
    }

    /// Numerical rank: singular values above `max(m, n) * ε * σ_max`.
    pub fn rank(&self) -> Result<usize> {
        if self.is_empty() {
            return Ok(0);
        }
        let svd = SvdDecomposition::decompose(self)?;
        let sigma_max = svd.singular_values().first().copied().unwrap_or(0.0);
        let threshold = self.rows().max(self.cols()) as f64 * f64::EPSILON * sigma_max;
        Ok(svd.rank(threshold))
    }

    /// Maximum absolute column sum.
    pub fn norm_1(&self) -> f64 {
        (0..self.cols())
            .map(|j| (0..self.rows()).map(|i| self.at(i, j).abs()).sum::<f64>())
            .fold(0.0, f64::max)
    }

    /// Maximum absolute row sum.
    pub fn norm_inf(&self) -> f64 {
        self.row_iter()
            .map(|row| row.iter().map(|x| x.abs()).sum::<f64>())
            .fold(0.0, f64::max)
    }

    /// Square root of the sum of squares of all entries.
    pub fn norm_frobenius(&self) -> f64 {
        self.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Matrix norm of the given kind.
    ///
    /// Only [`Norm::Two`] can fail, when the SVD does not converge.
    pub fn norm(&self, kind: Norm) -> Result<f64> {
        match kind {
            Norm::One => Ok(self.norm_1()),
            Norm::Infinity => Ok(self.norm_inf()),
            Norm::Frobenius => Ok(self.norm_frobenius()),
            Norm::Two => {
                let svd = SvdDecomposition::decompose(self)?;
                Ok(svd.singular_values().first().copied().unwrap_or(0.0))
            }
        }
    }

    /// Condition number `‖A‖₁ · ‖A⁻¹‖₁`.
    ///
    /// Returns `f64::INFINITY` instead of failing when `A` is singular.
    /// Non-square input is still an error.
    pub fn condition(&self) -> Result<f64> {
        match self.inverse() {
            Ok(inv) => Ok(self.norm_1() * inv.norm_1()),
            Err(MatrixError::SingularMatrix) => Ok(f64::INFINITY),
            Err(e) => Err(e),
        }
    }
}

//! Linear algebra on [`Matrix`].
//!
//! All routines are implemented from scratch, with no external BLAS/LAPACK
//! bindings:
//!
//! | Module | Operations |
//! |--------|-----------|
//! | [`multiply`] | matrix product (naive and 4x4-blocked), matrix-vector product |
//! | [`decomp`] | LU, QR, Cholesky, eigen, SVD |
//! | [`props`] | predicates, determinant, trace, rank, norms, condition number |
//! | [`inverse`] | inverse, pseudo-inverse, linear solve, least squares |
//! | [`matfun`] | matrix exponential and real powers |
//! | [`iterative`] | Jacobi, Gauss-Seidel, conjugate gradient, power methods |
//!
//! Most operations are inherent methods on [`Matrix`]; the free functions
//! below mirror the common ones.

pub mod decomp;
pub mod inverse;
pub mod iterative;
pub mod matfun;
pub mod multiply;
pub mod props;

pub use decomp::{
    CholeskyDecomposition, EigenDecomposition, EigenParams, LuDecomposition, QrDecomposition,
    SvdDecomposition, SvdParams, lstsq,
};
pub use iterative::{
    Eigenpair, IterativeMethod, IterativeParams, IterativeSolution, inverse_power_method,
    power_method, solve_iterative,
};
pub use multiply::{matvec, multiply, multiply_blocked, multiply_naive};
pub use props::Norm;

use crate::Matrix;
use crate::error::Result;

/// Solve the linear system `A X = B` for a square matrix `A`.
///
/// Uses LU decomposition with partial pivoting internally.
///
/// ```
/// # use densela_core::{Matrix, linalg};
/// let a = Matrix::from_rows(&[&[2.0, 1.0], &[1.0, 4.0]]).unwrap();
/// let b = Matrix::from_vec(2, 1, vec![5.0, 6.0]).unwrap();
/// let x = linalg::solve(&a, &b).unwrap();
/// assert!((x.as_slice()[0] - 2.0).abs() < 1e-10);
/// assert!((x.as_slice()[1] - 1.0).abs() < 1e-10);
/// ```
pub fn solve(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    a.solve(b)
}

/// Compute the inverse of a square matrix.
///
/// Returns [`MatrixError::SingularMatrix`](crate::MatrixError::SingularMatrix)
/// if the matrix is singular.
///
/// ```
/// # use densela_core::{Matrix, linalg};
/// let a = Matrix::from_rows(&[&[2.0, 1.0], &[1.0, 4.0]]).unwrap();
/// let inv = linalg::inv(&a).unwrap();
/// // A * A^-1 ≈ I
/// let eye = a.multiply(&inv).unwrap();
/// assert!(eye.approx_eq(&Matrix::identity(2), 1e-10));
/// ```
pub fn inv(a: &Matrix) -> Result<Matrix> {
    a.inverse()
}

/// Compute the determinant of a square matrix.
///
/// ```
/// # use densela_core::{Matrix, linalg};
/// let a = Matrix::from_rows(&[&[2.0, 1.0], &[1.0, 4.0]]).unwrap();
/// let det = linalg::det(&a).unwrap();
/// assert!((det - 7.0).abs() < 1e-10);
/// ```
pub fn det(a: &Matrix) -> Result<f64> {
    a.determinant()
}

/// Moore-Penrose pseudo-inverse.
pub fn pinv(a: &Matrix) -> Result<Matrix> {
    a.pseudo_inverse()
}

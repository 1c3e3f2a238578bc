//! Matrix-matrix product.
//!
//! Two kernels compute `C = A * B`:
//!
//! | Kernel | Used when | Loop structure |
//! |--------|-----------|----------------|
//! | [`multiply_naive`] | any dimension `< BLOCK_SIZE` | `ikj` triple loop |
//! | [`multiply_blocked`] | `m, k, n >= BLOCK_SIZE` | 4x4 output tiles, 4-wide `k` strips |
//!
//! [`multiply`] dispatches between them. Both kernels give the same result up
//! to floating-point reassociation.

use crate::Matrix;
use crate::error::{MatrixError, Result};
use crate::tol::BLOCK_SIZE;

/// Matrix product `a * b`.
///
/// `a.cols()` must equal `b.rows()`. The result is `a.rows() x b.cols()`.
///
/// ```
/// # use densela_core::{Matrix, linalg};
/// let a = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
/// let b = Matrix::from_rows(&[&[5.0, 6.0], &[7.0, 8.0]]).unwrap();
/// let c = linalg::multiply(&a, &b).unwrap();
/// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
/// ```
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    check_inner(a, b)?;
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    if m >= BLOCK_SIZE && k >= BLOCK_SIZE && n >= BLOCK_SIZE {
        Ok(blocked_kernel(a, b))
    } else {
        Ok(naive_kernel(a, b))
    }
}

/// Matrix-vector product `a * x` for an `n x 1` column vector `x`.
pub fn matvec(a: &Matrix, x: &Matrix) -> Result<Matrix> {
    if x.cols() != 1 || a.cols() != x.rows() {
        return Err(MatrixError::DimensionMismatch {
            expected: (a.cols(), 1),
            got: x.shape(),
        });
    }
    Ok(naive_kernel(a, x))
}

/// Matrix product using the plain triple loop regardless of size.
pub fn multiply_naive(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    check_inner(a, b)?;
    Ok(naive_kernel(a, b))
}

/// Matrix product using 4x4 tiling regardless of size.
pub fn multiply_blocked(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    check_inner(a, b)?;
    Ok(blocked_kernel(a, b))
}

fn check_inner(a: &Matrix, b: &Matrix) -> Result<()> {
    if a.cols() != b.rows() {
        return Err(MatrixError::DimensionMismatch {
            expected: (a.cols(), b.cols()),
            got: b.shape(),
        });
    }
    Ok(())
}

#[allow(clippy::many_single_char_names)]
fn naive_kernel(a: &Matrix, b: &Matrix) -> Matrix {
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let a_data = a.as_slice();
    let b_data = b.as_slice();
    let mut c = Matrix::zeros(m, n);
    let c_data = c.as_mut_slice();

    // ikj order keeps the inner loop streaming along rows of B and C
    for i in 0..m {
        for p in 0..k {
            let aip = a_data[i * k + p];
            let b_row = &b_data[p * n..(p + 1) * n];
            let c_row = &mut c_data[i * n..(i + 1) * n];
            for (cij, &bpj) in c_row.iter_mut().zip(b_row) {
                *cij += aip * bpj;
            }
        }
    }
    c
}

#[allow(clippy::many_single_char_names)]
fn blocked_kernel(a: &Matrix, b: &Matrix) -> Matrix {
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let a_data = a.as_slice();
    let b_data = b.as_slice();
    let mut c = Matrix::zeros(m, n);
    let c_data = c.as_mut_slice();

    for ii in (0..m).step_by(BLOCK_SIZE) {
        let i_end = (ii + BLOCK_SIZE).min(m);
        for jj in (0..n).step_by(BLOCK_SIZE) {
            let j_end = (jj + BLOCK_SIZE).min(n);
            for kk in (0..k).step_by(BLOCK_SIZE) {
                let k_end = (kk + BLOCK_SIZE).min(k);
                for i in ii..i_end {
                    for j in jj..j_end {
                        let mut sum = 0.0;
                        for p in kk..k_end {
                            sum += a_data[i * k + p] * b_data[p * n + j];
                        }
                        c_data[i * n + j] += sum;
                    }
                }
            }
        }
    }
    c
}

// ======================================================================
// Convenience methods on Matrix
// ======================================================================

impl Matrix {
    /// Matrix product `self * other`. See [`multiply`].
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        multiply(self, other)
    }

    /// Matrix-vector product with a column vector. See [`matvec`].
    pub fn matvec(&self, x: &Matrix) -> Result<Matrix> {
        matvec(self, x)
    }
}

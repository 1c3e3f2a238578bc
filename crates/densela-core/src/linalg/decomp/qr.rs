//! QR decomposition via modified Gram-Schmidt.
//!
//! Decomposes a matrix `A` (m x n, m >= n, full column rank) into `A = QR`
//! where:
//! - `Q` (m x n) has orthonormal columns, `Q^T Q = I`
//! - `R` (n x n) is upper triangular with a positive diagonal
//!
//! Each column is orthogonalized twice against the previous ones, which keeps
//! `Q` orthogonal to working precision even for badly conditioned input.

use crate::Matrix;
use crate::error::{MatrixError, Result};
use crate::tol;

/// Result of a thin QR decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct QrDecomposition {
    q: Matrix,
    r: Matrix,
}

#[allow(clippy::many_single_char_names)]
impl QrDecomposition {
    /// Perform QR decomposition on a matrix `A` (m x n).
    ///
    /// Fails with [`MatrixError::RankDeficient`] naming the first column
    /// whose residual after orthogonalization has norm `<= 1e-12`. A wide
    /// matrix (`m < n`) cannot have full column rank and fails at column `m`.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// # use densela_core::linalg::decomp::QrDecomposition;
    /// let a = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]).unwrap();
    /// let qr = QrDecomposition::decompose(&a).unwrap();
    /// // Q^T Q ≈ I
    /// let qtq = qr.q().transpose().multiply(qr.q()).unwrap();
    /// assert!(qtq.approx_eq(&Matrix::identity(2), 1e-12));
    /// // QR ≈ A
    /// assert!(qr.q().multiply(qr.r()).unwrap().approx_eq(&a, 1e-12));
    /// ```
    pub fn decompose(a: &Matrix) -> Result<Self> {
        let (m, n) = a.shape();
        if m < n {
            return Err(MatrixError::RankDeficient { column: m });
        }

        // Q is built column-major so each column is a contiguous slice.
        let mut q_cols: Vec<Vec<f64>> = Vec::with_capacity(n);
        let mut r = Matrix::zeros(n, n);

        for j in 0..n {
            let mut v: Vec<f64> = (0..m).map(|i| a.at(i, j)).collect();

            for _pass in 0..2 {
                for (i, qi) in q_cols.iter().enumerate() {
                    let c = dot(qi, &v);
                    *r.at_mut(i, j) += c;
                    for (vk, &qk) in v.iter_mut().zip(qi) {
                        *vk -= c * qk;
                    }
                }
            }

            let norm = dot(&v, &v).sqrt();
            if norm <= tol::RANK {
                return Err(MatrixError::RankDeficient { column: j });
            }
            for vk in &mut v {
                *vk /= norm;
            }
            *r.at_mut(j, j) = norm;
            q_cols.push(v);
        }

        let q = Matrix::from_fn(m, n, |i, j| q_cols[j][i]);
        Ok(Self { q, r })
    }

    /// The `m x n` factor with orthonormal columns.
    pub fn q(&self) -> &Matrix {
        &self.q
    }

    /// The `n x n` upper-triangular factor.
    pub fn r(&self) -> &Matrix {
        &self.r
    }

    /// Solve the least-squares problem `min ||AX - B||_2` column by column.
    ///
    /// For a square system this is the exact solution of `AX = B`. `B` must
    /// have `m` rows; the result is `n x k`.
    pub fn solve(&self, b: &Matrix) -> Result<Matrix> {
        let (m, n) = self.q.shape();
        if b.rows() != m {
            return Err(MatrixError::DimensionMismatch {
                expected: (m, b.cols()),
                got: b.shape(),
            });
        }

        // R X = Q^T B
        let mut x = self.q.transpose().multiply(b)?;
        for c in 0..b.cols() {
            for i in (0..n).rev() {
                let mut s = x.at(i, c);
                for j in (i + 1)..n {
                    s -= self.r.at(i, j) * x.at(j, c);
                }
                *x.at_mut(i, c) = s / self.r.at(i, i);
            }
        }
        Ok(x)
    }

    /// Consume the result, returning `(Q, R)`.
    pub fn into_parts(self) -> (Matrix, Matrix) {
        (self.q, self.r)
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(&x, &y)| x * y).sum()
}

/// Solve the least-squares problem `min ||AX - B||_2` via QR decomposition.
///
/// ```
/// # use densela_core::Matrix;
/// # use densela_core::linalg::decomp;
/// // Overdetermined system: 3 equations, 2 unknowns
/// let a = Matrix::from_rows(&[&[1.0, 1.0], &[1.0, 2.0], &[1.0, 3.0]]).unwrap();
/// let b = Matrix::from_vec(3, 1, vec![6.0, 5.0, 7.0]).unwrap();
/// let x = decomp::lstsq(&a, &b).unwrap();
/// assert_eq!(x.shape(), (2, 1));
/// ```
pub fn lstsq(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    QrDecomposition::decompose(a)?.solve(b)
}

impl Matrix {
    /// Thin QR decomposition. See [`QrDecomposition`].
    pub fn qr(&self) -> Result<QrDecomposition> {
        QrDecomposition::decompose(self)
    }
}

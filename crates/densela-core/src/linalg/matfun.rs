//! Matrix functions: exponential and real powers.

use crate::Matrix;
use crate::error::{MatrixError, Result};
use crate::linalg::decomp::SvdDecomposition;
use crate::tol;

/// Highest power kept in the Taylor series of [`Matrix::exp`].
const EXP_TERMS: u32 = 20;

impl Matrix {
    /// Matrix exponential by truncated Taylor series
    /// `I + A + A²/2! + … + A²⁰/20!`.
    ///
    /// There is no scaling or adaptive term control, so accuracy degrades
    /// once `‖A‖` grows past a few units.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let a = Matrix::zeros(2, 2);
    /// assert_eq!(a.exp().unwrap(), Matrix::identity(2));
    /// ```
    pub fn exp(&self) -> Result<Matrix> {
        let n = self.require_square("matrix exponential requires a square matrix")?;
        let mut result = Matrix::identity(n);
        let mut term = Matrix::identity(n);
        for k in 1..=EXP_TERMS {
            term = term.multiply(self)?.scalar_multiply(1.0 / f64::from(k));
            result = result.add(&term)?;
        }
        Ok(result)
    }

    /// Real power `A^p` of a square matrix.
    ///
    /// - integer `p`: repeated multiplication (squaring); `A^0 = I` and a
    ///   negative `p` raises the inverse
    /// - fractional `p`: `U S^p V^T` from the SVD, which equals the
    ///   principal power only for symmetric positive semi-definite `A`
    ///
    /// A negative fractional power of a matrix with a zero singular value
    /// fails with [`MatrixError::SingularMatrix`].
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let a = Matrix::diagonal(&[4.0, 9.0]);
    /// let root = a.power(0.5).unwrap();
    /// assert!(root.approx_eq(&Matrix::diagonal(&[2.0, 3.0]), 1e-12));
    /// ```
    pub fn power(&self, p: f64) -> Result<Matrix> {
        let n = self.require_square("matrix power requires a square matrix")?;
        if !p.is_finite() {
            return Err(MatrixError::InvalidDomain {
                reason: "matrix power requires a finite exponent",
            });
        }

        if p.fract() == 0.0 {
            let base = if p < 0.0 { self.inverse()? } else { self.clone() };
            #[allow(clippy::cast_sign_loss)]
            let exponent = p.abs() as u64;
            return integer_power(&base, n, exponent);
        }

        let svd = SvdDecomposition::decompose(self)?;
        let s = svd.singular_values();
        if p < 0.0 && s.iter().any(|&sv| sv <= tol::SINGULAR) {
            return Err(MatrixError::SingularMatrix);
        }
        let s_p: Vec<f64> = s.iter().map(|&sv| sv.powf(p)).collect();
        svd.u()
            .multiply(&Matrix::diagonal(&s_p))?
            .multiply(&svd.v().transpose())
    }
}

/// `base^exponent` by binary exponentiation.
fn integer_power(base: &Matrix, n: usize, mut exponent: u64) -> Result<Matrix> {
    let mut result = Matrix::identity(n);
    let mut square = base.clone();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.multiply(&square)?;
        }
        exponent >>= 1;
        if exponent > 0 {
            square = square.multiply(&square)?;
        }
    }
    Ok(result)
}

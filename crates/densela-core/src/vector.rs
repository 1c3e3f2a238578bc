//! Vector operations on `1 x n` and `n x 1` matrices.
//!
//! A matrix is a *vector* when either dimension is 1, so a `1 x 1` matrix
//! is both a row and a column vector.

use crate::Matrix;
use crate::error::{MatrixError, Result};
use crate::tol;

impl Matrix {
    /// Whether either dimension is 1.
    pub fn is_vector(&self) -> bool {
        self.rows() == 1 || self.cols() == 1
    }

    /// Dot product of two vectors of equal length.
    ///
    /// Row and column orientations may be mixed freely. Fails with
    /// [`MatrixError::DimensionMismatch`] when either operand is not a
    /// vector or the lengths differ.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let row = Matrix::from_vec(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
    /// let col = Matrix::from_vec(3, 1, vec![4.0, 5.0, 6.0]).unwrap();
    /// assert_eq!(row.dot_product(&col).unwrap(), 32.0);
    /// ```
    pub fn dot_product(&self, other: &Matrix) -> Result<f64> {
        if !self.is_vector() || !other.is_vector() || self.len() != other.len() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.shape(),
                got: other.shape(),
            });
        }
        Ok(self.iter().zip(other.iter()).map(|(a, b)| a * b).sum())
    }

    /// Cross product of two `3 x 1` column vectors.
    pub fn cross_product(&self, other: &Matrix) -> Result<Matrix> {
        if self.shape() != (3, 1) || other.shape() != (3, 1) {
            return Err(MatrixError::DegenerateVector {
                reason: "cross product requires two 3x1 column vectors",
            });
        }
        let (a, b) = (self.as_slice(), other.as_slice());
        Matrix::from_vec(
            3,
            1,
            vec![
                a[1] * b[2] - a[2] * b[1],
                a[2] * b[0] - a[0] * b[2],
                a[0] * b[1] - a[1] * b[0],
            ],
        )
    }

    /// Euclidean norm of the elements.
    pub fn vector_norm(&self) -> f64 {
        self.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Unit vector in the direction of `self`, in the same orientation.
    ///
    /// Fails with [`MatrixError::DegenerateVector`] for a non-vector or a
    /// norm below `1e-12`.
    pub fn normalize(&self) -> Result<Matrix> {
        if !self.is_vector() {
            return Err(MatrixError::DegenerateVector {
                reason: "normalize requires a row or column vector",
            });
        }
        let norm = self.vector_norm();
        if norm < tol::NORMALIZE {
            return Err(MatrixError::DegenerateVector {
                reason: "cannot normalize a zero-length vector",
            });
        }
        Ok(self.scalar_multiply(1.0 / norm))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn col(values: &[f64]) -> Matrix {
        Matrix::from_vec(values.len(), 1, values.to_vec()).unwrap()
    }

    fn row(values: &[f64]) -> Matrix {
        Matrix::from_vec(1, values.len(), values.to_vec()).unwrap()
    }

    #[test]
    fn test_is_vector() {
        assert!(col(&[1.0, 2.0]).is_vector());
        assert!(row(&[1.0, 2.0]).is_vector());
        assert!(Matrix::zeros(1, 1).is_vector());
        assert!(!Matrix::zeros(2, 2).is_vector());
    }

    #[test]
    fn test_dot_all_orientations() {
        let (a, b) = ([1.0, 2.0, 3.0], [4.0, 5.0, 6.0]);
        assert_eq!(row(&a).dot_product(&row(&b)).unwrap(), 32.0);
        assert_eq!(row(&a).dot_product(&col(&b)).unwrap(), 32.0);
        assert_eq!(col(&a).dot_product(&row(&b)).unwrap(), 32.0);
        assert_eq!(col(&a).dot_product(&col(&b)).unwrap(), 32.0);
    }

    #[test]
    fn test_dot_errors() {
        assert!(matches!(
            col(&[1.0, 2.0]).dot_product(&col(&[1.0, 2.0, 3.0])),
            Err(MatrixError::DimensionMismatch { .. })
        ));
        // same element count, but not a vector
        assert!(matches!(
            Matrix::zeros(2, 2).dot_product(&col(&[1.0, 2.0, 3.0, 4.0])),
            Err(MatrixError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_cross_product() {
        let x = col(&[1.0, 0.0, 0.0]);
        let y = col(&[0.0, 1.0, 0.0]);
        assert_eq!(x.cross_product(&y).unwrap(), col(&[0.0, 0.0, 1.0]));
        assert_eq!(y.cross_product(&x).unwrap(), col(&[0.0, 0.0, -1.0]));

        // a x b is orthogonal to both
        let a = col(&[1.0, 2.0, 3.0]);
        let b = col(&[-2.0, 0.5, 4.0]);
        let c = a.cross_product(&b).unwrap();
        assert_approx_eq!(c.dot_product(&a).unwrap(), 0.0, 1e-12);
        assert_approx_eq!(c.dot_product(&b).unwrap(), 0.0, 1e-12);
    }

    #[test]
    fn test_cross_product_requires_columns() {
        let r = row(&[1.0, 0.0, 0.0]);
        assert!(matches!(
            r.cross_product(&r),
            Err(MatrixError::DegenerateVector { .. })
        ));
        let short = col(&[1.0, 0.0]);
        assert!(short.cross_product(&short).is_err());
    }

    #[test]
    fn test_normalize() {
        let v = row(&[3.0, 4.0]);
        assert_eq!(v.vector_norm(), 5.0);
        let u = v.normalize().unwrap();
        assert_eq!(u.shape(), (1, 2));
        assert!(u.approx_eq(&row(&[0.6, 0.8]), 1e-15));
        assert_approx_eq!(u.vector_norm(), 1.0, 1e-15);
    }

    #[test]
    fn test_normalize_degenerate() {
        assert!(matches!(
            col(&[0.0, 0.0, 0.0]).normalize(),
            Err(MatrixError::DegenerateVector { .. })
        ));
        assert!(col(&[1e-13, 0.0]).normalize().is_err());
        assert!(Matrix::identity(2).normalize().is_err());
    }
}

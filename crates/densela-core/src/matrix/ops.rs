//! Element-wise arithmetic for [`Matrix`].
//!
//! The named methods (`add`, `subtract`, `hadamard`) return `Err` on shape
//! mismatch. The `std::ops` operators are provided for convenience and panic
//! on mismatch instead:
//! - `Matrix op Matrix` for `+` and `-`
//! - `Matrix * f64`, `f64 * Matrix`, `Matrix / f64`
//! - unary `-`
//!
//! `core::ops::Add` is referenced by path only: importing it would shadow
//! the inherent `Matrix::add` in method-call position.

use core::ops::{Div, Mul, Neg};

use crate::error::Result;

use super::Matrix;

// ======================================================================
// Fallible arithmetic
// ======================================================================

impl Matrix {
    /// Element-wise sum. Both operands must have the same shape.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let a = Matrix::ones(2, 2);
    /// let b = Matrix::identity(2);
    /// assert_eq!(a.add(&b).unwrap().as_slice(), &[2.0, 1.0, 1.0, 2.0]);
    /// assert!(a.add(&Matrix::ones(2, 3)).is_err());
    /// ```
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_map(other, |a, b| a + b)
    }

    /// Element-wise difference. Both operands must have the same shape.
    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_map(other, |a, b| a - b)
    }

    /// Element-wise (Hadamard) product. Both operands must have the same shape.
    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_map(other, |a, b| a * b)
    }

    /// Multiply every element by `alpha`.
    pub fn scalar_multiply(&self, alpha: f64) -> Matrix {
        self.map(|x| x * alpha)
    }

    /// Sum of all elements.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

// ======================================================================
// Matrix + Matrix  (element-wise, same shape, panics on mismatch)
// ======================================================================

macro_rules! impl_matrix_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl core::ops::$trait for Matrix {
            type Output = Matrix;

            fn $method(self, rhs: Matrix) -> Matrix {
                <&Matrix as core::ops::$trait>::$method(&self, &rhs)
            }
        }

        impl core::ops::$trait for &Matrix {
            type Output = Matrix;

            fn $method(self, rhs: &Matrix) -> Matrix {
                assert_eq!(
                    self.shape(), rhs.shape(),
                    "shape mismatch in element-wise {}: {:?} vs {:?}",
                    stringify!($method), self.shape(), rhs.shape(),
                );
                let data = self.data.iter()
                    .zip(rhs.data.iter())
                    .map(|(&a, &b)| a $op b)
                    .collect();
                Matrix {
                    data,
                    rows: self.rows,
                    cols: self.cols,
                }
            }
        }
    };
}

impl_matrix_binop!(Add, add, +);
impl_matrix_binop!(Sub, sub, -);

// ======================================================================
// Matrix * scalar
// ======================================================================

macro_rules! impl_scalar_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<f64> for Matrix {
            type Output = Matrix;

            fn $method(mut self, rhs: f64) -> Matrix {
                for x in &mut self.data {
                    *x = *x $op rhs;
                }
                self
            }
        }

        impl $trait<f64> for &Matrix {
            type Output = Matrix;

            fn $method(self, rhs: f64) -> Matrix {
                self.map(|a| a $op rhs)
            }
        }
    };
}

impl_scalar_binop!(Mul, mul, *);
impl_scalar_binop!(Div, div, /);

impl Mul<&Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        rhs.scalar_multiply(self)
    }
}

impl Mul<Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        rhs * self
    }
}

// ======================================================================
// Negation
// ======================================================================

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self * -1.0
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.map(|a| -a)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::MatrixError;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_add_subtract() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[10.0, 20.0], &[30.0, 40.0]]);
        assert_eq!(a.add(&b).unwrap().as_slice(), &[11.0, 22.0, 33.0, 44.0]);
        assert_eq!(b.subtract(&a).unwrap().as_slice(), &[9.0, 18.0, 27.0, 36.0]);
    }

    #[test]
    fn test_add_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(3, 2);
        assert_eq!(
            a.add(&b).unwrap_err(),
            MatrixError::DimensionMismatch {
                expected: (2, 3),
                got: (3, 2)
            }
        );
        assert!(a.subtract(&b).is_err());
        assert!(a.hadamard(&b).is_err());
    }

    #[test]
    fn test_operands_untouched() {
        let a = m(&[&[1.0, 2.0]]);
        let b = m(&[&[3.0, 4.0]]);
        let _ = a.add(&b).unwrap();
        assert_eq!(a.as_slice(), &[1.0, 2.0]);
        assert_eq!(b.as_slice(), &[3.0, 4.0]);
    }

    #[test]
    fn test_hadamard() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert_eq!(a.hadamard(&a).unwrap().as_slice(), &[1.0, 4.0, 9.0, 16.0]);
    }

    #[test]
    fn test_scalar_multiply() {
        let a = m(&[&[1.0, -2.0]]);
        assert_eq!(a.scalar_multiply(3.0).as_slice(), &[3.0, -6.0]);
        assert_eq!((2.0 * &a).as_slice(), &[2.0, -4.0]);
        assert_eq!((&a / 2.0).as_slice(), &[0.5, -1.0]);
    }

    #[test]
    fn test_operators() {
        let a = m(&[&[1.0, 2.0]]);
        let b = m(&[&[5.0, 5.0]]);
        assert_eq!((&a + &b).as_slice(), &[6.0, 7.0]);
        assert_eq!((&b - &a).as_slice(), &[4.0, 3.0]);
        assert_eq!((-&a).as_slice(), &[-1.0, -2.0]);
        assert_eq!((a.clone() * 2.0).as_slice(), &[2.0, 4.0]);
        assert_eq!((-a).as_slice(), &[-1.0, -2.0]);
    }

    #[test]
    fn test_sum() {
        assert_eq!(Matrix::ones(3, 4).sum(), 12.0);
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn test_add_operator_panics_on_mismatch() {
        let _ = Matrix::zeros(2, 2) + Matrix::zeros(2, 3);
    }
}

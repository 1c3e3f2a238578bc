//! LU decomposition with partial pivoting.
//!
//! Decomposes a square matrix `A` into `PA = LU` where:
//! - `P` is a permutation matrix (stored as a row-index vector)
//! - `L` is lower triangular with unit diagonal
//! - `U` is upper triangular

use crate::Matrix;
use crate::error::{MatrixError, Result};
use crate::tol;

/// Result of an LU decomposition with partial pivoting.
#[derive(Debug, Clone, PartialEq)]
pub struct LuDecomposition {
    /// Unit lower-triangular factor.
    l: Matrix,
    /// Upper-triangular factor.
    u: Matrix,
    /// `permutation[i]` is the row of `A` that ended up in row `i`.
    permutation: Vec<usize>,
    /// Sign of the permutation (+1 or -1), for determinant computation.
    sign: f64,
}

impl LuDecomposition {
    /// Perform LU decomposition with partial pivoting on a square matrix.
    ///
    /// Fails with [`MatrixError::SingularMatrix`] when the best available
    /// pivot in some column has magnitude `<= 1e-12`.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// # use densela_core::linalg::decomp::LuDecomposition;
    /// let a = Matrix::from_rows(&[&[2.0, 1.0], &[1.0, 4.0]]).unwrap();
    /// let lu = LuDecomposition::decompose(&a).unwrap();
    /// assert!((lu.det() - 7.0).abs() < 1e-10);
    /// ```
    pub fn decompose(a: &Matrix) -> Result<Self> {
        let n = a.require_square("LU decomposition requires a square matrix")?;

        let mut u = a.clone();
        let mut l = Matrix::identity(n);
        let mut permutation: Vec<usize> = (0..n).collect();
        let mut sign = 1.0;

        for k in 0..n {
            // Find pivot: row with largest |u[i, k]| for i >= k
            let mut max_val = u.at(k, k).abs();
            let mut max_row = k;
            for i in (k + 1)..n {
                let val = u.at(i, k).abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            if max_val.is_nan() || max_val <= tol::PIVOT {
                return Err(MatrixError::SingularMatrix);
            }

            if max_row != k {
                swap_rows(&mut u, k, max_row, 0..n);
                // only the multipliers already computed move with the row
                swap_rows(&mut l, k, max_row, 0..k);
                permutation.swap(k, max_row);
                sign = -sign;
            }

            let pivot = u.at(k, k);
            for i in (k + 1)..n {
                let factor = u.at(i, k) / pivot;
                *l.at_mut(i, k) = factor;
                *u.at_mut(i, k) = 0.0;
                for j in (k + 1)..n {
                    let ukj = u.at(k, j);
                    *u.at_mut(i, j) -= factor * ukj;
                }
            }
        }

        Ok(Self {
            l,
            u,
            permutation,
            sign,
        })
    }

    /// The unit lower-triangular factor `L`.
    pub fn l(&self) -> &Matrix {
        &self.l
    }

    /// The upper-triangular factor `U`.
    pub fn u(&self) -> &Matrix {
        &self.u
    }

    /// Row permutation: `permutation()[i]` is the original row now in position `i`.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// The permutation matrix `P` such that `P * A = L * U`.
    pub fn p(&self) -> Matrix {
        let n = self.permutation.len();
        let mut p = Matrix::zeros(n, n);
        for (i, &pi) in self.permutation.iter().enumerate() {
            *p.at_mut(i, pi) = 1.0;
        }
        p
    }

    /// Compute the determinant from the factorization.
    ///
    /// `det(A) = sign * product(diag(U))`
    pub fn det(&self) -> f64 {
        self.u.diag().iter().fold(self.sign, |d, &x| d * x)
    }

    /// Solve `A X = B` for an `n x k` right-hand side `B`.
    pub fn solve(&self, b: &Matrix) -> Result<Matrix> {
        let n = self.permutation.len();
        if b.rows() != n {
            return Err(MatrixError::DimensionMismatch {
                expected: (n, b.cols()),
                got: b.shape(),
            });
        }
        let mut x = Matrix::zeros(n, b.cols());
        let mut column = vec![0.0; n];
        for c in 0..b.cols() {
            for (i, &pi) in self.permutation.iter().enumerate() {
                column[i] = b.at(pi, c);
            }
            self.substitute(&mut column);
            for (i, &v) in column.iter().enumerate() {
                *x.at_mut(i, c) = v;
            }
        }
        Ok(x)
    }

    /// Forward substitution with `L`, then back substitution with `U`, in place.
    /// `x` must already hold the permuted right-hand side.
    // x[j] is read while x[i] is updated (j < i), so index loops read clearer.
    #[allow(clippy::needless_range_loop)]
    pub(crate) fn substitute(&self, x: &mut [f64]) {
        let n = x.len();
        for i in 1..n {
            for j in 0..i {
                x[i] -= self.l.at(i, j) * x[j];
            }
        }
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                x[i] -= self.u.at(i, j) * x[j];
            }
            x[i] /= self.u.at(i, i);
        }
    }

    /// Compute the inverse by solving `L U x = P e_i` for every basis vector.
    pub fn inverse(&self) -> Matrix {
        let n = self.permutation.len();
        let mut inv = Matrix::zeros(n, n);
        let mut e = vec![0.0; n];
        for col in 0..n {
            for (i, &pi) in self.permutation.iter().enumerate() {
                e[i] = if pi == col { 1.0 } else { 0.0 };
            }
            self.substitute(&mut e);
            for (row, &v) in e.iter().enumerate() {
                *inv.at_mut(row, col) = v;
            }
        }
        inv
    }

    /// Consume the result, returning `(L, U, permutation)`.
    pub fn into_parts(self) -> (Matrix, Matrix, Vec<usize>) {
        (self.l, self.u, self.permutation)
    }
}

fn swap_rows(m: &mut Matrix, r1: usize, r2: usize, cols: core::ops::Range<usize>) {
    for j in cols {
        let tmp = m.at(r1, j);
        *m.at_mut(r1, j) = m.at(r2, j);
        *m.at_mut(r2, j) = tmp;
    }
}

impl Matrix {
    /// LU decomposition with partial pivoting. See [`LuDecomposition`].
    pub fn lu(&self) -> Result<LuDecomposition> {
        LuDecomposition::decompose(self)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn mat(data: &[f64], n: usize) -> Matrix {
        Matrix::from_vec(n, n, data.to_vec()).unwrap()
    }

    fn check_pa_eq_lu(a: &Matrix, tol: f64) {
        let lu = LuDecomposition::decompose(a).unwrap();
        let pa = lu.p().multiply(a).unwrap();
        let lu_prod = lu.l().multiply(lu.u()).unwrap();
        assert!(pa.approx_eq(&lu_prod, tol));
        assert_eq!(lu.l().upper_triangle(), Matrix::identity(a.rows()));
        assert_eq!(lu.u().lower_triangle(), Matrix::diagonal(&lu.u().diag()));
    }

    #[test]
    fn test_lu_2x2() {
        check_pa_eq_lu(&mat(&[2.0, 1.0, 1.0, 4.0], 2), 1e-12);
    }

    #[test]
    fn test_lu_3x3() {
        check_pa_eq_lu(&mat(&[2.0, 1.0, 1.0, 4.0, 3.0, 3.0, 8.0, 7.0, 9.0], 3), 1e-12);
    }

    #[test]
    fn test_lu_4x4() {
        let a = mat(
            &[
                1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 2.0, 6.0, 4.0, 8.0, 3.0, 1.0, 1.0, 2.0,
            ],
            4,
        );
        check_pa_eq_lu(&a, 1e-10);
    }

    #[test]
    fn test_permutation_records_pivot_rows() {
        // the largest entry of column 0 is in row 2
        let a = mat(&[1.0, 2.0, 0.0, 3.0, 1.0, 1.0, 8.0, 0.0, 2.0], 3);
        let lu = LuDecomposition::decompose(&a).unwrap();
        assert_eq!(lu.permutation()[0], 2);
        let mut sorted = lu.permutation().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
    }

    #[test]
    fn test_det() {
        // >>> np.linalg.det([[6,1,1],[4,-2,5],[2,8,7]])
        // -306.0
        let a = mat(&[6.0, 1.0, 1.0, 4.0, -2.0, 5.0, 2.0, 8.0, 7.0], 3);
        let lu = LuDecomposition::decompose(&a).unwrap();
        assert!((lu.det() - (-306.0)).abs() < 1e-10);

        let eye = Matrix::identity(5);
        assert!((eye.lu().unwrap().det() - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_singular_matrix() {
        // Rows are linearly dependent
        let a = mat(&[1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 7.0, 8.0, 9.0], 3);
        assert_eq!(
            LuDecomposition::decompose(&a).unwrap_err(),
            MatrixError::SingularMatrix
        );
        assert!(Matrix::zeros(2, 2).lu().is_err());
    }

    #[test]
    fn test_nan_is_singular() {
        let all_nan = Matrix::filled(3, 3, f64::NAN);
        assert_eq!(
            LuDecomposition::decompose(&all_nan).unwrap_err(),
            MatrixError::SingularMatrix
        );
        // a single NaN below a finite pivot spreads into a later pivot
        let one_nan = mat(&[1.0, 0.0, f64::NAN, 1.0], 2);
        assert_eq!(one_nan.lu().unwrap_err(), MatrixError::SingularMatrix);
        assert!(one_nan.determinant().is_err());
    }

    #[test]
    fn test_solve_vector() {
        // >>> np.linalg.solve([[1,2,3],[4,5,6],[7,8,10]], [1,2,3])
        // array([-0.33333333,  0.66666667,  0.        ])
        let a = mat(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0], 3);
        let b = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
        let x = a.lu().unwrap().solve(&b).unwrap();
        let expected = Matrix::from_vec(3, 1, vec![-1.0 / 3.0, 2.0 / 3.0, 0.0]).unwrap();
        assert!(x.approx_eq(&expected, 1e-12));
    }

    #[test]
    fn test_solve_multiple_rhs() {
        let a = mat(
            &[
                1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 2.0, 6.0, 4.0, 8.0, 3.0, 1.0, 1.0, 2.0,
            ],
            4,
        );
        let b = Matrix::from_rows(&[&[10.0, 1.0], &[26.0, 5.0], &[20.0, 2.0], &[7.0, 3.0]]).unwrap();
        let x = a.lu().unwrap().solve(&b).unwrap();
        assert!(a.multiply(&x).unwrap().approx_eq(&b, 1e-10));
        // first column: np.linalg.solve(A, [10, 26, 20, 7]) == [1, 1, 1, 1]
        assert!(x.col(0).unwrap().approx_eq(&Matrix::ones(4, 1), 1e-10));
    }

    #[test]
    fn test_inverse() {
        let a = mat(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0], 3);
        let inv = a.lu().unwrap().inverse();
        assert!(a.multiply(&inv).unwrap().approx_eq(&Matrix::identity(3), 1e-10));
    }

    #[test]
    fn test_not_square() {
        let a = Matrix::zeros(2, 3);
        assert!(matches!(
            LuDecomposition::decompose(&a),
            Err(MatrixError::InvalidDomain { .. })
        ));
    }

    #[test]
    fn test_solve_dimension_mismatch() {
        let lu = Matrix::identity(2).lu().unwrap();
        assert!(lu.solve(&Matrix::ones(3, 1)).is_err());
    }

    #[test]
    fn test_into_parts() {
        let a = mat(&[4.0, 3.0, 6.0, 3.0], 2);
        let (l, u, perm) = a.lu().unwrap().into_parts();
        assert_eq!(perm, vec![1, 0]);
        assert_eq!(l.shape(), (2, 2));
        assert_eq!(u.get(1, 0).unwrap(), 0.0);
    }
}

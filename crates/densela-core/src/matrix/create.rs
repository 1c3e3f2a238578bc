//! Matrix constructors: `zeros`, `identity`, structured and random matrices.

use crate::error::{MatrixError, Result};

use super::Matrix;

impl Matrix {
    /// Create a `rows x cols` matrix filled with zeros.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let m = Matrix::zeros(2, 3);
    /// assert_eq!(m.shape(), (2, 3));
    /// assert!(m.iter().all(|&x| x == 0.0));
    /// ```
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Create a `rows x cols` matrix filled with ones.
    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 1.0)
    }

    /// Create a `rows x cols` matrix filled with `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            data: vec![value; rows * cols],
            rows,
            cols,
        }
    }

    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Create a square matrix with `values` on the diagonal.
    pub fn diagonal(values: &[f64]) -> Self {
        let n = values.len();
        let mut m = Self::zeros(n, n);
        for (i, &v) in values.iter().enumerate() {
            m.data[i * n + i] = v;
        }
        m
    }

    /// Create a symmetric `n x n` matrix from its packed upper triangle.
    ///
    /// `upper` lists row `0` from the diagonal rightwards, then row `1` from
    /// the diagonal, and so on: `n * (n + 1) / 2` values in total.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let m = Matrix::symmetric(2, &[1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(m.as_slice(), &[1.0, 2.0, 2.0, 3.0]);
    /// ```
    pub fn symmetric(n: usize, upper: &[f64]) -> Result<Self> {
        let expected = n * (n + 1) / 2;
        if upper.len() != expected {
            return Err(MatrixError::InvalidData {
                expected,
                got: upper.len(),
            });
        }
        let mut m = Self::zeros(n, n);
        let mut k = 0;
        for i in 0..n {
            for j in i..n {
                m.data[i * n + j] = upper[k];
                m.data[j * n + i] = upper[k];
                k += 1;
            }
        }
        Ok(m)
    }

    /// Create an `n x n` band matrix: entries with `-lower <= j - i <= upper`
    /// are set to `value`, everything else is zero.
    pub fn band(n: usize, lower: usize, upper: usize, value: f64) -> Self {
        Self::from_fn(n, n, |i, j| {
            if j + lower >= i && i + upper >= j {
                value
            } else {
                0.0
            }
        })
    }

    /// Create the `n x n` Hilbert matrix, `H[i][j] = 1 / (i + j + 1)`.
    ///
    /// Notoriously ill-conditioned; useful for stress-testing solvers.
    pub fn hilbert(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| 1.0 / (i + j + 1) as f64)
    }

    /// Create a Toeplitz matrix with the given first column and first row.
    ///
    /// The diagonal value is taken from `first_col[0]`; `first_row[0]` is
    /// ignored.
    pub fn toeplitz(first_col: &[f64], first_row: &[f64]) -> Self {
        Self::from_fn(first_col.len(), first_row.len(), |i, j| {
            if i >= j {
                first_col[i - j]
            } else {
                first_row[j - i]
            }
        })
    }

    /// Create a Vandermonde matrix with increasing powers:
    /// `V[i][j] = x[i]^j` for `j < cols`.
    pub fn vandermonde(x: &[f64], cols: usize) -> Self {
        Self::from_fn(x.len(), cols, |i, j| x[i].powi(j as i32))
    }
}

#[cfg(feature = "rand")]
mod random {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::Matrix;

    impl Matrix {
        /// Create a matrix with entries drawn uniformly from `[0, 1)`.
        pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
            Self::from_fn(rows, cols, |_, _| rng.gen_range(0.0..1.0))
        }

        /// Like [`Matrix::random`], seeded deterministically.
        ///
        /// ```
        /// # use densela_core::Matrix;
        /// let a = Matrix::random_seeded(3, 3, 7);
        /// let b = Matrix::random_seeded(3, 3, 7);
        /// assert_eq!(a, b);
        /// ```
        pub fn random_seeded(rows: usize, cols: usize, seed: u64) -> Self {
            let mut rng = StdRng::seed_from_u64(seed);
            Self::random(rows, cols, &mut rng)
        }

        /// Create a symmetric `n x n` matrix with entries uniform in `[0, 1)`.
        pub fn random_symmetric<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
            let mut m = Self::zeros(n, n);
            for i in 0..n {
                for j in i..n {
                    let v = rng.gen_range(0.0..1.0);
                    m.data[i * n + j] = v;
                    m.data[j * n + i] = v;
                }
            }
            m
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_ones_filled() {
        assert!(Matrix::zeros(3, 4).iter().all(|&x| x == 0.0));
        assert!(Matrix::ones(2, 2).iter().all(|&x| x == 1.0));
        assert!(Matrix::filled(2, 5, -3.5).iter().all(|&x| x == -3.5));
    }

    #[test]
    fn test_identity() {
        let eye = Matrix::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(eye.get(i, j).unwrap(), expected);
            }
        }
        assert!(Matrix::identity(0).is_empty());
    }

    #[test]
    fn test_diagonal() {
        let d = Matrix::diagonal(&[1.0, 2.0, 3.0]);
        assert_eq!(d.shape(), (3, 3));
        assert_eq!(d.get(1, 1).unwrap(), 2.0);
        assert_eq!(d.get(1, 2).unwrap(), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let s = Matrix::symmetric(3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(
            s.as_slice(),
            &[1.0, 2.0, 3.0, 2.0, 4.0, 5.0, 3.0, 5.0, 6.0]
        );
        assert!(Matrix::symmetric(3, &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_band() {
        // tridiagonal
        let b = Matrix::band(4, 1, 1, 2.0);
        let expected = Matrix::from_rows(&[
            &[2.0, 2.0, 0.0, 0.0],
            &[2.0, 2.0, 2.0, 0.0],
            &[0.0, 2.0, 2.0, 2.0],
            &[0.0, 0.0, 2.0, 2.0],
        ])
        .unwrap();
        assert_eq!(b, expected);

        let upper_only = Matrix::band(3, 0, 2, 1.0);
        assert_eq!(upper_only.get(2, 0).unwrap(), 0.0);
        assert_eq!(upper_only.get(0, 2).unwrap(), 1.0);
    }

    #[test]
    fn test_hilbert() {
        let h = Matrix::hilbert(3);
        assert_eq!(h.get(0, 0).unwrap(), 1.0);
        assert_eq!(h.get(1, 2).unwrap(), 0.25);
        assert_eq!(h.get(2, 2).unwrap(), 0.2);
    }

    #[test]
    fn test_toeplitz() {
        let t = Matrix::toeplitz(&[1.0, 2.0, 3.0], &[9.0, 4.0, 5.0, 6.0]);
        let expected = Matrix::from_rows(&[
            &[1.0, 4.0, 5.0, 6.0],
            &[2.0, 1.0, 4.0, 5.0],
            &[3.0, 2.0, 1.0, 4.0],
        ])
        .unwrap();
        assert_eq!(t, expected);
    }

    #[test]
    fn test_vandermonde() {
        let v = Matrix::vandermonde(&[1.0, 2.0, 3.0], 3);
        let expected =
            Matrix::from_rows(&[&[1.0, 1.0, 1.0], &[1.0, 2.0, 4.0], &[1.0, 3.0, 9.0]]).unwrap();
        assert_eq!(v, expected);
    }

    #[cfg(feature = "rand")]
    #[test]
    fn test_random_range_and_seed() {
        let a = Matrix::random_seeded(4, 5, 42);
        assert_eq!(a.shape(), (4, 5));
        assert!(a.iter().all(|&x| (0.0..1.0).contains(&x)));
        assert_eq!(a, Matrix::random_seeded(4, 5, 42));
        assert_ne!(a, Matrix::random_seeded(4, 5, 43));
    }

    #[cfg(feature = "rand")]
    #[test]
    fn test_random_symmetric() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let s = Matrix::random_symmetric(5, &mut rng);
        assert_eq!(s, s.transpose());
    }
}

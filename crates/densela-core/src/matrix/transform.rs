//! Transpose and triangular/diagonal extraction for [`Matrix`].

use super::Matrix;

impl Matrix {
    /// Transpose: a `cols x rows` matrix with `T[j][i] = A[i][j]`.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let a = Matrix::from_rows(&[&[1.0, 2.0, 3.0]]).unwrap();
    /// let t = a.transpose();
    /// assert_eq!(t.shape(), (3, 1));
    /// assert_eq!(t.transpose(), a);
    /// ```
    pub fn transpose(&self) -> Matrix {
        let (m, n) = (self.rows, self.cols);
        let mut data = vec![0.0; m * n];
        for i in 0..m {
            for j in 0..n {
                data[j * m + i] = self.data[i * n + j];
            }
        }
        Matrix {
            data,
            rows: n,
            cols: m,
        }
    }

    /// The main diagonal (length `min(rows, cols)`).
    pub fn diag(&self) -> Vec<f64> {
        (0..self.rows.min(self.cols))
            .map(|i| self.data[i * self.cols + i])
            .collect()
    }

    /// Copy with everything above the main diagonal zeroed.
    pub fn lower_triangle(&self) -> Matrix {
        Matrix::from_fn(self.rows, self.cols, |i, j| {
            if j <= i { self.at(i, j) } else { 0.0 }
        })
    }

    /// Copy with everything below the main diagonal zeroed.
    pub fn upper_triangle(&self) -> Matrix {
        Matrix::from_fn(self.rows, self.cols, |i, j| {
            if j >= i { self.at(i, j) } else { 0.0 }
        })
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose() {
        let a = Matrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_transpose_involution_is_exact() {
        let a = Matrix::from_fn(3, 5, |i, j| (i as f64 + 0.1).powi(j as i32 + 1) / 7.0);
        assert_eq!(a.transpose().transpose(), a);
    }

    #[test]
    fn test_transpose_empty() {
        let a = Matrix::zeros(0, 3);
        assert_eq!(a.transpose().shape(), (3, 0));
    }

    #[test]
    fn test_diag() {
        let a = Matrix::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
        assert_eq!(a.diag(), vec![0.0, 4.0]);
    }

    #[test]
    fn test_triangles() {
        let a = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
        assert_eq!(a.lower_triangle().as_slice(), &[1.0, 0.0, 3.0, 4.0]);
        assert_eq!(a.upper_triangle().as_slice(), &[1.0, 2.0, 0.0, 4.0]);
    }
}

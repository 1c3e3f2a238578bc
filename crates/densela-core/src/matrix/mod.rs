//! Dense row-major matrix of `f64`.
//!
//! [`Matrix`] is the single data type of the engine. It owns its storage,
//! its dimensions never change after construction, and cloning performs a
//! deep copy. Every algorithm in the crate takes matrices by reference and
//! returns freshly allocated results.

mod create;
mod display;
mod indexing;
mod ops;
mod transform;

use crate::error::{MatrixError, Result};

/// A dense `rows x cols` matrix of `f64` stored in row-major order.
///
/// Element `(i, j)` lives at `data[i * cols + j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    // ------------------------------------------------------------------
    // Construction from raw parts
    // ------------------------------------------------------------------

    /// Create a matrix from a flat row-major vector.
    ///
    /// Returns an error if `data.len() != rows * cols`.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// assert_eq!(m.get(1, 0).unwrap(), 4.0);
    /// ```
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(MatrixError::InvalidData {
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a matrix from a slice of rows.
    ///
    /// All rows must have the same length. An empty slice yields a `0 x 0`
    /// matrix.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let m = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
    /// assert_eq!(m.shape(), (2, 2));
    /// ```
    pub fn from_rows(rows: &[&[f64]]) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(MatrixError::DimensionMismatch {
                    expected: (1, n_cols),
                    got: (1, row.len()),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: n_rows,
            cols: n_cols,
        })
    }

    /// Build a matrix by evaluating `f(i, j)` for every element.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { data, rows, cols }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the matrix has zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `rows == cols`.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// All elements in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consume the matrix and return its row-major storage.
    #[inline]
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    fn check_index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    /// Element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        let idx = self.check_index(row, col)?;
        Ok(self.data[idx])
    }

    /// Overwrite the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let idx = self.check_index(row, col)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Iterate over all elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    /// Iterate over the rows as slices.
    pub fn row_iter(&self) -> impl Iterator<Item = &[f64]> {
        // `max(1)` keeps `chunks_exact` valid for 0-column matrices.
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    // ------------------------------------------------------------------
    // Map / apply
    // ------------------------------------------------------------------

    /// Apply a function to every element, returning a new matrix.
    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Apply a function element-wise to two matrices of the same shape.
    pub fn zip_map<F>(&self, other: &Matrix, f: F) -> Result<Matrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.check_same_shape(other)?;
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix {
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Largest absolute element-wise difference, or `None` on shape mismatch.
    pub fn max_abs_diff(&self, other: &Matrix) -> Option<f64> {
        if self.shape() != other.shape() {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(other.data.iter())
                .fold(0.0_f64, |acc, (&a, &b)| acc.max((a - b).abs())),
        )
    }

    /// Whether both matrices have the same shape and every element differs
    /// by at most `tol`.
    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.max_abs_diff(other).is_some_and(|d| d <= tol)
    }

    pub(crate) fn check_same_shape(&self, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.shape(),
                got: other.shape(),
            });
        }
        Ok(())
    }

    pub(crate) fn require_square(&self, reason: &'static str) -> Result<usize> {
        if !self.is_square() {
            return Err(MatrixError::InvalidDomain { reason });
        }
        Ok(self.rows)
    }

    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub(crate) fn at_mut(&mut self, row: usize, col: usize) -> &mut f64 {
        &mut self.data[row * self.cols + col]
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec() {
        let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.len(), 6);
        assert_eq!(m.get(1, 2).unwrap(), 6.0);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let r = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0]);
        assert_eq!(
            r.unwrap_err(),
            MatrixError::InvalidData {
                expected: 6,
                got: 3
            }
        );
    }

    #[test]
    fn test_from_rows_ragged() {
        let r = Matrix::from_rows(&[&[1.0, 2.0], &[3.0]]);
        assert!(matches!(r, Err(MatrixError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_from_rows_empty() {
        let m = Matrix::from_rows(&[]).unwrap();
        assert_eq!(m.shape(), (0, 0));
        assert!(m.is_empty());
    }

    #[test]
    fn test_get_set() {
        let mut m = Matrix::zeros(2, 2);
        m.set(0, 1, 7.5).unwrap();
        assert_eq!(m.get(0, 1).unwrap(), 7.5);
        assert_eq!(m.get(1, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let m = Matrix::zeros(2, 3);
        assert_eq!(
            m.get(2, 0).unwrap_err(),
            MatrixError::IndexOutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            }
        );
        assert!(m.get(0, 3).is_err());
    }

    #[test]
    fn test_set_out_of_bounds_leaves_matrix_untouched() {
        let mut m = Matrix::ones(2, 2);
        assert!(m.set(5, 5, 0.0).is_err());
        assert_eq!(m, Matrix::ones(2, 2));
    }

    #[test]
    fn test_from_fn() {
        let m = Matrix::from_fn(2, 3, |i, j| (i * 10 + j) as f64);
        assert_eq!(m.as_slice(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_row_iter() {
        let m = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]).unwrap();
        let rows: Vec<&[f64]> = m.row_iter().collect();
        assert_eq!(rows, vec![&[1.0, 2.0][..], &[3.0, 4.0], &[5.0, 6.0]]);
        assert_eq!(Matrix::zeros(3, 0).row_iter().count(), 0);
    }

    #[test]
    fn test_map_and_zip_map() {
        let a = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
        let b = a.map(|x| x * 10.0);
        assert_eq!(b.as_slice(), &[10.0, 20.0, 30.0, 40.0]);
        let c = a.zip_map(&b, |x, y| y - x).unwrap();
        assert_eq!(c.as_slice(), &[9.0, 18.0, 27.0, 36.0]);
        assert!(a.zip_map(&Matrix::zeros(1, 2), |x, _| x).is_err());
    }

    #[test]
    fn test_approx_eq() {
        let a = Matrix::identity(2);
        let mut b = Matrix::identity(2);
        b.set(0, 1, 1e-12).unwrap();
        assert!(a.approx_eq(&b, 1e-10));
        assert!(!a.approx_eq(&b, 1e-14));
        assert!(!a.approx_eq(&Matrix::identity(3), 1.0));
    }
}

//! Row, column and sub-matrix access for [`Matrix`].

use core::ops::{Index, IndexMut};

use crate::error::{MatrixError, Result};

use super::Matrix;

impl Matrix {
    /// Copy of row `i` as a `1 x cols` matrix.
    pub fn row(&self, i: usize) -> Result<Matrix> {
        self.sub_matrix(i, 0, 1, self.cols)
    }

    /// Copy of column `j` as a `rows x 1` matrix.
    pub fn col(&self, j: usize) -> Result<Matrix> {
        self.sub_matrix(0, j, self.rows, 1)
    }

    /// Overwrite row `i` with `values` (length `cols`).
    pub fn set_row(&mut self, i: usize, values: &[f64]) -> Result<()> {
        if i >= self.rows {
            return Err(MatrixError::IndexOutOfBounds {
                row: i,
                col: 0,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if values.len() != self.cols {
            return Err(MatrixError::DimensionMismatch {
                expected: (1, self.cols),
                got: (1, values.len()),
            });
        }
        let start = i * self.cols;
        self.data[start..start + self.cols].copy_from_slice(values);
        Ok(())
    }

    /// Overwrite column `j` with `values` (length `rows`).
    pub fn set_col(&mut self, j: usize, values: &[f64]) -> Result<()> {
        if j >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row: 0,
                col: j,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if values.len() != self.rows {
            return Err(MatrixError::DimensionMismatch {
                expected: (self.rows, 1),
                got: (values.len(), 1),
            });
        }
        for (i, &v) in values.iter().enumerate() {
            self.data[i * self.cols + j] = v;
        }
        Ok(())
    }

    fn check_window(&self, row: usize, col: usize, rows: usize, cols: usize) -> Result<()> {
        let past_rows = row.checked_add(rows).is_none_or(|end| end > self.rows);
        let past_cols = col.checked_add(cols).is_none_or(|end| end > self.cols);
        if past_rows || past_cols {
            return Err(MatrixError::IndexOutOfBounds {
                row: row.saturating_add(rows.saturating_sub(1)),
                col: col.saturating_add(cols.saturating_sub(1)),
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Copy the `rows x cols` window whose top-left corner is `(row, col)`.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let m = Matrix::from_fn(4, 4, |i, j| (i * 4 + j) as f64);
    /// let s = m.sub_matrix(1, 2, 2, 2).unwrap();
    /// assert_eq!(s.as_slice(), &[6.0, 7.0, 10.0, 11.0]);
    /// ```
    pub fn sub_matrix(&self, row: usize, col: usize, rows: usize, cols: usize) -> Result<Matrix> {
        self.check_window(row, col, rows, cols)?;
        let mut data = Vec::with_capacity(rows * cols);
        for i in row..row + rows {
            let start = i * self.cols + col;
            data.extend_from_slice(&self.data[start..start + cols]);
        }
        Ok(Matrix { data, rows, cols })
    }

    /// Write `block` into this matrix with its top-left corner at `(row, col)`.
    pub fn set_sub_matrix(&mut self, row: usize, col: usize, block: &Matrix) -> Result<()> {
        self.check_window(row, col, block.rows, block.cols)?;
        for (bi, src) in block.row_iter().enumerate() {
            let start = (row + bi) * self.cols + col;
            self.data[start..start + block.cols].copy_from_slice(src);
        }
        Ok(())
    }
}

/// Unchecked-by-`Result` element access.
///
/// # Panics
///
/// Panics if the index is out of bounds. Use [`Matrix::get`] for a
/// fallible lookup.
impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

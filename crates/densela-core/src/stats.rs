//! Descriptive statistics over matrix elements.
//!
//! For [`Matrix::covariance`] and [`Matrix::correlation`] the columns are
//! variables and the rows are observations.

use crate::Matrix;
use crate::error::{MatrixError, Result};

/// Direction of a reduction.
///
/// Converts from the integer convention `-1` (all), `0` (columns),
/// `1` (rows) via [`TryFrom<i32>`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Reduce every element to a `1 x 1` result.
    All,
    /// Reduce each column to a `1 x cols` result.
    Columns,
    /// Reduce each row to a `rows x 1` result.
    Rows,
}

impl TryFrom<i32> for Axis {
    type Error = MatrixError;

    fn try_from(axis: i32) -> Result<Self> {
        match axis {
            -1 => Ok(Axis::All),
            0 => Ok(Axis::Columns),
            1 => Ok(Axis::Rows),
            _ => Err(MatrixError::InvalidAxis { axis }),
        }
    }
}

impl Matrix {
    /// Arithmetic mean along an integer axis (`-1`, `0` or `1`).
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let a = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
    /// assert_eq!(a.mean(-1).unwrap().as_slice(), &[2.5]);
    /// assert_eq!(a.mean(0).unwrap().as_slice(), &[2.0, 3.0]);
    /// assert_eq!(a.mean(1).unwrap().as_slice(), &[1.5, 3.5]);
    /// assert!(a.mean(2).is_err());
    /// ```
    pub fn mean(&self, axis: i32) -> Result<Matrix> {
        self.mean_along(Axis::try_from(axis)?)
    }

    /// Arithmetic mean along `axis`.
    pub fn mean_along(&self, axis: Axis) -> Result<Matrix> {
        if self.is_empty() {
            return Err(MatrixError::InvalidDomain {
                reason: "mean of an empty matrix",
            });
        }
        self.reduce(axis, mean_of)
    }

    /// Unbiased (`N - 1`) standard deviation along an integer axis.
    pub fn std_dev(&self, axis: i32) -> Result<Matrix> {
        self.std_dev_along(Axis::try_from(axis)?)
    }

    /// Unbiased (`N - 1`) standard deviation along `axis`.
    ///
    /// Every reduced slice needs at least two elements.
    pub fn std_dev_along(&self, axis: Axis) -> Result<Matrix> {
        let samples = match axis {
            Axis::All => self.len(),
            Axis::Columns => self.rows(),
            Axis::Rows => self.cols(),
        };
        if samples < 2 || self.is_empty() {
            return Err(MatrixError::InvalidDomain {
                reason: "standard deviation needs at least two samples",
            });
        }
        self.reduce(axis, |values| sample_variance(values).sqrt())
    }

    /// Sample covariance matrix (`cols x cols`, divisor `N - 1`).
    ///
    /// Requires at least two rows and two columns.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let x = Matrix::from_rows(&[&[1.0, 2.0], &[2.0, 4.0], &[3.0, 6.0]]).unwrap();
    /// let cov = x.covariance().unwrap();
    /// assert_eq!(cov.as_slice(), &[1.0, 2.0, 2.0, 4.0]);
    /// ```
    pub fn covariance(&self) -> Result<Matrix> {
        if self.rows() < 2 || self.cols() < 2 {
            return Err(MatrixError::InvalidDomain {
                reason: "covariance needs at least two rows and two columns",
            });
        }

        let means = self.mean_along(Axis::Columns)?;
        let centered = Matrix::from_fn(self.rows(), self.cols(), |i, j| {
            self.at(i, j) - means.at(0, j)
        });
        let divisor = (self.rows() - 1) as f64;
        let p = self.cols();
        let mut cov = Matrix::zeros(p, p);
        for a in 0..p {
            for b in a..p {
                let s: f64 = (0..self.rows())
                    .map(|k| centered.at(k, a) * centered.at(k, b))
                    .sum();
                *cov.at_mut(a, b) = s / divisor;
                *cov.at_mut(b, a) = s / divisor;
            }
        }
        Ok(cov)
    }

    /// Pearson correlation matrix (`cols x cols`).
    ///
    /// Entries involving a constant column are 0.
    pub fn correlation(&self) -> Result<Matrix> {
        let cov = self.covariance()?;
        let std: Vec<f64> = cov.diag().iter().map(|v| v.sqrt()).collect();
        let p = cov.rows();
        Ok(Matrix::from_fn(p, p, |i, j| {
            let denom = std[i] * std[j];
            if denom == 0.0 { 0.0 } else { cov.at(i, j) / denom }
        }))
    }

    fn reduce<F>(&self, axis: Axis, f: F) -> Result<Matrix>
    where
        F: Fn(&[f64]) -> f64,
    {
        match axis {
            Axis::All => Matrix::from_vec(1, 1, vec![f(self.as_slice())]),
            Axis::Rows => {
                let values: Vec<f64> = self.row_iter().map(&f).collect();
                Matrix::from_vec(self.rows(), 1, values)
            }
            Axis::Columns => {
                let mut column = vec![0.0; self.rows()];
                let mut values = Vec::with_capacity(self.cols());
                for j in 0..self.cols() {
                    for (i, slot) in column.iter_mut().enumerate() {
                        *slot = self.at(i, j);
                    }
                    values.push(f(&column));
                }
                Matrix::from_vec(1, self.cols(), values)
            }
        }
    }
}

fn mean_of(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_variance(values: &[f64]) -> f64 {
    let mean = mean_of(values);
    let ss: f64 = values.iter().map(|x| (x - mean) * (x - mean)).sum();
    ss / (values.len() - 1) as f64
}

//! Singular Value Decomposition (SVD).
//!
//! Decomposes a matrix `A` (m x n) into the thin form `A = U S V^T` with
//! `k = min(m, n)`:
//! - `U` (m x k) has orthonormal columns
//! - `S` (k x k) is diagonal with non-negative entries, sorted descending
//! - `V` (n x k) has orthonormal columns
//!
//! Implementation is Golub-Reinsch: Householder bidiagonalization followed
//! by implicitly shifted QR sweeps on the bidiagonal form. Wide matrices are
//! decomposed through their transpose.

use crate::Matrix;
use crate::error::{MatrixError, Result};

/// Tuning knobs for [`SvdDecomposition::decompose_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvdParams {
    /// QR sweeps allowed per singular value.
    pub max_iterations: usize,
}

impl Default for SvdParams {
    fn default() -> Self {
        Self { max_iterations: 50 }
    }
}

/// Result of a thin Singular Value Decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct SvdDecomposition {
    /// Left singular vectors (m x k).
    u: Matrix,
    /// Singular values on the diagonal (k x k).
    s: Matrix,
    /// Right singular vectors (n x k).
    v: Matrix,
}

#[allow(clippy::many_single_char_names)]
impl SvdDecomposition {
    /// Compute the SVD of a matrix `A` (m x n) with default [`SvdParams`].
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// # use densela_core::linalg::decomp::SvdDecomposition;
    /// let a = Matrix::diagonal(&[3.0, 4.0]);
    /// let svd = SvdDecomposition::decompose(&a).unwrap();
    /// let s = svd.singular_values();
    /// // Singular values of diag(3,4) are 4 and 3
    /// assert!((s[0] - 4.0).abs() < 1e-10);
    /// assert!((s[1] - 3.0).abs() < 1e-10);
    /// ```
    pub fn decompose(a: &Matrix) -> Result<Self> {
        Self::decompose_with(a, SvdParams::default())
    }

    /// Compute the SVD with explicit parameters.
    ///
    /// Fails with [`MatrixError::ConvergenceFailure`] if some singular value
    /// needs more than `params.max_iterations` QR sweeps.
    pub fn decompose_with(a: &Matrix, params: SvdParams) -> Result<Self> {
        let (m, n) = a.shape();
        if m >= n {
            Self::svd_tall(a.as_slice(), m, n, params)
        } else {
            // A^T = U' S V'^T  =>  A = V' S U'^T
            let t = Self::svd_tall(a.transpose().as_slice(), n, m, params)?;
            Ok(Self {
                u: t.v,
                s: t.s,
                v: t.u,
            })
        }
    }

    /// Golub-Reinsch on an `m x n` row-major matrix with `m >= n`.
    #[allow(clippy::float_cmp, clippy::too_many_lines, clippy::needless_range_loop)]
    fn svd_tall(a_data: &[f64], m: usize, n: usize, params: SvdParams) -> Result<Self> {
        let mut a = a_data.to_vec();
        let mut w = vec![0.0; n];
        let mut v = vec![0.0; n * n];
        let mut rv1 = vec![0.0; n];

        // ------------------------------------------------------------------
        // Householder reduction to bidiagonal form
        // ------------------------------------------------------------------
        let mut g = 0.0;
        let mut scale = 0.0;
        let mut anorm: f64 = 0.0;
        let mut l = 0;
        for i in 0..n {
            l = i + 1;
            rv1[i] = scale * g;
            g = 0.0;

            // left reflection zeroes column i below the diagonal
            scale = (i..m).map(|k| a[k * n + i].abs()).sum::<f64>();
            if scale != 0.0 {
                let mut s = 0.0;
                for k in i..m {
                    a[k * n + i] /= scale;
                    s += a[k * n + i] * a[k * n + i];
                }
                let f = a[i * n + i];
                g = -sign(s.sqrt(), f);
                let h = f * g - s;
                a[i * n + i] = f - g;
                for j in l..n {
                    let s: f64 = (i..m).map(|k| a[k * n + i] * a[k * n + j]).sum();
                    let f = s / h;
                    for k in i..m {
                        a[k * n + j] += f * a[k * n + i];
                    }
                }
                for k in i..m {
                    a[k * n + i] *= scale;
                }
            }
            w[i] = scale * g;

            // right reflection zeroes row i right of the super-diagonal
            g = 0.0;
            scale = 0.0;
            if i != n - 1 {
                scale = (l..n).map(|k| a[i * n + k].abs()).sum::<f64>();
                if scale != 0.0 {
                    let mut s = 0.0;
                    for k in l..n {
                        a[i * n + k] /= scale;
                        s += a[i * n + k] * a[i * n + k];
                    }
                    let f = a[i * n + l];
                    g = -sign(s.sqrt(), f);
                    let h = f * g - s;
                    a[i * n + l] = f - g;
                    for k in l..n {
                        rv1[k] = a[i * n + k] / h;
                    }
                    for j in l..m {
                        let s: f64 = (l..n).map(|k| a[j * n + k] * a[i * n + k]).sum();
                        for k in l..n {
                            a[j * n + k] += s * rv1[k];
                        }
                    }
                    for k in l..n {
                        a[i * n + k] *= scale;
                    }
                }
            }
            anorm = anorm.max(w[i].abs() + rv1[i].abs());
        }

        // ------------------------------------------------------------------
        // Accumulate right-hand transformations into V
        // ------------------------------------------------------------------
        for i in (0..n).rev() {
            if i < n - 1 {
                if g != 0.0 {
                    // double division avoids possible underflow
                    for j in l..n {
                        v[j * n + i] = (a[i * n + j] / a[i * n + l]) / g;
                    }
                    for j in l..n {
                        let s: f64 = (l..n).map(|k| a[i * n + k] * v[k * n + j]).sum();
                        for k in l..n {
                            v[k * n + j] += s * v[k * n + i];
                        }
                    }
                }
                for j in l..n {
                    v[i * n + j] = 0.0;
                    v[j * n + i] = 0.0;
                }
            }
            v[i * n + i] = 1.0;
            g = rv1[i];
            l = i;
        }

        // ------------------------------------------------------------------
        // Accumulate left-hand transformations in place (a becomes U)
        // ------------------------------------------------------------------
        for i in (0..n).rev() {
            let l = i + 1;
            let g = w[i];
            for j in l..n {
                a[i * n + j] = 0.0;
            }
            if g == 0.0 {
                for j in i..m {
                    a[j * n + i] = 0.0;
                }
            } else {
                let g = 1.0 / g;
                for j in l..n {
                    let s: f64 = (l..m).map(|k| a[k * n + i] * a[k * n + j]).sum();
                    let f = (s / a[i * n + i]) * g;
                    for k in i..m {
                        a[k * n + j] += f * a[k * n + i];
                    }
                }
                for j in i..m {
                    a[j * n + i] *= g;
                }
            }
            a[i * n + i] += 1.0;
        }

        // ------------------------------------------------------------------
        // Diagonalize the bidiagonal form
        // ------------------------------------------------------------------
        let negligible = f64::EPSILON * anorm;
        let mut total_sweeps = 0;
        for k in (0..n).rev() {
            let mut its = 0;
            loop {
                its += 1;

                // Find the split point l: rv1[l] negligible, or w[l - 1]
                // negligible (then rv1[l..=k] gets cancelled below).
                let mut cancel = true;
                let mut l = k;
                loop {
                    if l == 0 || rv1[l].abs() <= negligible {
                        cancel = false;
                        break;
                    }
                    if w[l - 1].abs() <= negligible {
                        break;
                    }
                    l -= 1;
                }

                if cancel {
                    let nm = l - 1;
                    let mut c = 0.0;
                    let mut s = 1.0;
                    for i in l..=k {
                        let f = s * rv1[i];
                        rv1[i] *= c;
                        if f.abs() <= negligible {
                            break;
                        }
                        let g = w[i];
                        let h = f.hypot(g);
                        w[i] = h;
                        c = g / h;
                        s = -f / h;
                        rotate_columns(&mut a, m, n, nm, i, c, s);
                    }
                }

                let z = w[k];
                if l == k {
                    // converged; make the singular value non-negative
                    if z < 0.0 {
                        w[k] = -z;
                        for j in 0..n {
                            v[j * n + k] = -v[j * n + k];
                        }
                    }
                    break;
                }
                if its >= params.max_iterations {
                    return Err(MatrixError::ConvergenceFailure { iterations: its });
                }
                total_sweeps += 1;

                // shift from the bottom 2x2 minor
                let mut x = w[l];
                let nm = k - 1;
                let mut y = w[nm];
                let mut g = rv1[nm];
                let mut h = rv1[k];
                let mut f = ((y - z) * (y + z) + (g - h) * (g + h)) / (2.0 * h * y);
                g = f.hypot(1.0);
                f = ((x - z) * (x + z) + h * ((y / (f + sign(g, f))) - h)) / x;

                // next QR transformation
                let mut c = 1.0;
                let mut s = 1.0;
                for j in l..=nm {
                    let i = j + 1;
                    g = rv1[i];
                    y = w[i];
                    h = s * g;
                    g *= c;
                    let mut z = f.hypot(h);
                    rv1[j] = z;
                    c = f / z;
                    s = h / z;
                    f = x * c + g * s;
                    g = g * c - x * s;
                    h = y * s;
                    y *= c;
                    rotate_columns(&mut v, n, n, j, i, c, s);
                    z = f.hypot(h);
                    w[j] = z;
                    if z != 0.0 {
                        c = f / z;
                        s = h / z;
                    }
                    f = c * g + s * y;
                    x = c * y - s * g;
                    rotate_columns(&mut a, m, n, j, i, c, s);
                }
                rv1[l] = 0.0;
                rv1[k] = f;
                w[k] = x;
            }
        }
        log::debug!(target: "densela", "svd: {m}x{n} diagonalized after {total_sweeps} QR sweeps");

        // ------------------------------------------------------------------
        // Sort descending and package the thin factors
        // ------------------------------------------------------------------
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&i, &j| w[j].total_cmp(&w[i]));

        let u = Matrix::from_fn(m, n, |r, c| a[r * n + order[c]]);
        let s = Matrix::diagonal(&order.iter().map(|&i| w[i]).collect::<Vec<_>>());
        let v = Matrix::from_fn(n, n, |r, c| v[r * n + order[c]]);
        Ok(Self { u, s, v })
    }

    /// The singular values in descending order.
    pub fn singular_values(&self) -> Vec<f64> {
        self.s.diag()
    }

    /// The left singular vectors `U` (m x k).
    pub fn u(&self) -> &Matrix {
        &self.u
    }

    /// The diagonal matrix of singular values `S` (k x k).
    pub fn s(&self) -> &Matrix {
        &self.s
    }

    /// The right singular vectors `V` (n x k), not transposed.
    pub fn v(&self) -> &Matrix {
        &self.v
    }

    /// Compute the matrix rank (number of singular values above a tolerance).
    pub fn rank(&self, tol: f64) -> usize {
        self.s.diag().iter().filter(|&&sv| sv > tol).count()
    }

    /// Compute the condition number (ratio of largest to smallest singular value).
    ///
    /// Infinite when the smallest singular value is zero; zero for an empty matrix.
    pub fn condition_number(&self) -> f64 {
        let s = self.s.diag();
        match (s.first(), s.last()) {
            (Some(&max_s), Some(&min_s)) if min_s > 0.0 => max_s / min_s,
            (Some(_), Some(_)) => f64::INFINITY,
            _ => 0.0,
        }
    }

    /// Consume the result, returning `(U, S, V)`.
    pub fn into_parts(self) -> (Matrix, Matrix, Matrix) {
        (self.u, self.s, self.v)
    }
}

/// Fortran-style `SIGN(a, b)`: `|a|` carrying the sign of `b`.
fn sign(a: f64, b: f64) -> f64 {
    if b >= 0.0 { a.abs() } else { -a.abs() }
}

/// Apply a Givens rotation to columns `p` and `q` of a row-major `rows x cols` buffer.
fn rotate_columns(buf: &mut [f64], rows: usize, cols: usize, p: usize, q: usize, c: f64, s: f64) {
    for r in 0..rows {
        let y = buf[r * cols + p];
        let z = buf[r * cols + q];
        buf[r * cols + p] = y * c + z * s;
        buf[r * cols + q] = z * c - y * s;
    }
}

impl Matrix {
    /// Thin SVD with default parameters. See [`SvdDecomposition`].
    pub fn svd(&self) -> Result<SvdDecomposition> {
        SvdDecomposition::decompose(self)
    }
}

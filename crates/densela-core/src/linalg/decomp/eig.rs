//! Eigendecomposition of real square matrices.
//!
//! Computes eigenvalues `d` and eigenvectors `V` with `A V ≈ V diag(d)`:
//! - `2 x 2` matrices use the closed form of the characteristic polynomial
//! - larger matrices use shifted QR iteration with deflation
//!
//! Only real spectra are supported. When the iteration cannot isolate an
//! eigenvalue (a complex pair, or the iteration cap) the result is a
//! best-effort approximation with [`EigenDecomposition::converged`] set to
//! `false` and a warning is logged.

use crate::Matrix;
use crate::error::Result;
use crate::linalg::decomp::QrDecomposition;
use crate::tol;

/// Tuning knobs for [`EigenDecomposition::decompose_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenParams {
    /// An entry below the diagonal counts as zero once its magnitude is below this.
    pub tol: f64,
    /// Total number of QR steps before giving up.
    pub max_iterations: usize,
}

impl Default for EigenParams {
    fn default() -> Self {
        Self {
            tol: tol::EIGEN,
            max_iterations: 1000,
        }
    }
}

/// Result of an eigendecomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenDecomposition {
    /// Eigenvalues in descending order.
    eigenvalues: Vec<f64>,
    /// Unit eigenvectors as columns; column `i` pairs with `eigenvalues[i]`.
    eigenvectors: Matrix,
    converged: bool,
}

/// Number of perturbed shifts tried when the shifted block is singular.
const SHIFT_RETRIES: i32 = 4;

/// Steps on the same block before an exceptional shift breaks a cycle.
const EXCEPTIONAL_SHIFT_PERIOD: usize = 10;

#[allow(clippy::many_single_char_names)]
impl EigenDecomposition {
    /// Eigendecomposition with default [`EigenParams`].
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// # use densela_core::linalg::decomp::EigenDecomposition;
    /// let a = Matrix::from_rows(&[&[4.0, 1.0], &[2.0, 3.0]]).unwrap();
    /// let eig = EigenDecomposition::decompose(&a).unwrap();
    /// assert!(eig.converged());
    /// assert!((eig.eigenvalues()[0] - 5.0).abs() < 1e-12);
    /// assert!((eig.eigenvalues()[1] - 2.0).abs() < 1e-12);
    /// ```
    pub fn decompose(a: &Matrix) -> Result<Self> {
        Self::decompose_with(a, EigenParams::default())
    }

    /// Eigendecomposition with explicit iteration parameters.
    ///
    /// Fails only when `a` is not square.
    pub fn decompose_with(a: &Matrix, params: EigenParams) -> Result<Self> {
        let n = a.require_square("eigendecomposition requires a square matrix")?;
        let result = match n {
            0 => Self {
                eigenvalues: Vec::new(),
                eigenvectors: Matrix::zeros(0, 0),
                converged: true,
            },
            1 => Self {
                eigenvalues: vec![a.at(0, 0)],
                eigenvectors: Matrix::identity(1),
                converged: true,
            },
            2 => two_by_two(a),
            _ => shifted_qr(a, params),
        };
        Ok(result)
    }

    /// Eigenvalues, largest first.
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Eigenvectors as unit-length columns, in the order of [`Self::eigenvalues`].
    pub fn eigenvectors(&self) -> &Matrix {
        &self.eigenvectors
    }

    /// `false` when the result is only an approximation.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Consume the result, returning `(eigenvalues, eigenvectors, converged)`.
    pub fn into_parts(self) -> (Vec<f64>, Matrix, bool) {
        (self.eigenvalues, self.eigenvectors, self.converged)
    }
}

// ======================================================================
// 2 x 2 closed form
// ======================================================================

#[allow(clippy::many_single_char_names)]
fn two_by_two(m: &Matrix) -> EigenDecomposition {
    let (a, b, c, d) = (m.at(0, 0), m.at(0, 1), m.at(1, 0), m.at(1, 1));
    let half_tr = 0.5 * (a + d);
    let half_diff = 0.5 * (a - d);
    let disc = half_diff * half_diff + b * c;

    if disc < 0.0 {
        log::warn!(
            target: "densela",
            "2x2 eigenvalues are complex ({half_tr} ± {}i); returning the real part",
            (-disc).sqrt()
        );
        return EigenDecomposition {
            eigenvalues: vec![half_tr, half_tr],
            eigenvectors: Matrix::identity(2),
            converged: false,
        };
    }

    let s = disc.sqrt();
    let lambdas = [half_tr + s, half_tr - s];
    let mut vectors = Matrix::zeros(2, 2);
    for (k, &lambda) in lambdas.iter().enumerate() {
        // both candidates lie in the null space of A - λI; keep the longer one
        let from_row0 = [b, lambda - a];
        let from_row1 = [lambda - d, c];
        let [x, y] = if from_row0[0].hypot(from_row0[1]) >= from_row1[0].hypot(from_row1[1]) {
            from_row0
        } else {
            from_row1
        };
        let norm = x.hypot(y);
        let (x, y) = if norm > f64::MIN_POSITIVE {
            // largest component positive
            let sign = if x.abs() >= y.abs() { x.signum() } else { y.signum() };
            (sign * x / norm, sign * y / norm)
        } else {
            // A = λI: any basis works
            if k == 0 { (1.0, 0.0) } else { (0.0, 1.0) }
        };
        *vectors.at_mut(0, k) = x;
        *vectors.at_mut(1, k) = y;
    }

    EigenDecomposition {
        eigenvalues: lambdas.to_vec(),
        eigenvectors: vectors,
        converged: true,
    }
}

// ======================================================================
// Shifted QR iteration
// ======================================================================

fn shifted_qr(a: &Matrix, params: EigenParams) -> EigenDecomposition {
    let n = a.rows();
    let symmetric = a.is_symmetric();
    let mut t = a.clone();
    let mut q_total = Matrix::identity(n);
    let mut hi = n - 1;
    let mut iterations = 0;
    let mut since_deflation = 0;
    let mut converged = true;

    while hi > 0 {
        if row_settled(&t, hi, params.tol) {
            log::trace!(target: "densela", "eigen: deflated row {hi} after {iterations} iterations");
            for j in 0..hi {
                *t.at_mut(hi, j) = 0.0;
            }
            hi -= 1;
            since_deflation = 0;
            continue;
        }
        if iterations >= params.max_iterations {
            log::warn!(
                target: "densela",
                "eigen: no convergence after {iterations} iterations; {} eigenvalues unresolved",
                hi + 1
            );
            converged = false;
            break;
        }
        iterations += 1;
        since_deflation += 1;

        let sigma = if since_deflation % EXCEPTIONAL_SHIFT_PERIOD == 0 {
            t.at(hi, hi) + 0.75 * below_diagonal_norm(&t, hi)
        } else {
            trailing_shift(&t, hi)
        };
        if !qr_step(&mut t, &mut q_total, hi, sigma).unwrap_or(false) {
            log::warn!(target: "densela", "eigen: shifted QR failed at every perturbed shift");
            converged = false;
            break;
        }
    }

    if converged {
        log::debug!(target: "densela", "eigen: converged after {iterations} iterations");
    }

    let values = t.diag();
    let vectors = if symmetric {
        q_total
    } else {
        let mut v = q_total.multiply(&triangular_eigenvectors(&t)).unwrap_or(q_total);
        normalize_columns(&mut v);
        v
    };
    sort_descending(&values, &vectors, converged)
}

/// Whether every entry of row `hi` left of the diagonal is below `tol`.
fn row_settled(t: &Matrix, hi: usize, tol: f64) -> bool {
    (0..hi).all(|j| t.at(hi, j).abs() < tol)
}

fn below_diagonal_norm(t: &Matrix, hi: usize) -> f64 {
    (0..hi).map(|j| t.at(hi, j).abs()).sum()
}

/// Eigenvalue of the trailing 2x2 of the active block closest to its
/// bottom-right entry, or that entry itself if the pair is complex.
#[allow(clippy::many_single_char_names)]
fn trailing_shift(t: &Matrix, hi: usize) -> f64 {
    let (a, b) = (t.at(hi - 1, hi - 1), t.at(hi - 1, hi));
    let (c, d) = (t.at(hi, hi - 1), t.at(hi, hi));
    let half_tr = 0.5 * (a + d);
    let half_diff = 0.5 * (a - d);
    let disc = half_diff * half_diff + b * c;
    if disc < 0.0 {
        return d;
    }
    let s = disc.sqrt();
    let (l1, l2) = (half_tr + s, half_tr - s);
    if (l1 - d).abs() <= (l2 - d).abs() { l1 } else { l2 }
}

/// One step `B - σI = QR`, `B <- RQ + σI` on the leading `(hi + 1)` block.
///
/// The coupling block to the right is updated by `Q^T` and the accumulated
/// orthogonal factor by `Q`. Returns `Ok(false)` if no shift near `sigma`
/// gives a factorizable block.
fn qr_step(t: &mut Matrix, q_total: &mut Matrix, hi: usize, sigma: f64) -> Result<bool> {
    let n = t.rows();
    let k = hi + 1;
    let block = t.sub_matrix(0, 0, k, k)?;

    let base = 1e-6 * (1.0 + sigma.abs());
    let mut factored = None;
    for attempt in 0..=SHIFT_RETRIES {
        let shift = if attempt == 0 {
            sigma
        } else {
            sigma + base * 10f64.powi(attempt - 1)
        };
        let shifted = block.subtract(&Matrix::identity(k).scalar_multiply(shift))?;
        match QrDecomposition::decompose(&shifted) {
            Ok(qr) => {
                factored = Some((qr, shift));
                break;
            }
            Err(err) => {
                log::debug!(target: "densela", "eigen: QR with shift {shift} failed ({err}); perturbing");
            }
        }
    }
    let Some((qr, shift)) = factored else {
        return Ok(false);
    };
    let (q, r) = qr.into_parts();

    let updated = r.multiply(&q)?.add(&Matrix::identity(k).scalar_multiply(shift))?;
    t.set_sub_matrix(0, 0, &updated)?;
    if k < n {
        let a12 = q.transpose().multiply(&t.sub_matrix(0, k, k, n - k)?)?;
        t.set_sub_matrix(0, k, &a12)?;
    }
    let accumulated = q_total.sub_matrix(0, 0, n, k)?.multiply(&q)?;
    q_total.set_sub_matrix(0, 0, &accumulated)?;
    Ok(true)
}

/// Eigenvectors of the upper-triangular part of `t` by back-substitution.
///
/// Column `k` solves `(T - t_kk I) y = 0` with `y_k = 1`. Denominators that
/// vanish (repeated eigenvalues) are replaced by a tiny multiple of `||T||`.
fn triangular_eigenvectors(t: &Matrix) -> Matrix {
    let n = t.rows();
    let scale = t.iter().fold(0.0_f64, |m, &x| m.max(x.abs()));
    let small = f64::EPSILON * scale.max(f64::MIN_POSITIVE);

    let mut y = Matrix::zeros(n, n);
    for k in 0..n {
        *y.at_mut(k, k) = 1.0;
        let lambda = t.at(k, k);
        for i in (0..k).rev() {
            let s: f64 = ((i + 1)..=k).map(|j| t.at(i, j) * y.at(j, k)).sum();
            let mut denom = t.at(i, i) - lambda;
            if denom.abs() < small {
                denom = small.copysign(denom);
            }
            *y.at_mut(i, k) = -s / denom;
        }
    }
    y
}

fn normalize_columns(v: &mut Matrix) {
    let (m, n) = v.shape();
    for j in 0..n {
        let norm = (0..m).map(|i| v.at(i, j).powi(2)).sum::<f64>().sqrt();
        if norm > f64::MIN_POSITIVE {
            for i in 0..m {
                *v.at_mut(i, j) /= norm;
            }
        }
    }
}

fn sort_descending(values: &[f64], vectors: &Matrix, converged: bool) -> EigenDecomposition {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| values[j].total_cmp(&values[i]));

    let eigenvalues = order.iter().map(|&i| values[i]).collect();
    let eigenvectors = Matrix::from_fn(n, n, |r, c| vectors.at(r, order[c]));
    EigenDecomposition {
        eigenvalues,
        eigenvectors,
        converged,
    }
}

impl Matrix {
    /// Eigendecomposition with default parameters. See [`EigenDecomposition`].
    pub fn eigen(&self) -> Result<EigenDecomposition> {
        EigenDecomposition::decompose(self)
    }
}

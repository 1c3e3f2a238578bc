//! Iterative linear solvers and single-eigenpair methods.
//!
//! | Routine | Requirement on `A` |
//! |---------|--------------------|
//! | [`IterativeMethod::Jacobi`] | non-zero diagonal, converges for diagonally dominant `A` |
//! | [`IterativeMethod::GaussSeidel`] | non-zero diagonal, converges for diagonally dominant or SPD `A` |
//! | [`IterativeMethod::ConjugateGradient`] | symmetric positive definite |
//! | [`power_method`] | a strictly dominant eigenvalue |
//! | [`inverse_power_method`] | a unique eigenvalue nearest the shift |
//!
//! Every routine stops through [`IterativeParams::max_iterations`].

use crate::Matrix;
use crate::error::{MatrixError, Result};
use crate::linalg::decomp::LuDecomposition;
use crate::tol;

/// Tuning knobs shared by the iterative routines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterativeParams {
    /// Relative stopping tolerance.
    pub tol: f64,
    /// Iteration cap before reporting `ConvergenceFailure`.
    pub max_iterations: usize,
}

impl Default for IterativeParams {
    fn default() -> Self {
        Self {
            tol: 1e-10,
            max_iterations: 10_000,
        }
    }
}

/// Iteration scheme for [`solve_iterative`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IterativeMethod {
    Jacobi,
    GaussSeidel,
    ConjugateGradient,
}

/// Converged solution of `A x = b`.
#[derive(Debug, Clone, PartialEq)]
pub struct IterativeSolution {
    x: Matrix,
    iterations: usize,
    residual: f64,
}

impl IterativeSolution {
    /// The solution as an `n x 1` column.
    pub fn x(&self) -> &Matrix {
        &self.x
    }

    /// Sweeps performed until convergence.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Final residual norm `‖b - A x‖₂`.
    pub fn residual(&self) -> f64 {
        self.residual
    }

    /// Consume the result, returning `(x, iterations, residual)`.
    pub fn into_parts(self) -> (Matrix, usize, f64) {
        (self.x, self.iterations, self.residual)
    }
}

/// One eigenpair found by [`power_method`] or [`inverse_power_method`].
#[derive(Debug, Clone, PartialEq)]
pub struct Eigenpair {
    eigenvalue: f64,
    /// Unit-length `n x 1` column.
    eigenvector: Matrix,
    iterations: usize,
}

impl Eigenpair {
    /// Rayleigh-quotient estimate of the eigenvalue.
    pub fn eigenvalue(&self) -> f64 {
        self.eigenvalue
    }

    /// Unit-length `n x 1` eigenvector.
    pub fn eigenvector(&self) -> &Matrix {
        &self.eigenvector
    }

    /// Iterations performed until the estimate settled.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Consume the result, returning `(eigenvalue, eigenvector, iterations)`.
    pub fn into_parts(self) -> (f64, Matrix, usize) {
        (self.eigenvalue, self.eigenvector, self.iterations)
    }
}

/// Number of perturbed shifts tried when `A - σI` is singular.
const SHIFT_RETRIES: i32 = 4;

// ======================================================================
// Linear solvers
// ======================================================================

/// Solve `A x = b` iteratively, starting from `x = 0`.
///
/// Stops once `‖b - A x‖₂ ≤ tol · max(‖b‖₂, 1)`; fails with
/// [`MatrixError::ConvergenceFailure`] when the cap is reached first.
///
/// ```
/// # use densela_core::Matrix;
/// # use densela_core::linalg::iterative::{solve_iterative, IterativeMethod, IterativeParams};
/// let a = Matrix::from_rows(&[&[4.0, 1.0], &[1.0, 3.0]]).unwrap();
/// let b = Matrix::from_vec(2, 1, vec![1.0, 2.0]).unwrap();
/// let sol = solve_iterative(&a, &b, IterativeMethod::ConjugateGradient, IterativeParams::default())
///     .unwrap();
/// assert!(a.matvec(sol.x()).unwrap().approx_eq(&b, 1e-9));
/// ```
pub fn solve_iterative(
    a: &Matrix,
    b: &Matrix,
    method: IterativeMethod,
    params: IterativeParams,
) -> Result<IterativeSolution> {
    let n = a.require_square("iterative solve requires a square matrix")?;
    if b.shape() != (n, 1) {
        return Err(MatrixError::DimensionMismatch {
            expected: (n, 1),
            got: b.shape(),
        });
    }

    let rhs = b.as_slice();
    let threshold = params.tol * norm2(rhs).max(1.0);
    let (x, iterations) = match method {
        IterativeMethod::Jacobi => stationary(a, rhs, threshold, params, false)?,
        IterativeMethod::GaussSeidel => stationary(a, rhs, threshold, params, true)?,
        IterativeMethod::ConjugateGradient => conjugate_gradient(a, rhs, threshold, params)?,
    };

    let residual = residual_norm(a, &x, rhs);
    log::debug!(
        target: "densela",
        "{method:?}: converged after {iterations} iterations, residual {residual:e}"
    );
    Ok(IterativeSolution {
        x: Matrix::from_vec(n, 1, x)?,
        iterations,
        residual,
    })
}

/// Jacobi (`in_place == false`) or Gauss-Seidel (`in_place == true`) sweeps.
#[allow(clippy::needless_range_loop)]
fn stationary(
    a: &Matrix,
    b: &[f64],
    threshold: f64,
    params: IterativeParams,
    in_place: bool,
) -> Result<(Vec<f64>, usize)> {
    let n = b.len();
    if (0..n).any(|i| a.at(i, i).abs() <= tol::PIVOT) {
        return Err(MatrixError::SingularMatrix);
    }

    let mut x = vec![0.0; n];
    if residual_norm(a, &x, b) <= threshold {
        return Ok((x, 0));
    }

    let mut next = vec![0.0; n];
    for iteration in 1..=params.max_iterations {
        for i in 0..n {
            let mut sum = b[i];
            for j in 0..n {
                if j != i {
                    let xj = if in_place { next[j] } else { x[j] };
                    sum -= a.at(i, j) * xj;
                }
            }
            next[i] = sum / a.at(i, i);
            if in_place {
                x[i] = next[i];
            }
        }
        if !in_place {
            std::mem::swap(&mut x, &mut next);
        }
        if residual_norm(a, &x, b) <= threshold {
            return Ok((x, iteration));
        }
    }

    Err(MatrixError::ConvergenceFailure {
        iterations: params.max_iterations,
    })
}

#[allow(clippy::needless_range_loop)]
fn conjugate_gradient(
    a: &Matrix,
    b: &[f64],
    threshold: f64,
    params: IterativeParams,
) -> Result<(Vec<f64>, usize)> {
    if !a.is_symmetric() {
        return Err(MatrixError::NotPositiveDefinite);
    }

    let n = b.len();
    let mut x = vec![0.0; n];
    let mut r = b.to_vec();
    let mut p = r.clone();
    let mut rs_old = dot(&r, &r);
    if rs_old.sqrt() <= threshold {
        return Ok((x, 0));
    }

    for iteration in 1..=params.max_iterations {
        let ap = apply(a, &p);
        let curvature = dot(&p, &ap);
        if curvature <= 0.0 {
            return Err(MatrixError::NotPositiveDefinite);
        }

        let alpha = rs_old / curvature;
        for i in 0..n {
            x[i] += alpha * p[i];
            r[i] -= alpha * ap[i];
        }

        let rs_new = dot(&r, &r);
        if rs_new.sqrt() <= threshold {
            return Ok((x, iteration));
        }
        let beta = rs_new / rs_old;
        for i in 0..n {
            p[i] = r[i] + beta * p[i];
        }
        rs_old = rs_new;
    }

    Err(MatrixError::ConvergenceFailure {
        iterations: params.max_iterations,
    })
}

// ======================================================================
// Eigenpair iterations
// ======================================================================

/// Dominant eigenpair by normalized power iteration.
///
/// The eigenvalue estimate is the Rayleigh quotient `vᵗ A v`. Iteration
/// stops when successive estimates differ by at most `tol · max(1, |λ|)`
/// and `‖A v - λ v‖₂ ≤ √tol · max(1, |λ|)`.
///
/// ```
/// # use densela_core::Matrix;
/// # use densela_core::linalg::iterative::{power_method, IterativeParams};
/// let a = Matrix::diagonal(&[1.0, 5.0, 2.0]);
/// let pair = power_method(&a, IterativeParams::default()).unwrap();
/// assert!((pair.eigenvalue() - 5.0).abs() < 1e-9);
/// ```
pub fn power_method(a: &Matrix, params: IterativeParams) -> Result<Eigenpair> {
    let n = a.require_square("power method requires a square matrix")?;
    if n == 0 {
        return Err(MatrixError::InvalidDomain {
            reason: "power method requires a non-empty matrix",
        });
    }

    let mut v = start_vector(n);
    let mut previous = f64::NAN;
    for iteration in 1..=params.max_iterations {
        let w = apply(a, &v);
        let lambda = dot(&v, &w);
        let w_norm = norm2(&w);
        if w_norm == 0.0 {
            // v lies in the null space
            return finish("power method", 0.0, v, iteration);
        }

        if is_settled(a, &v, lambda, previous, params.tol) {
            return finish("power method", lambda, v, iteration);
        }
        previous = lambda;
        v = w.iter().map(|wi| wi / w_norm).collect();
    }

    Err(MatrixError::ConvergenceFailure {
        iterations: params.max_iterations,
    })
}

/// Eigenpair with eigenvalue nearest `shift`, by inverse iteration on
/// `A - shift·I`.
///
/// When `A - shift·I` is singular (the shift is an eigenvalue) the shift is
/// nudged by a small relative amount and a warning is logged.
pub fn inverse_power_method(a: &Matrix, shift: f64, params: IterativeParams) -> Result<Eigenpair> {
    let n = a.require_square("inverse power method requires a square matrix")?;
    if n == 0 {
        return Err(MatrixError::InvalidDomain {
            reason: "inverse power method requires a non-empty matrix",
        });
    }

    let lu = shifted_lu(a, shift)?;
    let mut v = start_vector(n);
    let mut previous = f64::NAN;
    for iteration in 1..=params.max_iterations {
        let lambda = dot(&v, &apply(a, &v));
        if is_settled(a, &v, lambda, previous, params.tol) {
            return finish("inverse power method", lambda, v, iteration);
        }
        previous = lambda;

        let mut y: Vec<f64> = lu.permutation().iter().map(|&pi| v[pi]).collect();
        lu.substitute(&mut y);
        let y_norm = norm2(&y);
        if !y_norm.is_finite() || y_norm == 0.0 {
            return Err(MatrixError::SingularMatrix);
        }
        v = y.iter().map(|yi| yi / y_norm).collect();
    }

    Err(MatrixError::ConvergenceFailure {
        iterations: params.max_iterations,
    })
}

/// LU of `A - shift·I`, perturbing the shift while the factorization is singular.
fn shifted_lu(a: &Matrix, shift: f64) -> Result<LuDecomposition> {
    let mut sigma = shift;
    let mut attempt = 0;
    loop {
        let shifted = a.subtract(&Matrix::identity(a.rows()).scalar_multiply(sigma))?;
        match LuDecomposition::decompose(&shifted) {
            Err(MatrixError::SingularMatrix) if attempt < SHIFT_RETRIES => {
                attempt += 1;
                sigma = shift + 1e-8 * (1.0 + shift.abs()) * 10f64.powi(attempt - 1);
                log::warn!(
                    target: "densela",
                    "inverse power method: A - {shift}I is singular; retrying with shift {sigma}"
                );
            }
            other => return other,
        }
    }
}

/// Unit vector with distinct entries, so it is not orthogonal to the
/// eigenvectors of common symmetric test matrices.
fn start_vector(n: usize) -> Vec<f64> {
    let v: Vec<f64> = (0..n).map(|i| 1.0 + i as f64 / n as f64).collect();
    let norm = norm2(&v);
    v.into_iter().map(|vi| vi / norm).collect()
}

fn is_settled(a: &Matrix, v: &[f64], lambda: f64, previous: f64, tol: f64) -> bool {
    let scale = lambda.abs().max(1.0);
    if previous.is_nan() || (lambda - previous).abs() > tol * scale {
        return false;
    }
    let av = apply(a, v);
    let residual: Vec<f64> = av.iter().zip(v).map(|(avi, vi)| avi - lambda * vi).collect();
    norm2(&residual) <= tol.sqrt() * scale
}

fn finish(name: &str, eigenvalue: f64, v: Vec<f64>, iterations: usize) -> Result<Eigenpair> {
    log::debug!(target: "densela", "{name}: eigenvalue {eigenvalue} after {iterations} iterations");
    let n = v.len();
    Ok(Eigenpair {
        eigenvalue,
        eigenvector: Matrix::from_vec(n, 1, v)?,
        iterations,
    })
}

// ----------------------------------------------------------------------
// Slice helpers
// ----------------------------------------------------------------------

fn apply(a: &Matrix, x: &[f64]) -> Vec<f64> {
    a.row_iter()
        .map(|row| row.iter().zip(x).map(|(aij, xj)| aij * xj).sum())
        .collect()
}

fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

fn norm2(x: &[f64]) -> f64 {
    dot(x, x).sqrt()
}

fn residual_norm(a: &Matrix, x: &[f64], b: &[f64]) -> f64 {
    let ax = apply(a, x);
    ax.iter()
        .zip(b)
        .map(|(axi, bi)| (bi - axi) * (bi - axi))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    fn column(values: &[f64]) -> Matrix {
        Matrix::from_vec(values.len(), 1, values.to_vec()).unwrap()
    }

    fn dominant() -> Matrix {
        m(&[&[4.0, 1.0, 0.0], &[1.0, 4.0, 1.0], &[0.0, 1.0, 4.0]])
    }

    /// Tridiagonal [-1, 2, -1] with eigenvalues 2 - √2, 2, 2 + √2.
    fn laplacian() -> Matrix {
        m(&[&[2.0, -1.0, 0.0], &[-1.0, 2.0, -1.0], &[0.0, -1.0, 2.0]])
    }

    #[test]
    fn test_all_methods_agree_with_lu() {
        let a = dominant();
        let b = column(&[1.0, 2.0, 3.0]);
        let exact = a.solve(&b).unwrap();
        for method in [
            IterativeMethod::Jacobi,
            IterativeMethod::GaussSeidel,
            IterativeMethod::ConjugateGradient,
        ] {
            let sol = solve_iterative(&a, &b, method, IterativeParams::default()).unwrap();
            assert!(sol.x().approx_eq(&exact, 1e-9), "{method:?}");
            assert!(sol.residual() <= 1e-9, "{method:?}");
            assert!(sol.iterations() > 0);
        }
    }

    #[test]
    fn test_gauss_seidel_faster_than_jacobi() {
        let a = dominant();
        let b = column(&[1.0, 0.0, -1.0]);
        let params = IterativeParams::default();
        let jacobi = solve_iterative(&a, &b, IterativeMethod::Jacobi, params).unwrap();
        let gs = solve_iterative(&a, &b, IterativeMethod::GaussSeidel, params).unwrap();
        assert!(gs.iterations() < jacobi.iterations());
    }

    #[test]
    fn test_conjugate_gradient_exact_in_n_steps() {
        let a = laplacian();
        let b = column(&[1.0, 0.0, 1.0]);
        let sol = solve_iterative(&a, &b, IterativeMethod::ConjugateGradient, IterativeParams::default())
            .unwrap();
        assert!(sol.iterations() <= 3);
        assert!(sol.x().approx_eq(&column(&[1.0, 1.0, 1.0]), 1e-10));
    }

    #[test]
    fn test_zero_rhs_needs_no_iterations() {
        let sol = solve_iterative(
            &dominant(),
            &Matrix::zeros(3, 1),
            IterativeMethod::Jacobi,
            IterativeParams::default(),
        )
        .unwrap();
        assert_eq!(sol.iterations(), 0);
        assert_eq!(sol.x(), &Matrix::zeros(3, 1));
    }

    #[test]
    fn test_zero_diagonal_is_singular() {
        let a = m(&[&[0.0, 1.0], &[1.0, 0.0]]);
        let b = column(&[1.0, 1.0]);
        for method in [IterativeMethod::Jacobi, IterativeMethod::GaussSeidel] {
            assert_eq!(
                solve_iterative(&a, &b, method, IterativeParams::default()).unwrap_err(),
                MatrixError::SingularMatrix
            );
        }
    }

    #[test]
    fn test_conjugate_gradient_rejects_bad_input() {
        let b = column(&[1.0, 1.0]);
        let nonsymmetric = m(&[&[2.0, 1.0], &[0.0, 2.0]]);
        let indefinite = m(&[&[1.0, 0.0], &[0.0, -1.0]]);
        for a in [nonsymmetric, indefinite] {
            assert_eq!(
                solve_iterative(&a, &b, IterativeMethod::ConjugateGradient, IterativeParams::default())
                    .unwrap_err(),
                MatrixError::NotPositiveDefinite
            );
        }
    }

    #[test]
    fn test_jacobi_divergence_hits_cap() {
        // spectral radius of the Jacobi iteration matrix is 2
        let a = m(&[&[1.0, 2.0], &[2.0, 1.0]]);
        let params = IterativeParams {
            max_iterations: 50,
            ..IterativeParams::default()
        };
        let err = solve_iterative(&a, &column(&[1.0, 1.0]), IterativeMethod::Jacobi, params).unwrap_err();
        assert_eq!(err, MatrixError::ConvergenceFailure { iterations: 50 });
    }

    #[test]
    fn test_solve_iterative_shapes() {
        let params = IterativeParams::default();
        assert!(matches!(
            solve_iterative(&Matrix::zeros(2, 3), &column(&[1.0, 1.0]), IterativeMethod::Jacobi, params),
            Err(MatrixError::InvalidDomain { .. })
        ));
        assert_eq!(
            solve_iterative(&dominant(), &column(&[1.0, 1.0]), IterativeMethod::Jacobi, params)
                .unwrap_err(),
            MatrixError::DimensionMismatch {
                expected: (3, 1),
                got: (2, 1)
            }
        );
    }

    #[test]
    fn test_power_method_dominant() {
        let pair = power_method(&laplacian(), IterativeParams::default()).unwrap();
        assert_approx_eq!(pair.eigenvalue(), 2.0 + 2.0_f64.sqrt(), 1e-9);

        let v = pair.eigenvector();
        let av = laplacian().matvec(v).unwrap();
        assert!(av.approx_eq(&v.scalar_multiply(pair.eigenvalue()), 1e-4));
        assert_approx_eq!(v.norm_frobenius(), 1.0, 1e-12);
    }

    #[test]
    fn test_power_method_negative_dominant() {
        let a = Matrix::diagonal(&[-3.0, 1.0]);
        let pair = power_method(&a, IterativeParams::default()).unwrap();
        assert_approx_eq!(pair.eigenvalue(), -3.0, 1e-9);
    }

    #[test]
    fn test_power_method_zero_matrix() {
        let pair = power_method(&Matrix::zeros(2, 2), IterativeParams::default()).unwrap();
        assert_eq!(pair.eigenvalue(), 0.0);
        assert_eq!(pair.iterations(), 1);
    }

    #[test]
    fn test_power_method_no_dominant_eigenvalue() {
        // eigenvalues ±2: the iterate alternates forever
        let params = IterativeParams {
            max_iterations: 100,
            ..IterativeParams::default()
        };
        assert_eq!(
            power_method(&Matrix::diagonal(&[2.0, -2.0]), params).unwrap_err(),
            MatrixError::ConvergenceFailure { iterations: 100 }
        );
    }

    #[test]
    fn test_inverse_power_method_nearest() {
        let pair = inverse_power_method(&laplacian(), 0.5, IterativeParams::default()).unwrap();
        assert_approx_eq!(pair.eigenvalue(), 2.0 - 2.0_f64.sqrt(), 1e-9);
    }

    #[test]
    fn test_inverse_power_method_exact_shift() {
        // 2 is an eigenvalue, so A - 2I is singular and the shift is perturbed
        let pair = inverse_power_method(&laplacian(), 2.0, IterativeParams::default()).unwrap();
        assert_approx_eq!(pair.eigenvalue(), 2.0, 1e-9);
    }

    #[test]
    fn test_power_methods_reject_bad_shapes() {
        let params = IterativeParams::default();
        assert!(power_method(&Matrix::zeros(2, 3), params).is_err());
        assert!(power_method(&Matrix::zeros(0, 0), params).is_err());
        assert!(inverse_power_method(&Matrix::zeros(0, 0), 0.0, params).is_err());
    }
}

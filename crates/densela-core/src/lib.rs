//! `densela-core`: dense `f64` matrices and the linear algebra on them.
//!
//! Provides the [`Matrix`] type, the LU / QR / Cholesky / eigen / SVD
//! decompositions, derived operations (inverse, pseudo-inverse, matrix
//! exponential and powers), iterative solvers, vector operations and basic
//! statistics.
//!
//! # Design
//!
//! - **No BLAS/LAPACK**: every algorithm is implemented from scratch.
//! - **Owned values**: every operation returns a fresh matrix or
//!   decomposition and leaves its operands untouched.
//! - **Typed failures**: fallible operations return [`Result`] with a
//!   [`MatrixError`]; nothing panics on bad input except the `std::ops`
//!   operators and `Index`.
//! - **Diagnostics** go through the [`log`] facade under the `densela`
//!   target; the crate never installs a logger.
//!
//! ```
//! use densela_core::Matrix;
//!
//! let a = Matrix::from_rows(&[&[4.0, 1.0], &[2.0, 3.0]]).unwrap();
//! let eig = a.eigen().unwrap();
//! assert!((eig.eigenvalues()[0] - 5.0).abs() < 1e-12);
//! assert_eq!(a.determinant().unwrap(), 10.0);
//! ```

pub mod error;
pub mod linalg;
pub mod matrix;
pub mod stats;
pub mod tol;
pub mod vector;

// Re-export key types at crate root for convenience.
pub use error::{MatrixError, Result};
pub use linalg::Norm;
pub use matrix::Matrix;
pub use stats::Axis;

/// Items intended for glob-import: `use densela_core::prelude::*;`
pub mod prelude {
    pub use crate::error::{MatrixError, Result};
    pub use crate::linalg::{
        CholeskyDecomposition, EigenDecomposition, EigenParams, Eigenpair, IterativeMethod,
        IterativeParams, LuDecomposition, Norm, QrDecomposition, SvdDecomposition, SvdParams,
    };
    pub use crate::matrix::Matrix;
    pub use crate::stats::Axis;
}

//! Numerical tolerances shared by the algorithms.
//!
//! Per-call overrides live in the parameter structs of the iterative
//! algorithms ([`EigenParams`](crate::linalg::decomp::EigenParams),
//! [`SvdParams`](crate::linalg::decomp::SvdParams),
//! [`IterativeParams`](crate::linalg::iterative::IterativeParams)).

/// LU pivots at or below this magnitude mark the matrix singular.
pub const PIVOT: f64 = 1e-12;

/// Gram-Schmidt residual norm at or below which a column is dependent.
pub const RANK: f64 = 1e-12;

/// `|det|` below this rejects inversion.
pub const SINGULAR: f64 = 1e-12;

/// Element-wise tolerance for structural predicates.
pub const STRUCTURE: f64 = 1e-10;

/// Off-diagonal magnitude at which QR iteration counts as converged.
pub const EIGEN: f64 = 1e-8;

/// Singular values below `PINV_RELATIVE * max(s)` are treated as zero.
pub const PINV_RELATIVE: f64 = 1e-12;

/// Smallest Euclidean norm a vector may have and still be normalized.
pub const NORMALIZE: f64 = 1e-12;

/// Tile edge for the blocked matrix product.
pub const BLOCK_SIZE: usize = 4;

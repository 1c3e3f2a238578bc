//! Matrix decompositions.
//!
//! | Decomposition | Module        | Factorization           |
//! |---------------|---------------|-------------------------|
//! | LU            | [`lu`]        | `PA = LU`               |
//! | QR            | [`qr`]        | `A = QR` (thin)         |
//! | Cholesky      | [`cholesky`]  | `A = L L^T`             |
//! | SVD           | [`svd`]       | `A = U S V^T` (thin)    |
//! | Eigen         | [`eig`]       | `A V = V diag(d)`       |
//!
//! Every decomposition is also reachable as a method on [`Matrix`]
//! (`a.lu()`, `a.qr()`, `a.cholesky()`, `a.svd()`, `a.eigen()`).
//!
//! [`Matrix`]: crate::Matrix

pub mod cholesky;
pub mod eig;
pub mod lu;
pub mod qr;
pub mod svd;

pub use cholesky::CholeskyDecomposition;
pub use eig::{EigenDecomposition, EigenParams};
pub use lu::LuDecomposition;
pub use qr::{QrDecomposition, lstsq};
pub use svd::{SvdDecomposition, SvdParams};

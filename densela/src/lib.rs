//! # densela
//!
//! Dense linear algebra in pure Rust.
//!
//! One `use densela::prelude::*;` gives you the [`Matrix`](crate::core::Matrix)
//! type, its decompositions (LU, QR, Cholesky, eigen, SVD), the parameter
//! structs of the iterative algorithms, and the error type.
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | The engine crate, re-exported as `densela::core` |
//! | `rand` *(default)* | `Matrix::random*` constructors backed by `rand`; implies `core` |
//!
//! ```
//! use densela::prelude::*;
//!
//! let a = Matrix::from_rows(&[&[4.0, 0.0], &[0.0, 9.0]]).unwrap();
//! let chol = a.cholesky().unwrap();
//! assert_eq!(chol.l().as_slice(), &[2.0, 0.0, 0.0, 3.0]);
//! ```

#[cfg(feature = "core")]
pub use densela_core as core;

/// Glob-import convenience: `use densela::prelude::*;`
#[cfg(feature = "core")]
pub mod prelude {
    pub use densela_core::prelude::*;
}

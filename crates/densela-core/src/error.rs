use thiserror::Error;

/// All errors returned by `densela-core`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Operand shapes are incompatible for the operation.
    #[error("dimension mismatch: expected {}x{}, got {}x{}", expected.0, expected.1, got.0, got.1)]
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// Flat data length does not match the requested shape.
    #[error("data length mismatch: expected {expected} elements, got {got}")]
    InvalidData { expected: usize, got: usize },

    /// An element or sub-matrix window lies outside the matrix.
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Matrix is singular (or numerically so) and cannot be inverted / factored.
    #[error("singular matrix")]
    SingularMatrix,

    /// Columns are linearly dependent.
    #[error("rank deficient: column {column} is linearly dependent on the previous columns")]
    RankDeficient { column: usize },

    /// Matrix is not symmetric positive-definite.
    #[error("matrix is not positive definite")]
    NotPositiveDefinite,

    /// An iterative algorithm hit its iteration cap.
    #[error("failed to converge after {iterations} iterations")]
    ConvergenceFailure { iterations: usize },

    /// An axis argument is not one of `-1`, `0`, `1`.
    #[error("invalid axis {axis}: expected -1 (all), 0 (columns) or 1 (rows)")]
    InvalidAxis { axis: i32 },

    /// The input is outside the domain of the operation.
    #[error("invalid domain: {reason}")]
    InvalidDomain { reason: &'static str },

    /// A vector argument is zero or has the wrong shape.
    #[error("degenerate vector: {reason}")]
    DegenerateVector { reason: &'static str },
}

/// Convenience alias used throughout `densela-core`.
pub type Result<T> = std::result::Result<T, MatrixError>;

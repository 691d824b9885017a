//! Error kinds reported by matrix operations.

use exacta_rings::RingError;
use thiserror::Error;

/// Symbolic kind of a matrix error.
///
/// Callers match on the kind; the message text is for humans only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// Dimensions do not fit the operation.
    #[error("bad matrix size")]
    BadMatrixSize,
    /// Row index out of range.
    #[error("row index out of range")]
    BadRowIndex,
    /// Column index out of range.
    #[error("column index out of range")]
    BadColIndex,
    /// Operands belong to different rings.
    #[error("mixed rings")]
    MixedRings,
    /// The matrix must be square.
    #[error("matrix is not square")]
    NotSquareMatrix,
    /// The ring must be a field.
    #[error("ring is not a field")]
    NotField,
    /// The ring must be an integral domain.
    #[error("ring is not an integral domain")]
    NotIntegralDomain,
    /// The ring must be an ordered domain.
    #[error("ring is not an ordered domain")]
    NotOrdDom,
    /// The matrix must have full rank.
    #[error("matrix does not have full rank")]
    NotFullRank,
    /// The matrix does not define a term ordering.
    #[error("matrix is not a term ordering")]
    NotTermOrdering,
    /// The matrix (or view) is read-only.
    #[error("matrix entries are constant")]
    ConstMatEntry,
    /// This particular position cannot be written.
    #[error("entry cannot be set")]
    BadMatrixSetEntry,
    /// The matrix is not invertible.
    #[error("matrix is not invertible")]
    NotInvMatrix,
    /// Division by zero or by a zero divisor.
    #[error("division by zero")]
    DivByZero,
    /// Division that does not come out exact.
    #[error("inexact quotient")]
    BadQuot,
    /// A value has no image in the target ring.
    #[error("value not representable in ring")]
    BadConvert,
    /// Meaningful for this ring but not implemented.
    #[error("not yet implemented")]
    Nyi,
}

/// An error kind together with the operation that raised it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{context}: {kind}")]
pub struct MatrixError {
    kind: ErrorKind,
    context: &'static str,
}

impl MatrixError {
    /// Creates an error of `kind` raised by the operation `context`.
    #[must_use]
    pub const fn new(kind: ErrorKind, context: &'static str) -> Self {
        Self { kind, context }
    }

    /// The symbolic kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Name of the operation that failed.
    #[must_use]
    pub const fn context(&self) -> &'static str {
        self.context
    }
}

/// Result type for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Shorthand for `Err(MatrixError::new(kind, context))`.
pub(crate) fn fail<T>(kind: ErrorKind, context: &'static str) -> Result<T> {
    Err(MatrixError::new(kind, context))
}

/// Maps a ring error onto the matrix error taxonomy, tagged with the
/// operation name. Use as `.map_err(ring_err("det"))`.
pub(crate) fn ring_err(context: &'static str) -> impl Fn(RingError) -> MatrixError {
    move |err| {
        let kind = match err {
            RingError::MixedRings(..) => ErrorKind::MixedRings,
            RingError::DivByZero => ErrorKind::DivByZero,
            RingError::InexactDivision => ErrorKind::BadQuot,
            RingError::NotOrdered(_) => ErrorKind::NotOrdDom,
            RingError::NotIntegralDomain(_) => ErrorKind::NotIntegralDomain,
            RingError::NotInRing { .. } | RingError::BadModulus(_) => ErrorKind::BadConvert,
        };
        MatrixError::new(kind, context)
    }
}

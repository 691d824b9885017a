//! # Exacta
//!
//! Exact linear algebra over commutative rings.
//!
//! Matrices carry their ring at runtime: the integers, the rationals, or
//! the integers modulo `n`. Every result is exact; nothing is rounded.
//!
//! ## Features
//!
//! - **Big Numbers**: Arbitrary precision integers and rationals
//! - **Runtime Rings**: `ZZ`, `QQ` and `ZZ/(n)` with capability queries
//! - **Matrix Views**: Transposes, submatrices and block matrices that
//!   share storage with their source
//! - **Elimination Engine**: Determinant, rank, inverse, adjoint, linear
//!   solving and kernels
//!
//! ## Quick Start
//!
//! ```rust
//! use exacta::prelude::*;
//!
//! let m = new_dense_mat_from_rows(Ring::QQ, &[[2, 1], [7, 4]]).unwrap();
//! assert_eq!(det(&m), Ok(RingElem::from_i64(Ring::QQ, 1)));
//!
//! let rhs = new_dense_mat_from_rows(Ring::QQ, &[[1], [1]]).unwrap();
//! let x = lin_solve(&m, &rhs).unwrap();
//! assert_eq!(mul(&m, &x).unwrap(), rhs);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use exacta_integers as integers;
pub use exacta_matrix as matrix;
pub use exacta_rings as rings;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use exacta_integers::{Integer, Rational};
    pub use exacta_matrix::{
        adjoint, det, identity_mat, inverse, lin_ker, lin_solve, mul, new_dense_mat,
        new_dense_mat_from_rows, rank, submat, transpose, zero_mat, ErrorKind, Matrix,
        MatrixError, MatrixView,
    };
    pub use exacta_rings::{Ring, RingElem, ToRingElem};
}

//! # exacta-matrix
//!
//! Exact linear algebra over the rings of `exacta-rings`.
//!
//! This crate provides:
//! - The [`MatrixView`] contract and the shared [`Matrix`] handle
//! - Dense matrices and lightweight views (zero, identity, diagonal,
//!   transpose, submatrix, block concatenation)
//! - Matrix arithmetic, powers and norms
//! - Determinant, rank, inverse, adjoint and pseudo-inverse
//! - Linear solving, kernels and in-place Gauss-Jordan reduction
//!
//! ## Algorithm Selection
//!
//! The determinant picks its algorithm from the ring:
//! - Sizes 0 to 3: closed forms
//! - Fields: Gaussian elimination
//! - Other integral domains: fraction-free Bareiss, with a dedicated path
//!   for the integers
//! - Rings with zero divisors: refused; [`det_by_laplace`] still works
//!
//! Views share storage with their source, so writing through a view
//! writes through to the matrix it came from.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algebra;
pub mod config;
pub mod dense;
pub mod det;
pub mod error;
pub mod inverse;
pub mod rank;
pub mod solve;
pub mod view;
pub mod views;

pub use algebra::{
    add, div_scalar, frobenius_norm2, mul, mul_into, mul_scalar, neg, operator_norm1,
    operator_norm_infinity, power, scalar_mul, sub,
};
pub use config::{DetConfig, DetStrategy};
pub use dense::{new_dense_mat, new_dense_mat_copy, new_dense_mat_from_rows, DenseMat};
pub use det::{det, det_by_bareiss, det_by_gauss, det_by_laplace, det_with_config};
pub use error::{ErrorKind, MatrixError, Result};
pub use inverse::{
    adjoint, adjoint_by_det_of_minors, adjoint_by_inverse, inverse, inverse_by_gauss,
    pseudo_inverse,
};
pub use rank::{rank, rank_and_indep_rows, rank_by_gauss};
pub use solve::{
    lin_ker, lin_ker_by_gauss, lin_solve, lin_solve_by_gauss, lin_solve_by_hnf,
    lin_solve_by_module_repr, rank_and_gauss,
};
pub use view::{mat_eq, Matrix, MatrixView};
pub use views::{
    block_mat_2x2, col_mat, concat_anti_diag, concat_diag, concat_hor, concat_ver, diag_mat,
    identity_mat, row_mat, shared_vec, submat, transpose, zero_mat, SharedVec,
};

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;

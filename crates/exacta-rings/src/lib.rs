//! # exacta-rings
//!
//! Coefficient rings for exact linear algebra.
//!
//! This crate provides:
//! - `Ring`: a runtime ring tag (ZZ, QQ, ZZ/(n)) answering capability
//!   queries such as `is_field` and `is_integral_domain`
//! - `RingElem`: a scalar that always knows which ring it belongs to
//! - Fraction-field lifting: ZZ embeds in QQ and values come back down
//!   through their numerator and denominator
//!
//! ## Capabilities
//!
//! ```text
//! ring      field  integral domain  PID  ordered
//! ZZ          -           x          x      x
//! QQ          x           x          x      x
//! ZZ/(p)      x           x          x      -
//! ZZ/(n)      -           -          -      -     (n composite)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod elem;
pub mod error;
pub mod ring;

pub use elem::{RingElem, ToRingElem};
pub use error::RingError;
pub use ring::{Modulus, Ring};

#[cfg(test)]
mod proptests;

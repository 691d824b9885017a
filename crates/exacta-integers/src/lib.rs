//! # exacta-integers
//!
//! Exact scalar arithmetic underneath the exacta matrix kernel.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`) with exact division
//! - Arbitrary precision rationals (`Rational`)
//! - Residues modulo a runtime modulus (`Residue`)
//!
//! Nothing here knows about matrices; the ring layer in `exacta-rings`
//! tags these values with the ring they belong to.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod modular;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use modular::{is_prime, Residue};
pub use rational::Rational;

//! Errors raised by ring-level operations.

use thiserror::Error;

use crate::Ring;

/// Errors that can occur when combining or converting ring elements.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RingError {
    /// The operands belong to different rings.
    #[error("mixed rings: {0} and {1}")]
    MixedRings(Ring, Ring),

    /// Division by zero or by a zero divisor.
    #[error("division by zero or by a zero divisor")]
    DivByZero,

    /// The divisor does not divide the dividend exactly.
    #[error("inexact division")]
    InexactDivision,

    /// The ring has no ordering compatible with its arithmetic.
    #[error("{0} is not an ordered domain")]
    NotOrdered(Ring),

    /// The ring has zero divisors, so it has no field of fractions.
    #[error("{0} is not an integral domain")]
    NotIntegralDomain(Ring),

    /// A fraction-field value has no preimage in the ring.
    #[error("{value} does not lie in {ring}")]
    NotInRing {
        /// Printed form of the offending value.
        value: String,
        /// The ring it was being pushed into.
        ring: Ring,
    },

    /// A residue ring was requested with modulus 0 or 1.
    #[error("bad modulus {0}: must be at least 2")]
    BadModulus(u64),
}

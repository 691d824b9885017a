//! Runtime ring tags and their capability queries.
//!
//! Algorithms over matrices pick their method by asking the coefficient
//! ring what it supports; the answers live here.

use std::fmt;

use exacta_integers::{is_prime, Rational};

use crate::{RingElem, RingError};

/// Modulus of a residue ring. Always at least 2.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Modulus(pub(crate) u64);

impl Modulus {
    /// Returns the modulus as an integer.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A commutative coefficient ring.
///
/// Two rings are the same ring exactly when they compare equal, so
/// `ZZ/(7)` built twice is one ring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Ring {
    /// The integers ZZ.
    Integers,
    /// The rationals QQ.
    Rationals,
    /// The residue ring ZZ/(n).
    Zmod(Modulus),
}

impl Ring {
    /// The integers.
    pub const ZZ: Ring = Ring::Integers;

    /// The rationals.
    pub const QQ: Ring = Ring::Rationals;

    /// Creates the residue ring ZZ/(n).
    ///
    /// # Errors
    ///
    /// Returns `BadModulus` if `n < 2`.
    pub fn zmod(n: u64) -> Result<Self, RingError> {
        if n < 2 {
            return Err(RingError::BadModulus(n));
        }
        Ok(Ring::Zmod(Modulus(n)))
    }

    /// True if every nonzero element is invertible.
    #[must_use]
    pub fn is_field(self) -> bool {
        match self {
            Ring::Integers => false,
            Ring::Rationals => true,
            Ring::Zmod(m) => is_prime(m.0),
        }
    }

    /// True if the ring has no zero divisors.
    #[must_use]
    pub fn is_integral_domain(self) -> bool {
        match self {
            Ring::Integers | Ring::Rationals => true,
            Ring::Zmod(m) => is_prime(m.0),
        }
    }

    /// True if multiplication commutes. Every ring offered here does.
    #[must_use]
    pub fn is_commutative(self) -> bool {
        true
    }

    /// True if the ring is an ordered domain (absolute values make sense).
    #[must_use]
    pub fn is_ordered_domain(self) -> bool {
        matches!(self, Ring::Integers | Ring::Rationals)
    }

    /// True if the ring is a principal ideal domain.
    #[must_use]
    pub fn is_pid(self) -> bool {
        self == Ring::Integers || self.is_field()
    }

    /// True for the integers.
    #[must_use]
    pub fn is_zz(self) -> bool {
        self == Ring::Integers
    }

    /// The additive identity of this ring.
    #[must_use]
    pub fn zero(self) -> RingElem {
        RingElem::zero(self)
    }

    /// The multiplicative identity of this ring.
    #[must_use]
    pub fn one(self) -> RingElem {
        RingElem::one(self)
    }

    /// The field of fractions: QQ for ZZ, the ring itself for a field.
    ///
    /// # Errors
    ///
    /// Returns `NotIntegralDomain` when the ring has zero divisors.
    pub fn fraction_field(self) -> Result<Ring, RingError> {
        match self {
            Ring::Integers => Ok(Ring::Rationals),
            r if r.is_field() => Ok(r),
            r => Err(RingError::NotIntegralDomain(r)),
        }
    }

    /// Canonical embedding of `x` into the fraction field.
    ///
    /// # Errors
    ///
    /// Returns `MixedRings` if `x` is not in this ring and
    /// `NotIntegralDomain` if there is no fraction field.
    pub fn to_fraction_field(self, x: &RingElem) -> Result<RingElem, RingError> {
        if x.ring() != self {
            return Err(RingError::MixedRings(self, x.ring()));
        }
        self.fraction_field()?;
        Ok(match x {
            RingElem::Int(n) => RingElem::Rat(Rational::from_integer(n.clone())),
            other => other.clone(),
        })
    }

    /// Pushes a fraction-field value back into this ring.
    ///
    /// The value is written as numerator over denominator and the
    /// quotient must be exact.
    ///
    /// # Errors
    ///
    /// Returns `NotInRing` when the denominator does not divide the
    /// numerator, `MixedRings` if `x` is not in the fraction field.
    pub fn from_fraction_field(self, x: &RingElem) -> Result<RingElem, RingError> {
        let frac = self.fraction_field()?;
        if x.ring() != frac {
            return Err(RingError::MixedRings(frac, x.ring()));
        }
        match (self, x) {
            (Ring::Integers, RingElem::Rat(q)) => q
                .numerator()
                .div_exact(&q.denominator())
                .map(RingElem::Int)
                .ok_or_else(|| RingError::NotInRing {
                    value: q.to_string(),
                    ring: self,
                }),
            _ => Ok(x.clone()),
        }
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ring::Integers => write!(f, "ZZ"),
            Ring::Rationals => write!(f, "QQ"),
            Ring::Zmod(m) => write!(f, "ZZ/({})", m.0),
        }
    }
}

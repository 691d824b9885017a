//! Ring elements.
//!
//! A `RingElem` is one of the concrete number types tagged by the ring it
//! lives in. The arithmetic operators panic when handed elements of two
//! different rings; callers that cannot rule this out compare
//! [`RingElem::ring`] first.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use exacta_integers::{Integer, Rational, Residue};
use num_traits::{One, Zero};

use crate::{Modulus, Ring, RingError};

/// An element of a [`Ring`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum RingElem {
    /// An element of ZZ.
    Int(Integer),
    /// An element of QQ.
    Rat(Rational),
    /// An element of ZZ/(n).
    Mod(Residue),
}

impl RingElem {
    /// The zero of `ring`.
    #[must_use]
    pub fn zero(ring: Ring) -> Self {
        Self::from_i64(ring, 0)
    }

    /// The one of `ring`.
    #[must_use]
    pub fn one(ring: Ring) -> Self {
        Self::from_i64(ring, 1)
    }

    /// The image of a machine integer in `ring`.
    #[must_use]
    pub fn from_i64(ring: Ring, n: i64) -> Self {
        match ring {
            Ring::Integers => RingElem::Int(Integer::new(n)),
            Ring::Rationals => RingElem::Rat(Rational::from(n)),
            Ring::Zmod(m) => RingElem::Mod(Residue::from_signed(n, m.get())),
        }
    }

    /// The image of a big integer in `ring`.
    #[must_use]
    pub fn from_integer(ring: Ring, n: &Integer) -> Self {
        match ring {
            Ring::Integers => RingElem::Int(n.clone()),
            Ring::Rationals => RingElem::Rat(Rational::from_integer(n.clone())),
            Ring::Zmod(m) => RingElem::Mod(Residue::from_integer(n, m.get())),
        }
    }

    /// The image of a rational in `ring`, computed as numerator divided by
    /// denominator.
    ///
    /// # Errors
    ///
    /// `InexactDivision` when the ring is ZZ and `q` is not an integer,
    /// `DivByZero` when the denominator is a zero divisor in ZZ/(n).
    pub fn from_rational(ring: Ring, q: &Rational) -> Result<Self, RingError> {
        match ring {
            Ring::Rationals => Ok(RingElem::Rat(q.clone())),
            _ => {
                let num = Self::from_integer(ring, &q.numerator());
                let den = Self::from_integer(ring, &q.denominator());
                num.checked_div(&den)
            }
        }
    }

    /// The ring this element belongs to.
    #[must_use]
    pub fn ring(&self) -> Ring {
        match self {
            RingElem::Int(_) => Ring::Integers,
            RingElem::Rat(_) => Ring::Rationals,
            RingElem::Mod(r) => Ring::Zmod(Modulus(r.modulus())),
        }
    }

    /// Returns true for the additive identity.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            RingElem::Int(n) => n.is_zero(),
            RingElem::Rat(q) => q.is_zero(),
            RingElem::Mod(r) => r.is_zero(),
        }
    }

    /// Returns true for the multiplicative identity.
    #[must_use]
    pub fn is_one(&self) -> bool {
        match self {
            RingElem::Int(n) => n.is_one(),
            RingElem::Rat(q) => q.is_one(),
            RingElem::Mod(r) => r.is_one(),
        }
    }

    /// Returns true if the element has a multiplicative inverse.
    #[must_use]
    pub fn is_invertible(&self) -> bool {
        match self {
            RingElem::Int(n) => n.abs().is_one(),
            RingElem::Rat(q) => !q.is_zero(),
            RingElem::Mod(r) => r.inv().is_some(),
        }
    }

    /// Returns true if the element is zero or a zero divisor.
    ///
    /// In ZZ/(n) every non-unit is a zero divisor.
    #[must_use]
    pub fn is_zero_divisor(&self) -> bool {
        match self {
            RingElem::Int(_) | RingElem::Rat(_) => self.is_zero(),
            RingElem::Mod(r) => r.inv().is_none(),
        }
    }

    /// Multiplicative inverse.
    ///
    /// # Errors
    ///
    /// Returns `DivByZero` if the element is not a unit.
    pub fn inverse(&self) -> Result<Self, RingError> {
        Self::one(self.ring()).checked_div(self)
    }

    /// Exact quotient `self / rhs`.
    ///
    /// # Errors
    ///
    /// `MixedRings` for operands of different rings, `DivByZero` for a
    /// zero (or zero-divisor) divisor, `InexactDivision` in ZZ when the
    /// quotient is not an integer.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, RingError> {
        match (self, rhs) {
            (RingElem::Int(a), RingElem::Int(b)) => {
                if b.is_zero() {
                    return Err(RingError::DivByZero);
                }
                a.div_exact(b)
                    .map(RingElem::Int)
                    .ok_or(RingError::InexactDivision)
            }
            (RingElem::Rat(a), RingElem::Rat(b)) => {
                if b.is_zero() {
                    return Err(RingError::DivByZero);
                }
                Ok(RingElem::Rat(a / b))
            }
            (RingElem::Mod(a), RingElem::Mod(b)) if a.modulus() == b.modulus() => b
                .inv()
                .map(|inv| RingElem::Mod(*a * inv))
                .ok_or(RingError::DivByZero),
            _ => Err(RingError::MixedRings(self.ring(), rhs.ring())),
        }
    }

    /// Absolute value in an ordered domain.
    ///
    /// # Errors
    ///
    /// Returns `NotOrdered` for residue rings.
    pub fn abs(&self) -> Result<Self, RingError> {
        match self {
            RingElem::Int(n) => Ok(RingElem::Int(n.abs())),
            RingElem::Rat(q) => Ok(RingElem::Rat(q.abs())),
            RingElem::Mod(_) => Err(RingError::NotOrdered(self.ring())),
        }
    }

    /// Compares two elements of the same ordered domain.
    ///
    /// # Errors
    ///
    /// `MixedRings` for different rings, `NotOrdered` for residue rings.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, RingError> {
        match (self, other) {
            (RingElem::Int(a), RingElem::Int(b)) => Ok(a.cmp(b)),
            (RingElem::Rat(a), RingElem::Rat(b)) => Ok(a.cmp(b)),
            _ if self.ring() != other.ring() => {
                Err(RingError::MixedRings(self.ring(), other.ring()))
            }
            _ => Err(RingError::NotOrdered(self.ring())),
        }
    }

    /// Computes self^exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        match self {
            RingElem::Int(n) => RingElem::Int(n.pow(exp)),
            RingElem::Rat(q) => {
                let num = q.numerator().pow(exp);
                let den = q.denominator().pow(exp);
                RingElem::Rat(Rational::new(num, den))
            }
            RingElem::Mod(r) => RingElem::Mod(r.pow(u64::from(exp))),
        }
    }

    /// The underlying integer, for elements of ZZ.
    #[must_use]
    pub fn as_integer(&self) -> Option<&Integer> {
        match self {
            RingElem::Int(n) => Some(n),
            _ => None,
        }
    }

    /// The underlying rational, for elements of QQ.
    #[must_use]
    pub fn as_rational(&self) -> Option<&Rational> {
        match self {
            RingElem::Rat(q) => Some(q),
            _ => None,
        }
    }
}

impl fmt::Display for RingElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingElem::Int(n) => write!(f, "{n}"),
            RingElem::Rat(q) => write!(f, "{q}"),
            RingElem::Mod(r) => write!(f, "{r}"),
        }
    }
}

impl fmt::Debug for RingElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self, self.ring())
    }
}

/// Forwards a ring operation to the concrete number types.
///
/// # Panics
///
/// The generated operators panic on operands from different rings.
macro_rules! elem_binop {
    ($tr:ident, $method:ident) => {
        impl $tr<&RingElem> for &RingElem {
            type Output = RingElem;

            fn $method(self, rhs: &RingElem) -> RingElem {
                match (self, rhs) {
                    (RingElem::Int(a), RingElem::Int(b)) => RingElem::Int(a.$method(b)),
                    (RingElem::Rat(a), RingElem::Rat(b)) => RingElem::Rat(a.$method(b)),
                    (RingElem::Mod(a), RingElem::Mod(b)) if a.modulus() == b.modulus() => {
                        RingElem::Mod((*a).$method(*b))
                    }
                    _ => panic!("mixed rings: {} and {}", self.ring(), rhs.ring()),
                }
            }
        }

        impl $tr<&RingElem> for RingElem {
            type Output = RingElem;

            fn $method(self, rhs: &RingElem) -> RingElem {
                (&self).$method(rhs)
            }
        }

        impl $tr for RingElem {
            type Output = RingElem;

            fn $method(self, rhs: RingElem) -> RingElem {
                (&self).$method(&rhs)
            }
        }
    };
}

elem_binop!(Add, add);
elem_binop!(Sub, sub);
elem_binop!(Mul, mul);

impl Neg for &RingElem {
    type Output = RingElem;

    fn neg(self) -> RingElem {
        match self {
            RingElem::Int(n) => RingElem::Int(-n),
            RingElem::Rat(q) => RingElem::Rat(-q),
            RingElem::Mod(r) => RingElem::Mod(-*r),
        }
    }
}

impl Neg for RingElem {
    type Output = RingElem;

    fn neg(self) -> RingElem {
        -&self
    }
}

/// Values that can be converted into an element of a given ring.
///
/// Used by matrix constructors and scalar operations so machine integers,
/// big integers, rationals and ring elements are accepted alike.
pub trait ToRingElem {
    /// Converts `self` into an element of `ring`.
    ///
    /// # Errors
    ///
    /// Returns the ring error describing why the value has no image in
    /// `ring`.
    fn to_ring_elem(&self, ring: Ring) -> Result<RingElem, RingError>;
}

impl ToRingElem for i64 {
    fn to_ring_elem(&self, ring: Ring) -> Result<RingElem, RingError> {
        Ok(RingElem::from_i64(ring, *self))
    }
}

impl ToRingElem for i32 {
    fn to_ring_elem(&self, ring: Ring) -> Result<RingElem, RingError> {
        Ok(RingElem::from_i64(ring, i64::from(*self)))
    }
}

impl ToRingElem for Integer {
    fn to_ring_elem(&self, ring: Ring) -> Result<RingElem, RingError> {
        Ok(RingElem::from_integer(ring, self))
    }
}

impl ToRingElem for Rational {
    fn to_ring_elem(&self, ring: Ring) -> Result<RingElem, RingError> {
        RingElem::from_rational(ring, self)
    }
}

impl ToRingElem for RingElem {
    fn to_ring_elem(&self, ring: Ring) -> Result<RingElem, RingError> {
        if self.ring() == ring {
            Ok(self.clone())
        } else {
            Err(RingError::MixedRings(ring, self.ring()))
        }
    }
}

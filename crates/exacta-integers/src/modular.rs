//! Residue classes modulo a runtime modulus.
//!
//! The modulus is an arbitrary `u64 >= 2`; products go through `u128` so
//! no modulus overflows. Whether `Z/nZ` is a field is decided by
//! [`is_prime`].

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::Integer;

/// An element of `Z/nZ` with the modulus carried alongside the value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Residue {
    value: u64,
    modulus: u64,
}

#[inline]
fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(m)) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1 % m;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Deterministic primality test for 64-bit integers.
///
/// Miller-Rabin with the first twelve primes as witnesses, which is exact
/// for every `n < 3.3 * 10^24`.
#[must_use]
pub fn is_prime(n: u64) -> bool {
    const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

    if n < 2 {
        return false;
    }
    for p in WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'witness: for a in WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

impl Residue {
    /// Creates the class of `value` modulo `modulus`.
    ///
    /// # Panics
    ///
    /// Panics if `modulus` is zero.
    #[must_use]
    pub fn new(value: u64, modulus: u64) -> Self {
        assert!(modulus != 0, "modulus cannot be zero");
        Self {
            value: value % modulus,
            modulus,
        }
    }

    /// Creates the class of a signed value.
    ///
    /// # Panics
    ///
    /// Panics if `modulus` is zero.
    #[must_use]
    pub fn from_signed(value: i64, modulus: u64) -> Self {
        let r = Self::new(value.unsigned_abs(), modulus);
        if value < 0 {
            -r
        } else {
            r
        }
    }

    /// Creates the class of an arbitrary precision integer.
    ///
    /// # Panics
    ///
    /// Panics if `modulus` is zero.
    #[must_use]
    pub fn from_integer(n: &Integer, modulus: u64) -> Self {
        assert!(modulus != 0, "modulus cannot be zero");
        let r = (n.abs() % Integer::from(modulus))
            .to_u64()
            .unwrap_or_default();
        let r = Self::new(r, modulus);
        if n.is_negative() {
            -r
        } else {
            r
        }
    }

    /// Returns the canonical representative in `[0, modulus)`.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.value
    }

    /// Returns the modulus.
    #[must_use]
    pub const fn modulus(self) -> u64 {
        self.modulus
    }

    /// Returns true for the zero class.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.value == 0
    }

    /// Returns true for the class of one.
    #[must_use]
    pub const fn is_one(self) -> bool {
        self.value == 1 % self.modulus
    }

    /// Multiplicative inverse, if `gcd(value, modulus) == 1`.
    #[must_use]
    pub fn inv(self) -> Option<Self> {
        let m = i128::from(self.modulus);
        let (mut t, mut new_t) = (0i128, 1i128);
        let (mut r, mut new_r) = (m, i128::from(self.value));

        while new_r != 0 {
            let q = r / new_r;
            (t, new_t) = (new_t, t - q * new_t);
            (r, new_r) = (new_r, r - q * new_r);
        }

        if r != 1 {
            return None;
        }
        let t = t.rem_euclid(m);
        Some(Self::new(u64::try_from(t).ok()?, self.modulus))
    }

    /// Computes self^exp by repeated squaring.
    #[must_use]
    pub fn pow(self, exp: u64) -> Self {
        Self {
            value: pow_mod(self.value, exp, self.modulus),
            modulus: self.modulus,
        }
    }

    fn check_modulus(self, rhs: Self) {
        assert_eq!(self.modulus, rhs.modulus, "modulus mismatch");
    }
}

impl fmt::Debug for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {})", self.value, self.modulus)
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Add for Residue {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.check_modulus(rhs);
        let sum = (u128::from(self.value) + u128::from(rhs.value)) % u128::from(self.modulus);
        Self {
            value: sum as u64,
            modulus: self.modulus,
        }
    }
}

impl Sub for Residue {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl Mul for Residue {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.check_modulus(rhs);
        Self {
            value: mul_mod(self.value, rhs.value, self.modulus),
            modulus: self.modulus,
        }
    }
}

impl Neg for Residue {
    type Output = Self;

    fn neg(self) -> Self::Output {
        if self.value == 0 {
            self
        } else {
            Self {
                value: self.modulus - self.value,
                modulus: self.modulus,
            }
        }
    }
}

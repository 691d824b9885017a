//! Property-based tests for the exact scalar types.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{is_prime, Integer, Rational, Residue};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    proptest! {
        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn exact_division_inverts_multiplication(a in small_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let product = &a * &b;
            prop_assert!(product.is_divisible_by(&b));
            prop_assert_eq!(product.div_exact(&b), Some(a));
        }

        #[test]
        fn div_exact_rejects_remainders(a in small_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let divisible = (a.clone() % b.clone()).is_zero();
            prop_assert_eq!(a.div_exact(&b).is_some(), divisible);
        }

        #[test]
        fn rational_multiplicative_inverse(num in non_zero_int(), den in non_zero_int()) {
            let a = Rational::from_i64(num, den);
            let inv = a.checked_recip().unwrap();
            prop_assert!((a * inv).is_one());
        }

        #[test]
        fn rational_lowest_terms(num in small_int(), den in non_zero_int()) {
            let a = Rational::from_i64(num, den);
            prop_assert!(a.denominator().signum() > 0);
            prop_assert!(a.numerator().gcd(&a.denominator()).is_one() || a.is_zero());
        }

        #[test]
        fn residue_inverse_iff_coprime(a in 0u64..500u64, m in 2u64..500u64) {
            let r = Residue::new(a, m);
            let coprime = Integer::from(a).gcd(&Integer::from(m)).is_one();
            match r.inv() {
                Some(inv) => {
                    prop_assert!(coprime);
                    prop_assert!((r * inv).is_one());
                }
                None => prop_assert!(!coprime),
            }
        }

        #[test]
        fn residue_matches_integer_arithmetic(a in small_int(), b in small_int(), m in 2u64..1000u64) {
            let lhs = Residue::from_signed(a, m) * Residue::from_signed(b, m)
                - Residue::from_signed(b, m);
            let rhs = Residue::from_integer(&(Integer::new(a * b) - Integer::new(b)), m);
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn fermat_little_theorem(a in 1u64..1000u64, p in prop::sample::select(vec![7u64, 101, 998_244_353])) {
            prop_assume!(is_prime(p) && a % p != 0);
            prop_assert!(Residue::new(a, p).pow(p - 1).is_one());
        }
    }
}

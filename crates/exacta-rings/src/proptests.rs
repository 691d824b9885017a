//! Property-based tests for ring elements.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{Ring, RingElem};

    fn ring() -> impl Strategy<Value = Ring> {
        prop_oneof![
            Just(Ring::ZZ),
            Just(Ring::QQ),
            (2u64..60u64).prop_map(|n| Ring::zmod(n).unwrap()),
        ]
    }

    proptest! {
        #[test]
        fn elem_ring_axioms(r in ring(), a in -50i64..50, b in -50i64..50, c in -50i64..50) {
            let a = RingElem::from_i64(r, a);
            let b = RingElem::from_i64(r, b);
            let c = RingElem::from_i64(r, c);
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
            prop_assert_eq!(&a * &b, &b * &a);
            prop_assert!((&a - &a).is_zero());
            prop_assert!((&a + &(-&a)).is_zero());
        }

        #[test]
        fn checked_div_undoes_mul(r in ring(), a in -50i64..50, b in -50i64..50) {
            let a = RingElem::from_i64(r, a);
            let b = RingElem::from_i64(r, b);
            prop_assume!(b.is_invertible());
            let q = (&a * &b).checked_div(&b).unwrap();
            prop_assert_eq!(q, a);
        }

        #[test]
        fn inverse_iff_invertible(r in ring(), a in -50i64..50) {
            let a = RingElem::from_i64(r, a);
            match a.inverse() {
                Ok(inv) => prop_assert!((&a * &inv).is_one()),
                Err(_) => prop_assert!(!a.is_invertible()),
            }
        }

        #[test]
        fn fraction_field_round_trip(a in -1000i64..1000) {
            let x = RingElem::from_i64(Ring::ZZ, a);
            let lifted = Ring::ZZ.to_fraction_field(&x).unwrap();
            prop_assert_eq!(Ring::ZZ.from_fraction_field(&lifted).unwrap(), x);
        }
    }
}

//! Property-based tests for the matrix engine.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use exacta_rings::{Ring, RingElem};

    use crate::{
        adjoint, det, det_by_bareiss, det_by_gauss, det_by_laplace, identity_mat, inverse,
        lin_ker, lin_solve, mul, new_dense_mat_from_rows, power, rank, scalar_mul, transpose,
        zero_mat, Matrix,
    };

    fn square() -> impl Strategy<Value = Vec<Vec<i64>>> {
        (1usize..=4).prop_flat_map(|n| prop::collection::vec(prop::collection::vec(-5i64..5, n), n))
    }

    fn rect() -> impl Strategy<Value = Vec<Vec<i64>>> {
        (1usize..=4, 1usize..=4)
            .prop_flat_map(|(r, c)| prop::collection::vec(prop::collection::vec(-5i64..5, c), r))
    }

    fn build(ring: Ring, rows: &[Vec<i64>]) -> Matrix {
        new_dense_mat_from_rows(ring, rows).unwrap()
    }

    proptest! {
        #[test]
        fn det_algorithms_agree(rows in square()) {
            for ring in [Ring::ZZ, Ring::QQ] {
                let m = build(ring, &rows);
                let expected = det_by_laplace(&m).unwrap();
                prop_assert_eq!(det(&m).unwrap(), expected.clone());
                prop_assert_eq!(det_by_gauss(&m).unwrap(), expected.clone());
                prop_assert_eq!(det_by_bareiss(&m).unwrap(), expected);
            }
        }

        #[test]
        fn det_is_multiplicative(
            (a, b) in (1usize..=4).prop_flat_map(|n| {
                let m = prop::collection::vec(prop::collection::vec(-5i64..5, n), n);
                (m.clone(), m)
            })
        ) {
            let a = build(Ring::ZZ, &a);
            let b = build(Ring::ZZ, &b);
            let ab = mul(&a, &b).unwrap();
            prop_assert_eq!(det(&ab).unwrap(), &det(&a).unwrap() * &det(&b).unwrap());
        }

        #[test]
        fn inverse_round_trip(rows in square()) {
            let m = build(Ring::QQ, &rows);
            let n = m.num_rows();
            if det(&m).unwrap().is_zero() {
                prop_assert!(inverse(&m).is_err());
            } else {
                let inv = inverse(&m).unwrap();
                prop_assert_eq!(mul(&m, &inv).unwrap(), identity_mat(Ring::QQ, n));
                prop_assert_eq!(mul(&inv, &m).unwrap(), identity_mat(Ring::QQ, n));
            }
        }

        #[test]
        fn adjoint_identity(rows in square()) {
            let m = build(Ring::ZZ, &rows);
            let adj = adjoint(&m).unwrap();
            let scaled = scalar_mul(&det(&m).unwrap(), &identity_mat(Ring::ZZ, m.num_rows())).unwrap();
            prop_assert_eq!(mul(&m, &adj).unwrap(), scaled);
        }

        #[test]
        fn rank_is_transpose_invariant(rows in rect()) {
            let m = build(Ring::QQ, &rows);
            let r = rank(&m).unwrap();
            prop_assert_eq!(rank(&transpose(&m)).unwrap(), r);
            prop_assert!(r <= m.num_rows().min(m.num_cols()));
        }

        #[test]
        fn kernel_is_annihilated(rows in rect()) {
            let m = build(Ring::QQ, &rows);
            let ker = lin_ker(&m).unwrap();
            let r = rank(&m).unwrap();
            prop_assert_eq!(ker.num_rows(), m.num_cols());
            prop_assert_eq!(ker.num_cols(), m.num_cols() - r);
            prop_assert_eq!(rank(&ker).unwrap(), ker.num_cols());
            prop_assert_eq!(mul(&m, &ker).unwrap(), zero_mat(Ring::QQ, m.num_rows(), ker.num_cols()));
        }

        #[test]
        fn consistent_systems_are_solved(
            (rows, x0) in (1usize..=4, 1usize..=4).prop_flat_map(|(r, c)| (
                prop::collection::vec(prop::collection::vec(-5i64..5, c), r),
                prop::collection::vec(prop::collection::vec(-5i64..5, 1), c),
            ))
        ) {
            let m = build(Ring::QQ, &rows);
            let rhs = mul(&m, &build(Ring::QQ, &x0)).unwrap();
            let x = lin_solve(&m, &rhs).unwrap();
            prop_assert!(!x.is_no_solution());
            prop_assert_eq!(mul(&m, &x).unwrap(), rhs);
        }

        #[test]
        fn power_is_repeated_product(rows in square(), k in 0i64..5) {
            let m = build(Ring::ZZ, &rows);
            let mut acc = identity_mat(Ring::ZZ, m.num_rows());
            for _ in 0..k {
                acc = mul(&acc, &m).unwrap();
            }
            prop_assert_eq!(power(&m, k).unwrap(), acc);
        }

        #[test]
        fn det_of_scaled_identity(n in 0usize..5, c in -6i64..6) {
            let c = RingElem::from_i64(Ring::ZZ, c);
            let m = scalar_mul(&c, &identity_mat(Ring::ZZ, n)).unwrap();
            let exponent = u32::try_from(n).unwrap();
            prop_assert_eq!(det(&m).unwrap(), c.pow(exponent));
        }
    }
}

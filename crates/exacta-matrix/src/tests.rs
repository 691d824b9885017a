//! Integration tests for exacta-matrix.

#[cfg(test)]
mod integration_tests {
    use crate::{
        add, adjoint, concat_diag, concat_hor, concat_ver, det, det_by_bareiss, det_by_gauss,
        det_by_laplace, det_with_config, identity_mat, inverse, lin_ker, lin_solve, mul,
        new_dense_mat_copy, new_dense_mat_from_rows, power, rank, rank_and_gauss, row_mat,
        scalar_mul, shared_vec, submat, transpose, zero_mat, DetConfig, DetStrategy, ErrorKind,
        Matrix, MatrixView,
    };
    use exacta_integers::Rational;
    use exacta_rings::{Ring, RingElem};

    fn qq(n: i64) -> RingElem {
        RingElem::from_i64(Ring::QQ, n)
    }

    fn frac(n: i64, d: i64) -> RingElem {
        RingElem::Rat(Rational::from_i64(n, d))
    }

    fn mat(ring: Ring, rows: &[[i64; 4]]) -> Matrix {
        new_dense_mat_from_rows(ring, rows).unwrap()
    }

    const DEGENERATE: [[i64; 4]; 4] = [[1, 0, 0, 4], [0, 3, 2, 0], [0, 3, 2, 1], [1, 0, 0, 0]];
    const REGULAR: [[i64; 4]; 4] = [[1, 0, 0, 4], [0, 3, 2, 0], [0, 1, -1, 1], [1, 0, 0, 0]];
    const VANDERMONDE: [[i64; 4]; 4] = [[1, 1, 1, -1], [0, 1, 2, 1], [0, 1, 4, -1], [0, 1, 8, 1]];

    #[test]
    fn test_det_and_rank_of_degenerate_matrix() {
        // Columns 1 and 2 are proportional.
        for ring in [Ring::QQ, Ring::ZZ] {
            let m = mat(ring, &DEGENERATE);
            assert_eq!(det(&m), Ok(ring.zero()));
            assert_eq!(det_by_gauss(&m), Ok(ring.zero()));
            assert_eq!(det_by_bareiss(&m), Ok(ring.zero()));
            assert_eq!(rank(&m), Ok(3));
        }
    }

    #[test]
    fn test_det_algorithms_agree() {
        for ring in [Ring::QQ, Ring::ZZ] {
            let m = mat(ring, &REGULAR);
            let expected = RingElem::from_i64(ring, 20);
            assert_eq!(det(&m), Ok(expected.clone()));
            assert_eq!(det_by_gauss(&m), Ok(expected.clone()));
            assert_eq!(det_by_bareiss(&m), Ok(expected.clone()));
            assert_eq!(det_by_laplace(&m), Ok(expected.clone()));
            let slow = DetConfig {
                integer_fast_path: false,
                ..DetConfig::with_strategy(DetStrategy::Bareiss)
            };
            assert_eq!(det_with_config(&m, &slow), Ok(expected));
            assert_eq!(rank(&m), Ok(4));
        }
    }

    #[test]
    fn test_inverse_and_adjoint_of_regular_matrix() {
        let m = mat(Ring::QQ, &REGULAR);
        let inv = inverse(&m).unwrap();
        assert_eq!(inv.entry(1, 0), Ok(frac(-1, 10)));
        assert_eq!(inv.entry(2, 3), Ok(frac(-3, 20)));
        assert_eq!(mul(&m, &inv).unwrap(), identity_mat(Ring::QQ, 4));

        let zz = mat(Ring::ZZ, &REGULAR);
        assert_eq!(inverse(&zz).unwrap_err().kind(), ErrorKind::NotInvMatrix);
        let adj = adjoint(&zz).unwrap();
        assert_eq!(
            adj,
            mat(
                Ring::ZZ,
                &[[0, 0, 0, 20], [-2, 4, 8, 2], [3, 4, -12, -3], [5, 0, 0, -5]]
            )
        );
    }

    #[test]
    fn test_vandermonde_solve() {
        let v = mat(Ring::QQ, &VANDERMONDE);
        assert_eq!(det(&v), Ok(qq(12)));
        let rhs = new_dense_mat_from_rows(Ring::QQ, &[[13], [13], [-13], [-13]]).unwrap();
        let x = lin_solve(&v, &rhs).unwrap();
        assert_eq!(
            x.to_rows(),
            vec![vec![qq(13)], vec![qq(13)], vec![frac(-13, 3)], vec![frac(26, 3)]]
        );
        assert_eq!(mul(&v, &x).unwrap(), rhs);
    }

    #[test]
    fn test_inconsistent_system_has_no_solution() {
        let a = mat(Ring::QQ, &[[1, 2, 3, 4], [2, 4, 6, 8], [0, 1, 1, 1], [1, 0, 2, 5]]);
        assert_eq!(rank(&a), Ok(3));
        let rhs = new_dense_mat_from_rows(Ring::QQ, &[[1], [3], [0], [0]]).unwrap();
        assert!(lin_solve(&a, &rhs).unwrap().is_no_solution());

        // Doubling the first entry makes it consistent again.
        let rhs = new_dense_mat_from_rows(Ring::QQ, &[[1], [2], [0], [0]]).unwrap();
        let x = lin_solve(&a, &rhs).unwrap();
        assert_eq!(mul(&a, &x).unwrap(), rhs);

        let ker = lin_ker(&a).unwrap();
        assert_eq!(ker.num_cols(), 1);
        assert_eq!(mul(&a, &ker).unwrap(), zero_mat(Ring::QQ, 4, 1));
    }

    #[test]
    fn test_views_write_through() {
        let m = new_dense_mat_from_rows(Ring::QQ, &[[1, 2, 3], [4, 5, 6]]).unwrap();
        let t = transpose(&m);
        t.set_entry(2, 0, &qq(9)).unwrap();
        assert_eq!(m.entry(0, 2), Ok(qq(9)));

        let s = submat(&m, &[1], &[0, 2]).unwrap();
        s.row_mul(0, &qq(2)).unwrap();
        assert_eq!(m.to_rows()[1], vec![qq(8), qq(5), qq(12)]);

        // A view of a view still reaches the source.
        let tt = transpose(&t);
        tt.swap_rows(0, 1).unwrap();
        assert_eq!(m.entry(0, 0), Ok(qq(8)));

        let copy = new_dense_mat_copy(&m);
        copy.assign_zero().unwrap();
        assert_eq!(m.entry(0, 0), Ok(qq(8)));
    }

    #[test]
    fn test_block_round_trip() {
        let a = new_dense_mat_from_rows(Ring::ZZ, &[[1, 2], [3, 4]]).unwrap();
        let b = new_dense_mat_from_rows(Ring::ZZ, &[[5], [6]]).unwrap();
        let d = concat_diag(&a, &b).unwrap();
        assert_eq!((d.num_rows(), d.num_cols()), (4, 3));
        assert_eq!(submat(&d, &[0, 1], &[0, 1]).unwrap(), a);
        assert_eq!(submat(&d, &[2, 3], &[2]).unwrap(), b);
        assert!(submat(&d, &[0, 1], &[2]).unwrap().is_zero_col(0).unwrap());
        assert_eq!(det(&concat_diag(&a, &a).unwrap()), Ok(RingElem::from_i64(Ring::ZZ, 4)));

        let h = concat_hor(&a, &b).unwrap();
        assert_eq!(h, new_dense_mat_from_rows(Ring::ZZ, &[[1, 2, 5], [3, 4, 6]]).unwrap());
        let err = concat_ver(&a, &b).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadMatrixSize);
    }

    #[test]
    fn test_power_matches_repeated_product() {
        let fib = new_dense_mat_from_rows(Ring::QQ, &[[1, 1], [1, 0]]).unwrap();
        let mut acc = identity_mat(Ring::QQ, 2);
        for _ in 0..5 {
            acc = mul(&acc, &fib).unwrap();
        }
        assert_eq!(power(&fib, 5).unwrap(), acc);
        assert_eq!(
            power(&fib, 5).unwrap(),
            new_dense_mat_from_rows(Ring::QQ, &[[8, 5], [5, 3]]).unwrap()
        );
        assert_eq!(
            power(&fib, -3).unwrap(),
            new_dense_mat_from_rows(Ring::QQ, &[[-1, 2], [2, -3]]).unwrap()
        );
        assert_eq!(power(&fib, 0).unwrap(), identity_mat(Ring::QQ, 2));
    }

    #[test]
    fn test_gauss_reduces_augmented_view() {
        let a = new_dense_mat_from_rows(Ring::QQ, &[[2, 1], [1, 3]]).unwrap();
        let rhs = new_dense_mat_from_rows(Ring::QQ, &[[3], [5]]).unwrap();
        let aug = new_dense_mat_copy(&concat_hor(&a, &rhs).unwrap());
        assert_eq!(rank_and_gauss(&aug, 2), Ok(2));
        assert_eq!(aug.entry(0, 2), Ok(frac(4, 5)));
        assert_eq!(aug.entry(1, 2), Ok(frac(7, 5)));
    }

    #[test]
    fn test_operators_and_row_vectors() {
        let v = row_mat(&shared_vec(vec![qq(1), qq(2)]).unwrap());
        let w = scalar_mul(&3_i64, &v).unwrap();
        let sum = (&v + &w).unwrap();
        assert_eq!(sum, scalar_mul(&4_i64, &v).unwrap());
        assert_eq!(add(&v, &(-&v)).unwrap(), zero_mat(Ring::QQ, 1, 2));
        let gram = (&v * &transpose(&v)).unwrap();
        assert_eq!(gram.entry(0, 0), Ok(qq(5)));
    }
}

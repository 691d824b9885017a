//! Matrix arithmetic: sums, products, scalars, powers and norms.
//!
//! Results are fresh dense matrices. The `+`, `-` and `*` operators on
//! `&Matrix` return `Result<Matrix>` since shapes and rings are only known
//! at runtime.

use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};

use exacta_rings::{RingElem, ToRingElem};

use crate::dense::Grid;
use crate::error::{fail, ring_err, ErrorKind, Result};
use crate::inverse::inverse;
use crate::view::{require_square, Matrix};

fn same_ring(a: &Matrix, b: &Matrix, context: &'static str) -> Result<()> {
    if a.ring() == b.ring() {
        Ok(())
    } else {
        fail(ErrorKind::MixedRings, context)
    }
}

fn same_shape(a: &Matrix, b: &Matrix, context: &'static str) -> Result<()> {
    if a.num_rows() == b.num_rows() && a.num_cols() == b.num_cols() {
        same_ring(a, b, context)
    } else {
        fail(ErrorKind::BadMatrixSize, context)
    }
}

fn zip_with<F>(a: &Matrix, b: &Matrix, f: F) -> Matrix
where
    F: Fn(RingElem, &RingElem) -> RingElem,
{
    Grid::from_fn(a.ring(), a.num_rows(), a.num_cols(), |i, j| {
        f(a.entry_at(i, j), &b.entry_at(i, j))
    })
    .into_matrix()
}

/// `a + b`.
///
/// # Errors
///
/// `BadMatrixSize` for different shapes, `MixedRings` for different rings.
pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    same_shape(a, b, "add")?;
    Ok(zip_with(a, b, |x, y| x + y))
}

/// `a - b`.
///
/// # Errors
///
/// `BadMatrixSize` for different shapes, `MixedRings` for different rings.
pub fn sub(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    same_shape(a, b, "sub")?;
    Ok(zip_with(a, b, |x, y| x - y))
}

/// Checks `a * b` is defined and computes it as a grid.
fn product(a: &Matrix, b: &Matrix, context: &'static str) -> Result<Grid> {
    if a.num_cols() != b.num_rows() {
        return fail(ErrorKind::BadMatrixSize, context);
    }
    same_ring(a, b, context)?;
    Ok(Grid::from_view(&**a).mm(&Grid::from_view(&**b)))
}

/// `a * b`.
///
/// # Errors
///
/// `BadMatrixSize` unless `a.num_cols() == b.num_rows()`, `MixedRings`
/// for different rings.
pub fn mul(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    product(a, b, "mul").map(Grid::into_matrix)
}

/// Stores `a * b` into the dense matrix `lhs`.
///
/// The product is computed first and swapped in at the end, so `lhs` may
/// be one of the factors and is untouched on failure.
///
/// # Errors
///
/// `ConstMatEntry` if `lhs` is not dense, `BadMatrixSize` if the product
/// is undefined or does not have the shape of `lhs`, `MixedRings` on ring
/// mismatch.
pub fn mul_into(lhs: &Matrix, a: &Matrix, b: &Matrix) -> Result<()> {
    const CONTEXT: &str = "mul_into";
    let Some(dense) = lhs.as_dense() else {
        return fail(ErrorKind::ConstMatEntry, CONTEXT);
    };
    if lhs.num_rows() != a.num_rows() || lhs.num_cols() != b.num_cols() {
        return fail(ErrorKind::BadMatrixSize, CONTEXT);
    }
    same_ring(lhs, a, CONTEXT)?;
    let result = product(a, b, CONTEXT)?;
    dense.replace(result);
    Ok(())
}

/// `-m`.
#[must_use]
pub fn neg(m: &Matrix) -> Matrix {
    Grid::from_fn(m.ring(), m.num_rows(), m.num_cols(), |i, j| -m.entry_at(i, j)).into_matrix()
}

fn scalar<S: ToRingElem + ?Sized>(m: &Matrix, s: &S, context: &'static str) -> Result<RingElem> {
    s.to_ring_elem(m.ring()).map_err(ring_err(context))
}

/// `s * m`, scaling from the left.
///
/// `s` may be a ring element, a big integer, a rational or a machine
/// integer.
///
/// # Errors
///
/// `MixedRings` if `s` is an element of another ring, `BadQuot` or
/// `DivByZero` if `s` has no image in the ring of `m`.
pub fn scalar_mul<S: ToRingElem + ?Sized>(s: &S, m: &Matrix) -> Result<Matrix> {
    let c = scalar(m, s, "scalar_mul")?;
    Ok(Grid::from_fn(m.ring(), m.num_rows(), m.num_cols(), |i, j| &c * &m.entry_at(i, j)).into_matrix())
}

/// `m * s`, scaling from the right.
///
/// # Errors
///
/// As [`scalar_mul`].
pub fn mul_scalar<S: ToRingElem + ?Sized>(m: &Matrix, s: &S) -> Result<Matrix> {
    let c = scalar(m, s, "mul_scalar")?;
    Ok(Grid::from_fn(m.ring(), m.num_rows(), m.num_cols(), |i, j| &m.entry_at(i, j) * &c).into_matrix())
}

/// `m / s`, dividing every entry exactly.
///
/// # Errors
///
/// `DivByZero` if `s` is zero or a zero divisor, `BadQuot` if some entry
/// is not a multiple of `s`, `MixedRings` for a foreign ring element.
pub fn div_scalar<S: ToRingElem + ?Sized>(m: &Matrix, s: &S) -> Result<Matrix> {
    const CONTEXT: &str = "div_scalar";
    let c = scalar(m, s, CONTEXT)?;
    if c.is_zero_divisor() {
        return fail(ErrorKind::DivByZero, CONTEXT);
    }
    let mut out = Grid::zeros(m.ring(), m.num_rows(), m.num_cols());
    for i in 0..m.num_rows() {
        for j in 0..m.num_cols() {
            out[(i, j)] = m.entry_at(i, j).checked_div(&c).map_err(ring_err(CONTEXT))?;
        }
    }
    Ok(out.into_matrix())
}

/// `m^n` for a square matrix; negative powers go through the inverse.
///
/// # Errors
///
/// `NotSquareMatrix`, and for `n < 0` any error of [`inverse`].
pub fn power(m: &Matrix, n: i64) -> Result<Matrix> {
    require_square(&**m, "power")?;
    let base = if n < 0 { inverse(m)? } else { m.clone() };
    let mut base = Grid::from_view(&*base);
    let mut exp = n.unsigned_abs();
    let mut acc = Grid::identity(m.ring(), m.num_rows());
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc.mm(&base);
        }
        exp >>= 1;
        if exp > 0 {
            base = base.mm(&base);
        }
    }
    Ok(acc.into_matrix())
}

/// Sum of the squares of all entries.
#[must_use]
pub fn frobenius_norm2(m: &Matrix) -> RingElem {
    Grid::from_view(&**m)
        .entries()
        .fold(m.ring().zero(), |acc, x| acc + &(x * x))
}

/// Largest row sum of absolute values.
///
/// # Errors
///
/// `NotOrdDom` unless the ring is an ordered domain.
pub fn operator_norm_infinity(m: &Matrix) -> Result<RingElem> {
    const CONTEXT: &str = "operator_norm_infinity";
    let ring = m.ring();
    if !ring.is_ordered_domain() {
        return fail(ErrorKind::NotOrdDom, CONTEXT);
    }
    let mut best = ring.zero();
    for i in 0..m.num_rows() {
        let mut sum = ring.zero();
        for j in 0..m.num_cols() {
            sum = sum + &m.entry_at(i, j).abs().map_err(ring_err(CONTEXT))?;
        }
        if sum.try_cmp(&best).map_err(ring_err(CONTEXT))? == Ordering::Greater {
            best = sum;
        }
    }
    Ok(best)
}

/// Largest column sum of absolute values.
///
/// # Errors
///
/// `NotOrdDom` unless the ring is an ordered domain.
pub fn operator_norm1(m: &Matrix) -> Result<RingElem> {
    operator_norm_infinity(&crate::views::transpose(m))
}

impl Add for &Matrix {
    type Output = Result<Matrix>;

    fn add(self, rhs: Self) -> Result<Matrix> {
        add(self, rhs)
    }
}

impl Sub for &Matrix {
    type Output = Result<Matrix>;

    fn sub(self, rhs: Self) -> Result<Matrix> {
        sub(self, rhs)
    }
}

impl Mul for &Matrix {
    type Output = Result<Matrix>;

    fn mul(self, rhs: Self) -> Result<Matrix> {
        mul(self, rhs)
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        neg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::{new_dense_mat, new_dense_mat_from_rows};
    use crate::views::{identity_mat, transpose};
    use exacta_integers::{Integer, Rational};
    use exacta_rings::Ring;

    fn zz(n: i64) -> RingElem {
        RingElem::from_i64(Ring::ZZ, n)
    }

    fn mat(rows: &[[i64; 2]]) -> Matrix {
        new_dense_mat_from_rows(Ring::ZZ, rows).unwrap()
    }

    #[test]
    fn test_add_sub_mul() {
        let a = mat(&[[1, 2], [3, 4]]);
        let b = mat(&[[0, 1], [1, 0]]);
        assert_eq!((&a + &b).unwrap(), mat(&[[1, 3], [4, 4]]));
        assert_eq!((&a - &b).unwrap(), mat(&[[1, 1], [2, 4]]));
        assert_eq!((&a * &b).unwrap(), mat(&[[2, 1], [4, 3]]));
        assert_eq!(-&a, mat(&[[-1, -2], [-3, -4]]));
    }

    #[test]
    fn test_shape_and_ring_errors() {
        let a = mat(&[[1, 2], [3, 4]]);
        let wide = new_dense_mat(Ring::ZZ, 3, 2);
        assert_eq!((&a + &wide).unwrap_err().kind(), ErrorKind::BadMatrixSize);
        assert_eq!((&a * &wide).unwrap_err().kind(), ErrorKind::BadMatrixSize);
        assert!((&wide * &a).is_ok());
        let q = identity_mat(Ring::QQ, 2);
        assert_eq!((&a * &q).unwrap_err().kind(), ErrorKind::MixedRings);
        assert_eq!(
            (&a - &q).unwrap_err().context(),
            "sub"
        );
    }

    #[test]
    fn test_mul_into_aliasing() {
        let a = mat(&[[1, 1], [0, 1]]);
        mul_into(&a, &a, &a).unwrap();
        assert_eq!(a, mat(&[[1, 2], [0, 1]]));

        let before = a.to_rows();
        let wide = new_dense_mat(Ring::ZZ, 2, 3);
        assert_eq!(
            mul_into(&a, &a, &wide).unwrap_err().kind(),
            ErrorKind::BadMatrixSize
        );
        assert_eq!(a.to_rows(), before);

        let view = transpose(&a);
        assert_eq!(
            mul_into(&view, &a, &a).unwrap_err().kind(),
            ErrorKind::ConstMatEntry
        );
    }

    #[test]
    fn test_scalars() {
        let a = mat(&[[2, 4], [6, 8]]);
        assert_eq!(scalar_mul(&3i64, &a).unwrap(), mat(&[[6, 12], [18, 24]]));
        assert_eq!(
            mul_scalar(&a, &Integer::new(-1)).unwrap(),
            mat(&[[-2, -4], [-6, -8]])
        );
        assert_eq!(div_scalar(&a, &2i64).unwrap(), mat(&[[1, 2], [3, 4]]));
        assert_eq!(
            div_scalar(&a, &4i64).unwrap_err().kind(),
            ErrorKind::BadQuot
        );
        assert_eq!(
            div_scalar(&a, &0i64).unwrap_err().kind(),
            ErrorKind::DivByZero
        );
        assert_eq!(
            scalar_mul(&RingElem::from_i64(Ring::QQ, 2), &a)
                .unwrap_err()
                .kind(),
            ErrorKind::MixedRings
        );

        let q = new_dense_mat_from_rows(Ring::QQ, &[[1, 3]]).unwrap();
        let halved = mul_scalar(&q, &Rational::from_i64(1, 2)).unwrap();
        assert_eq!(halved.entry(0, 1).unwrap().to_string(), "3/2");

        let z6 = Ring::zmod(6).unwrap();
        let m = new_dense_mat_from_rows(z6, &[[2, 4]]).unwrap();
        assert_eq!(
            div_scalar(&m, &2i64).unwrap_err().kind(),
            ErrorKind::DivByZero
        );
    }

    #[test]
    fn test_power() {
        let a = mat(&[[1, 1], [1, 0]]);
        assert_eq!(power(&a, 0).unwrap(), identity_mat(Ring::ZZ, 2));
        assert_eq!(power(&a, 10).unwrap(), mat(&[[89, 55], [55, 34]]));
        // det = -1, so the inverse stays integral.
        assert_eq!(power(&a, -1).unwrap(), mat(&[[0, 1], [1, -1]]));
        assert_eq!(
            power(&new_dense_mat(Ring::ZZ, 2, 3), 2).unwrap_err().kind(),
            ErrorKind::NotSquareMatrix
        );
        let singular = mat(&[[1, 2], [2, 4]]);
        assert_eq!(
            power(&singular, i64::MIN).unwrap_err().kind(),
            ErrorKind::NotInvMatrix
        );
    }

    #[test]
    fn test_norms() {
        let a = mat(&[[1, -2], [-3, 1]]);
        assert_eq!(frobenius_norm2(&a), zz(15));
        assert_eq!(operator_norm_infinity(&a), Ok(zz(4)));
        assert_eq!(operator_norm1(&a), Ok(zz(4)));
        let b = mat(&[[1, -5], [0, 0]]);
        assert_eq!(operator_norm_infinity(&b), Ok(zz(6)));
        assert_eq!(operator_norm1(&b), Ok(zz(5)));

        let f5 = new_dense_mat_from_rows(Ring::zmod(5).unwrap(), &[[1]]).unwrap();
        assert_eq!(
            operator_norm_infinity(&f5).unwrap_err().kind(),
            ErrorKind::NotOrdDom
        );
    }
}

//! Inverses, adjoints and the pseudo-inverse.

use tracing::debug;

use crate::algebra::{mul, scalar_mul};
use crate::dense::{new_dense_mat, Grid};
use crate::det::det_by_laplace;
use crate::error::{fail, ring_err, ErrorKind, MatrixError, Result};
use crate::view::{require_square, Matrix};
use crate::views::{submat, transpose};

/// Inverse of a square matrix.
///
/// Over a field this is Gauss-Jordan elimination. Over any other integral
/// domain the matrix is inverted over the fraction field and mapped back,
/// which succeeds exactly when the determinant is a unit.
///
/// # Errors
///
/// `NotSquareMatrix`, `NotInvMatrix` for a singular matrix (or one whose
/// inverse leaves the ring), `NotIntegralDomain` over rings with zero
/// divisors.
pub fn inverse(m: &Matrix) -> Result<Matrix> {
    const CONTEXT: &str = "inverse";
    require_square(&**m, CONTEXT)?;
    let ring = m.ring();
    let n = m.num_rows();
    if ring.is_field() {
        debug!(n, %ring, "inverse: gauss-jordan");
        invert(Grid::from_view(&**m), CONTEXT).map(Grid::into_matrix)
    } else if ring.is_integral_domain() {
        debug!(n, %ring, "inverse: via fraction field");
        let lifted = Grid::from_view(&**m).lift().map_err(ring_err(CONTEXT))?;
        invert(lifted, CONTEXT)?
            .push_down(ring)
            .map(Grid::into_matrix)
            .map_err(|_| MatrixError::new(ErrorKind::NotInvMatrix, CONTEXT))
    } else {
        fail(ErrorKind::NotIntegralDomain, CONTEXT)
    }
}

/// Gauss-Jordan inverse over a field: reduce `[M | I]` to `[I | M^-1]`.
///
/// # Errors
///
/// `NotSquareMatrix`, `NotField`, or `NotInvMatrix` when a column has no
/// pivot.
pub fn inverse_by_gauss(m: &Matrix) -> Result<Matrix> {
    const CONTEXT: &str = "inverse_by_gauss";
    require_square(&**m, CONTEXT)?;
    if !m.ring().is_field() {
        return fail(ErrorKind::NotField, CONTEXT);
    }
    invert(Grid::from_view(&**m), CONTEXT).map(Grid::into_matrix)
}

fn invert(g: Grid, context: &'static str) -> Result<Grid> {
    let ring = g.ring();
    let n = g.num_rows();
    let mut aug = Grid::from_fn(ring, n, 2 * n, |i, j| {
        if j < n {
            g[(i, j)].clone()
        } else if j - n == i {
            ring.one()
        } else {
            ring.zero()
        }
    });
    let pivots = aug.gauss_jordan(n, context)?;
    if pivots.len() < n {
        return fail(ErrorKind::NotInvMatrix, context);
    }
    Ok(Grid::from_fn(ring, n, n, |i, j| aug[(i, n + j)].clone()))
}

/// Classical adjoint (adjugate): `M * adjoint(M) == det(M) * I`.
///
/// # Errors
///
/// `NotSquareMatrix`.
pub fn adjoint(m: &Matrix) -> Result<Matrix> {
    const CONTEXT: &str = "adjoint";
    require_square(&**m, CONTEXT)?;
    let ring = m.ring();
    if ring.is_field() {
        let det = m.det()?;
        if det.is_zero() {
            debug!(%ring, "adjoint: singular, by minors");
            adjoint_by_det_of_minors(m)
        } else {
            scalar_mul(&det, &inverse_by_gauss(m)?)
        }
    } else if ring.is_integral_domain() {
        adjoint_by_inverse(m)
    } else {
        debug!(%ring, "adjoint: by minors");
        adjoint_by_det_of_minors(m)
    }
}

/// Adjoint computed over the fraction field and mapped back.
///
/// # Errors
///
/// `NotSquareMatrix`, or `NotIntegralDomain` over rings with zero
/// divisors.
pub fn adjoint_by_inverse(m: &Matrix) -> Result<Matrix> {
    const CONTEXT: &str = "adjoint_by_inverse";
    require_square(&**m, CONTEXT)?;
    let ring = m.ring();
    let lifted = Grid::from_view(&**m)
        .lift()
        .map_err(ring_err(CONTEXT))?
        .into_matrix();
    let adj = adjoint(&lifted)?;
    Grid::from_view(&*adj)
        .push_down(ring)
        .map(Grid::into_matrix)
        .map_err(ring_err(CONTEXT))
}

/// Adjoint from cofactors: `adj(j, i) = (-1)^(i+j) det(minor(i, j))`.
///
/// Works over any commutative ring; minors over rings with zero divisors
/// are expanded by cofactors.
///
/// # Errors
///
/// `NotSquareMatrix`.
pub fn adjoint_by_det_of_minors(m: &Matrix) -> Result<Matrix> {
    const CONTEXT: &str = "adjoint_by_det_of_minors";
    require_square(&**m, CONTEXT)?;
    let ring = m.ring();
    let n = m.num_rows();
    if n == 0 {
        return Ok(new_dense_mat(ring, 0, 0));
    }
    let mut adj = Grid::zeros(ring, n, n);
    for i in 0..n {
        let rows: Vec<usize> = (0..n).filter(|&r| r != i).collect();
        for j in 0..n {
            let cols: Vec<usize> = (0..n).filter(|&c| c != j).collect();
            let minor = submat(m, &rows, &cols)?;
            let det = if ring.is_integral_domain() {
                minor.det()?
            } else {
                det_by_laplace(&minor)?
            };
            adj[(j, i)] = if (i + j) % 2 == 0 { det } else { -det };
        }
    }
    Ok(adj.into_matrix())
}

/// Moore-Penrose style pseudo-inverse for full-rank matrices over a field.
///
/// Square matrices get their inverse, wide ones `M^T (M M^T)^-1` and tall
/// ones `(M^T M)^-1 M^T`.
///
/// # Errors
///
/// `NotField`, and `Nyi` for rank-deficient matrices.
pub fn pseudo_inverse(m: &Matrix) -> Result<Matrix> {
    const CONTEXT: &str = "pseudo_inverse";
    if !m.ring().is_field() {
        return fail(ErrorKind::NotField, CONTEXT);
    }
    let (rows, cols) = (m.num_rows(), m.num_cols());
    let rank = m.rank()?;
    if rank == rows && rank == cols {
        inverse(m)
    } else if rank == rows {
        let t = transpose(m);
        mul(&t, &inverse(&mul(m, &t)?)?)
    } else if rank == cols {
        let t = transpose(m);
        mul(&inverse(&mul(&t, m)?)?, &t)
    } else {
        fail(ErrorKind::Nyi, CONTEXT)
    }
}

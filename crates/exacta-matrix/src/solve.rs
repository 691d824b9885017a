//! Linear systems and kernels.
//!
//! An inconsistent system is not an error: the solvers return the 0x0
//! matrix, which [`Matrix::is_no_solution`] recognises.

use tracing::{debug, trace};

use crate::dense::{new_dense_mat, Grid};
use crate::error::{fail, ErrorKind, Result};
use crate::view::{require_writable, Matrix};

/// In-place Gauss-Jordan elimination on the first `to_do_cols` columns of
/// `m`. Pivots become one and are cleared from every other row.
///
/// Returns the number of pivots, i.e. the rank of those columns. The
/// reduction runs on a private copy and is written back in one go.
///
/// # Errors
///
/// `NotField`, `BadColIndex` if `to_do_cols > m.num_cols()`, and
/// `ConstMatEntry` unless every entry of `m` is writable. Nothing is
/// modified on error.
pub fn rank_and_gauss(m: &Matrix, to_do_cols: usize) -> Result<usize> {
    const CONTEXT: &str = "rank_and_gauss";
    if !m.ring().is_field() {
        return fail(ErrorKind::NotField, CONTEXT);
    }
    if to_do_cols > m.num_cols() {
        return fail(ErrorKind::BadColIndex, CONTEXT);
    }
    let (rows, cols) = (m.num_rows(), m.num_cols());
    let cells = (0..rows).flat_map(|i| (0..cols).map(move |j| (i, j)));
    require_writable(&**m, cells, CONTEXT)?;

    let mut g = Grid::from_view(&**m);
    let rank = g.gauss_jordan(to_do_cols, CONTEXT)?.len();
    if let Some(dense) = m.as_dense() {
        dense.replace(g);
    } else {
        for i in 0..rows {
            for j in 0..cols {
                m.store_at(i, j, g[(i, j)].clone())?;
            }
        }
    }
    Ok(rank)
}

/// Solves `m * x == rhs` for `x`, one column of `x` per column of `rhs`.
///
/// # Errors
///
/// `BadMatrixSize` if the row counts differ, `MixedRings` if the rings
/// do, `Nyi` unless the ring is a field.
pub fn lin_solve(m: &Matrix, rhs: &Matrix) -> Result<Matrix> {
    const CONTEXT: &str = "lin_solve";
    check_system(m, rhs, CONTEXT)?;
    let ring = m.ring();
    if ring.is_field() {
        debug!(rows = m.num_rows(), cols = m.num_cols(), %ring, "lin_solve: gauss");
        lin_solve_by_gauss(m, rhs)
    } else if ring.is_pid() {
        debug!(%ring, "lin_solve: hermite normal form");
        lin_solve_by_hnf(m, rhs)
    } else {
        fail(ErrorKind::Nyi, CONTEXT)
    }
}

fn check_system(m: &Matrix, rhs: &Matrix, context: &'static str) -> Result<()> {
    if m.num_rows() != rhs.num_rows() {
        return fail(ErrorKind::BadMatrixSize, context);
    }
    if m.ring() != rhs.ring() {
        return fail(ErrorKind::MixedRings, context);
    }
    Ok(())
}

/// Solves `m * x == rhs` over a field by reducing `[m | rhs]`.
///
/// Returns the 0x0 matrix when the system is inconsistent. With free
/// variables, the particular solution with those set to zero is returned.
///
/// # Errors
///
/// `BadMatrixSize`, `MixedRings`, or `NotField`.
pub fn lin_solve_by_gauss(m: &Matrix, rhs: &Matrix) -> Result<Matrix> {
    const CONTEXT: &str = "lin_solve_by_gauss";
    check_system(m, rhs, CONTEXT)?;
    let ring = m.ring();
    if !ring.is_field() {
        return fail(ErrorKind::NotField, CONTEXT);
    }
    let (rows, cols, extra) = (m.num_rows(), m.num_cols(), rhs.num_cols());
    let mut aug = Grid::from_fn(ring, rows, cols + extra, |i, j| {
        if j < cols {
            m.entry_at(i, j)
        } else {
            rhs.entry_at(i, j - cols)
        }
    });
    let pivots = aug.gauss_jordan(cols, CONTEXT)?;

    // Rows below the pivots read 0 = rhs; anything nonzero is a contradiction.
    let inconsistent =
        (pivots.len()..rows).any(|i| (cols..cols + extra).any(|j| !aug[(i, j)].is_zero()));
    if inconsistent {
        trace!(rank = pivots.len(), "lin_solve_by_gauss: no solution");
        return Ok(new_dense_mat(ring, 0, 0));
    }

    let mut x = Grid::zeros(ring, cols, extra);
    for (row, &col) in pivots.iter().enumerate() {
        for k in 0..extra {
            x[(col, k)] = aug[(row, cols + k)].clone();
        }
    }
    Ok(x.into_matrix())
}

/// Solving over a principal ideal domain through the Hermite normal form.
///
/// # Errors
///
/// Always `Nyi`.
pub fn lin_solve_by_hnf(m: &Matrix, rhs: &Matrix) -> Result<Matrix> {
    check_system(m, rhs, "lin_solve_by_hnf")?;
    fail(ErrorKind::Nyi, "lin_solve_by_hnf")
}

/// Solving over a polynomial ring through a module representation.
///
/// # Errors
///
/// Always `Nyi`.
pub fn lin_solve_by_module_repr(m: &Matrix, rhs: &Matrix) -> Result<Matrix> {
    check_system(m, rhs, "lin_solve_by_module_repr")?;
    fail(ErrorKind::Nyi, "lin_solve_by_module_repr")
}

/// A basis of the kernel of `m`, as the columns of the result.
///
/// # Errors
///
/// `NotField` unless the ring is a field.
pub fn lin_ker(m: &Matrix) -> Result<Matrix> {
    lin_ker_by_gauss(m)
}

/// Kernel basis from the reduced row echelon form.
///
/// Each free column `f` gives one basis vector: `-1` at `f` and, at each
/// pivot column, the reduced coefficient of `f` in that pivot's row. The
/// result has `num_cols - rank` columns.
///
/// # Errors
///
/// `NotField` unless the ring is a field.
pub fn lin_ker_by_gauss(m: &Matrix) -> Result<Matrix> {
    const CONTEXT: &str = "lin_ker_by_gauss";
    let ring = m.ring();
    if !ring.is_field() {
        return fail(ErrorKind::NotField, CONTEXT);
    }
    let cols = m.num_cols();
    let mut g = Grid::from_view(&**m);
    if cols > g.num_rows() {
        g.resize(cols, cols);
    }
    let pivots = g.gauss_jordan(cols, CONTEXT)?;
    let free: Vec<usize> = (0..cols).filter(|c| !pivots.contains(c)).collect();
    debug!(cols, rank = pivots.len(), %ring, "lin_ker: gauss");

    let mut ker = Grid::zeros(ring, cols, free.len());
    for (k, &f) in free.iter().enumerate() {
        ker[(f, k)] = -ring.one();
        for (row, &p) in pivots.iter().enumerate() {
            ker[(p, k)] = g[(row, f)].clone();
        }
    }
    Ok(ker.into_matrix())
}

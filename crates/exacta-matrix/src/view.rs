//! The matrix view contract and the shared `Matrix` handle.
//!
//! Every matrix, dense or derived, implements [`MatrixView`]. Only the
//! four read primitives are required; everything else has a default built
//! on them, which views override when they can do better (or must refuse).
//!
//! Mutation goes through `&self`: storage lives behind a lock so that
//! views holding a [`Matrix`] handle see writes immediately.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use exacta_rings::{Ring, RingElem};

use crate::dense::DenseMat;
use crate::error::{fail, ErrorKind, Result};

/// Read access, optional write access and algorithm hooks for a matrix.
pub trait MatrixView: Send + Sync + fmt::Debug {
    /// The ring every entry belongs to.
    fn ring(&self) -> Ring;

    /// Number of rows.
    fn num_rows(&self) -> usize;

    /// Number of columns.
    fn num_cols(&self) -> usize;

    /// Entry `(i, j)` without bounds checking.
    ///
    /// Callers guarantee `i < num_rows()` and `j < num_cols()`; use
    /// [`MatrixView::entry`] otherwise.
    fn entry_at(&self, i: usize, j: usize) -> RingElem;

    /// True for views that never accept writes (zero, identity).
    fn is_constant(&self) -> bool {
        false
    }

    /// True if position `(i, j)` accepts writes.
    fn is_writable(&self, _i: usize, _j: usize) -> bool {
        false
    }

    /// Stores `x` at `(i, j)`. Index, ring and writability are already
    /// checked by the caller.
    ///
    /// # Errors
    ///
    /// `ConstMatEntry` unless overridden.
    fn store_at(&self, _i: usize, _j: usize, _x: RingElem) -> Result<()> {
        fail(ErrorKind::ConstMatEntry, "set_entry")
    }

    /// The dense storage behind this view, if it is a dense matrix.
    fn as_dense(&self) -> Option<&DenseMat> {
        None
    }

    /// Entry `(i, j)`.
    ///
    /// # Errors
    ///
    /// `BadRowIndex` / `BadColIndex` when out of range.
    fn entry(&self, i: usize, j: usize) -> Result<RingElem> {
        check_row(self, i, "entry")?;
        check_col(self, j, "entry")?;
        Ok(self.entry_at(i, j))
    }

    /// True if row `i` is entirely zero.
    ///
    /// # Errors
    ///
    /// `BadRowIndex` when out of range.
    fn is_zero_row(&self, i: usize) -> Result<bool> {
        check_row(self, i, "is_zero_row")?;
        Ok((0..self.num_cols()).all(|j| self.entry_at(i, j).is_zero()))
    }

    /// True if column `j` is entirely zero.
    ///
    /// # Errors
    ///
    /// `BadColIndex` when out of range.
    fn is_zero_col(&self, j: usize) -> Result<bool> {
        check_col(self, j, "is_zero_col")?;
        Ok((0..self.num_rows()).all(|i| self.entry_at(i, j).is_zero()))
    }

    /// True if the matrix equals its transpose.
    ///
    /// # Errors
    ///
    /// `NotSquareMatrix` for non-square matrices.
    fn is_symmetric(&self) -> Result<bool> {
        require_square(self, "is_symmetric")?;
        let n = self.num_rows();
        Ok((0..n).all(|i| (0..i).all(|j| self.entry_at(i, j) == self.entry_at(j, i))))
    }

    /// True if the matrix equals minus its transpose.
    ///
    /// # Errors
    ///
    /// `NotSquareMatrix` for non-square matrices.
    fn is_anti_symmetric(&self) -> Result<bool> {
        require_square(self, "is_anti_symmetric")?;
        let n = self.num_rows();
        Ok((0..n).all(|i| {
            self.entry_at(i, i).is_zero()
                && (0..i).all(|j| self.entry_at(i, j) == -self.entry_at(j, i))
        }))
    }

    /// True if every off-diagonal entry is zero.
    ///
    /// # Errors
    ///
    /// `NotSquareMatrix` for non-square matrices.
    fn is_diagonal(&self) -> Result<bool> {
        require_square(self, "is_diagonal")?;
        let n = self.num_rows();
        Ok((0..n).all(|i| (0..n).all(|j| i == j || self.entry_at(i, j).is_zero())))
    }

    /// The row vector `v * M`.
    ///
    /// # Errors
    ///
    /// `BadMatrixSize` if `v.len() != num_rows()`, `MixedRings` if an
    /// entry of `v` is in another ring.
    fn mul_by_row(&self, v: &[RingElem]) -> Result<Vec<RingElem>> {
        const CONTEXT: &str = "mul_by_row";
        if v.len() != self.num_rows() {
            return fail(ErrorKind::BadMatrixSize, CONTEXT);
        }
        check_scalars(self, v, CONTEXT)?;
        Ok((0..self.num_cols())
            .map(|j| {
                v.iter().enumerate().fold(self.ring().zero(), |acc, (i, x)| {
                    acc + &(x * &self.entry_at(i, j))
                })
            })
            .collect())
    }

    /// The column vector `M * v`.
    ///
    /// # Errors
    ///
    /// `BadMatrixSize` if `v.len() != num_cols()`, `MixedRings` if an
    /// entry of `v` is in another ring.
    fn mul_by_col(&self, v: &[RingElem]) -> Result<Vec<RingElem>> {
        const CONTEXT: &str = "mul_by_col";
        if v.len() != self.num_cols() {
            return fail(ErrorKind::BadMatrixSize, CONTEXT);
        }
        check_scalars(self, v, CONTEXT)?;
        Ok((0..self.num_rows())
            .map(|i| {
                v.iter().enumerate().fold(self.ring().zero(), |acc, (j, x)| {
                    acc + &(&self.entry_at(i, j) * x)
                })
            })
            .collect())
    }

    /// Sets entry `(i, j)` to `x`.
    ///
    /// # Errors
    ///
    /// `BadRowIndex` / `BadColIndex` when out of range, `MixedRings` if
    /// `x` is in another ring, `ConstMatEntry` on a constant view and
    /// `BadMatrixSetEntry` on a position that cannot be written.
    fn set_entry(&self, i: usize, j: usize, x: &RingElem) -> Result<()> {
        const CONTEXT: &str = "set_entry";
        check_row(self, i, CONTEXT)?;
        check_col(self, j, CONTEXT)?;
        check_scalar(self, x, CONTEXT)?;
        if self.is_constant() {
            return fail(ErrorKind::ConstMatEntry, CONTEXT);
        }
        if !self.is_writable(i, j) {
            return fail(ErrorKind::BadMatrixSetEntry, CONTEXT);
        }
        self.store_at(i, j, x.clone())
    }

    /// Sets every entry to zero.
    ///
    /// # Errors
    ///
    /// `ConstMatEntry` unless every position is writable.
    fn assign_zero(&self) -> Result<()> {
        let (rows, cols) = (self.num_rows(), self.num_cols());
        let cells = (0..rows).flat_map(|i| (0..cols).map(move |j| (i, j)));
        require_writable(self, cells.clone(), "assign_zero")?;
        write_cells(self, cells.map(|(i, j)| (i, j, self.ring().zero())).collect())
    }

    /// Multiplies row `i` by `c`.
    ///
    /// # Errors
    ///
    /// `BadRowIndex`, `MixedRings`, or `ConstMatEntry` if the row is not
    /// writable.
    fn row_mul(&self, i: usize, c: &RingElem) -> Result<()> {
        const CONTEXT: &str = "row_mul";
        check_row(self, i, CONTEXT)?;
        check_scalar(self, c, CONTEXT)?;
        if c.is_one() {
            return Ok(());
        }
        let cols = self.num_cols();
        require_writable(self, (0..cols).map(|j| (i, j)), CONTEXT)?;
        let cells = (0..cols).map(|j| (i, j, &self.entry_at(i, j) * c)).collect();
        write_cells(self, cells)
    }

    /// Multiplies column `j` by `c`.
    ///
    /// # Errors
    ///
    /// `BadColIndex`, `MixedRings`, or `ConstMatEntry` if the column is
    /// not writable.
    fn col_mul(&self, j: usize, c: &RingElem) -> Result<()> {
        const CONTEXT: &str = "col_mul";
        check_col(self, j, CONTEXT)?;
        check_scalar(self, c, CONTEXT)?;
        if c.is_one() {
            return Ok(());
        }
        let rows = self.num_rows();
        require_writable(self, (0..rows).map(|i| (i, j)), CONTEXT)?;
        let cells = (0..rows).map(|i| (i, j, &self.entry_at(i, j) * c)).collect();
        write_cells(self, cells)
    }

    /// Adds `c` times row `i2` to row `i1`. `i1 == i2` is allowed.
    ///
    /// # Errors
    ///
    /// `BadRowIndex`, `MixedRings`, or `ConstMatEntry` if row `i1` is not
    /// writable.
    fn add_row_mul(&self, i1: usize, i2: usize, c: &RingElem) -> Result<()> {
        const CONTEXT: &str = "add_row_mul";
        check_row(self, i1, CONTEXT)?;
        check_row(self, i2, CONTEXT)?;
        check_scalar(self, c, CONTEXT)?;
        if c.is_zero() {
            return Ok(());
        }
        let cols = self.num_cols();
        require_writable(self, (0..cols).map(|j| (i1, j)), CONTEXT)?;
        // Read both rows in full before writing so i1 == i2 is handled.
        let cells = (0..cols)
            .map(|j| (i1, j, self.entry_at(i1, j) + &(c * &self.entry_at(i2, j))))
            .collect();
        write_cells(self, cells)
    }

    /// Adds `c` times column `j2` to column `j1`. `j1 == j2` is allowed.
    ///
    /// # Errors
    ///
    /// `BadColIndex`, `MixedRings`, or `ConstMatEntry` if column `j1` is
    /// not writable.
    fn add_col_mul(&self, j1: usize, j2: usize, c: &RingElem) -> Result<()> {
        const CONTEXT: &str = "add_col_mul";
        check_col(self, j1, CONTEXT)?;
        check_col(self, j2, CONTEXT)?;
        check_scalar(self, c, CONTEXT)?;
        if c.is_zero() {
            return Ok(());
        }
        let rows = self.num_rows();
        require_writable(self, (0..rows).map(|i| (i, j1)), CONTEXT)?;
        let cells = (0..rows)
            .map(|i| (i, j1, self.entry_at(i, j1) + &(&self.entry_at(i, j2) * c)))
            .collect();
        write_cells(self, cells)
    }

    /// Swaps rows `i1` and `i2`.
    ///
    /// # Errors
    ///
    /// `BadRowIndex`, or `ConstMatEntry` if either row is not writable.
    fn swap_rows(&self, i1: usize, i2: usize) -> Result<()> {
        const CONTEXT: &str = "swap_rows";
        check_row(self, i1, CONTEXT)?;
        check_row(self, i2, CONTEXT)?;
        if i1 == i2 {
            return Ok(());
        }
        let cols = self.num_cols();
        let cells = (0..cols).flat_map(|j| [(i1, j), (i2, j)]);
        require_writable(self, cells, CONTEXT)?;
        let cells = (0..cols)
            .flat_map(|j| {
                [
                    (i1, j, self.entry_at(i2, j)),
                    (i2, j, self.entry_at(i1, j)),
                ]
            })
            .collect();
        write_cells(self, cells)
    }

    /// Swaps columns `j1` and `j2`.
    ///
    /// # Errors
    ///
    /// `BadColIndex`, or `ConstMatEntry` if either column is not writable.
    fn swap_cols(&self, j1: usize, j2: usize) -> Result<()> {
        const CONTEXT: &str = "swap_cols";
        check_col(self, j1, CONTEXT)?;
        check_col(self, j2, CONTEXT)?;
        if j1 == j2 {
            return Ok(());
        }
        let rows = self.num_rows();
        let cells = (0..rows).flat_map(|i| [(i, j1), (i, j2)]);
        require_writable(self, cells, CONTEXT)?;
        let cells = (0..rows)
            .flat_map(|i| {
                [
                    (i, j1, self.entry_at(i, j2)),
                    (i, j2, self.entry_at(i, j1)),
                ]
            })
            .collect();
        write_cells(self, cells)
    }

    /// Changes the shape, padding with zeros or dropping entries.
    ///
    /// # Errors
    ///
    /// `ConstMatEntry`: only dense matrices can be resized.
    fn resize(&self, _rows: usize, _cols: usize) -> Result<()> {
        fail(ErrorKind::ConstMatEntry, "resize")
    }

    /// Determinant. Defaults to the ring-dispatched engine.
    ///
    /// # Errors
    ///
    /// See [`crate::det::det`].
    fn det(&self) -> Result<RingElem> {
        crate::det::det_of(self)
    }

    /// Rank. Defaults to Gaussian elimination.
    ///
    /// # Errors
    ///
    /// See [`crate::rank::rank`].
    fn rank(&self) -> Result<usize> {
        crate::rank::rank_of(self)
    }
}

pub(crate) fn check_row<M: MatrixView + ?Sized>(m: &M, i: usize, context: &'static str) -> Result<()> {
    if i < m.num_rows() {
        Ok(())
    } else {
        fail(ErrorKind::BadRowIndex, context)
    }
}

pub(crate) fn check_col<M: MatrixView + ?Sized>(m: &M, j: usize, context: &'static str) -> Result<()> {
    if j < m.num_cols() {
        Ok(())
    } else {
        fail(ErrorKind::BadColIndex, context)
    }
}

pub(crate) fn check_scalar<M: MatrixView + ?Sized>(
    m: &M,
    c: &RingElem,
    context: &'static str,
) -> Result<()> {
    if c.ring() == m.ring() {
        Ok(())
    } else {
        fail(ErrorKind::MixedRings, context)
    }
}

fn check_scalars<M: MatrixView + ?Sized>(m: &M, v: &[RingElem], context: &'static str) -> Result<()> {
    v.iter().try_for_each(|x| check_scalar(m, x, context))
}

pub(crate) fn require_square<M: MatrixView + ?Sized>(m: &M, context: &'static str) -> Result<()> {
    if m.num_rows() == m.num_cols() {
        Ok(())
    } else {
        fail(ErrorKind::NotSquareMatrix, context)
    }
}

/// Fails with `ConstMatEntry` unless every listed position is writable.
pub(crate) fn require_writable<M, I>(m: &M, mut cells: I, context: &'static str) -> Result<()>
where
    M: MatrixView + ?Sized,
    I: Iterator<Item = (usize, usize)>,
{
    if cells.all(|(i, j)| m.is_writable(i, j)) {
        Ok(())
    } else {
        fail(ErrorKind::ConstMatEntry, context)
    }
}

fn write_cells<M: MatrixView + ?Sized>(m: &M, cells: Vec<(usize, usize, RingElem)>) -> Result<()> {
    cells.into_iter().try_for_each(|(i, j, x)| m.store_at(i, j, x))
}

/// A shared, cloneable handle to any matrix view.
///
/// Cloning the handle shares the matrix; views built from a handle keep
/// the underlying matrix alive.
#[derive(Clone)]
pub struct Matrix(Arc<dyn MatrixView>);

impl Matrix {
    /// Wraps a view in a handle.
    pub fn new<V: MatrixView + 'static>(view: V) -> Self {
        Self(Arc::new(view))
    }

    /// True if both handles refer to the same matrix object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.0).cast::<()>(),
            Arc::as_ptr(&other.0).cast::<()>(),
        )
    }

    /// True for the 0x0 matrix returned by solvers when no solution exists.
    #[must_use]
    pub fn is_no_solution(&self) -> bool {
        self.num_rows() == 0 && self.num_cols() == 0
    }

    /// Snapshot of the entries, row by row.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<RingElem>> {
        (0..self.num_rows())
            .map(|i| (0..self.num_cols()).map(|j| self.entry_at(i, j)).collect())
            .collect()
    }
}

impl Deref for Matrix {
    type Target = dyn MatrixView;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

/// Structural equality: same ring, same shape, equal entries.
#[must_use]
pub fn mat_eq(a: &dyn MatrixView, b: &dyn MatrixView) -> bool {
    a.ring() == b.ring()
        && a.num_rows() == b.num_rows()
        && a.num_cols() == b.num_cols()
        && (0..a.num_rows()).all(|i| (0..a.num_cols()).all(|j| a.entry_at(i, j) == b.entry_at(i, j)))
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        mat_eq(&**self, &**other)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "matrix({},", self.ring())?;
        if self.num_rows() == 0 || self.num_cols() == 0 {
            return write!(f, " [])");
        }
        write!(f, "\n [")?;
        for i in 0..self.num_rows() {
            if i > 0 {
                write!(f, ",\n  ")?;
            }
            write!(f, "[")?;
            for j in 0..self.num_cols() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.entry_at(i, j))?;
            }
            write!(f, "]")?;
        }
        write!(f, "])")
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

//! Dense matrices.
//!
//! A [`Grid`] is a plain row-major array of ring elements; the
//! elimination algorithms run on private grids. [`DenseMat`] puts a grid
//! behind a lock so it can be shared through [`Matrix`] handles and
//! mutated in place.

use std::ops::{Index, IndexMut};

use exacta_rings::{Ring, RingElem, RingError, ToRingElem};
use parking_lot::RwLock;

use crate::error::{fail, ring_err, ErrorKind, Result};
use crate::view::{check_col, check_row, check_scalar, Matrix, MatrixView};

/// Row-major storage of a matrix over a single ring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Grid {
    ring: Ring,
    /// Entries in row-major order.
    data: Vec<RingElem>,
    num_rows: usize,
    num_cols: usize,
}

impl Grid {
    /// A grid of zeros.
    pub(crate) fn zeros(ring: Ring, num_rows: usize, num_cols: usize) -> Self {
        Self {
            ring,
            data: vec![ring.zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// The `n x n` identity.
    pub(crate) fn identity(ring: Ring, n: usize) -> Self {
        let mut g = Self::zeros(ring, n, n);
        for i in 0..n {
            g[(i, i)] = ring.one();
        }
        g
    }

    /// A grid whose entry `(i, j)` is `f(i, j)`.
    pub(crate) fn from_fn<F>(ring: Ring, num_rows: usize, num_cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> RingElem,
    {
        let data = (0..num_rows)
            .flat_map(|i| (0..num_cols).map(move |j| (i, j)))
            .map(|(i, j)| f(i, j))
            .collect();
        Self {
            ring,
            data,
            num_rows,
            num_cols,
        }
    }

    /// Copies the current entries of any view.
    pub(crate) fn from_view<M: MatrixView + ?Sized>(m: &M) -> Self {
        if let Some(dense) = m.as_dense() {
            return dense.snapshot();
        }
        Self::from_fn(m.ring(), m.num_rows(), m.num_cols(), |i, j| m.entry_at(i, j))
    }

    pub(crate) fn ring(&self) -> Ring {
        self.ring
    }

    pub(crate) fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub(crate) fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Row `i` as a slice.
    pub(crate) fn row(&self, i: usize) -> &[RingElem] {
        let start = i * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &RingElem> {
        self.data.iter()
    }

    /// Swaps two rows in place.
    pub(crate) fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let (i_start, j_start) = (i * self.num_cols, j * self.num_cols);
        for k in 0..self.num_cols {
            self.data.swap(i_start + k, j_start + k);
        }
    }

    /// Swaps two columns in place.
    pub(crate) fn swap_cols(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        for row in 0..self.num_rows {
            let start = row * self.num_cols;
            self.data.swap(start + i, start + j);
        }
    }

    /// row[i] *= c.
    pub(crate) fn scale_row(&mut self, i: usize, c: &RingElem) {
        for k in 0..self.num_cols {
            self[(i, k)] = &self[(i, k)] * c;
        }
    }

    /// col[j] *= c.
    pub(crate) fn scale_col(&mut self, j: usize, c: &RingElem) {
        for k in 0..self.num_rows {
            self[(k, j)] = &self[(k, j)] * c;
        }
    }

    /// row[target] += c * row[source]. Correct when `target == source`.
    pub(crate) fn add_scaled_row(&mut self, target: usize, source: usize, c: &RingElem) {
        let scaled: Vec<RingElem> = self.row(source).iter().map(|x| c * x).collect();
        for (k, x) in scaled.into_iter().enumerate() {
            self[(target, k)] = &self[(target, k)] + &x;
        }
    }

    /// col[target] += c * col[source]. Correct when `target == source`.
    pub(crate) fn add_scaled_col(&mut self, target: usize, source: usize, c: &RingElem) {
        let scaled: Vec<RingElem> = (0..self.num_rows)
            .map(|k| &self[(k, source)] * c)
            .collect();
        for (k, x) in scaled.into_iter().enumerate() {
            self[(k, target)] = &self[(k, target)] + &x;
        }
    }

    /// Matrix-matrix multiply. Shapes and rings are checked by the caller.
    pub(crate) fn mm(&self, other: &Self) -> Self {
        Self::from_fn(self.ring, self.num_rows, other.num_cols, |i, j| {
            (0..self.num_cols).fold(self.ring.zero(), |acc, k| {
                acc + &(&self[(i, k)] * &other[(k, j)])
            })
        })
    }

    pub(crate) fn transpose(&self) -> Self {
        Self::from_fn(self.ring, self.num_cols, self.num_rows, |i, j| {
            self[(j, i)].clone()
        })
    }

    /// Changes the shape, keeping the overlapping top-left block and
    /// padding with zeros.
    pub(crate) fn resize(&mut self, num_rows: usize, num_cols: usize) {
        if (num_rows, num_cols) == (self.num_rows, self.num_cols) {
            return;
        }
        let fresh = Self::zeros(self.ring, num_rows, num_cols);
        let old = std::mem::replace(self, fresh);
        for i in 0..num_rows.min(old.num_rows) {
            for j in 0..num_cols.min(old.num_cols) {
                self[(i, j)] = old[(i, j)].clone();
            }
        }
    }

    /// The same matrix over the fraction field of its ring.
    pub(crate) fn lift(&self) -> std::result::Result<Self, RingError> {
        let frac = self.ring.fraction_field()?;
        if frac == self.ring {
            return Ok(self.clone());
        }
        let data = self
            .data
            .iter()
            .map(|x| self.ring.to_fraction_field(x))
            .collect::<std::result::Result<_, _>>()?;
        Ok(Self {
            ring: frac,
            data,
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        })
    }

    /// Maps a fraction-field grid back into `ring`, failing on the first
    /// entry with no preimage.
    pub(crate) fn push_down(&self, ring: Ring) -> std::result::Result<Self, RingError> {
        if ring == self.ring {
            return Ok(self.clone());
        }
        let data = self
            .data
            .iter()
            .map(|x| ring.from_fraction_field(x))
            .collect::<std::result::Result<_, _>>()?;
        Ok(Self {
            ring,
            data,
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        })
    }

    /// Gauss-Jordan elimination on the first `to_do_cols` columns.
    ///
    /// Pivots are the first nonzero entry at or below the current pivot
    /// row; each pivot row is normalised to a leading one and the pivot
    /// column is cleared in every other row. Returns the pivot columns in
    /// order, so pivot `k` sits in row `k`. The ring must be a field.
    pub(crate) fn gauss_jordan(&mut self, to_do_cols: usize, context: &'static str) -> Result<Vec<usize>> {
        let mut pivots = Vec::new();
        for col in 0..to_do_cols {
            let row = pivots.len();
            if row == self.num_rows {
                break;
            }
            let Some(found) = (row..self.num_rows).find(|&r| !self[(r, col)].is_zero()) else {
                continue;
            };
            self.swap_rows(row, found);
            let inv = self[(row, col)].inverse().map_err(ring_err(context))?;
            self.scale_row(row, &inv);
            for other in 0..self.num_rows {
                if other != row && !self[(other, col)].is_zero() {
                    let factor = -&self[(other, col)];
                    self.add_scaled_row(other, row, &factor);
                }
            }
            pivots.push(col);
        }
        Ok(pivots)
    }

    pub(crate) fn into_matrix(self) -> Matrix {
        Matrix::new(DenseMat::from_grid(self))
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = RingElem;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

/// A mutable dense matrix that owns its entries.
#[derive(Debug)]
pub struct DenseMat {
    grid: RwLock<Grid>,
}

impl DenseMat {
    pub(crate) fn from_grid(grid: Grid) -> Self {
        Self {
            grid: RwLock::new(grid),
        }
    }

    /// A copy of the current entries.
    pub(crate) fn snapshot(&self) -> Grid {
        self.grid.read().clone()
    }

    /// Replaces the storage wholesale, returning the old grid.
    pub(crate) fn replace(&self, grid: Grid) -> Grid {
        std::mem::replace(&mut *self.grid.write(), grid)
    }
}

impl MatrixView for DenseMat {
    fn ring(&self) -> Ring {
        self.grid.read().ring
    }

    fn num_rows(&self) -> usize {
        self.grid.read().num_rows
    }

    fn num_cols(&self) -> usize {
        self.grid.read().num_cols
    }

    fn entry_at(&self, i: usize, j: usize) -> RingElem {
        self.grid.read()[(i, j)].clone()
    }

    fn is_writable(&self, i: usize, j: usize) -> bool {
        let grid = self.grid.read();
        i < grid.num_rows && j < grid.num_cols
    }

    fn store_at(&self, i: usize, j: usize, x: RingElem) -> Result<()> {
        self.grid.write()[(i, j)] = x;
        Ok(())
    }

    fn as_dense(&self) -> Option<&DenseMat> {
        Some(self)
    }

    fn assign_zero(&self) -> Result<()> {
        let mut grid = self.grid.write();
        let zero = grid.ring.zero();
        grid.data.fill(zero);
        Ok(())
    }

    fn row_mul(&self, i: usize, c: &RingElem) -> Result<()> {
        check_row(self, i, "row_mul")?;
        check_scalar(self, c, "row_mul")?;
        if !c.is_one() {
            self.grid.write().scale_row(i, c);
        }
        Ok(())
    }

    fn col_mul(&self, j: usize, c: &RingElem) -> Result<()> {
        check_col(self, j, "col_mul")?;
        check_scalar(self, c, "col_mul")?;
        if !c.is_one() {
            self.grid.write().scale_col(j, c);
        }
        Ok(())
    }

    fn add_row_mul(&self, i1: usize, i2: usize, c: &RingElem) -> Result<()> {
        check_row(self, i1, "add_row_mul")?;
        check_row(self, i2, "add_row_mul")?;
        check_scalar(self, c, "add_row_mul")?;
        if !c.is_zero() {
            self.grid.write().add_scaled_row(i1, i2, c);
        }
        Ok(())
    }

    fn add_col_mul(&self, j1: usize, j2: usize, c: &RingElem) -> Result<()> {
        check_col(self, j1, "add_col_mul")?;
        check_col(self, j2, "add_col_mul")?;
        check_scalar(self, c, "add_col_mul")?;
        if !c.is_zero() {
            self.grid.write().add_scaled_col(j1, j2, c);
        }
        Ok(())
    }

    fn swap_rows(&self, i1: usize, i2: usize) -> Result<()> {
        check_row(self, i1, "swap_rows")?;
        check_row(self, i2, "swap_rows")?;
        self.grid.write().swap_rows(i1, i2);
        Ok(())
    }

    fn swap_cols(&self, j1: usize, j2: usize) -> Result<()> {
        check_col(self, j1, "swap_cols")?;
        check_col(self, j2, "swap_cols")?;
        self.grid.write().swap_cols(j1, j2);
        Ok(())
    }

    fn resize(&self, rows: usize, cols: usize) -> Result<()> {
        self.grid.write().resize(rows, cols);
        Ok(())
    }

    fn det(&self) -> Result<RingElem> {
        let grid = self.snapshot();
        if grid.num_rows != grid.num_cols {
            return fail(ErrorKind::NotSquareMatrix, "det");
        }
        crate::det::det_auto(grid, &crate::DetConfig::default())
    }
}

/// A new `rows x cols` dense matrix of zeros over `ring`.
#[must_use]
pub fn new_dense_mat(ring: Ring, rows: usize, cols: usize) -> Matrix {
    Grid::zeros(ring, rows, cols).into_matrix()
}

/// A dense matrix built from nested rows of values convertible into
/// `ring` (machine integers, big integers, rationals or ring elements).
///
/// # Errors
///
/// `BadMatrixSize` for ragged input, and the ring-compatibility kind of
/// the first value that does not convert (`MixedRings`, `BadQuot`,
/// `DivByZero`).
pub fn new_dense_mat_from_rows<T, R>(ring: Ring, rows: &[R]) -> Result<Matrix>
where
    T: ToRingElem,
    R: AsRef<[T]>,
{
    const CONTEXT: &str = "new_dense_mat";
    let num_cols = rows.first().map_or(0, |r| r.as_ref().len());
    if rows.iter().any(|r| r.as_ref().len() != num_cols) {
        return fail(ErrorKind::BadMatrixSize, CONTEXT);
    }
    let data = rows
        .iter()
        .flat_map(|r| r.as_ref().iter())
        .map(|x| x.to_ring_elem(ring).map_err(ring_err(CONTEXT)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Grid {
        ring,
        data,
        num_rows: rows.len(),
        num_cols,
    }
    .into_matrix())
}

/// A dense copy of the current contents of any matrix.
#[must_use]
pub fn new_dense_mat_copy(m: &Matrix) -> Matrix {
    Grid::from_view(&**m).into_matrix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use exacta_integers::Rational;

    fn zz(n: i64) -> RingElem {
        RingElem::from_i64(Ring::ZZ, n)
    }

    #[test]
    fn test_new_dense_mat() {
        let m = new_dense_mat(Ring::QQ, 2, 3);
        assert_eq!((m.num_rows(), m.num_cols()), (2, 3));
        assert!(m.is_zero_row(0).unwrap());
        assert_eq!(m.ring(), Ring::QQ);
    }

    #[test]
    fn test_from_rows_conversions() {
        let q = new_dense_mat_from_rows(
            Ring::QQ,
            &[vec![Rational::from_i64(1, 2), Rational::from_i64(-3, 4)]],
        )
        .unwrap();
        assert_eq!(q.entry(0, 1).unwrap().to_string(), "-3/4");

        let err = new_dense_mat_from_rows(Ring::ZZ, &[vec![Rational::from_i64(1, 2)]]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadQuot);

        let ragged = new_dense_mat_from_rows(Ring::ZZ, &[vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(ragged.kind(), ErrorKind::BadMatrixSize);

        let mixed = new_dense_mat_from_rows(Ring::ZZ, &[[RingElem::from_i64(Ring::QQ, 1)]]);
        assert_eq!(mixed.unwrap_err().kind(), ErrorKind::MixedRings);
    }

    #[test]
    fn test_row_and_col_ops() {
        let m = new_dense_mat_from_rows(Ring::ZZ, &[[1, 2], [3, 4]]).unwrap();
        m.add_row_mul(1, 0, &zz(-3)).unwrap();
        assert_eq!(m.to_rows(), vec![vec![zz(1), zz(2)], vec![zz(0), zz(-2)]]);

        m.swap_cols(0, 1).unwrap();
        m.col_mul(1, &zz(5)).unwrap();
        assert_eq!(m.to_rows(), vec![vec![zz(2), zz(5)], vec![zz(-2), zz(0)]]);

        // Self-aliasing: row 0 += 2 * row 0 triples it.
        m.add_row_mul(0, 0, &zz(2)).unwrap();
        assert_eq!(m.to_rows()[0], vec![zz(6), zz(15)]);

        assert_eq!(
            m.swap_rows(0, 2).unwrap_err().kind(),
            ErrorKind::BadRowIndex
        );
        assert_eq!(
            m.row_mul(0, &RingElem::from_i64(Ring::QQ, 2))
                .unwrap_err()
                .kind(),
            ErrorKind::MixedRings
        );
    }

    #[test]
    fn test_resize() {
        let m = new_dense_mat_from_rows(Ring::ZZ, &[[1, 2], [3, 4]]).unwrap();
        m.resize(3, 1).unwrap();
        assert_eq!(m.to_rows(), vec![vec![zz(1)], vec![zz(3)], vec![zz(0)]]);
        m.resize(1, 2).unwrap();
        assert_eq!(m.to_rows(), vec![vec![zz(1), zz(0)]]);
    }

    #[test]
    fn test_copy_is_independent() {
        let m = new_dense_mat_from_rows(Ring::ZZ, &[[1, 2]]).unwrap();
        let c = new_dense_mat_copy(&m);
        m.set_entry(0, 0, &zz(9)).unwrap();
        assert_eq!(c.entry(0, 0), Ok(zz(1)));
        c.assign_zero().unwrap();
        assert!(c.is_zero_row(0).unwrap());
    }

    #[test]
    fn test_gauss_jordan_pivots() {
        let m = new_dense_mat_from_rows(Ring::QQ, &[[0, 2, 4], [1, 1, 1], [2, 2, 2]]).unwrap();
        let mut g = Grid::from_view(&*m);
        let pivots = g.gauss_jordan(3, "test").unwrap();
        assert_eq!(pivots, vec![0, 1]);
        let q = |n| RingElem::from_i64(Ring::QQ, n);
        assert_eq!(g.row(0), &[q(1), q(0), q(-1)]);
        assert_eq!(g.row(1), &[q(0), q(1), q(2)]);
        assert!(g.row(2).iter().all(RingElem::is_zero));
    }
}

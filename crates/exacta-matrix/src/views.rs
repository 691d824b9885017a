//! Derived matrix views.
//!
//! Views hold [`Matrix`] handles of their sources and recompute every
//! entry on access. Writes through a view land in the source, so they are
//! visible through every other handle at once.

use std::sync::Arc;

use exacta_rings::{Ring, RingElem};
use parking_lot::RwLock;

use crate::error::{fail, ErrorKind, Result};
use crate::view::{check_col, check_row, check_scalar, Matrix, MatrixView};

/// A fixed-length vector over one ring, shared between its owner and
/// the views built over it.
///
/// Cloning shares the storage. Writes go through [`SharedVec::set`], so
/// every entry stays in the vector's ring and the length never changes.
#[derive(Clone, Debug)]
pub struct SharedVec {
    ring: Ring,
    data: Arc<RwLock<Vec<RingElem>>>,
}

impl SharedVec {
    /// The ring of every entry.
    #[must_use]
    pub fn ring(&self) -> Ring {
        self.ring
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Always false: empty vectors are rejected by [`shared_vec`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Entry `i`, if in range.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<RingElem> {
        self.data.read().get(i).cloned()
    }

    /// Overwrites entry `i`; every view over the vector sees the change.
    ///
    /// # Errors
    ///
    /// `BadRowIndex` if `i` is out of range, `MixedRings` if `x` is in
    /// another ring.
    pub fn set(&self, i: usize, x: &RingElem) -> Result<()> {
        const CONTEXT: &str = "SharedVec::set";
        if x.ring() != self.ring {
            return fail(ErrorKind::MixedRings, CONTEXT);
        }
        let mut data = self.data.write();
        let Some(slot) = data.get_mut(i) else {
            return fail(ErrorKind::BadRowIndex, CONTEXT);
        };
        *slot = x.clone();
        Ok(())
    }

    /// A copy of the entries.
    #[must_use]
    pub fn to_vec(&self) -> Vec<RingElem> {
        self.data.read().clone()
    }
}

/// Wraps a vector so views can alias it. The ring is taken from the
/// entries.
///
/// # Errors
///
/// `BadMatrixSize` for an empty vector (its ring is unknown), and
/// `MixedRings` if the entries do not share a ring.
pub fn shared_vec(v: Vec<RingElem>) -> Result<SharedVec> {
    const CONTEXT: &str = "shared_vec";
    let Some(first) = v.first() else {
        return fail(ErrorKind::BadMatrixSize, CONTEXT);
    };
    let ring = first.ring();
    if v.iter().any(|x| x.ring() != ring) {
        return fail(ErrorKind::MixedRings, CONTEXT);
    }
    Ok(SharedVec {
        ring,
        data: Arc::new(RwLock::new(v)),
    })
}

#[derive(Debug)]
struct ZeroMat {
    ring: Ring,
    rows: usize,
    cols: usize,
}

impl MatrixView for ZeroMat {
    fn ring(&self) -> Ring {
        self.ring
    }

    fn num_rows(&self) -> usize {
        self.rows
    }

    fn num_cols(&self) -> usize {
        self.cols
    }

    fn entry_at(&self, _i: usize, _j: usize) -> RingElem {
        self.ring.zero()
    }

    fn is_constant(&self) -> bool {
        true
    }

    fn rank(&self) -> Result<usize> {
        Ok(0)
    }
}

/// The constant `rows x cols` zero matrix.
#[must_use]
pub fn zero_mat(ring: Ring, rows: usize, cols: usize) -> Matrix {
    Matrix::new(ZeroMat { ring, rows, cols })
}

#[derive(Debug)]
struct IdentityMat {
    ring: Ring,
    n: usize,
}

impl MatrixView for IdentityMat {
    fn ring(&self) -> Ring {
        self.ring
    }

    fn num_rows(&self) -> usize {
        self.n
    }

    fn num_cols(&self) -> usize {
        self.n
    }

    fn entry_at(&self, i: usize, j: usize) -> RingElem {
        if i == j {
            self.ring.one()
        } else {
            self.ring.zero()
        }
    }

    fn is_constant(&self) -> bool {
        true
    }

    fn det(&self) -> Result<RingElem> {
        Ok(self.ring.one())
    }

    fn rank(&self) -> Result<usize> {
        Ok(self.n)
    }
}

/// The constant `n x n` identity matrix.
#[must_use]
pub fn identity_mat(ring: Ring, n: usize) -> Matrix {
    Matrix::new(IdentityMat { ring, n })
}

#[derive(Debug)]
struct DiagMat {
    diag: SharedVec,
}

impl MatrixView for DiagMat {
    fn ring(&self) -> Ring {
        self.diag.ring
    }

    fn num_rows(&self) -> usize {
        self.diag.len()
    }

    fn num_cols(&self) -> usize {
        self.diag.len()
    }

    fn entry_at(&self, i: usize, j: usize) -> RingElem {
        if i == j {
            self.diag.data.read()[i].clone()
        } else {
            self.diag.ring.zero()
        }
    }

    fn is_writable(&self, i: usize, j: usize) -> bool {
        i == j && i < self.num_rows()
    }

    fn store_at(&self, i: usize, j: usize, x: RingElem) -> Result<()> {
        if i != j {
            return fail(ErrorKind::BadMatrixSetEntry, "set_entry");
        }
        self.diag.data.write()[i] = x;
        Ok(())
    }

    fn row_mul(&self, i: usize, c: &RingElem) -> Result<()> {
        check_row(self, i, "row_mul")?;
        check_scalar(self, c, "row_mul")?;
        let mut diag = self.diag.data.write();
        diag[i] = &diag[i] * c;
        Ok(())
    }

    fn col_mul(&self, j: usize, c: &RingElem) -> Result<()> {
        check_col(self, j, "col_mul")?;
        check_scalar(self, c, "col_mul")?;
        let mut diag = self.diag.data.write();
        diag[j] = &diag[j] * c;
        Ok(())
    }

    fn det(&self) -> Result<RingElem> {
        Ok(self
            .diag
            .data
            .read()
            .iter()
            .fold(self.diag.ring.one(), |acc, x| acc * x))
    }
}

/// A square diagonal view over `v`.
///
/// Diagonal positions are writable and write straight into `v`; writes
/// off the diagonal fail with `BadMatrixSetEntry`.
#[must_use]
pub fn diag_mat(v: &SharedVec) -> Matrix {
    Matrix::new(DiagMat { diag: v.clone() })
}

#[derive(Debug)]
struct VecMat {
    vec: SharedVec,
    /// True for a 1 x n row, false for an n x 1 column.
    is_row: bool,
}

impl MatrixView for VecMat {
    fn ring(&self) -> Ring {
        self.vec.ring
    }

    fn num_rows(&self) -> usize {
        if self.is_row {
            1
        } else {
            self.vec.len()
        }
    }

    fn num_cols(&self) -> usize {
        if self.is_row {
            self.vec.len()
        } else {
            1
        }
    }

    fn entry_at(&self, i: usize, j: usize) -> RingElem {
        self.vec.data.read()[i + j].clone()
    }

    fn is_writable(&self, i: usize, j: usize) -> bool {
        i < self.num_rows() && j < self.num_cols()
    }

    fn store_at(&self, i: usize, j: usize, x: RingElem) -> Result<()> {
        self.vec.data.write()[i + j] = x;
        Ok(())
    }
}

/// A `1 x n` view over `v`, writable in place.
#[must_use]
pub fn row_mat(v: &SharedVec) -> Matrix {
    Matrix::new(VecMat {
        vec: v.clone(),
        is_row: true,
    })
}

/// An `n x 1` view over `v`, writable in place.
#[must_use]
pub fn col_mat(v: &SharedVec) -> Matrix {
    Matrix::new(VecMat {
        vec: v.clone(),
        is_row: false,
    })
}

#[derive(Debug)]
struct Transpose {
    source: Matrix,
}

impl MatrixView for Transpose {
    fn ring(&self) -> Ring {
        self.source.ring()
    }

    fn num_rows(&self) -> usize {
        self.source.num_cols()
    }

    fn num_cols(&self) -> usize {
        self.source.num_rows()
    }

    fn entry_at(&self, i: usize, j: usize) -> RingElem {
        self.source.entry_at(j, i)
    }

    fn entry(&self, i: usize, j: usize) -> Result<RingElem> {
        check_row(self, i, "entry")?;
        check_col(self, j, "entry")?;
        self.source.entry(j, i)
    }

    fn is_constant(&self) -> bool {
        self.source.is_constant()
    }

    fn is_writable(&self, i: usize, j: usize) -> bool {
        self.source.is_writable(j, i)
    }

    fn store_at(&self, i: usize, j: usize, x: RingElem) -> Result<()> {
        self.source.store_at(j, i, x)
    }

    fn row_mul(&self, i: usize, c: &RingElem) -> Result<()> {
        check_row(self, i, "row_mul")?;
        self.source.col_mul(i, c)
    }

    fn col_mul(&self, j: usize, c: &RingElem) -> Result<()> {
        check_col(self, j, "col_mul")?;
        self.source.row_mul(j, c)
    }

    fn add_row_mul(&self, i1: usize, i2: usize, c: &RingElem) -> Result<()> {
        check_row(self, i1, "add_row_mul")?;
        check_row(self, i2, "add_row_mul")?;
        self.source.add_col_mul(i1, i2, c)
    }

    fn add_col_mul(&self, j1: usize, j2: usize, c: &RingElem) -> Result<()> {
        check_col(self, j1, "add_col_mul")?;
        check_col(self, j2, "add_col_mul")?;
        self.source.add_row_mul(j1, j2, c)
    }

    fn swap_rows(&self, i1: usize, i2: usize) -> Result<()> {
        check_row(self, i1, "swap_rows")?;
        check_row(self, i2, "swap_rows")?;
        self.source.swap_cols(i1, i2)
    }

    fn swap_cols(&self, j1: usize, j2: usize) -> Result<()> {
        check_col(self, j1, "swap_cols")?;
        check_col(self, j2, "swap_cols")?;
        self.source.swap_rows(j1, j2)
    }

    fn det(&self) -> Result<RingElem> {
        self.source.det()
    }

    fn rank(&self) -> Result<usize> {
        self.source.rank()
    }
}

/// The transpose of `m`, writable wherever `m` is.
#[must_use]
pub fn transpose(m: &Matrix) -> Matrix {
    Matrix::new(Transpose { source: m.clone() })
}

#[derive(Debug)]
struct Submat {
    source: Matrix,
    rows: Vec<usize>,
    cols: Vec<usize>,
}

impl Submat {
    /// Index lists are checked at construction, but the source may have
    /// been resized since.
    fn check_source(&self, i: usize, j: usize, context: &'static str) -> Result<()> {
        check_row(&*self.source, self.rows[i], context)?;
        check_col(&*self.source, self.cols[j], context)
    }

    fn check_all(&self, context: &'static str) -> Result<()> {
        check_indices(&self.source, &self.rows, &self.cols, context)
    }
}

impl MatrixView for Submat {
    fn ring(&self) -> Ring {
        self.source.ring()
    }

    fn num_rows(&self) -> usize {
        self.rows.len()
    }

    fn num_cols(&self) -> usize {
        self.cols.len()
    }

    fn entry_at(&self, i: usize, j: usize) -> RingElem {
        self.source.entry_at(self.rows[i], self.cols[j])
    }

    fn entry(&self, i: usize, j: usize) -> Result<RingElem> {
        check_row(self, i, "entry")?;
        check_col(self, j, "entry")?;
        self.check_source(i, j, "entry")?;
        Ok(self.entry_at(i, j))
    }

    fn is_constant(&self) -> bool {
        self.source.is_constant()
    }

    fn is_writable(&self, i: usize, j: usize) -> bool {
        i < self.rows.len()
            && j < self.cols.len()
            && self.check_source(i, j, "set_entry").is_ok()
            && self.source.is_writable(self.rows[i], self.cols[j])
    }

    fn store_at(&self, i: usize, j: usize, x: RingElem) -> Result<()> {
        self.check_source(i, j, "set_entry")?;
        self.source.store_at(self.rows[i], self.cols[j], x)
    }

    fn det(&self) -> Result<RingElem> {
        self.check_all("det")?;
        crate::det::det_of(self)
    }

    fn rank(&self) -> Result<usize> {
        self.check_all("rank")?;
        crate::rank::rank_of(self)
    }
}

fn check_indices(m: &Matrix, rows: &[usize], cols: &[usize], context: &'static str) -> Result<()> {
    if rows.iter().any(|&i| i >= m.num_rows()) {
        return fail(ErrorKind::BadRowIndex, context);
    }
    if cols.iter().any(|&j| j >= m.num_cols()) {
        return fail(ErrorKind::BadColIndex, context);
    }
    Ok(())
}

/// The view `(i, j) -> m(rows[i], cols[j])`.
///
/// Index lists may repeat or reorder indices.
///
/// # Errors
///
/// `BadRowIndex` / `BadColIndex` for indices outside `m`.
pub fn submat(m: &Matrix, rows: &[usize], cols: &[usize]) -> Result<Matrix> {
    check_indices(m, rows, cols, "submat")?;
    Ok(Matrix::new(Submat {
        source: m.clone(),
        rows: rows.to_vec(),
        cols: cols.to_vec(),
    }))
}

/// Splits an index into (which block, offset within block).
fn split(index: usize, first_len: usize) -> (bool, usize) {
    if index < first_len {
        (true, index)
    } else {
        (false, index - first_len)
    }
}

/// `[A B]`, `[A; B]` and `[[A, B], [C, D]]` are one view; a side-by-side
/// pair leaves the lower blocks out.
#[derive(Debug)]
struct BlockMat {
    top: [Matrix; 2],
    bottom: Option<[Matrix; 2]>,
    /// Number of block columns in use (1 for a vertical stack).
    block_cols: usize,
}

impl BlockMat {
    fn blocks(&self) -> impl Iterator<Item = &Matrix> {
        self.top.iter().chain(self.bottom.iter().flatten())
    }

    /// Adjacent blocks must agree in height and width. Checked on
    /// construction and again on checked access, since blocks can be
    /// resized after the view is built.
    fn check_shapes(&self, context: &'static str) -> Result<()> {
        let [a, b] = &self.top;
        let fits = match (&self.bottom, self.block_cols) {
            (Some([c, d]), _) => {
                a.num_rows() == b.num_rows()
                    && c.num_rows() == d.num_rows()
                    && a.num_cols() == c.num_cols()
                    && b.num_cols() == d.num_cols()
            }
            (None, 1) => a.num_cols() == b.num_cols(),
            (None, _) => a.num_rows() == b.num_rows(),
        };
        if fits {
            Ok(())
        } else {
            fail(ErrorKind::BadMatrixSize, context)
        }
    }

    /// The block holding `(i, j)` and the position inside it.
    fn locate(&self, i: usize, j: usize) -> (&Matrix, usize, usize) {
        let (in_top, i) = split(i, self.top[0].num_rows());
        let row = if in_top {
            &self.top
        } else {
            self.bottom.as_ref().unwrap_or(&self.top)
        };
        if self.block_cols == 1 {
            return (&row[usize::from(!in_top)], i, j);
        }
        let (in_left, j) = split(j, row[0].num_cols());
        (&row[usize::from(!in_left)], i, j)
    }

    fn into_matrix(self, context: &'static str) -> Result<Matrix> {
        self.check_shapes(context)?;
        let ring = self.top[0].ring();
        if self.blocks().any(|b| b.ring() != ring) {
            return fail(ErrorKind::MixedRings, context);
        }
        Ok(Matrix::new(self))
    }
}

impl MatrixView for BlockMat {
    fn ring(&self) -> Ring {
        self.top[0].ring()
    }

    fn num_rows(&self) -> usize {
        match (&self.bottom, self.block_cols) {
            (Some(bottom), _) => self.top[0].num_rows() + bottom[0].num_rows(),
            (None, 1) => self.top[0].num_rows() + self.top[1].num_rows(),
            (None, _) => self.top[0].num_rows(),
        }
    }

    fn num_cols(&self) -> usize {
        if self.block_cols == 1 {
            self.top[0].num_cols()
        } else {
            self.top[0].num_cols() + self.top[1].num_cols()
        }
    }

    fn entry_at(&self, i: usize, j: usize) -> RingElem {
        let (block, i, j) = self.locate(i, j);
        block.entry_at(i, j)
    }

    fn entry(&self, i: usize, j: usize) -> Result<RingElem> {
        check_row(self, i, "entry")?;
        check_col(self, j, "entry")?;
        self.check_shapes("entry")?;
        let (block, i, j) = self.locate(i, j);
        block.entry(i, j)
    }

    fn is_constant(&self) -> bool {
        self.blocks().all(|b| b.is_constant())
    }

    fn is_writable(&self, i: usize, j: usize) -> bool {
        if i >= self.num_rows() || j >= self.num_cols() {
            return false;
        }
        if self.check_shapes("set_entry").is_err() {
            return false;
        }
        let (block, i, j) = self.locate(i, j);
        block.is_writable(i, j)
    }

    fn store_at(&self, i: usize, j: usize, x: RingElem) -> Result<()> {
        self.check_shapes("set_entry")?;
        let (block, i, j) = self.locate(i, j);
        block.store_at(i, j, x)
    }

    fn det(&self) -> Result<RingElem> {
        self.check_shapes("det")?;
        crate::det::det_of(self)
    }

    fn rank(&self) -> Result<usize> {
        self.check_shapes("rank")?;
        crate::rank::rank_of(self)
    }
}

/// `[A B]`: `a` and `b` side by side.
///
/// # Errors
///
/// `BadMatrixSize` if the row counts differ, `MixedRings` if the rings do.
pub fn concat_hor(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    BlockMat {
        top: [a.clone(), b.clone()],
        bottom: None,
        block_cols: 2,
    }
    .into_matrix("concat_hor")
}

/// `[A; B]`: `a` stacked on top of `b`.
///
/// # Errors
///
/// `BadMatrixSize` if the column counts differ, `MixedRings` if the rings
/// do.
pub fn concat_ver(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    BlockMat {
        top: [a.clone(), b.clone()],
        bottom: None,
        block_cols: 1,
    }
    .into_matrix("concat_ver")
}

/// The block matrix `[[A, B], [C, D]]`.
///
/// # Errors
///
/// `BadMatrixSize` unless `A, B` and `C, D` have equal row counts and
/// `A, C` and `B, D` have equal column counts; `MixedRings` unless all
/// four share a ring.
pub fn block_mat_2x2(a: &Matrix, b: &Matrix, c: &Matrix, d: &Matrix) -> Result<Matrix> {
    BlockMat {
        top: [a.clone(), b.clone()],
        bottom: Some([c.clone(), d.clone()]),
        block_cols: 2,
    }
    .into_matrix("block_mat_2x2")
}

/// `[[A, 0], [0, B]]`.
///
/// # Errors
///
/// `MixedRings` if `a` and `b` are over different rings.
pub fn concat_diag(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let ring = a.ring();
    block_mat_2x2(
        a,
        &zero_mat(ring, a.num_rows(), b.num_cols()),
        &zero_mat(ring, b.num_rows(), a.num_cols()),
        b,
    )
}

/// `[[0, A], [B, 0]]`.
///
/// # Errors
///
/// `MixedRings` if `a` and `b` are over different rings.
pub fn concat_anti_diag(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let ring = a.ring();
    block_mat_2x2(
        &zero_mat(ring, a.num_rows(), b.num_cols()),
        a,
        b,
        &zero_mat(ring, b.num_rows(), a.num_cols()),
    )
}

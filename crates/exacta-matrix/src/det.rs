//! Determinants.
//!
//! Dispatch by ring:
//!
//! ```text
//! size 0, 1        one / the entry
//! size 2, 3        closed form (any commutative ring)
//! field            Gaussian elimination
//! integral domain  Bareiss fraction-free elimination
//! otherwise        NotIntegralDomain
//! ```
//!
//! Cofactor expansion is available explicitly for any commutative ring.

use exacta_integers::Integer;
use exacta_rings::RingElem;
use num_traits::Zero;
use tracing::debug;

use crate::config::{DetConfig, DetStrategy};
use crate::dense::Grid;
use crate::error::{fail, ring_err, ErrorKind, Result};
use crate::view::{require_square, Matrix, MatrixView};
use crate::views::submat;

/// Determinant of a square matrix, through the matrix's own `det` hook.
///
/// # Errors
///
/// `NotSquareMatrix` for non-square input, `NotIntegralDomain` for a
/// matrix larger than 3x3 over a ring with zero divisors.
pub fn det(m: &Matrix) -> Result<RingElem> {
    m.det()
}

/// Determinant with an explicit algorithm choice.
///
/// # Errors
///
/// As [`det`]; forcing `Gauss` or `Bareiss` over a ring with zero divisors
/// fails with `NotIntegralDomain`.
pub fn det_with_config(m: &Matrix, config: &DetConfig) -> Result<RingElem> {
    require_square(&**m, "det")?;
    match config.strategy {
        DetStrategy::Auto => det_auto(Grid::from_view(&**m), config),
        DetStrategy::Gauss => gauss(Grid::from_view(&**m)),
        DetStrategy::Bareiss => bareiss(Grid::from_view(&**m), config.integer_fast_path),
        DetStrategy::Laplace => laplace(m),
    }
}

/// Determinant by Gaussian elimination over the fraction field.
///
/// # Errors
///
/// `NotSquareMatrix`, or `NotIntegralDomain` when the ring has no
/// fraction field.
pub fn det_by_gauss(m: &Matrix) -> Result<RingElem> {
    require_square(&**m, "det_by_gauss")?;
    gauss(Grid::from_view(&**m))
}

/// Determinant by Bareiss fraction-free elimination.
///
/// # Errors
///
/// `NotSquareMatrix`, or `NotIntegralDomain` when the ring has zero
/// divisors.
pub fn det_by_bareiss(m: &Matrix) -> Result<RingElem> {
    require_square(&**m, "det_by_bareiss")?;
    bareiss(Grid::from_view(&**m), true)
}

/// Determinant by cofactor expansion along the first row.
///
/// # Errors
///
/// `NotSquareMatrix` for non-square input.
pub fn det_by_laplace(m: &Matrix) -> Result<RingElem> {
    require_square(&**m, "det_by_laplace")?;
    laplace(m)
}

/// Default `det` hook for views.
pub(crate) fn det_of<M: MatrixView + ?Sized>(m: &M) -> Result<RingElem> {
    require_square(m, "det")?;
    det_auto(Grid::from_view(m), &DetConfig::default())
}

/// Ring-dispatched determinant of a square grid.
pub(crate) fn det_auto(g: Grid, config: &DetConfig) -> Result<RingElem> {
    let ring = g.ring();
    let n = g.num_rows();
    match n {
        0 => return Ok(ring.one()),
        1 => return Ok(g[(0, 0)].clone()),
        _ => {}
    }
    if config.closed_form && n <= 3 && ring.is_commutative() {
        debug!(n, %ring, "det: closed form");
        return Ok(if n == 2 { det2(&g) } else { det3(&g) });
    }
    if ring.is_field() {
        debug!(n, %ring, "det: gauss");
        gauss(g)
    } else if ring.is_integral_domain() {
        debug!(n, %ring, "det: bareiss");
        bareiss(g, config.integer_fast_path)
    } else {
        fail(ErrorKind::NotIntegralDomain, "det")
    }
}

fn det2(g: &Grid) -> RingElem {
    &(&g[(0, 0)] * &g[(1, 1)]) - &(&g[(0, 1)] * &g[(1, 0)])
}

fn det3(g: &Grid) -> RingElem {
    let minor = |a: (usize, usize), b: (usize, usize), c: (usize, usize), d: (usize, usize)| {
        &(&g[a] * &g[b]) - &(&g[c] * &g[d])
    };
    let m0 = minor((1, 1), (2, 2), (1, 2), (2, 1));
    let m1 = minor((1, 0), (2, 2), (1, 2), (2, 0));
    let m2 = minor((1, 0), (2, 1), (1, 1), (2, 0));
    &(&(&g[(0, 0)] * &m0) - &(&g[(0, 1)] * &m1)) + &(&g[(0, 2)] * &m2)
}

fn gauss(g: Grid) -> Result<RingElem> {
    const CONTEXT: &str = "det_by_gauss";
    let ring = g.ring();
    let mut g = g.lift().map_err(ring_err(CONTEXT))?;
    let n = g.num_rows();
    let mut det = g.ring().one();

    for col in 0..n {
        // First nonzero at or below the diagonal.
        let Some(pivot_row) = (col..n).find(|&r| !g[(r, col)].is_zero()) else {
            return Ok(ring.zero());
        };
        if pivot_row != col {
            g.swap_rows(col, pivot_row);
            det = -det;
        }
        let pivot = g[(col, col)].clone();
        let inv = pivot.inverse().map_err(ring_err(CONTEXT))?;
        for row in col + 1..n {
            if !g[(row, col)].is_zero() {
                let factor = -(&g[(row, col)] * &inv);
                g.add_scaled_row(row, col, &factor);
            }
        }
        det = det * &pivot;
    }

    ring.from_fraction_field(&det).map_err(ring_err(CONTEXT))
}

fn bareiss(g: Grid, integer_fast_path: bool) -> Result<RingElem> {
    const CONTEXT: &str = "det_by_bareiss";
    let ring = g.ring();
    if !ring.is_integral_domain() {
        return fail(ErrorKind::NotIntegralDomain, CONTEXT);
    }
    let n = g.num_rows();
    if n == 0 {
        return Ok(ring.one());
    }
    if integer_fast_path && ring.is_zz() {
        debug!(n, "det: bareiss on raw integers");
        let entries = g
            .entries()
            .map(|x| x.as_integer().cloned().unwrap_or_default())
            .collect();
        return Ok(RingElem::Int(bareiss_integers(entries, n)));
    }

    let mut g = g;
    let mut negate = false;
    let mut prev = ring.one();
    for k in 0..n - 1 {
        if g[(k, k)].is_zero() {
            let Some(swap) = (k + 1..n).find(|&r| !g[(r, k)].is_zero()) else {
                return Ok(ring.zero());
            };
            g.swap_rows(k, swap);
            negate = !negate;
        }
        for i in k + 1..n {
            for j in k + 1..n {
                let num = &(&g[(i, j)] * &g[(k, k)]) - &(&g[(i, k)] * &g[(k, j)]);
                g[(i, j)] = num.checked_div(&prev).map_err(ring_err(CONTEXT))?;
            }
        }
        prev = g[(k, k)].clone();
    }

    let det = g[(n - 1, n - 1)].clone();
    Ok(if negate { -det } else { det })
}

/// Bareiss elimination on a row-major `n x n` array of integers.
fn bareiss_integers(mut m: Vec<Integer>, n: usize) -> Integer {
    let idx = |i: usize, j: usize| i * n + j;
    let mut negate = false;
    let mut prev = Integer::new(1);

    for k in 0..n - 1 {
        if m[idx(k, k)].is_zero() {
            let Some(swap) = (k + 1..n).find(|&r| !m[idx(r, k)].is_zero()) else {
                return Integer::new(0);
            };
            for j in 0..n {
                m.swap(idx(k, j), idx(swap, j));
            }
            negate = !negate;
        }
        for i in k + 1..n {
            for j in k + 1..n {
                let num = &(&m[idx(i, j)] * &m[idx(k, k)]) - &(&m[idx(i, k)] * &m[idx(k, j)]);
                // Exact by Sylvester's identity.
                m[idx(i, j)] = &num / &prev;
            }
        }
        prev = m[idx(k, k)].clone();
    }

    let det = m[idx(n - 1, n - 1)].clone();
    if negate {
        -det
    } else {
        det
    }
}

fn laplace(m: &Matrix) -> Result<RingElem> {
    let ring = m.ring();
    let n = m.num_rows();
    match n {
        0 => return Ok(ring.one()),
        1 => return Ok(m.entry_at(0, 0)),
        _ => {}
    }
    let rows: Vec<usize> = (1..n).collect();
    let mut det = ring.zero();
    for j in 0..n {
        let a = m.entry_at(0, j);
        if a.is_zero() {
            continue;
        }
        let cols: Vec<usize> = (0..n).filter(|&c| c != j).collect();
        let term = &a * &laplace(&submat(m, &rows, &cols)?)?;
        det = if j % 2 == 0 { det + &term } else { det - &term };
    }
    Ok(det)
}

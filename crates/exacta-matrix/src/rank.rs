//! Rank by Gaussian elimination.

use tracing::debug;

use crate::dense::Grid;
use crate::error::{fail, ring_err, ErrorKind, Result};
use crate::view::{Matrix, MatrixView};

/// Rank of a matrix, through the matrix's own `rank` hook.
///
/// # Errors
///
/// `NotIntegralDomain` over a ring with zero divisors.
pub fn rank(m: &Matrix) -> Result<usize> {
    m.rank()
}

/// Rank by Gaussian elimination over the fraction field.
///
/// # Errors
///
/// `NotIntegralDomain` over a ring with zero divisors.
pub fn rank_by_gauss(m: &Matrix) -> Result<usize> {
    eliminate(Grid::from_view(&**m), "rank_by_gauss").map(|(rank, _)| rank)
}

/// Rank together with the (ascending) indices of a maximal set of
/// linearly independent rows.
///
/// # Errors
///
/// `NotIntegralDomain` over a ring with zero divisors.
pub fn rank_and_indep_rows(m: &Matrix) -> Result<(usize, Vec<usize>)> {
    eliminate(Grid::from_view(&**m), "rank_and_indep_rows")
}

/// Default `rank` hook for views.
pub(crate) fn rank_of<M: MatrixView + ?Sized>(m: &M) -> Result<usize> {
    eliminate(Grid::from_view(m), "rank").map(|(rank, _)| rank)
}

/// Row echelon elimination that tracks where each row came from.
///
/// Columns without a pivot are skipped. The rows that end up in pivot
/// position were only ever combined with earlier pivot rows, so their
/// original indices are independent.
fn eliminate(g: Grid, context: &'static str) -> Result<(usize, Vec<usize>)> {
    let ring = g.ring();
    if !ring.is_integral_domain() {
        return fail(ErrorKind::NotIntegralDomain, context);
    }
    let mut g = g.lift().map_err(ring_err(context))?;
    let (rows, cols) = (g.num_rows(), g.num_cols());
    debug!(rows, cols, %ring, "rank: gauss");

    let mut origin: Vec<usize> = (0..rows).collect();
    let mut rank = 0;
    for col in 0..cols {
        if rank == rows {
            break;
        }
        let Some(pivot_row) = (rank..rows).find(|&r| !g[(r, col)].is_zero()) else {
            continue;
        };
        g.swap_rows(rank, pivot_row);
        origin.swap(rank, pivot_row);
        let inv = g[(rank, col)].inverse().map_err(ring_err(context))?;
        for row in rank + 1..rows {
            if !g[(row, col)].is_zero() {
                let factor = -(&g[(row, col)] * &inv);
                g.add_scaled_row(row, rank, &factor);
            }
        }
        rank += 1;
    }

    let mut independent = origin[..rank].to_vec();
    independent.sort_unstable();
    Ok((rank, independent))
}

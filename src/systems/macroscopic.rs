//! Macroscopic recovery
//!
//! Makes the streamed generation current (buffer swap), then recomputes
//! `rho = Σ f` and `u = Σ e f / rho` on interior cells.
//!
//! The division by `rho` is not guarded: a cell whose density reaches zero or
//! goes negative keeps the resulting `NaN`/`Inf`, exactly like an unchecked
//! solver would. Such cells are counted and the first one (row-major) is
//! reported so the caller can decide whether to stop.

use serde::Serialize;

use crate::domain::lattice::{D2Q9, Q};
use crate::grid::LatticeGrid;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A cell whose recovered state is unusable
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Degeneracy {
    pub x: u32,
    pub y: u32,
    pub rho: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecoveryScan {
    pub first: Option<Degeneracy>,
    pub count: u32,
}

impl RecoveryScan {
    #[inline]
    fn record(&mut self, x: u32, y: u32, rho: f32) {
        if self.first.is_none() {
            self.first = Some(Degeneracy { x, y, rho });
        }
        self.count += 1;
    }

    /// Combine scans in row order
    fn merge(self, later: RecoveryScan) -> RecoveryScan {
        RecoveryScan {
            first: self.first.or(later.first),
            count: self.count + later.count,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.count == 0
    }
}

pub fn update_macro_vars(grid: &mut LatticeGrid, lattice: &D2Q9) -> RecoveryScan {
    grid.swap_generations();

    let width = grid.width() as usize;
    let height = grid.height() as usize;
    let LatticeGrid { ref f_old, ref mut rho, ref mut ux, ref mut uy, .. } = *grid;

    #[cfg(feature = "parallel")]
    let rows: Vec<RecoveryScan> = rho
        .par_chunks_mut(width)
        .zip(ux.par_chunks_mut(width))
        .zip(uy.par_chunks_mut(width))
        .enumerate()
        .map(|(y, ((rho_row, ux_row), uy_row))| {
            if y > 0 && y + 1 < height {
                recover_row(f_old, lattice, width, y, rho_row, ux_row, uy_row)
            } else {
                RecoveryScan::default()
            }
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<RecoveryScan> = rho
        .chunks_mut(width)
        .zip(ux.chunks_mut(width))
        .zip(uy.chunks_mut(width))
        .enumerate()
        .map(|(y, ((rho_row, ux_row), uy_row))| {
            if y > 0 && y + 1 < height {
                recover_row(f_old, lattice, width, y, rho_row, ux_row, uy_row)
            } else {
                RecoveryScan::default()
            }
        })
        .collect();

    rows.into_iter().fold(RecoveryScan::default(), RecoveryScan::merge)
}

#[inline]
fn recover_row(
    f: &[f32],
    lattice: &D2Q9,
    width: usize,
    y: usize,
    rho_row: &mut [f32],
    ux_row: &mut [f32],
    uy_row: &mut [f32],
) -> RecoveryScan {
    let mut scan = RecoveryScan::default();

    for x in 1..width - 1 {
        let base = (y * width + x) * Q;
        let mut rho = 0.0f32;
        let mut mx = 0.0f32;
        let mut my = 0.0f32;
        for k in 0..Q {
            let fk = *fast!(f, [base + k]);
            let (ex, ey) = lattice.e(k);
            rho += fk;
            mx += ex as f32 * fk;
            my += ey as f32 * fk;
        }

        let u = mx / rho;
        let v = my / rho;
        fast!(rho_row, [x] = rho);
        fast!(ux_row, [x] = u);
        fast!(uy_row, [x] = v);

        if rho <= 0.0 || !rho.is_finite() || !u.is_finite() || !v.is_finite() {
            scan.record(x as u32, y as u32, rho);
        }
    }

    scan
}

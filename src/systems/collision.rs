//! Fused BGK collision + streaming
//!
//! `f_new[x][k] = (1 - 1/tau) * f_old[x - e_k][k] + (1/tau) * f_eq(state at x - e_k, k)`
//!
//! Reads only `f_old` and the cached macroscopic fields, writes only the
//! interior of `f_new`. Every output cell is independent, so rows run in
//! parallel when the `parallel` feature is on.

use crate::domain::equilibrium::f_eq;
use crate::domain::lattice::{D2Q9, Q};
use crate::grid::LatticeGrid;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Read-only view of the previous generation
struct Upstream<'a> {
    rho: &'a [f32],
    ux: &'a [f32],
    uy: &'a [f32],
    f: &'a [f32],
    width: usize,
}

pub fn collide_and_stream(grid: &mut LatticeGrid, lattice: &D2Q9, inv_tau: f32) {
    let width = grid.width() as usize;
    let height = grid.height() as usize;
    let LatticeGrid { ref rho, ref ux, ref uy, ref f_old, ref mut f_new, .. } = *grid;

    let upstream = Upstream { rho, ux, uy, f: f_old, width };
    let row_len = width * Q;

    #[cfg(feature = "parallel")]
    {
        f_new
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| {
                if y > 0 && y + 1 < height {
                    stream_row(&upstream, lattice, inv_tau, y, row);
                }
            });
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (y, row) in f_new.chunks_mut(row_len).enumerate() {
            if y > 0 && y + 1 < height {
                stream_row(&upstream, lattice, inv_tau, y, row);
            }
        }
    }
}

/// Interior cells of one row; `row` is that row's slice of `f_new`.
#[inline]
fn stream_row(up: &Upstream<'_>, lattice: &D2Q9, inv_tau: f32, y: usize, row: &mut [f32]) {
    let keep = 1.0 - inv_tau;

    for x in 1..up.width - 1 {
        let out = x * Q;
        for k in 0..Q {
            let (ex, ey) = lattice.e(k);
            // Interior cell minus a unit vector never leaves the grid.
            let sx = (x as isize - ex as isize) as usize;
            let sy = (y as isize - ey as isize) as usize;
            let src = sy * up.width + sx;

            let f = *fast!(up.f, [src * Q + k]);
            let eq = f_eq(
                lattice,
                *fast!(up.rho, [src]),
                *fast!(up.ux, [src]),
                *fast!(up.uy, [src]),
                k,
            );
            fast!(row, [out + k] = keep * f + inv_tau * eq);
        }
    }
}

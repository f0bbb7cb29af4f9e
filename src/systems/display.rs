//! Derived scalar fields for visualisation and comparison
//!
//! Nothing here is part of the solver state; fields are computed on demand
//! from the cached velocity.

use wasm_bindgen::prelude::*;

use crate::grid::LatticeGrid;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayField {
    /// |u|
    Speed = 0,
    VelocityX = 1,
    VelocityY = 2,
    /// dv/dx - du/dy
    Vorticity = 3,
}

impl DisplayField {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(DisplayField::Speed),
            1 => Some(DisplayField::VelocityX),
            2 => Some(DisplayField::VelocityY),
            3 => Some(DisplayField::Vorticity),
            _ => None,
        }
    }
}

/// Fill `out` (resized to the grid) with the requested field, row-major.
pub fn derive_display(grid: &LatticeGrid, field: DisplayField, out: &mut Vec<f32>) {
    out.resize(grid.size(), 0.0);
    let width = grid.width() as usize;

    match field {
        DisplayField::Speed => {
            #[cfg(feature = "parallel")]
            {
                out.par_iter_mut()
                    .zip(grid.ux.par_iter().zip(grid.uy.par_iter()))
                    .for_each(|(o, (&u, &v))| *o = (u * u + v * v).sqrt());
            }
            #[cfg(not(feature = "parallel"))]
            {
                for (o, (&u, &v)) in out.iter_mut().zip(grid.ux.iter().zip(grid.uy.iter())) {
                    *o = (u * u + v * v).sqrt();
                }
            }
        }
        DisplayField::VelocityX => out.copy_from_slice(&grid.ux),
        DisplayField::VelocityY => out.copy_from_slice(&grid.uy),
        DisplayField::Vorticity => {
            #[cfg(feature = "parallel")]
            {
                out.par_chunks_mut(width)
                    .enumerate()
                    .for_each(|(y, row)| vorticity_row(grid, y, row));
            }
            #[cfg(not(feature = "parallel"))]
            {
                for (y, row) in out.chunks_mut(width).enumerate() {
                    vorticity_row(grid, y, row);
                }
            }
        }
    }
}

fn vorticity_row(grid: &LatticeGrid, y: usize, row: &mut [f32]) {
    let w = grid.width() as usize;
    let h = grid.height() as usize;
    for (x, slot) in row.iter_mut().enumerate() {
        let dv_dx = gradient(&grid.uy, y * w, x, w, 1);
        let du_dy = gradient(&grid.ux, x, y, h, w);
        *slot = dv_dx - du_dy;
    }
}

/// Derivative along one axis: central differences inside, one-sided at the
/// two ends. `offset + i * stride` addresses element `i` of the line.
#[inline]
fn gradient(field: &[f32], offset: usize, i: usize, len: usize, stride: usize) -> f32 {
    let at = |j: usize| field[offset + j * stride];
    if i == 0 {
        at(1) - at(0)
    } else if i == len - 1 {
        at(i) - at(i - 1)
    } else {
        (at(i + 1) - at(i - 1)) * 0.5
    }
}

/// `u_x / reference_speed` along a vertical line (bottom to top).
pub fn velocity_profile_x(grid: &LatticeGrid, column: u32, reference_speed: f32) -> Option<Vec<f32>> {
    if column >= grid.width() {
        return None;
    }
    Some((0..grid.height()).map(|y| grid.velocity(column, y).0 / reference_speed).collect())
}

/// `u_y / reference_speed` along a horizontal line (left to right).
pub fn velocity_profile_y(grid: &LatticeGrid, row: u32, reference_speed: f32) -> Option<Vec<f32>> {
    if row >= grid.height() {
        return None;
    }
    Some((0..grid.width()).map(|x| grid.velocity(x, row).1 / reference_speed).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheared(w: u32, h: u32) -> LatticeGrid {
        // u = 0.01 * y, v = 0.02 * x  =>  vorticity = 0.02 - 0.01 everywhere
        let mut g = LatticeGrid::new(w, h);
        for y in 0..h {
            for x in 0..w {
                g.set_velocity(x, y, 0.01 * y as f32, 0.02 * x as f32);
            }
        }
        g
    }

    #[test]
    fn speed_is_velocity_magnitude() {
        let mut g = LatticeGrid::new(3, 3);
        g.set_velocity(1, 1, 0.03, 0.04);
        let mut out = Vec::new();
        derive_display(&g, DisplayField::Speed, &mut out);
        assert_eq!(out.len(), 9);
        assert!((out[g.index(1, 1)] - 0.05).abs() < 1e-7);
        assert_eq!(out[0], 0.0);
    }

    #[test]
    fn components_copy_the_field() {
        let g = sheared(4, 3);
        let mut out = Vec::new();
        derive_display(&g, DisplayField::VelocityY, &mut out);
        assert_eq!(out, g.uy);
        derive_display(&g, DisplayField::VelocityX, &mut out);
        assert_eq!(out, g.ux);
    }

    #[test]
    fn vorticity_of_linear_shear_is_uniform() {
        let g = sheared(5, 4);
        let mut out = Vec::new();
        derive_display(&g, DisplayField::Vorticity, &mut out);
        for v in out {
            assert!((v - 0.01).abs() < 1e-6);
        }
    }

    #[test]
    fn field_codes_match_discriminants() {
        for f in [DisplayField::Speed, DisplayField::VelocityX, DisplayField::VelocityY, DisplayField::Vorticity] {
            assert_eq!(DisplayField::from_code(f as u8), Some(f));
        }
        assert_eq!(DisplayField::from_code(4), None);
    }

    #[test]
    fn profile_is_normalised_and_bounds_checked() {
        let g = sheared(4, 3);
        let p = velocity_profile_x(&g, 2, 0.01).unwrap();
        assert_eq!(p.len(), 3);
        assert!((p[2] - 2.0).abs() < 1e-6);
        assert!(velocity_profile_x(&g, 4, 0.1).is_none());

        let q = velocity_profile_y(&g, 1, 0.02).unwrap();
        assert!((q[3] - 3.0).abs() < 1e-6);
        assert!(velocity_profile_y(&g, 3, 0.1).is_none());
    }
}

//! Lattice grid - Structure of Arrays (SoA) storage for the LBM state
//!
//! Macroscopic fields live in their own contiguous arrays (`rho`, `ux`, `uy`),
//! distributions in two flat `[cell * Q + k]` buffers. `f_old` is the
//! generation every stage reads; `f_new` is the streaming target. The two are
//! never aliased and trade places once per step.
//!
//! Cell index: `y * width + x`, with `x` in `0..nx` (left to right) and `y` in
//! `0..ny` (bottom to top).

use crate::domain::lattice::Q;

mod indexing;
mod accessors;
mod init;

/// SoA grid - one allocation per field, made once per simulation size
pub struct LatticeGrid {
    width: u32,
    height: u32,
    size: usize,

    pub rho: Vec<f32>,      // Density
    pub ux: Vec<f32>,       // Velocity, x component
    pub uy: Vec<f32>,       // Velocity, y component
    pub f_old: Vec<f32>,    // Current generation, size * Q
    pub f_new: Vec<f32>,    // Streaming target, size * Q
    pub mask: Vec<bool>,    // true inside the obstacle; fixed after init
}

impl LatticeGrid {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            size,
            rho: vec![1.0; size],
            ux: vec![0.0; size],
            uy: vec![0.0; size],
            f_old: vec![0.0; size * Q],
            f_new: vec![0.0; size * Q],
            mask: vec![false; size],
        }
    }

    /// Make the freshly streamed generation current.
    ///
    /// Constant-time handle swap; the stale buffer becomes the next streaming
    /// target and is fully rewritten on the interior before anyone reads it.
    #[inline]
    pub fn swap_generations(&mut self) {
        std::mem::swap(&mut self.f_old, &mut self.f_new);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_every_field_once() {
        let g = LatticeGrid::new(7, 5);
        assert_eq!(g.size(), 35);
        assert_eq!(g.rho.len(), 35);
        assert_eq!(g.f_old.len(), 35 * Q);
        assert_eq!(g.f_new.len(), 35 * Q);
        assert!(g.mask.iter().all(|m| !m));
    }

    #[test]
    fn swap_exchanges_buffers_without_copying() {
        let mut g = LatticeGrid::new(3, 3);
        g.f_new.fill(2.0);
        let new_ptr = g.f_new.as_ptr();
        g.swap_generations();
        assert_eq!(g.f_old.as_ptr(), new_ptr);
        assert!(g.f_old.iter().all(|&v| v == 2.0));
        assert!(g.f_new.iter().all(|&v| v == 0.0));
    }
}

//! D2Q9 lattice constants
//!
//! Index for velocity vectors:
//!     6   2   5
//!       \ | /
//!     3 - 0 - 1
//!       / | \
//!     7   4   8
//!
//! Collision, equilibrium and boundary extrapolation must all read the same
//! table, otherwise mass is no longer conserved.

/// Number of discrete velocities
pub const Q: usize = 9;

/// Lattice speed of sound, `1/sqrt(3)` in lattice units.
pub const SOUND_SPEED: f32 = 0.577_350_26;

/// Immutable weight/velocity table for the D2Q9 model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct D2Q9 {
    pub weights: [f32; Q],
    pub velocities: [[i32; 2]; Q],
}

/// The standard D2Q9 table (rest, 4 axis-aligned, 4 diagonal).
pub const LATTICE: D2Q9 = D2Q9 {
    weights: [
        4.0 / 9.0,
        1.0 / 9.0,
        1.0 / 9.0,
        1.0 / 9.0,
        1.0 / 9.0,
        1.0 / 36.0,
        1.0 / 36.0,
        1.0 / 36.0,
        1.0 / 36.0,
    ],
    velocities: [
        [0, 0],
        [1, 0],
        [0, 1],
        [-1, 0],
        [0, -1],
        [1, 1],
        [-1, 1],
        [-1, -1],
        [1, -1],
    ],
};

impl D2Q9 {
    #[inline(always)]
    pub fn weight(&self, k: usize) -> f32 {
        self.weights[k]
    }

    /// Lattice velocity `e_k` as `(ex, ey)`
    #[inline(always)]
    pub fn e(&self, k: usize) -> (i32, i32) {
        let [ex, ey] = self.velocities[k];
        (ex, ey)
    }

    /// `e_k · u`
    #[inline(always)]
    pub fn project(&self, k: usize, ux: f32, uy: f32) -> f32 {
        let (ex, ey) = self.e(k);
        ex as f32 * ux + ey as f32 * uy
    }
}

//! Maxwell-Boltzmann equilibrium for D2Q9
//!
//! `f_eq = w_k * rho * (1 + 3(e_k·u) + 4.5(e_k·u)^2 - 1.5|u|^2)`
//!
//! Precondition: `|u|` well below the lattice sound speed (`1/sqrt(3)`).
//! Larger speeds drive some `f_eq` negative; that is not reported here but is
//! the usual precursor of a degenerate run.

use super::lattice::{D2Q9, Q};

/// Equilibrium distribution for direction `k`.
#[inline(always)]
pub fn f_eq(lattice: &D2Q9, rho: f32, ux: f32, uy: f32, k: usize) -> f32 {
    let eu = lattice.project(k, ux, uy);
    let uv = ux * ux + uy * uy;
    lattice.weight(k) * rho * (1.0 + 3.0 * eu + 4.5 * eu * eu - 1.5 * uv)
}

/// All nine equilibrium values for one cell state.
#[inline]
pub fn equilibrium(lattice: &D2Q9, rho: f32, ux: f32, uy: f32) -> [f32; Q] {
    let mut out = [0.0f32; Q];
    for (k, slot) in out.iter_mut().enumerate() {
        *slot = f_eq(lattice, rho, ux, uy, k);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lattice::LATTICE;

    #[test]
    fn zero_velocity_reduces_to_weights() {
        let rho = 1.3;
        for k in 0..Q {
            let v = f_eq(&LATTICE, rho, 0.0, 0.0, k);
            assert!((v - LATTICE.weight(k) * rho).abs() < 1e-7);
        }
    }

    #[test]
    fn moments_recover_density_and_momentum() {
        let (rho, ux, uy) = (0.97, 0.06, -0.03);
        let feq = equilibrium(&LATTICE, rho, ux, uy);
        let mut sum = 0.0f32;
        let mut jx = 0.0f32;
        let mut jy = 0.0f32;
        for k in 0..Q {
            let (ex, ey) = LATTICE.e(k);
            sum += feq[k];
            jx += ex as f32 * feq[k];
            jy += ey as f32 * feq[k];
        }
        assert!((sum - rho).abs() < 1e-6);
        assert!((jx / sum - ux).abs() < 1e-6);
        assert!((jy / sum - uy).abs() < 1e-6);
    }

    #[test]
    fn high_speed_goes_negative() {
        // Past the sound speed the rest population turns negative.
        let v = f_eq(&LATTICE, 1.0, 0.9, 0.0, 0);
        assert!(v < 0.0);
    }
}

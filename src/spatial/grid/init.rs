use super::*;

use crate::domain::equilibrium::equilibrium;
use crate::domain::lattice::D2Q9;
use crate::domain::params::Obstacle;

impl LatticeGrid {
    /// Uniform density, zero velocity, equilibrium distributions in both
    /// generations.
    pub fn fill_equilibrium(&mut self, lattice: &D2Q9, rho0: f32) {
        self.rho.fill(rho0);
        self.ux.fill(0.0);
        self.uy.fill(0.0);

        let feq = equilibrium(lattice, rho0, 0.0, 0.0);
        for cell in self.f_old.chunks_exact_mut(Q) {
            cell.copy_from_slice(&feq);
        }
        self.f_new.copy_from_slice(&self.f_old);
    }

    /// Rasterise the obstacle circle into the mask. Returns the solid cell count.
    pub fn rasterize_obstacle(&mut self, obstacle: Option<&Obstacle>) -> usize {
        self.mask.fill(false);
        let Some(obstacle) = obstacle else {
            return 0;
        };

        let mut solid = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                if obstacle.contains(x, y) {
                    let idx = self.index(x, y);
                    self.mask[idx] = true;
                    solid += 1;
                }
            }
        }
        solid
    }
}

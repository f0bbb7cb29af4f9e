use super::super::*;

impl LatticeGrid {
    // === Macroscopic field access ===
    #[inline]
    pub fn density(&self, x: u32, y: u32) -> f32 {
        self.rho[self.index(x, y)]
    }

    #[inline]
    pub fn velocity(&self, x: u32, y: u32) -> (f32, f32) {
        let idx = self.index(x, y);
        (self.ux[idx], self.uy[idx])
    }

    #[inline]
    pub fn set_velocity(&mut self, x: u32, y: u32, ux: f32, uy: f32) {
        let idx = self.index(x, y);
        self.ux[idx] = ux;
        self.uy[idx] = uy;
    }

    #[inline]
    pub fn set_density(&mut self, x: u32, y: u32, rho: f32) {
        let idx = self.index(x, y);
        self.rho[idx] = rho;
    }

    #[inline]
    pub fn is_solid(&self, x: u32, y: u32) -> bool {
        self.mask[self.index(x, y)]
    }

    pub fn solid_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }
}

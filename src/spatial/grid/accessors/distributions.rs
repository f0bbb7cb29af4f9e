use super::super::*;

impl LatticeGrid {
    // === Distribution access (current generation) ===

    /// The nine `f_old` values of a cell
    #[inline]
    pub fn distributions(&self, x: u32, y: u32) -> &[f32] {
        let base = Self::dist_base(self.index(x, y));
        &self.f_old[base..base + Q]
    }

    #[inline]
    pub fn distributions_mut(&mut self, x: u32, y: u32) -> &mut [f32] {
        let base = Self::dist_base(self.index(x, y));
        &mut self.f_old[base..base + Q]
    }

    /// `Σ_k f_old[k]` for one cell (not the cached `rho`)
    #[inline]
    pub fn zeroth_moment(&self, x: u32, y: u32) -> f32 {
        self.distributions(x, y).iter().sum()
    }
}

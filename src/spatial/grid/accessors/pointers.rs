use super::super::*;

impl LatticeGrid {
    // === Raw pointers for JS interop (zero-copy Float32Array views) ===
    pub fn density_ptr(&self) -> *const f32 {
        self.rho.as_ptr()
    }

    pub fn velocity_x_ptr(&self) -> *const f32 {
        self.ux.as_ptr()
    }

    pub fn velocity_y_ptr(&self) -> *const f32 {
        self.uy.as_ptr()
    }
}

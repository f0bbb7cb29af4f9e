use crate::systems::display::{self, derive_display};

use super::{DisplayField, SolverCore};

pub(super) fn compute_display(core: &mut SolverCore, field: DisplayField) -> &[f32] {
    derive_display(&core.grid, field, &mut core.display);
    &core.display
}

pub(super) fn velocity_profile_x(core: &SolverCore, column: u32, reference_speed: f32) -> Option<Vec<f32>> {
    display::velocity_profile_x(&core.grid, column, reference_speed)
}

pub(super) fn velocity_profile_y(core: &SolverCore, row: u32, reference_speed: f32) -> Option<Vec<f32>> {
    display::velocity_profile_y(&core.grid, row, reference_speed)
}

pub(super) fn display_ptr(core: &SolverCore) -> *const f32 {
    core.display.as_ptr()
}

/// Flat `[cell * Q + k]` copy of the current distribution generation
pub(super) fn distributions_snapshot(core: &SolverCore) -> Vec<f32> {
    core.grid.f_old.clone()
}

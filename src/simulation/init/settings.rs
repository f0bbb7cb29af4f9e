use crate::systems::display::derive_display;

use super::perf_stats::PerfStats;
use super::{DisplayField, SolverCore};

pub(super) fn enable_perf_metrics(core: &mut SolverCore, enabled: bool) {
    core.perf_enabled = enabled;
    if !enabled {
        core.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(core: &SolverCore) -> PerfStats {
    core.perf_stats.clone()
}

/// Switch the per-step display field. The buffer is refreshed right away so
/// it never shows a different field than the one selected.
pub(super) fn set_display_field(core: &mut SolverCore, field: Option<DisplayField>) {
    core.display_field = field;
    match field {
        Some(f) => derive_display(&core.grid, f, &mut core.display),
        None => core.display.clear(),
    }
}

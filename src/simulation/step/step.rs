use crate::domain::error::{SolverError, SolverResult};
use crate::systems::collision::collide_and_stream;
use crate::systems::diagnostics;
use crate::systems::display::derive_display;
use crate::systems::macroscopic::{update_macro_vars, RecoveryScan};

use super::{PerfTimer, SolverCore, SolverState};

/// Refuse to step from a state that cannot advance.
pub(super) fn ensure_steppable(core: &SolverCore) -> SolverResult<()> {
    match core.state {
        SolverState::Uninitialized => Err(SolverError::NotInitialized),
        SolverState::Finished => Err(SolverError::Finished { steps: core.params.steps }),
        SolverState::Faulted => Err(SolverError::Halted { step: core.step }),
        SolverState::Initialized | SolverState::Stepping => Ok(()),
    }
}

pub(super) fn step(core: &mut SolverCore) -> SolverResult<()> {
    ensure_steppable(core)?;
    core.state = SolverState::Stepping;

    let perf_on = core.perf_enabled;
    if perf_on {
        core.perf_stats.reset();
    }
    let step_start = perf_on.then(PerfTimer::start);
    let mut lap = step_start;

    // === COLLIDE + STREAM: f_old -> f_new on the interior ===
    collide_and_stream(&mut core.grid, &core.lattice, core.inv_tau);
    if let Some(t) = lap.as_mut() {
        core.perf_stats.collide_ms = t.lap_ms();
    }

    // === MACROSCOPIC: swap generations, recover rho/u on the interior ===
    let scan = update_macro_vars(&mut core.grid, &core.lattice);
    if let Some(t) = lap.as_mut() {
        core.perf_stats.macro_ms = t.lap_ms();
    }

    // === BOUNDARIES: outer edges, then the obstacle ===
    core.boundary.apply(&mut core.grid, &core.lattice);
    if let Some(t) = lap.as_mut() {
        core.perf_stats.boundary_ms = t.lap_ms();
    }

    // === DISPLAY ===
    if let Some(field) = core.display_field {
        derive_display(&core.grid, field, &mut core.display);
        if let Some(t) = lap.as_mut() {
            core.perf_stats.display_ms = t.lap_ms();
        }
    }

    core.step += 1;
    core.health.record(core.step, &scan);

    if let Some(start) = step_start {
        core.perf_stats.cells = core.grid.size() as u32;
        core.perf_stats.solid_cells = core.grid.solid_count() as u32;
        core.perf_stats.degenerate_cells = scan.count;
        core.perf_stats.total_mass = diagnostics::total_mass(&core.grid);
        core.perf_stats.max_speed = diagnostics::max_speed(&core.grid);
        core.perf_stats.step_ms = start.elapsed_ms();
    }

    report_progress(core);
    check_health(core, &scan)?;

    if core.step >= core.params.steps {
        core.state = SolverState::Finished;
        log::info!("lbm: finished {} steps", core.step);
    }
    Ok(())
}

fn report_progress(core: &SolverCore) {
    let every = core.params.log_every;
    if every > 0 && core.step % every == 0 {
        log::debug!(
            "lbm: step {} / {}, max |u| = {:.5}",
            core.step,
            core.params.steps,
            diagnostics::max_speed(&core.grid),
        );
    }
}

fn check_health(core: &mut SolverCore, scan: &RecoveryScan) -> SolverResult<()> {
    let Some(first) = scan.first else {
        return Ok(());
    };

    log::warn!(
        "lbm: step {}: {} degenerate cell(s), first at ({}, {}) with rho = {}",
        core.step,
        scan.count,
        first.x,
        first.y,
        first.rho,
    );

    if core.params.halt_on_degeneracy {
        core.state = SolverState::Faulted;
        return Err(SolverError::Degenerate {
            step: core.step,
            x: first.x,
            y: first.y,
            rho: first.rho,
        });
    }
    Ok(())
}

use crate::domain::error::ConfigError;
use crate::domain::lattice::LATTICE;
use crate::domain::params::SimulationParameters;
use crate::grid::LatticeGrid;
use crate::systems::boundary::BoundaryPolicy;
use crate::systems::diagnostics::HealthReport;

use super::perf_stats::PerfStats;
use super::{DisplayField, SolverCore, SolverState};

/// Equilibrium density every run starts from
const INITIAL_DENSITY: f32 = 1.0;

pub(super) fn create_solver_core(params: SimulationParameters) -> Result<SolverCore, ConfigError> {
    params.validate()?;

    let grid = LatticeGrid::new(params.nx, params.ny);
    let boundary = BoundaryPolicy::new(&params);

    Ok(SolverCore {
        lattice: LATTICE,
        inv_tau: params.inv_tau(),
        grid,
        boundary,
        state: SolverState::Uninitialized,
        step: 0,
        health: HealthReport::default(),
        display_field: Some(DisplayField::Speed),
        display: Vec::new(),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
        params,
    })
}

pub(super) fn initialize(core: &mut SolverCore) {
    core.grid.fill_equilibrium(&core.lattice, INITIAL_DENSITY);
    let solid = core.grid.rasterize_obstacle(core.params.obstacle.as_ref());
    core.boundary.bind_obstacle(&core.grid, core.params.obstacle.as_ref());

    core.step = 0;
    core.health = HealthReport::default();
    core.perf_stats.reset();
    core.display.clear();

    core.state = if core.params.steps == 0 {
        SolverState::Finished
    } else {
        SolverState::Initialized
    };

    log::info!(
        "lbm: {}x{} grid, tau = {:.4}, {} solid cells, {} obstacle links, {} steps",
        core.grid.width(),
        core.grid.height(),
        core.params.tau(),
        solid,
        core.boundary.links().len(),
        core.params.steps,
    );
}

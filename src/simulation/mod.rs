//! Solver - time-stepped D2Q9 simulation
//!
//! `SolverCore` only orchestrates; the numerical work lives in systems/:
//! - collision.rs   - fused BGK collide-and-stream
//! - macroscopic.rs - generation swap + density/velocity recovery
//! - boundary.rs    - outer edges and obstacle (non-equilibrium extrapolation)
//! - display.rs     - derived scalar fields
//!
//! Lifecycle: `Uninitialized -> Initialized -> Stepping* -> Finished`.
//! A degenerate cell with `halt_on_degeneracy` set moves the solver to
//! `Faulted` instead. The loop runs exactly `steps` iterations; there is no
//! convergence check, callers inspect state through the `run` observer.

use std::ops::ControlFlow;

use crate::domain::error::{ConfigError, SolverResult};
use crate::domain::lattice::D2Q9;
use crate::domain::params::SimulationParameters;
use crate::grid::LatticeGrid;
use crate::systems::boundary::BoundaryPolicy;
use crate::systems::diagnostics::{self, HealthReport};
use crate::systems::display::DisplayField;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/step.rs"]
mod step;
#[path = "step/run.rs"]
mod run;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::Simulation;
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    Uninitialized,
    Initialized,
    Stepping,
    Finished,
    Faulted,
}

/// The simulation solver
pub struct SolverCore {
    params: SimulationParameters,
    lattice: D2Q9,
    inv_tau: f32,
    grid: LatticeGrid,
    boundary: BoundaryPolicy,

    // State
    state: SolverState,
    step: u64,
    health: HealthReport,

    // Display field recomputed after every step (None = on demand only)
    display_field: Option<DisplayField>,
    display: Vec<f32>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SolverCore {
    /// Validate parameters and allocate the grid. Call `init` before stepping.
    pub fn new(params: SimulationParameters) -> Result<Self, ConfigError> {
        init::create_solver_core(params)
    }

    /// `new` followed by `init`
    pub fn initialized(params: SimulationParameters) -> Result<Self, ConfigError> {
        let mut core = Self::new(params)?;
        core.init();
        Ok(core)
    }

    /// Uniform density 1, zero velocity, equilibrium distributions, obstacle mask.
    /// Calling it again restarts the run from step 0.
    pub fn init(&mut self) {
        init::initialize(self);
    }

    /// One full pipeline pass: collide-and-stream, recovery, boundaries, display.
    pub fn step(&mut self) -> SolverResult<()> {
        step::step(self)
    }

    /// Run every remaining step, calling `observer` after each committed step.
    /// Returns the number of steps executed.
    pub fn run<F>(&mut self, observer: F) -> SolverResult<u64>
    where
        F: FnMut(&SolverCore) -> ControlFlow<()>,
    {
        run::run(self, observer)
    }

    /// Run every remaining step without inspection.
    pub fn run_to_end(&mut self) -> SolverResult<u64> {
        run::run(self, |_| ControlFlow::Continue(()))
    }

    /// Advance at most `n` steps (fewer if the run finishes).
    pub fn run_steps(&mut self, n: u64) -> SolverResult<u64> {
        run::run_steps(self, n)
    }

    pub fn params(&self) -> &SimulationParameters { &self.params }

    pub fn lattice(&self) -> &D2Q9 { &self.lattice }

    pub fn grid(&self) -> &LatticeGrid { &self.grid }

    /// Direct grid access between steps (seeding perturbations, tests).
    /// The obstacle mask must not be edited.
    pub fn grid_mut(&mut self) -> &mut LatticeGrid { &mut self.grid }

    pub fn boundary(&self) -> &BoundaryPolicy { &self.boundary }

    pub fn state(&self) -> SolverState { self.state }

    pub fn step_count(&self) -> u64 { self.step }

    pub fn steps_remaining(&self) -> u64 { self.params.steps.saturating_sub(self.step) }

    pub fn is_finished(&self) -> bool { self.state == SolverState::Finished }

    pub fn tau(&self) -> f32 { self.params.tau() }

    pub fn health(&self) -> &HealthReport { &self.health }

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    /// Density field, row-major
    pub fn density(&self) -> &[f32] { &self.grid.rho }

    pub fn velocity_x(&self) -> &[f32] { &self.grid.ux }

    pub fn velocity_y(&self) -> &[f32] { &self.grid.uy }

    pub fn velocity(&self, x: u32, y: u32) -> (f32, f32) { self.grid.velocity(x, y) }

    pub fn total_mass(&self) -> f64 { diagnostics::total_mass(&self.grid) }

    pub fn max_speed(&self) -> f32 { diagnostics::max_speed(&self.grid) }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub fn set_display_field(&mut self, field: Option<DisplayField>) {
        settings::set_display_field(self, field);
    }

    pub fn display_field(&self) -> Option<DisplayField> { self.display_field }

    /// Display buffer as of the last step (or the last `compute_display`)
    pub fn display(&self) -> &[f32] { &self.display }

    /// Derive `field` from the current state into the display buffer.
    pub fn compute_display(&mut self, field: DisplayField) -> &[f32] {
        render_extract::compute_display(self, field)
    }

    pub fn display_ptr(&self) -> *const f32 {
        render_extract::display_ptr(self)
    }

    /// Copy of the current distributions, `[cell * Q + k]`
    pub fn distributions_snapshot(&self) -> Vec<f32> {
        render_extract::distributions_snapshot(self)
    }

    /// `u_x / reference_speed` along `column`, bottom to top.
    pub fn velocity_profile_x(&self, column: u32, reference_speed: f32) -> Option<Vec<f32>> {
        render_extract::velocity_profile_x(self, column, reference_speed)
    }

    /// `u_y / reference_speed` along `row`, left to right.
    pub fn velocity_profile_y(&self, row: u32, reference_speed: f32) -> Option<Vec<f32>> {
        render_extract::velocity_profile_y(self, row, reference_speed)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

//! LBM Engine - D2Q9 lattice Boltzmann flow solver (native + WASM)
//!
//! Architecture:
//! - core/       - Indexing helpers and safety macros
//! - domain/     - Lattice constants, equilibrium, parameters, errors
//! - spatial/    - Grid state (SoA fields, distribution buffers, obstacle mask)
//! - systems/    - Pipeline stages: collision, macroscopic recovery, boundaries, display
//! - simulation/ - Solver orchestration and the JS facade
//!
//! Pipeline per step: collide-and-stream -> macroscopic recovery -> boundary
//! conditions -> (optional) display field. Every stage is a whole-grid pass;
//! the stage boundaries are the only synchronisation points.

// Utils with safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;

pub use spatial::grid;
pub use domain::lattice;
pub use domain::equilibrium;
pub use domain::params;
pub use domain::error;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(feature = "wasm-threads")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🦀 LBM WASM Engine initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::error::{ConfigError, SolverError, SolverResult};
pub use domain::lattice::{D2Q9, LATTICE, Q};
pub use domain::params::{BoundaryKind, Edge, EdgeCondition, Obstacle, SimulationParameters};
pub use grid::LatticeGrid;
pub use simulation::{PerfStats, Simulation, SolverCore, SolverState};
pub use systems::diagnostics::HealthReport;
pub use systems::display::DisplayField;

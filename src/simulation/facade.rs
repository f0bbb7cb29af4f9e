use wasm_bindgen::prelude::*;

use crate::domain::params::{Obstacle, SimulationParameters};

use super::perf_stats::PerfStats;
use super::{DisplayField, SolverCore, SolverState};

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// JS handle: an initialized solver plus the pointer accessors a renderer
/// needs to read fields straight out of wasm memory.
#[wasm_bindgen]
pub struct Simulation {
    core: SolverCore,
}

impl Simulation {
    fn from_params(params: SimulationParameters) -> Result<Simulation, JsValue> {
        let core = SolverCore::initialized(params).map_err(js_err)?;
        Ok(Self { core })
    }

    /// Native access to the underlying solver
    pub fn core(&self) -> &SolverCore {
        &self.core
    }
}

#[wasm_bindgen]
impl Simulation {
    /// `bc_type`: 4 codes (0 = Dirichlet, 1 = Neumann) for left, top, right, bottom.
    /// `bc_value`: 8 floats, `[ux, uy]` per edge in the same order.
    #[wasm_bindgen(constructor)]
    pub fn new(
        nx: u32,
        ny: u32,
        niu: f32,
        bc_type: Vec<u8>,
        bc_value: Vec<f32>,
        steps: u64,
    ) -> Result<Simulation, JsValue> {
        let params = SimulationParameters::from_codes(nx, ny, niu, &bc_type, &bc_value, None, steps)
            .map_err(js_err)?;
        Self::from_params(params)
    }

    #[wasm_bindgen(js_name = withCylinder)]
    #[allow(clippy::too_many_arguments)]
    pub fn with_cylinder(
        nx: u32,
        ny: u32,
        niu: f32,
        bc_type: Vec<u8>,
        bc_value: Vec<f32>,
        steps: u64,
        cx: f32,
        cy: f32,
        radius: f32,
    ) -> Result<Simulation, JsValue> {
        let obstacle = Some(Obstacle::new(cx, cy, radius));
        let params = SimulationParameters::from_codes(nx, ny, niu, &bc_type, &bc_value, obstacle, steps)
            .map_err(js_err)?;
        Self::from_params(params)
    }

    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<Simulation, JsValue> {
        let params = SimulationParameters::from_json(json).map_err(js_err)?;
        Self::from_params(params)
    }

    #[wasm_bindgen(js_name = karmanVortexStreet)]
    pub fn karman_vortex_street() -> Result<Simulation, JsValue> {
        Self::from_params(SimulationParameters::karman_vortex_street())
    }

    #[wasm_bindgen(js_name = lidDrivenCavity)]
    pub fn lid_driven_cavity() -> Result<Simulation, JsValue> {
        Self::from_params(SimulationParameters::lid_driven_cavity())
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn step_count(&self) -> u64 { self.core.step_count() }

    #[wasm_bindgen(getter)]
    pub fn steps_remaining(&self) -> u64 { self.core.steps_remaining() }

    #[wasm_bindgen(getter)]
    pub fn tau(&self) -> f32 { self.core.tau() }

    #[wasm_bindgen(getter)]
    pub fn finished(&self) -> bool { self.core.is_finished() }

    #[wasm_bindgen(getter)]
    pub fn faulted(&self) -> bool { self.core.state() == SolverState::Faulted }

    /// Restart from uniform equilibrium at step 0
    pub fn reset(&mut self) {
        self.core.init();
    }

    /// Advance one step
    pub fn step(&mut self) -> Result<(), JsValue> {
        self.core.step().map_err(js_err)
    }

    /// Advance up to `n` steps (one animation frame's worth); returns how many ran
    pub fn run_steps(&mut self, n: u32) -> Result<u32, JsValue> {
        let done = self.core.run_steps(n as u64).map_err(js_err)?;
        Ok(done as u32)
    }

    /// Field code: 0 = speed, 1 = u_x, 2 = u_y, 3 = vorticity. Anything else
    /// turns per-step display updates off.
    pub fn set_display_field(&mut self, code: u8) {
        self.core.set_display_field(DisplayField::from_code(code));
    }

    /// Recompute `code`'s field into the display buffer; returns its pointer.
    pub fn compute_display(&mut self, code: u8) -> Result<u32, JsValue> {
        let field = DisplayField::from_code(code)
            .ok_or_else(|| JsValue::from_str(&format!("unknown display field {code}")))?;
        Ok(self.core.compute_display(field).as_ptr() as u32)
    }

    pub fn display_ptr(&self) -> u32 { self.core.display_ptr() as u32 }

    pub fn display_len(&self) -> usize { self.core.display().len() }

    pub fn density_ptr(&self) -> u32 { self.core.grid().density_ptr() as u32 }

    pub fn velocity_x_ptr(&self) -> u32 { self.core.grid().velocity_x_ptr() as u32 }

    pub fn velocity_y_ptr(&self) -> u32 { self.core.grid().velocity_y_ptr() as u32 }

    pub fn cells_len(&self) -> usize { self.core.grid().size() }

    /// Normalised `u_x` profile along a column (empty when out of range)
    pub fn velocity_profile_x(&self, column: u32, reference_speed: f32) -> Vec<f32> {
        self.core.velocity_profile_x(column, reference_speed).unwrap_or_default()
    }

    /// Normalised `u_y` profile along a row (empty when out of range)
    pub fn velocity_profile_y(&self, row: u32, reference_speed: f32) -> Vec<f32> {
        self.core.velocity_profile_y(row, reference_speed).unwrap_or_default()
    }

    pub fn total_mass(&self) -> f64 { self.core.total_mass() }

    pub fn max_speed(&self) -> f32 { self.core.max_speed() }

    pub fn health_json(&self) -> String { self.core.health().to_json() }

    pub fn params_json(&self) -> String { self.core.params().to_json() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }
}

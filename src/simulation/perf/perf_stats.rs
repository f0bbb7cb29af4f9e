use wasm_bindgen::prelude::*;

/// Per-step timings and field summaries, filled only while perf metrics are on.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) collide_ms: f64,
    pub(super) macro_ms: f64,
    pub(super) boundary_ms: f64,
    pub(super) display_ms: f64,
    pub(super) cells: u32,
    pub(super) solid_cells: u32,
    pub(super) degenerate_cells: u32,
    pub(super) total_mass: f64,
    pub(super) max_speed: f32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn collide_ms(&self) -> f64 { self.collide_ms }
    #[wasm_bindgen(getter)]
    pub fn macro_ms(&self) -> f64 { self.macro_ms }
    #[wasm_bindgen(getter)]
    pub fn boundary_ms(&self) -> f64 { self.boundary_ms }
    #[wasm_bindgen(getter)]
    pub fn display_ms(&self) -> f64 { self.display_ms }

    #[wasm_bindgen(getter)]
    pub fn cells(&self) -> u32 { self.cells }
    #[wasm_bindgen(getter)]
    pub fn solid_cells(&self) -> u32 { self.solid_cells }
    #[wasm_bindgen(getter)]
    pub fn degenerate_cells(&self) -> u32 { self.degenerate_cells }
    #[wasm_bindgen(getter)]
    pub fn total_mass(&self) -> f64 { self.total_mass }
    #[wasm_bindgen(getter)]
    pub fn max_speed(&self) -> f32 { self.max_speed }
}

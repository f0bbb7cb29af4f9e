//! Run health and global diagnostics

use serde::Serialize;

use super::macroscopic::{Degeneracy, RecoveryScan};
use crate::grid::LatticeGrid;

/// Numerical health of a run, refreshed after every step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Last completed step
    pub step: u64,
    /// Degenerate cells found on the last step
    pub degenerate_cells: u32,
    /// First degenerate cell ever seen, with the step it appeared on
    pub first_fault: Option<(u64, Degeneracy)>,
    /// Steps that produced at least one degenerate cell
    pub faulty_steps: u64,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.degenerate_cells == 0
    }

    pub fn has_ever_faulted(&self) -> bool {
        self.first_fault.is_some()
    }

    pub(crate) fn record(&mut self, step: u64, scan: &RecoveryScan) {
        self.step = step;
        self.degenerate_cells = scan.count;
        if let Some(d) = scan.first {
            self.faulty_steps += 1;
            if self.first_fault.is_none() {
                self.first_fault = Some((step, d));
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Σ rho over every cell (accumulated in f64, row-major, so it is reproducible)
pub fn total_mass(grid: &LatticeGrid) -> f64 {
    grid.rho.iter().map(|&r| r as f64).sum()
}

/// Σ rho over cells updated by collision/recovery only (0 when there are none)
pub fn interior_mass(grid: &LatticeGrid) -> f64 {
    let mut sum = 0.0f64;
    for y in 1..grid.height().saturating_sub(1) {
        for x in 1..grid.width().saturating_sub(1) {
            sum += grid.density(x, y) as f64;
        }
    }
    sum
}

/// Largest |u| on the grid. NaN as soon as any cell's speed is NaN, so a
/// degenerated run never reports a finite maximum.
pub fn max_speed(grid: &LatticeGrid) -> f32 {
    grid.ux
        .iter()
        .zip(grid.uy.iter())
        .map(|(&u, &v)| (u * u + v * v).sqrt())
        .fold(0.0f32, |max, s| if max.is_nan() || s.is_nan() { f32::NAN } else { max.max(s) })
}

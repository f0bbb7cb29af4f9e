//! Error taxonomy
//!
//! Configuration problems are caught before any allocation; numerical faults
//! surface from the step loop with the step index and the offending cell.

use thiserror::Error;

use super::params::Edge;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("viscosity {niu} gives tau = {tau}; tau must exceed 0.5 (niu >= 0 and finite)")]
    InvalidViscosity { niu: f32, tau: f32 },

    #[error("grid {nx}x{ny} has no interior cells; both dimensions must be at least 3")]
    GridTooSmall { nx: u32, ny: u32 },

    #[error("unknown boundary type code {0} (0 = Dirichlet, 1 = Neumann)")]
    InvalidBoundaryCode(u8),

    #[error("{edge:?} boundary velocity must be finite")]
    InvalidBoundaryVelocity { edge: Edge },

    #[error("expected {expected} values for {what}, got {got}")]
    WrongArity { what: &'static str, expected: usize, got: usize },

    #[error("obstacle center and radius must be finite with radius > 0 (got center ({cx}, {cy}), radius {radius})")]
    InvalidObstacle { cx: f32, cy: f32, radius: f32 },

    #[error("obstacle covers the entire {edge:?} edge")]
    ObstacleCoversEdge { edge: Edge },

    #[error("invalid parameters JSON: {0}")]
    Json(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("solver has not been initialized")]
    NotInitialized,

    #[error("solver already finished all {steps} steps")]
    Finished { steps: u64 },

    #[error("solver halted after a numerical fault on step {step}")]
    Halted { step: u64 },

    #[error("density degenerated to {rho} at cell ({x}, {y}) on step {step}")]
    Degenerate { step: u64, x: u32, y: u32, rho: f32 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type SolverResult<T> = Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_message_names_step_and_cell() {
        let err = SolverError::Degenerate { step: 42, x: 3, y: 7, rho: 0.0 };
        let msg = err.to_string();
        assert!(msg.contains("step 42"));
        assert!(msg.contains("(3, 7)"));
    }

    #[test]
    fn config_errors_convert_into_solver_errors() {
        let err: SolverError = ConfigError::GridTooSmall { nx: 2, ny: 9 }.into();
        assert!(matches!(err, SolverError::Config(ConfigError::GridTooSmall { nx: 2, ny: 9 })));
    }
}

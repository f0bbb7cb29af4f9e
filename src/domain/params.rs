//! Simulation parameters
//!
//! Immutable for the duration of a run. Loaded from camelCase JSON or built
//! from the classic `(bc_type, bc_value)` code arrays, ordered
//! `[left, top, right, bottom]`.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

const DEFAULT_STEPS: u64 = 60_000;
const DEFAULT_LOG_EVERY: u64 = 1_000;

/// Outer boundary type. Codes: 0 = Dirichlet, 1 = Neumann.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    /// Velocity clamped to the configured value
    Dirichlet,
    /// Velocity copied from the nearest interior neighbour (zero gradient)
    Neumann,
}

impl TryFrom<u8> for BoundaryKind {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(BoundaryKind::Dirichlet),
            1 => Ok(BoundaryKind::Neumann),
            other => Err(ConfigError::InvalidBoundaryCode(other)),
        }
    }
}

/// Outer edges in configuration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Edge::Left => 0,
            Edge::Top => 1,
            Edge::Right => 2,
            Edge::Bottom => 3,
        }
    }
}

/// Boundary type plus the velocity used when the edge is Dirichlet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeCondition {
    pub kind: BoundaryKind,
    #[serde(default)]
    pub velocity: [f32; 2],
}

impl EdgeCondition {
    pub const fn dirichlet(ux: f32, uy: f32) -> Self {
        Self { kind: BoundaryKind::Dirichlet, velocity: [ux, uy] }
    }

    pub const fn neumann() -> Self {
        Self { kind: BoundaryKind::Neumann, velocity: [0.0, 0.0] }
    }

    /// Resting no-slip wall.
    pub const fn wall() -> Self {
        Self::dirichlet(0.0, 0.0)
    }
}

/// Circular obstacle in lattice coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
}

impl Obstacle {
    pub fn new(cx: f32, cy: f32, radius: f32) -> Self {
        Self { cx, cy, radius }
    }

    /// Cell-centre test against the circle (boundary inclusive).
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        let dx = x as f32 - self.cx;
        let dy = y as f32 - self.cy;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParameters {
    pub nx: u32,
    pub ny: u32,
    /// Kinematic viscosity in lattice units
    pub niu: f32,
    /// `[left, top, right, bottom]`
    pub boundaries: [EdgeCondition; 4],
    #[serde(default)]
    pub obstacle: Option<Obstacle>,
    #[serde(default = "default_steps")]
    pub steps: u64,
    /// Stop the run at the first degenerate cell instead of carrying on.
    #[serde(default = "default_halt")]
    pub halt_on_degeneracy: bool,
    /// Progress log period in steps (0 disables)
    #[serde(default = "default_log_every")]
    pub log_every: u64,
}

fn default_steps() -> u64 {
    DEFAULT_STEPS
}

fn default_halt() -> bool {
    true
}

fn default_log_every() -> u64 {
    DEFAULT_LOG_EVERY
}

impl SimulationParameters {
    pub fn new(nx: u32, ny: u32, niu: f32, boundaries: [EdgeCondition; 4]) -> Self {
        Self {
            nx,
            ny,
            niu,
            boundaries,
            obstacle: None,
            steps: DEFAULT_STEPS,
            halt_on_degeneracy: true,
            log_every: DEFAULT_LOG_EVERY,
        }
    }

    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacle = Some(obstacle);
        self
    }

    pub fn with_steps(mut self, steps: u64) -> Self {
        self.steps = steps;
        self
    }

    /// Build from code arrays: `bc_type` holds 4 codes, `bc_value` 8 floats
    /// (`[ux, uy]` per edge).
    pub fn from_codes(
        nx: u32,
        ny: u32,
        niu: f32,
        bc_type: &[u8],
        bc_value: &[f32],
        obstacle: Option<Obstacle>,
        steps: u64,
    ) -> Result<Self, ConfigError> {
        if bc_type.len() != 4 {
            return Err(ConfigError::WrongArity { what: "boundary types", expected: 4, got: bc_type.len() });
        }
        if bc_value.len() != 8 {
            return Err(ConfigError::WrongArity { what: "boundary values", expected: 8, got: bc_value.len() });
        }

        let mut boundaries = [EdgeCondition::wall(); 4];
        for (i, slot) in boundaries.iter_mut().enumerate() {
            *slot = EdgeCondition {
                kind: BoundaryKind::try_from(bc_type[i])?,
                velocity: [bc_value[2 * i], bc_value[2 * i + 1]],
            };
        }

        let params = Self {
            obstacle,
            steps,
            ..Self::new(nx, ny, niu, boundaries)
        };
        params.validate()?;
        Ok(params)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Von Karman vortex street behind a cylinder, Re = U*D/niu = 400.
    pub fn karman_vortex_street() -> Self {
        Self::new(
            401,
            101,
            0.005,
            [
                EdgeCondition::dirichlet(0.1, 0.0),
                EdgeCondition::wall(),
                EdgeCondition::neumann(),
                EdgeCondition::wall(),
            ],
        )
        .with_obstacle(Obstacle::new(80.0, 50.0, 10.0))
    }

    /// Lid-driven cavity, Re = U*L/niu ~= 1000.
    pub fn lid_driven_cavity() -> Self {
        Self::new(
            256,
            256,
            0.0255,
            [
                EdgeCondition::wall(),
                EdgeCondition::dirichlet(0.1, 0.0),
                EdgeCondition::wall(),
                EdgeCondition::wall(),
            ],
        )
    }

    /// Relaxation time `tau = 3*niu + 0.5`
    #[inline]
    pub fn tau(&self) -> f32 {
        3.0 * self.niu + 0.5
    }

    #[inline]
    pub fn inv_tau(&self) -> f32 {
        1.0 / self.tau()
    }

    #[inline]
    pub fn edge(&self, edge: Edge) -> EdgeCondition {
        self.boundaries[edge.index()]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let tau = self.tau();
        if !self.niu.is_finite() || self.niu < 0.0 || tau <= 0.5 {
            return Err(ConfigError::InvalidViscosity { niu: self.niu, tau });
        }
        if self.nx < 3 || self.ny < 3 {
            return Err(ConfigError::GridTooSmall { nx: self.nx, ny: self.ny });
        }
        for edge in Edge::ALL {
            let [ux, uy] = self.edge(edge).velocity;
            if !ux.is_finite() || !uy.is_finite() {
                return Err(ConfigError::InvalidBoundaryVelocity { edge });
            }
        }
        if let Some(obstacle) = self.obstacle {
            let Obstacle { cx, cy, radius } = obstacle;
            if !cx.is_finite() || !cy.is_finite() || !radius.is_finite() || radius <= 0.0 {
                return Err(ConfigError::InvalidObstacle { cx, cy, radius });
            }
            if let Some(edge) = self.edge_covered_by(&obstacle) {
                return Err(ConfigError::ObstacleCoversEdge { edge });
            }
        }
        Ok(())
    }

    /// First outer row/column whose every cell lies inside the obstacle.
    fn edge_covered_by(&self, obstacle: &Obstacle) -> Option<Edge> {
        let (nx, ny) = (self.nx, self.ny);
        Edge::ALL.into_iter().find(|edge| match edge {
            Edge::Left => (0..ny).all(|y| obstacle.contains(0, y)),
            Edge::Right => (0..ny).all(|y| obstacle.contains(nx - 1, y)),
            Edge::Top => (0..nx).all(|x| obstacle.contains(x, ny - 1)),
            Edge::Bottom => (0..nx).all(|x| obstacle.contains(x, 0)),
        })
    }
}

use std::ops::ControlFlow;

use lbm_engine::{
    BoundaryKind, DisplayField, Edge, Obstacle, SimulationParameters, SolverCore, SolverError,
    SolverState,
};

#[test]
fn presets_match_the_reference_scenarios() {
    let karman = SimulationParameters::karman_vortex_street();
    assert_eq!((karman.nx, karman.ny), (401, 101));
    assert_eq!(karman.edge(Edge::Right).kind, BoundaryKind::Neumann);
    assert_eq!(karman.edge(Edge::Left).velocity, [0.1, 0.0]);
    assert_eq!(karman.obstacle, Some(Obstacle::new(80.0, 50.0, 10.0)));
    assert!(karman.validate().is_ok());

    let cavity = SimulationParameters::lid_driven_cavity();
    assert_eq!((cavity.nx, cavity.ny), (256, 256));
    assert_eq!(cavity.edge(Edge::Top).velocity, [0.1, 0.0]);
    assert!(cavity.obstacle.is_none());
    assert!(cavity.validate().is_ok());
}

#[test]
fn params_json_round_trips_through_a_running_solver() {
    let json = r#"{
        "nx": 40,
        "ny": 20,
        "niu": 0.02,
        "boundaries": [
            { "kind": "dirichlet", "velocity": [0.05, 0.0] },
            { "kind": "dirichlet" },
            { "kind": "neumann" },
            { "kind": "dirichlet" }
        ],
        "obstacle": { "cx": 10.0, "cy": 10.0, "radius": 3.0 },
        "steps": 30,
        "logEvery": 10
    }"#;
    let params = SimulationParameters::from_json(json).unwrap();
    assert!(params.halt_on_degeneracy);
    assert_eq!(SimulationParameters::from_json(&params.to_json()).unwrap(), params);

    let mut core = SolverCore::initialized(params).unwrap();
    assert_eq!(core.run_to_end(), Ok(30));
    assert!(core.health().is_healthy());
    assert!(core.max_speed() > 0.0);
}

#[test]
fn small_cavity_spins_up_without_faults() {
    let mut params = SimulationParameters::lid_driven_cavity();
    params.nx = 32;
    params.ny = 32;
    params.steps = 300;
    let mut core = SolverCore::initialized(params).unwrap();
    core.set_display_field(Some(DisplayField::Vorticity));

    let mut peak = 0.0f32;
    let done = core
        .run(|c| {
            peak = peak.max(c.max_speed());
            ControlFlow::Continue(())
        })
        .unwrap();

    assert_eq!(done, 300);
    assert_eq!(core.state(), SolverState::Finished);
    assert!(core.health().is_healthy());
    // The lid drives the flow; nothing should outrun it by much
    assert!(peak >= 0.1 && peak < 0.15);
    // Fluid just below the lid is dragged along with it
    assert!(core.grid().velocity(16, 30).0 > 0.0);
    assert_eq!(core.display().len(), 32 * 32);
    assert!(matches!(core.step(), Err(SolverError::Finished { steps: 300 })));
}

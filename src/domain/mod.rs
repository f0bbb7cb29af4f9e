//! Domain model: lattice constants, equilibrium, run parameters and errors.

pub mod lattice;
pub mod equilibrium;
pub mod params;
pub mod error;

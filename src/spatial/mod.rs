//! Spatial storage for the lattice.

pub mod grid;

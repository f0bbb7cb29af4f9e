//! Pipeline stages
//!
//! Each stage is a whole-grid pass over `LatticeGrid`; a stage only starts once
//! the previous one has committed.

pub mod collision;
pub mod macroscopic;
pub mod boundary;
pub mod display;
pub mod diagnostics;

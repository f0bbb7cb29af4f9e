//! Core helpers shared by every pipeline stage.

#[path = "utils/safety.rs"]
#[macro_use]
pub mod safety;

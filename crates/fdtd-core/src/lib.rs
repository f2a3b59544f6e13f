//! Dispersive-media FDTD building blocks.
//!
//! The crate provides the spectral sample set, the per-cell material
//! solvers (vacuum, Drude, Drude-Lorentz), the 1-D reference pulse with its
//! running DFT, and the run parameters that tie them together.

pub mod common;
pub mod domain;
pub mod medium;
pub mod numerics;
pub mod pulse;
pub mod simulation;
pub mod spectrum;

pub use simulation::{ParametersError, SimulationParameters, SpectrumDefinition};

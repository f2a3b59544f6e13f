pub mod dispersion;
pub mod grid;
pub mod permittivity;
pub mod solver;

pub use dispersion::{DrudeLorentzParameters, DrudeParameters, LorentzParameters};
pub use grid::{GridError, IndexStore, MediumGrid};
pub use permittivity::{PermittivityError, PermittivityModel, TabulatedPermittivity};
pub use solver::{
    DrudeLorentzSolver, DrudeSolver, FieldSolver, MediumSolver, PoleCoefficients, PoleState,
    VacuumSolver,
};

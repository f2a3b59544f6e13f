//! Time-domain dispersive media.
//!
//! Each solver turns the displacement field `D` sampled in one cell into the
//! electric field `E` for the same time step. Dispersive poles are embedded
//! through auxiliary differential equations: every pole keeps the last three
//! samples of its polarization term `S` and advances it with a second-order
//! recurrence, applied to x, y and z independently.

use super::dispersion::{DrudeLorentzParameters, DrudeParameters, LorentzParameters};
use crate::numerics::CartesianVector;
use tracing::trace;

/// Single capability shared by every medium model.
pub trait FieldSolver {
    fn solve(&mut self, displacement_field: CartesianVector) -> CartesianVector;
}

/// Recurrence coefficients of one pole:
/// `S_new = shift1 * S_prev1 - shift2 * S_prev2 - electric * E`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleCoefficients {
    pub sampled_time_shift1: f64,
    pub sampled_time_shift2: f64,
    pub electric: f64,
}

impl PoleCoefficients {
    pub fn drude(parameters: &DrudeParameters, time_step: f64) -> Self {
        let decay = (-parameters.damping * time_step).exp();
        let plasma_sq = parameters.plasma_frequency * parameters.plasma_frequency;
        let gain = if parameters.damping == 0.0 {
            plasma_sq * time_step * time_step
        } else {
            plasma_sq * time_step / parameters.damping * (1.0 - decay)
        };

        let coefficients = Self {
            sampled_time_shift1: 1.0 + decay,
            sampled_time_shift2: decay,
            electric: -gain,
        };
        trace!(?coefficients, time_step, "drude pole coefficients");
        coefficients
    }

    pub fn lorentz(parameters: &LorentzParameters, time_step: f64) -> Self {
        let half_decay = (-0.5 * parameters.damping * time_step).exp();
        let (oscillation, kernel) = damped_oscillator_kernel(
            parameters.resonance_frequency,
            parameters.damping,
            time_step,
        );
        let resonance_sq = parameters.resonance_frequency * parameters.resonance_frequency;

        let coefficients = Self {
            sampled_time_shift1: 2.0 * half_decay * oscillation,
            sampled_time_shift2: half_decay * half_decay,
            electric: -parameters.strength * resonance_sq * time_step * half_decay * kernel,
        };
        trace!(?coefficients, time_step, "lorentz pole coefficients");
        coefficients
    }
}

/// `(cos(v*dt), sin(v*dt)/v)` for `v = sqrt(w0^2 - gamma^2/4)`, continued to
/// the hyperbolic form when overdamped and to `(1, dt)` at critical damping.
fn damped_oscillator_kernel(resonance: f64, damping: f64, time_step: f64) -> (f64, f64) {
    let discriminant = resonance * resonance - 0.25 * damping * damping;
    if discriminant > 0.0 {
        let nu = discriminant.sqrt();
        ((nu * time_step).cos(), (nu * time_step).sin() / nu)
    } else if discriminant < 0.0 {
        let nu = (-discriminant).sqrt();
        ((nu * time_step).cosh(), (nu * time_step).sinh() / nu)
    } else {
        (1.0, time_step)
    }
}

/// Three generations of a pole's polarization term.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoleState {
    pub sampled: CartesianVector,
    pub sampled1: CartesianVector,
    pub sampled2: CartesianVector,
}

impl PoleState {
    fn advance(&mut self, coefficients: &PoleCoefficients, efield: CartesianVector) {
        self.sampled = coefficients.sampled_time_shift1 * self.sampled1
            - coefficients.sampled_time_shift2 * self.sampled2
            - coefficients.electric * efield;
        self.sampled2 = self.sampled1;
        self.sampled1 = self.sampled;
    }
}

/// Non-dispersive medium: `E = D / eps`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VacuumSolver {
    epsilon: f64,
}

impl VacuumSolver {
    pub const fn new() -> Self {
        Self { epsilon: 1.0 }
    }

    pub const fn with_permittivity(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub const fn permittivity(&self) -> f64 {
        self.epsilon
    }
}

impl Default for VacuumSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldSolver for VacuumSolver {
    fn solve(&mut self, displacement_field: CartesianVector) -> CartesianVector {
        displacement_field / self.epsilon
    }
}

/// Single Drude pole.
#[derive(Debug, Clone, PartialEq)]
pub struct DrudeSolver {
    epsilon_infinity: f64,
    pole: PoleCoefficients,
    state: PoleState,
}

impl DrudeSolver {
    pub fn new(parameters: &DrudeParameters, time_step: f64) -> Self {
        Self {
            epsilon_infinity: parameters.epsilon_infinity,
            pole: PoleCoefficients::drude(parameters, time_step),
            state: PoleState::default(),
        }
    }

    pub const fn epsilon_infinity(&self) -> f64 {
        self.epsilon_infinity
    }

    pub const fn coefficients(&self) -> &PoleCoefficients {
        &self.pole
    }

    pub const fn state(&self) -> &PoleState {
        &self.state
    }
}

impl FieldSolver for DrudeSolver {
    fn solve(&mut self, displacement_field: CartesianVector) -> CartesianVector {
        let efield = (displacement_field - self.state.sampled) / self.epsilon_infinity;
        self.state.advance(&self.pole, efield);
        efield
    }
}

/// Drude pole followed by a Lorentz resonance stage.
///
/// The inner Drude solver sees `D - S_lorentz`; its output is the cell's
/// electric field and also drives the resonance stage.
#[derive(Debug, Clone, PartialEq)]
pub struct DrudeLorentzSolver {
    drude: DrudeSolver,
    lorentz: PoleCoefficients,
    lorentz_state: PoleState,
    is_body: bool,
}

impl DrudeLorentzSolver {
    pub fn new(parameters: &DrudeLorentzParameters, time_step: f64) -> Self {
        Self {
            drude: DrudeSolver::new(&parameters.drude, time_step),
            lorentz: PoleCoefficients::lorentz(&parameters.lorentz, time_step),
            lorentz_state: PoleState::default(),
            is_body: false,
        }
    }

    pub fn with_body(mut self, is_body: bool) -> Self {
        self.is_body = is_body;
        self
    }

    pub const fn is_body(&self) -> bool {
        self.is_body
    }

    pub const fn drude(&self) -> &DrudeSolver {
        &self.drude
    }

    pub const fn lorentz_coefficients(&self) -> &PoleCoefficients {
        &self.lorentz
    }

    pub const fn lorentz_state(&self) -> &PoleState {
        &self.lorentz_state
    }
}

impl FieldSolver for DrudeLorentzSolver {
    fn solve(&mut self, displacement_field: CartesianVector) -> CartesianVector {
        let efield = self
            .drude
            .solve(displacement_field - self.lorentz_state.sampled);
        self.lorentz_state.advance(&self.lorentz, efield);
        efield
    }
}

/// Closed set of media a grid cell can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum MediumSolver {
    Vacuum(VacuumSolver),
    Drude(DrudeSolver),
    DrudeLorentz(DrudeLorentzSolver),
}

impl MediumSolver {
    pub const fn vacuum() -> Self {
        Self::Vacuum(VacuumSolver::new())
    }

    pub const fn is_body(&self) -> bool {
        match self {
            Self::DrudeLorentz(solver) => solver.is_body(),
            Self::Vacuum(_) | Self::Drude(_) => false,
        }
    }

    pub const fn is_dispersive(&self) -> bool {
        !matches!(self, Self::Vacuum(_))
    }
}

impl FieldSolver for MediumSolver {
    fn solve(&mut self, displacement_field: CartesianVector) -> CartesianVector {
        match self {
            Self::Vacuum(solver) => solver.solve(displacement_field),
            Self::Drude(solver) => solver.solve(displacement_field),
            Self::DrudeLorentz(solver) => solver.solve(displacement_field),
        }
    }
}

impl From<VacuumSolver> for MediumSolver {
    fn from(solver: VacuumSolver) -> Self {
        Self::Vacuum(solver)
    }
}

impl From<DrudeSolver> for MediumSolver {
    fn from(solver: DrudeSolver) -> Self {
        Self::Drude(solver)
    }
}

impl From<DrudeLorentzSolver> for MediumSolver {
    fn from(solver: DrudeLorentzSolver) -> Self {
        Self::DrudeLorentz(solver)
    }
}

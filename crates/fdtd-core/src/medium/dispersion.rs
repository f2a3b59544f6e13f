//! Analytic dispersion models.
//!
//! Sign convention is `exp(-i omega t)`, so absorbing media have a positive
//! imaginary permittivity. The same parameter sets drive the time-domain
//! recurrences in [`crate::medium::solver`].

use super::permittivity::PermittivityModel;
use crate::spectrum::{SpectrumUnit, SpectrumUnitKind};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Free-electron pole: `eps(w) = eps_inf - wp^2 / (w^2 + i*gamma*w)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrudeParameters {
    pub epsilon_infinity: f64,
    /// Plasma frequency, rad/s.
    pub plasma_frequency: f64,
    /// Collision rate, rad/s.
    pub damping: f64,
}

impl DrudeParameters {
    pub const fn new(epsilon_infinity: f64, plasma_frequency: f64, damping: f64) -> Self {
        Self {
            epsilon_infinity,
            plasma_frequency,
            damping,
        }
    }

    /// Drude fit for silver in the visible.
    pub const fn silver() -> Self {
        Self::new(3.9943, 13.29e15, 0.1128e15)
    }

    pub fn susceptibility(&self, cycle_frequency: f64) -> Complex64 {
        let omega = cycle_frequency;
        let denominator = Complex64::new(omega * omega, self.damping * omega);
        -(self.plasma_frequency * self.plasma_frequency) / denominator
    }

    pub fn permittivity_at(&self, cycle_frequency: f64) -> Complex64 {
        self.epsilon_infinity + self.susceptibility(cycle_frequency)
    }
}

impl PermittivityModel for DrudeParameters {
    fn permittivity(&self, unit: &SpectrumUnit) -> Complex64 {
        self.permittivity_at(unit.to_kind(SpectrumUnitKind::CycleFrequency))
    }
}

/// Bound-electron resonance: `d_eps * w0^2 / (w0^2 - w^2 - i*gamma*w)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LorentzParameters {
    /// Oscillator strength (permittivity step across the resonance).
    pub strength: f64,
    /// Resonance frequency, rad/s.
    pub resonance_frequency: f64,
    /// Linewidth, rad/s.
    pub damping: f64,
}

impl LorentzParameters {
    pub const fn new(strength: f64, resonance_frequency: f64, damping: f64) -> Self {
        Self {
            strength,
            resonance_frequency,
            damping,
        }
    }

    pub fn susceptibility(&self, cycle_frequency: f64) -> Complex64 {
        let omega = cycle_frequency;
        let resonance_sq = self.resonance_frequency * self.resonance_frequency;
        let denominator = Complex64::new(resonance_sq - omega * omega, -self.damping * omega);
        self.strength * resonance_sq / denominator
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrudeLorentzParameters {
    pub drude: DrudeParameters,
    pub lorentz: LorentzParameters,
}

impl DrudeLorentzParameters {
    pub const fn new(drude: DrudeParameters, lorentz: LorentzParameters) -> Self {
        Self { drude, lorentz }
    }

    /// Silver: the Drude fit plus a weak interband resonance in the near UV.
    pub const fn silver() -> Self {
        Self::new(
            DrudeParameters::silver(),
            LorentzParameters::new(0.35, 7.0e15, 1.5e15),
        )
    }

    pub fn permittivity_at(&self, cycle_frequency: f64) -> Complex64 {
        self.drude.permittivity_at(cycle_frequency) + self.lorentz.susceptibility(cycle_frequency)
    }
}

impl Default for DrudeLorentzParameters {
    fn default() -> Self {
        Self::silver()
    }
}

impl PermittivityModel for DrudeLorentzParameters {
    fn permittivity(&self, unit: &SpectrumUnit) -> Complex64 {
        self.permittivity_at(unit.to_kind(SpectrumUnitKind::CycleFrequency))
    }
}

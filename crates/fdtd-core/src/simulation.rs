use crate::common::constants::SPEED_OF_LIGHT;
use crate::domain::{ErrorCode, FdtdError, FdtdResult};
use crate::medium::{
    DrudeLorentzParameters, DrudeLorentzSolver, IndexStore, MediumGrid, MediumSolver,
};
use crate::pulse::{PulseShape, ReferencePulse};
use crate::spectrum::{LinearDiscreteCollection, OpticalSpectrum, SpectrumError, SpectrumUnitKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParametersError {
    #[error("cell size must be finite and > 0, got {value}")]
    InvalidCellSize { value: f64 },
    #[error("courant number must be in (0, 1], got {value}")]
    InvalidCourantNumber { value: f64 },
    #[error("grid dimensions must be non-zero, got {i_length}x{j_length}x{k_length}")]
    EmptyGrid {
        i_length: usize,
        j_length: usize,
        k_length: usize,
    },
    #[error("pulse half-length must be at least 2, got {value}")]
    InvalidPulseHalfLength { value: usize },
    #[error(transparent)]
    Spectrum(#[from] SpectrumError),
}

impl From<ParametersError> for FdtdError {
    fn from(error: ParametersError) -> Self {
        FdtdError::new(ErrorCode::Parameters, error.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumDefinition {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    pub kind: SpectrumUnitKind,
}

impl Default for SpectrumDefinition {
    fn default() -> Self {
        Self {
            start: 300.0e-9,
            end: 700.0e-9,
            count: 100,
            kind: SpectrumUnitKind::Wavelength,
        }
    }
}

impl SpectrumDefinition {
    pub fn collection(&self) -> Result<LinearDiscreteCollection, SpectrumError> {
        LinearDiscreteCollection::new(self.start, self.end, self.count)
    }
}

/// Run configuration shared by the reference pulse and the cell grid.
///
/// Every field has a default, so a partial JSON document is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationParameters {
    pub grid: IndexStore,
    /// Edge length of one cubic cell, m.
    pub cell_size: f64,
    pub courant_number: f64,
    pub num_steps: usize,
    pub pulse_half_length: usize,
    /// Radius of the scattering sphere, in cells.
    pub sphere_radius: f64,
    pub spectrum: SpectrumDefinition,
    pub pulse: PulseShape,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            grid: IndexStore::new(50, 50, 50),
            cell_size: 1.0e-9,
            courant_number: 0.5,
            num_steps: 50,
            pulse_half_length: 50,
            sphere_radius: 10.0,
            spectrum: SpectrumDefinition::default(),
            pulse: PulseShape::default(),
        }
    }
}

impl SimulationParameters {
    pub fn validate(&self) -> Result<(), ParametersError> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(ParametersError::InvalidCellSize {
                value: self.cell_size,
            });
        }
        if !(self.courant_number > 0.0 && self.courant_number <= 1.0) {
            return Err(ParametersError::InvalidCourantNumber {
                value: self.courant_number,
            });
        }
        if self.grid.is_empty() {
            return Err(ParametersError::EmptyGrid {
                i_length: self.grid.i_length,
                j_length: self.grid.j_length,
                k_length: self.grid.k_length,
            });
        }
        if self.pulse_half_length < 2 {
            return Err(ParametersError::InvalidPulseHalfLength {
                value: self.pulse_half_length,
            });
        }
        self.spectrum.collection()?;
        Ok(())
    }

    /// `dt = dx * S / c`.
    pub fn time_step(&self) -> f64 {
        self.cell_size * self.courant_number / SPEED_OF_LIGHT
    }

    pub fn optical_spectrum(&self) -> Result<OpticalSpectrum, ParametersError> {
        let collection = self.spectrum.collection()?;
        Ok(OpticalSpectrum::from_collection(
            &collection,
            self.spectrum.kind,
        )?)
    }

    /// Reference pulse with the Fourier phase measured in seconds.
    pub fn reference_pulse(&self) -> FdtdResult<ReferencePulse<PulseShape>> {
        self.validate()?;
        let spectrum = self.optical_spectrum()?;
        let pulse = ReferencePulse::new(
            self.pulse,
            self.pulse_half_length,
            spectrum,
            self.courant_number,
        )?;
        Ok(pulse.with_time_step(self.time_step()))
    }

    /// Vacuum grid with a Drude-Lorentz sphere of `sphere_radius` cells.
    pub fn medium_grid(&self, body: &DrudeLorentzParameters) -> FdtdResult<MediumGrid> {
        self.validate()?;
        let solver = DrudeLorentzSolver::new(body, self.time_step());
        Ok(MediumGrid::sphere(
            self.grid,
            self.sphere_radius,
            &solver,
            &MediumSolver::vacuum(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{ParametersError, SimulationParameters};
    use crate::common::constants::SPEED_OF_LIGHT;
    use crate::domain::{ErrorCode, FdtdErrorCategory};
    use crate::medium::{DrudeLorentzParameters, IndexStore};
    use crate::pulse::PulseShape;
    use crate::spectrum::SpectrumError;

    #[test]
    fn defaults_reproduce_reference_run() {
        let parameters = SimulationParameters::default();
        parameters.validate().expect("defaults are valid");

        assert_eq!(parameters.grid, IndexStore::new(50, 50, 50));
        assert_eq!(parameters.time_step(), 1.0e-9 * 0.5 / SPEED_OF_LIGHT);

        let spectrum = parameters.optical_spectrum().expect("spectrum");
        assert_eq!(spectrum.len(), 100);
        assert_eq!(spectrum.units()[0].value(), 300.0e-9);
        assert_eq!(spectrum.units()[99].value(), 700.0e-9);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let parameters: SimulationParameters = serde_json::from_str(
            r#"{
                "courantNumber": 0.25,
                "grid": { "iLength": 8, "jLength": 8, "kLength": 8 },
                "pulse": { "type": "impulse", "at": 2, "amplitude": 1.0 }
            }"#,
        )
        .expect("config json");

        assert_eq!(parameters.courant_number, 0.25);
        assert_eq!(parameters.grid.len(), 512);
        assert_eq!(
            parameters.pulse,
            PulseShape::Impulse {
                at: 2,
                amplitude: 1.0
            }
        );
        assert_eq!(parameters.cell_size, 1.0e-9);
        assert_eq!(parameters.spectrum.count, 100);
    }

    #[test]
    fn invalid_parameters_are_reported() {
        let mut parameters = SimulationParameters {
            courant_number: 1.5,
            ..SimulationParameters::default()
        };
        assert_eq!(
            parameters.validate(),
            Err(ParametersError::InvalidCourantNumber { value: 1.5 })
        );

        parameters.courant_number = 0.5;
        parameters.spectrum.count = 0;
        assert_eq!(
            parameters.validate(),
            Err(ParametersError::Spectrum(SpectrumError::EmptyCollection {
                count: 0
            }))
        );

        let error = parameters
            .reference_pulse()
            .err()
            .expect("invalid spectrum should fail");
        assert_eq!(error.category(), FdtdErrorCategory::InputValidation);
        assert_eq!(error.code(), ErrorCode::Parameters);
    }

    #[test]
    fn medium_grid_places_the_body_sphere() {
        let parameters = SimulationParameters {
            grid: IndexStore::new(8, 8, 8),
            sphere_radius: 2.0,
            ..SimulationParameters::default()
        };
        let grid = parameters
            .medium_grid(&DrudeLorentzParameters::silver())
            .expect("grid");

        assert_eq!(grid.len(), 512);
        assert_eq!(grid.body_cell_count(), 33);
    }
}

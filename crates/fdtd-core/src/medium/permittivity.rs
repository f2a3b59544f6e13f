use crate::common::constants::WAVELENGTH_MULTIPLIER;
use crate::domain::{ErrorCode, FdtdError};
use crate::spectrum::{SpectrumUnit, SpectrumUnitKind};
use num_complex::Complex64;

/// Frequency-dependent complex relative permittivity of a material.
pub trait PermittivityModel: Send + Sync {
    fn permittivity(&self, unit: &SpectrumUnit) -> Complex64;

    /// Complex refractive index `n + ik` from `eps = (n + ik)^2`.
    fn refractive_index(&self, unit: &SpectrumUnit) -> Complex64 {
        self.permittivity(unit).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermittivityError {
    #[error(
        "wavelength table has {wavelengths} entries but permittivity table has {permittivities}"
    )]
    LengthMismatch {
        wavelengths: usize,
        permittivities: usize,
    },
    #[error("permittivity table must contain at least one sample")]
    EmptyTable,
}

impl From<PermittivityError> for FdtdError {
    fn from(error: PermittivityError) -> Self {
        FdtdError::new(ErrorCode::PermittivityTable, error.to_string())
    }
}

/// Measured optical constants interpolated linearly between table rows.
///
/// Wavelengths are stored in nanometres and must be strictly ascending; the
/// ordering is not checked. Queries that fall outside `[first, last)` do not
/// extrapolate: they return the *last* tabulated permittivity unchanged,
/// including queries below the first wavelength.
#[derive(Debug, Clone, PartialEq)]
pub struct TabulatedPermittivity {
    wavelengths_nm: Vec<f64>,
    permittivities: Vec<Complex64>,
}

impl TabulatedPermittivity {
    pub fn new(
        wavelengths_nm: Vec<f64>,
        permittivities: Vec<Complex64>,
    ) -> Result<Self, PermittivityError> {
        if wavelengths_nm.len() != permittivities.len() {
            return Err(PermittivityError::LengthMismatch {
                wavelengths: wavelengths_nm.len(),
                permittivities: permittivities.len(),
            });
        }
        if wavelengths_nm.is_empty() {
            return Err(PermittivityError::EmptyTable);
        }

        Ok(Self {
            wavelengths_nm,
            permittivities,
        })
    }

    /// Coarse silver table, approximate values after Johnson & Christy (1972).
    pub fn silver_sample() -> Self {
        let rows: [(f64, f64, f64); 8] = [
            (350.0, -2.03, 0.60),
            (400.0, -4.42, 0.21),
            (450.0, -6.60, 0.26),
            (500.0, -9.83, 0.31),
            (550.0, -12.90, 0.42),
            (600.0, -15.96, 0.44),
            (650.0, -19.40, 0.55),
            (700.0, -22.50, 0.41),
        ];

        Self {
            wavelengths_nm: rows.iter().map(|row| row.0).collect(),
            permittivities: rows
                .iter()
                .map(|row| Complex64::new(row.1, row.2))
                .collect(),
        }
    }

    pub fn wavelengths_nm(&self) -> &[f64] {
        &self.wavelengths_nm
    }

    pub fn permittivities(&self) -> &[Complex64] {
        &self.permittivities
    }

    pub fn len(&self) -> usize {
        self.wavelengths_nm.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths_nm.is_empty()
    }

    fn nearest_indexes(&self, wavelength_nm: f64) -> (usize, usize) {
        for (index, pair) in self.wavelengths_nm.windows(2).enumerate() {
            if wavelength_nm >= pair[0] && wavelength_nm < pair[1] {
                return (index, index + 1);
            }
        }
        let last = self.wavelengths_nm.len() - 1;
        (last, last)
    }
}

impl PermittivityModel for TabulatedPermittivity {
    fn permittivity(&self, unit: &SpectrumUnit) -> Complex64 {
        let wavelength_nm = unit.to_kind(SpectrumUnitKind::Wavelength) * WAVELENGTH_MULTIPLIER;
        let (lower, upper) = self.nearest_indexes(wavelength_nm);
        if lower == upper {
            return self.permittivities[lower];
        }

        let delta = wavelength_nm - self.wavelengths_nm[lower];
        let step = self.wavelengths_nm[upper] - self.wavelengths_nm[lower];
        let coef = delta / step;

        let low = self.permittivities[lower];
        let high = self.permittivities[upper];
        Complex64::new(
            low.re + coef * (high.re - low.re),
            low.im + coef * (high.im - low.im),
        )
    }
}

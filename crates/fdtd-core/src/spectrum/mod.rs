pub mod optical;
pub mod unit;

pub use optical::{LinearDiscreteCollection, OpticalSpectrum, SpectrumError};
pub use unit::{SpectrumUnit, SpectrumUnitKind, convert};

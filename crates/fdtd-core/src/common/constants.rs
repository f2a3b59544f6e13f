//! Physical and unit constants shared by the spectral, medium and pulse code.

pub const PI2: f64 = 6.283_185_307_179_586_476_925_286_766_559_f64;

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0_f64;

/// Metres to nanometres. Permittivity tables are keyed in nanometres while
/// spectral units carry SI metres.
pub const WAVELENGTH_MULTIPLIER: f64 = 1.0e9_f64;

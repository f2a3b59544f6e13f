use crate::common::constants::{PI2, SPEED_OF_LIGHT};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpectrumUnitKind {
    /// Wavelength in metres.
    Wavelength,
    /// Frequency in Hz.
    Frequency,
    /// Angular frequency in rad/s.
    CycleFrequency,
}

impl SpectrumUnitKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wavelength => "wavelength",
            Self::Frequency => "frequency",
            Self::CycleFrequency => "cycle-frequency",
        }
    }
}

impl Display for SpectrumUnitKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Converts `value` expressed as `from` into `to`.
///
/// Identity conversions return `value` untouched. A zero wavelength or
/// frequency maps to an infinite counterpart; callers keep inputs non-zero.
pub fn convert(value: f64, from: SpectrumUnitKind, to: SpectrumUnitKind) -> f64 {
    use SpectrumUnitKind::{CycleFrequency, Frequency, Wavelength};

    match (from, to) {
        (Wavelength, Wavelength) | (Frequency, Frequency) | (CycleFrequency, CycleFrequency) => {
            value
        }
        (Wavelength, Frequency) | (Frequency, Wavelength) => SPEED_OF_LIGHT / value,
        (Wavelength, CycleFrequency) | (CycleFrequency, Wavelength) => {
            PI2 * SPEED_OF_LIGHT / value
        }
        (Frequency, CycleFrequency) => value * PI2,
        (CycleFrequency, Frequency) => value / PI2,
    }
}

/// One spectral sample: a magnitude tagged with the representation it was
/// given in.
///
/// Equality and hashing use the exact `(kind, magnitude)` pair, so
/// `500 nm` given as a wavelength and the same point given as a frequency
/// are distinct keys. `-0.0` and `0.0` are the same key; a NaN magnitude
/// equals itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpectrumUnit {
    value: f64,
    kind: SpectrumUnitKind,
}

impl SpectrumUnit {
    pub const fn new(value: f64, kind: SpectrumUnitKind) -> Self {
        Self { value, kind }
    }

    pub const fn wavelength(metres: f64) -> Self {
        Self::new(metres, SpectrumUnitKind::Wavelength)
    }

    pub const fn frequency(hertz: f64) -> Self {
        Self::new(hertz, SpectrumUnitKind::Frequency)
    }

    pub const fn cycle_frequency(radians_per_second: f64) -> Self {
        Self::new(radians_per_second, SpectrumUnitKind::CycleFrequency)
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn kind(&self) -> SpectrumUnitKind {
        self.kind
    }

    pub fn to_kind(&self, target: SpectrumUnitKind) -> f64 {
        convert(self.value, self.kind, target)
    }

    /// Re-expresses the sample in another representation.
    pub fn converted(&self, target: SpectrumUnitKind) -> Self {
        Self::new(self.to_kind(target), target)
    }

    fn key_bits(&self) -> u64 {
        if self.value == 0.0 {
            0.0_f64.to_bits()
        } else {
            self.value.to_bits()
        }
    }
}

impl PartialEq for SpectrumUnit {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.key_bits() == other.key_bits()
    }
}

impl Eq for SpectrumUnit {}

impl Hash for SpectrumUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.key_bits().hash(state);
    }
}

impl Display for SpectrumUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::{SpectrumUnit, SpectrumUnitKind, convert};
    use crate::common::constants::{PI2, SPEED_OF_LIGHT};
    use crate::numerics::relative_difference;
    use std::collections::HashSet;

    const KINDS: [SpectrumUnitKind; 3] = [
        SpectrumUnitKind::Wavelength,
        SpectrumUnitKind::Frequency,
        SpectrumUnitKind::CycleFrequency,
    ];

    #[test]
    fn identity_conversion_is_bit_exact() {
        for kind in KINDS {
            for value in [1.0e-9, 532.0e-9, 3.7e15, 0.1 + 0.2, f64::MIN_POSITIVE] {
                let unit = SpectrumUnit::new(value, kind);
                assert_eq!(unit.to_kind(kind).to_bits(), value.to_bits());
            }
        }
    }

    #[test]
    fn wavelength_conversions_follow_speed_of_light() {
        let unit = SpectrumUnit::wavelength(500.0e-9);

        assert_eq!(
            unit.to_kind(SpectrumUnitKind::Frequency),
            SPEED_OF_LIGHT / 500.0e-9
        );
        assert_eq!(
            unit.to_kind(SpectrumUnitKind::CycleFrequency),
            PI2 * SPEED_OF_LIGHT / 500.0e-9
        );
        assert_eq!(
            SpectrumUnit::frequency(2.0).to_kind(SpectrumUnitKind::CycleFrequency),
            2.0 * PI2
        );
        assert_eq!(
            SpectrumUnit::cycle_frequency(PI2).to_kind(SpectrumUnitKind::Frequency),
            1.0
        );
    }

    #[test]
    fn conversions_round_trip_within_tolerance() {
        for wavelength in [300.0e-9, 451.3e-9, 700.0e-9, 1.55e-6] {
            let omega = convert(
                wavelength,
                SpectrumUnitKind::Wavelength,
                SpectrumUnitKind::CycleFrequency,
            );
            let back = SpectrumUnit::cycle_frequency(omega).to_kind(SpectrumUnitKind::Wavelength);
            assert!(relative_difference(wavelength, back, 1.0e-300) <= 1.0e-9);

            let via_frequency = SpectrumUnit::wavelength(wavelength)
                .converted(SpectrumUnitKind::Frequency)
                .converted(SpectrumUnitKind::CycleFrequency)
                .to_kind(SpectrumUnitKind::Wavelength);
            assert!(relative_difference(wavelength, via_frequency, 1.0e-300) <= 1.0e-9);
        }
    }

    #[test]
    fn zero_wavelength_maps_to_infinite_frequency() {
        let unit = SpectrumUnit::wavelength(0.0);
        assert!(unit.to_kind(SpectrumUnitKind::Frequency).is_infinite());
    }

    #[test]
    fn equality_and_hash_use_exact_kind_and_value() {
        let a = SpectrumUnit::wavelength(500.0e-9);
        let b = SpectrumUnit::wavelength(500.0e-9);
        let c = SpectrumUnit::frequency(500.0e-9);
        let d = SpectrumUnit::wavelength(500.0e-9 * (1.0 + f64::EPSILON));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);

        let set: HashSet<_> = [a, b, c, d].into_iter().collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn signed_zero_is_one_key() {
        let positive = SpectrumUnit::frequency(0.0);
        let negative = SpectrumUnit::frequency(-0.0);

        assert_eq!(positive, negative);
        let set: HashSet<_> = [positive, negative].into_iter().collect();
        assert_eq!(set.len(), 1);

        let nan = SpectrumUnit::frequency(f64::NAN);
        assert_eq!(nan, nan);
    }
}

//! One-dimensional reference pulse.
//!
//! A 1-D Yee line of length `2L` carries the source pulse away from a hard
//! source near the left edge. Both edges use a two-sample delay absorbing
//! boundary. While the pulse propagates, every spatial sample accumulates its
//! discrete Fourier coefficients at the configured spectral samples; these
//! normalize the 3-D scattering spectra.

use super::fourier::FourierSeries;
use super::source::PulseSource;
use crate::domain::{ErrorCode, FdtdError};
use crate::numerics::stable_sum;
use crate::spectrum::{OpticalSpectrum, SpectrumUnit, SpectrumUnitKind};
use num_complex::Complex64;
use tracing::{debug, trace};

/// Index overwritten with the source sample every step.
pub const SOURCE_INDEX: usize = 2;

/// From this step on the delay buffers and the far half of the line are
/// cleared every step; the pulse is assumed to have left the region.
pub const NOISE_SUPPRESSION_STEP: usize = 300;

const MIN_HALF_LENGTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PulseError {
    #[error(
        "reference pulse half-length must be at least 2 to hold the source at index 2, got {half_length}"
    )]
    HalfLengthTooShort { half_length: usize },
}

impl From<PulseError> for FdtdError {
    fn from(error: PulseError) -> Self {
        FdtdError::new(ErrorCode::PulseLength, error.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct BoundaryDelay {
    first: f64,
    second: f64,
}

impl BoundaryDelay {
    /// Emits the sample from two steps ago and stores `inner`.
    fn shift(&mut self, inner: f64) -> f64 {
        let emitted = self.second;
        self.second = self.first;
        self.first = inner;
        emitted
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

pub struct ReferencePulse<P> {
    courant_number: f64,
    med_length: usize,
    pulse: P,
    spectrum: OpticalSpectrum,
    electric: Vec<f64>,
    magnetic: Vec<f64>,
    far_boundary: BoundaryDelay,
    near_boundary: BoundaryDelay,
    fourier: Vec<FourierSeries>,
    fourier_time_scale: f64,
    steps_taken: usize,
    suppression_engaged: bool,
}

impl<P: PulseSource> ReferencePulse<P> {
    pub fn new(
        pulse: P,
        half_length: usize,
        spectrum: OpticalSpectrum,
        courant_number: f64,
    ) -> Result<Self, PulseError> {
        if half_length < MIN_HALF_LENGTH {
            return Err(PulseError::HalfLengthTooShort { half_length });
        }

        let med_length = 2 * half_length;
        let fourier = (0..med_length)
            .map(|_| FourierSeries::new(spectrum.len()))
            .collect();
        debug!(
            med_length,
            samples = spectrum.len(),
            courant_number,
            "reference pulse initialized"
        );

        Ok(Self {
            courant_number,
            med_length,
            pulse,
            spectrum,
            electric: vec![0.0; med_length],
            magnetic: vec![0.0; med_length],
            far_boundary: BoundaryDelay::default(),
            near_boundary: BoundaryDelay::default(),
            fourier,
            fourier_time_scale: 1.0,
            steps_taken: 0,
            suppression_engaged: false,
        })
    }

    /// Scales the Fourier phase from step index to seconds.
    ///
    /// Without it the phase is `omega * step`.
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.fourier_time_scale = time_step;
        self
    }

    pub fn electric_field_step(&mut self, time: usize) {
        let courant = self.courant_number;
        for i in 1..self.med_length {
            self.electric[i] += courant * (self.magnetic[i - 1] - self.magnetic[i]);
        }

        self.electric[SOURCE_INDEX] = self.pulse.sample(time);

        let last = self.med_length - 1;
        self.electric[last] = self.far_boundary.shift(self.electric[last - 1]);
        self.electric[0] = self.near_boundary.shift(self.electric[1]);

        if time >= NOISE_SUPPRESSION_STEP {
            if !self.suppression_engaged {
                debug!(time, "reference pulse noise suppression engaged");
                self.suppression_engaged = true;
            }
            self.far_boundary.clear();
            self.near_boundary.clear();
            let half = self.med_length / 2;
            self.electric[half..].fill(0.0);
            self.magnetic[half..].fill(0.0);
        }
    }

    pub fn magnetic_field_step(&mut self) {
        let courant = self.courant_number;
        for i in 0..self.med_length - 1 {
            self.magnetic[i] += courant * (self.electric[i] - self.electric[i + 1]);
        }
    }

    /// Adds `E[m] * exp(i * omega * time)` to every index's coefficient for
    /// every spectral sample.
    pub fn accumulate_fourier(&mut self, time: f64) {
        for (position, unit) in self.spectrum.iter().enumerate() {
            let angle = unit.to_kind(SpectrumUnitKind::CycleFrequency) * time;
            for (series, &field) in self.fourier.iter_mut().zip(&self.electric) {
                series.add(position, Complex64::from_polar(field, angle));
            }
        }
    }

    /// One full time step; the phase order is fixed.
    pub fn step(&mut self, time: usize) {
        self.electric_field_step(time);
        self.magnetic_field_step();
        self.accumulate_fourier(time as f64 * self.fourier_time_scale);
        self.steps_taken = time + 1;
        trace!(time, energy = self.field_energy(), "reference pulse step");
    }

    /// Continues from the last completed step for `steps` more steps.
    pub fn run(&mut self, steps: usize) {
        let start = self.steps_taken;
        for time in start..start + steps {
            self.step(time);
        }
        debug!(
            steps_taken = self.steps_taken,
            energy = self.field_energy(),
            "reference pulse run finished"
        );
    }
}

impl<P> ReferencePulse<P> {
    pub fn electric(&self) -> &[f64] {
        &self.electric
    }

    pub fn magnetic(&self) -> &[f64] {
        &self.magnetic
    }

    pub fn len(&self) -> usize {
        self.med_length
    }

    pub fn is_empty(&self) -> bool {
        self.med_length == 0
    }

    pub fn half_length(&self) -> usize {
        self.med_length / 2
    }

    pub fn courant_number(&self) -> f64 {
        self.courant_number
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn spectrum(&self) -> &OpticalSpectrum {
        &self.spectrum
    }

    pub fn fourier(&self) -> &[FourierSeries] {
        &self.fourier
    }

    pub fn fourier_at(&self, index: usize) -> Option<&FourierSeries> {
        self.fourier.get(index)
    }

    pub fn coefficient(&self, index: usize, unit: &SpectrumUnit) -> Option<Complex64> {
        let position = self.spectrum.position(unit)?;
        self.fourier_at(index)?.get(position)
    }

    pub fn spectrum_at(&self, index: usize) -> Option<Vec<(SpectrumUnit, Complex64)>> {
        let series = self.fourier_at(index)?;
        Some(
            self.spectrum
                .iter()
                .copied()
                .zip(series.iter().copied())
                .collect(),
        )
    }

    /// `|F|^2` per spectral sample at `index`.
    pub fn power_spectrum(&self, index: usize) -> Option<Vec<(SpectrumUnit, f64)>> {
        let series = self.fourier_at(index)?;
        Some(
            self.spectrum
                .iter()
                .copied()
                .zip(series.iter().map(|value| value.norm_sqr()))
                .collect(),
        )
    }

    /// `sum(E^2) + sum(H^2)` over the whole line.
    pub fn field_energy(&self) -> f64 {
        stable_sum(
            self.electric
                .iter()
                .chain(&self.magnetic)
                .map(|value| value * value),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{PulseError, ReferencePulse, SOURCE_INDEX};
    use crate::pulse::PulseShape;
    use crate::spectrum::{OpticalSpectrum, SpectrumUnit};

    fn single_sample_spectrum() -> OpticalSpectrum {
        OpticalSpectrum::new(vec![SpectrumUnit::wavelength(500.0e-9)])
    }

    #[test]
    fn too_short_line_is_rejected() {
        let error = ReferencePulse::new(|_: usize| 0.0, 1, single_sample_spectrum(), 0.5)
            .err()
            .expect("half-length 1 cannot host the source");
        assert_eq!(error, PulseError::HalfLengthTooShort { half_length: 1 });

        let pulse = ReferencePulse::new(|_: usize| 0.0, 2, single_sample_spectrum(), 0.5)
            .expect("half-length 2 is enough");
        assert_eq!(pulse.len(), 4);
    }

    #[test]
    fn source_overwrites_field_every_step() {
        let mut pulse = ReferencePulse::new(
            |step: usize| step as f64,
            6,
            single_sample_spectrum(),
            0.5,
        )
        .expect("pulse");

        for time in 0..5 {
            pulse.electric_field_step(time);
            assert_eq!(pulse.electric()[SOURCE_INDEX], time as f64);
            pulse.magnetic_field_step();
        }
    }

    #[test]
    fn boundary_emits_inner_sample_two_steps_late() {
        let shape = PulseShape::Impulse {
            at: 0,
            amplitude: 1.0,
        };
        let mut pulse = ReferencePulse::new(shape, 2, single_sample_spectrum(), 0.5).expect("pulse");
        let last = pulse.len() - 1;

        pulse.electric_field_step(0);
        assert_eq!(pulse.electric()[last], 0.0);
        let far_inner = pulse.electric()[last - 1];
        assert_eq!(far_inner, 1.0);

        pulse.magnetic_field_step();
        pulse.electric_field_step(1);
        assert_eq!(pulse.electric()[last], 0.0);

        pulse.magnetic_field_step();
        pulse.electric_field_step(2);
        assert_eq!(pulse.electric()[last], far_inner);
    }

    #[test]
    fn run_continues_from_last_step() {
        let shape = PulseShape::Impulse {
            at: 3,
            amplitude: 1.0,
        };
        let mut split = ReferencePulse::new(shape, 5, single_sample_spectrum(), 0.5).expect("pulse");
        let mut whole = ReferencePulse::new(shape, 5, single_sample_spectrum(), 0.5).expect("pulse");

        split.run(4);
        split.run(6);
        whole.run(10);

        assert_eq!(split.steps_taken(), 10);
        assert_eq!(split.electric(), whole.electric());
        assert_eq!(split.magnetic(), whole.magnetic());
        assert_eq!(split.fourier(), whole.fourier());
    }

    #[test]
    fn impulse_coefficient_at_source_is_single_phasor() {
        let time_step = 1.0e-18;
        let unit = SpectrumUnit::wavelength(600.0e-9);
        let mut pulse = ReferencePulse::new(
            PulseShape::Impulse {
                at: 2,
                amplitude: 1.0,
            },
            8,
            OpticalSpectrum::new(vec![unit]),
            0.5,
        )
        .expect("pulse")
        .with_time_step(time_step);
        pulse.run(40);

        let coefficient = pulse
            .coefficient(SOURCE_INDEX, &unit)
            .expect("coefficient");
        let omega = unit.to_kind(crate::spectrum::SpectrumUnitKind::CycleFrequency);
        assert!((coefficient.norm() - 1.0).abs() < 1.0e-12);
        assert!((coefficient.arg() - omega * 2.0 * time_step).abs() < 1.0e-12);
        assert!(pulse.coefficient(SOURCE_INDEX, &SpectrumUnit::wavelength(1.0)).is_none());
        assert!(pulse.coefficient(16, &unit).is_none());
    }
}

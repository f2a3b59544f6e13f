use super::unit::{SpectrumUnit, SpectrumUnitKind};
use crate::domain::{ErrorCode, FdtdError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpectrumError {
    #[error("spectrum requires at least one sample, got count {count}")]
    EmptyCollection { count: usize },
    #[error("spectrum bounds must be finite, got start={start}, end={end}")]
    NonFiniteBound { start: f64, end: f64 },
}

impl From<SpectrumError> for FdtdError {
    fn from(error: SpectrumError) -> Self {
        FdtdError::new(ErrorCode::Spectrum, error.to_string())
    }
}

/// `count` evenly spaced values from `start` to `end`, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearDiscreteCollection {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl LinearDiscreteCollection {
    pub fn new(start: f64, end: f64, count: usize) -> Result<Self, SpectrumError> {
        let collection = Self { start, end, count };
        collection.validate()?;
        Ok(collection)
    }

    pub fn validate(&self) -> Result<(), SpectrumError> {
        if self.count == 0 {
            return Err(SpectrumError::EmptyCollection { count: self.count });
        }
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(SpectrumError::NonFiniteBound {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn step(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            (self.end - self.start) / (self.count - 1) as f64
        }
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        let step = self.step();
        let last = self.count.saturating_sub(1);
        (0..self.count).map(move |index| {
            if index == last && last > 0 {
                self.end
            } else {
                self.start + step * index as f64
            }
        })
    }
}

/// Fixed, ordered set of spectral samples shared by every accumulator that
/// is keyed by frequency. Sample positions never change after construction.
#[derive(Debug, Clone)]
pub struct OpticalSpectrum {
    units: Vec<SpectrumUnit>,
    positions: HashMap<SpectrumUnit, usize>,
}

impl OpticalSpectrum {
    pub fn new(units: Vec<SpectrumUnit>) -> Self {
        let mut positions = HashMap::with_capacity(units.len());
        for (index, unit) in units.iter().enumerate() {
            positions.entry(*unit).or_insert(index);
        }
        Self { units, positions }
    }

    pub fn from_collection(
        collection: &LinearDiscreteCollection,
        kind: SpectrumUnitKind,
    ) -> Result<Self, SpectrumError> {
        collection.validate()?;
        Ok(Self::new(
            collection
                .values()
                .map(|value| SpectrumUnit::new(value, kind))
                .collect(),
        ))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[SpectrumUnit] {
        &self.units
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpectrumUnit> {
        self.units.iter()
    }

    /// Position of `unit` in sample order; duplicates resolve to the first.
    pub fn position(&self, unit: &SpectrumUnit) -> Option<usize> {
        self.positions.get(unit).copied()
    }
}

impl<'a> IntoIterator for &'a OpticalSpectrum {
    type Item = &'a SpectrumUnit;
    type IntoIter = std::slice::Iter<'a, SpectrumUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}

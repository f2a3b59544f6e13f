use num_complex::Complex64;

/// Running discrete Fourier coefficients of one spatial sample, one slot per
/// spectral sample position.
#[derive(Debug, Clone, PartialEq)]
pub struct FourierSeries {
    coefficients: Vec<Complex64>,
}

impl FourierSeries {
    pub(crate) fn new(sample_count: usize) -> Self {
        Self {
            coefficients: vec![Complex64::new(0.0, 0.0); sample_count],
        }
    }

    pub(crate) fn add(&mut self, position: usize, value: Complex64) {
        self.coefficients[position] += value;
    }

    pub fn get(&self, position: usize) -> Option<Complex64> {
        self.coefficients.get(position).copied()
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Complex64> {
        self.coefficients.iter()
    }
}

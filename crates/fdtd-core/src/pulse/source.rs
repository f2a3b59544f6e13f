use serde::{Deserialize, Serialize};

/// Source waveform sampled once per time step.
pub trait PulseSource {
    fn sample(&self, step: usize) -> f64;
}

impl<F> PulseSource for F
where
    F: Fn(usize) -> f64,
{
    fn sample(&self, step: usize) -> f64 {
        self(step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PulseShape {
    /// `amplitude * exp(-0.5 * ((center - t) / width)^2)`, `t` in steps.
    Gaussian {
        center: f64,
        width: f64,
        amplitude: f64,
    },
    /// `amplitude` at step `at`, zero elsewhere.
    Impulse { at: usize, amplitude: f64 },
}

impl Default for PulseShape {
    fn default() -> Self {
        Self::Gaussian {
            center: 30.0,
            width: 5.0,
            amplitude: 1.0,
        }
    }
}

impl PulseSource for PulseShape {
    fn sample(&self, step: usize) -> f64 {
        match *self {
            Self::Gaussian {
                center,
                width,
                amplitude,
            } => {
                let offset = (center - step as f64) / width;
                amplitude * (-0.5 * offset * offset).exp()
            }
            Self::Impulse { at, amplitude } => {
                if step == at {
                    amplitude
                } else {
                    0.0
                }
            }
        }
    }
}

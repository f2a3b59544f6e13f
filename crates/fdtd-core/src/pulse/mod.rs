pub mod engine;
pub mod fourier;
pub mod source;

pub use engine::{NOISE_SUPPRESSION_STEP, PulseError, ReferencePulse, SOURCE_INDEX};
pub use fourier::FourierSeries;
pub use source::{PulseShape, PulseSource};

pub mod input;
pub mod stats;
pub mod step;

pub use input::{DecodeError, TranscriptInput, DEFAULT_TITLE};
pub use stats::StepStats;
pub use step::*;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

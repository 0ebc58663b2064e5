pub mod cue;

#[cfg(feature = "whisper")]
pub mod capture;
#[cfg(feature = "whisper")]
pub mod resampler;

pub use cue::{Cue, CuePlayer};

#[cfg(feature = "whisper")]
pub use capture::MicCapture;
#[cfg(feature = "whisper")]
pub use resampler::{resample_to, MonoResampler};

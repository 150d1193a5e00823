//! Waveform resynthesis from frame-rate parametric speech descriptions:
//! an F0 contour, a spectral envelope and a band-limited aperiodicity
//! measure, loaded as raw float64 streams and rendered back to audio.

pub mod aperiodicity;
pub mod constants;
pub mod engine;
pub mod error;
pub mod interpolation;
pub mod modify;
pub mod parameters;
pub mod reader;
pub mod synthesis;

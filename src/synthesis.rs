//! Output sizing and engine invocation.

use crate::engine::SynthesisEngine;
use crate::error::SynthesisError;
use crate::parameters::WorldParameters;

/// Drives a [`SynthesisEngine`] over a fully populated parameter set and
/// owns the output sample buffer.
pub struct Synthesizer<E> {
    engine: E,
}

impl<E: SynthesisEngine> Synthesizer<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Number of samples the utterance produces:
    /// `floor((frame_count - 1) * frame_period / 1000 * sample_rate) + 1`.
    ///
    /// A single frame always yields one sample; zero frames yield
    /// [`SynthesisError::EmptyUtterance`].
    pub fn output_length(params: &WorldParameters) -> Result<usize, SynthesisError> {
        let frame_count = params.frame_count();
        if frame_count == 0 {
            return Err(SynthesisError::EmptyUtterance { frame_count });
        }
        let length = ((frame_count - 1) as f64 * params.frame_period() / 1000.0
            * params.sample_rate() as f64) as usize
            + 1;
        Ok(length)
    }

    /// Allocate the output buffer and render `params` into it.
    pub fn synthesize(&mut self, params: &WorldParameters) -> Result<Vec<f64>, SynthesisError> {
        let length = Self::output_length(params)?;
        let mut output = vec![0.0; length];
        self.engine.synthesize(params, &mut output)?;
        Ok(output)
    }
}

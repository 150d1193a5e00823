//! Band-limited aperiodicity and its expansion to full spectral resolution.
//!
//! Aperiodicity is stored compactly as a handful of decibel values measured
//! in fixed-width frequency bands. Synthesis needs one linear ratio per
//! spectral bin, so each frame is anchored at a −60 dB floor at 0 Hz and a
//! 0 dB ceiling at Nyquist, interpolated onto the full frequency axis, and
//! converted out of the log domain.

use crate::constants::{
    APERIODICITY_CEILING_DB, APERIODICITY_FLOOR_DB, FREQUENCY_INTERVAL, UPPER_LIMIT,
};
use crate::error::SynthesisError;
use crate::interpolation::interp1;
use crate::parameters::WorldParameters;

/// Number of coarse aperiodicity bands for a sampling rate.
///
/// Bands are `FREQUENCY_INTERVAL` wide and stop at `UPPER_LIMIT` or one
/// band below Nyquist, whichever is lower. Rates below 12 kHz leave no room
/// for a single band and yield 0.
pub fn band_count(sample_rate: usize) -> usize {
    let limit = UPPER_LIMIT.min(sample_rate as f64 / 2.0 - FREQUENCY_INTERVAL);
    (limit / FREQUENCY_INTERVAL) as usize
}

/// Coarse aperiodicity of one utterance: `frame_count * band_count` decibel
/// values in a flat row-major buffer.
///
/// Transient — exists only to populate the full-resolution aperiodicity of
/// a [`WorldParameters`] store and is discarded once expansion completes.
#[derive(Debug, Clone)]
pub struct CoarseAperiodicity {
    frame_count: usize,
    band_count: usize,
    values: Vec<f64>,
}

impl CoarseAperiodicity {
    pub fn new(
        frame_count: usize,
        band_count: usize,
        values: Vec<f64>,
    ) -> Result<Self, SynthesisError> {
        if band_count == 0 {
            return Err(SynthesisError::Configuration(
                "sampling rate too low for any aperiodicity band".into(),
            ));
        }
        if values.len() != frame_count * band_count {
            return Err(SynthesisError::ShapeMismatch {
                expected: frame_count * band_count,
                actual: values.len(),
            });
        }
        Ok(Self {
            frame_count,
            band_count,
            values,
        })
    }

    pub fn band_count(&self) -> usize {
        self.band_count
    }
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
    /// One frame's band values [dB].
    pub fn frame(&self, frame: usize) -> &[f64] {
        &self.values[frame * self.band_count..(frame + 1) * self.band_count]
    }

    /// Expand every frame onto the full frequency axis of `params`, writing
    /// linear-ratio aperiodicity into its per-bin rows.
    ///
    /// The anchors pin bin 0 to `10^(-60/20)` and the Nyquist bin to 1.0
    /// regardless of the stored band values.
    pub fn expand_into(&self, params: &mut WorldParameters) -> Result<(), SynthesisError> {
        if params.frame_count() != self.frame_count {
            return Err(SynthesisError::ShapeMismatch {
                expected: params.frame_count(),
                actual: self.frame_count,
            });
        }

        let coarse_axis = self.coarse_frequency_axis(params.sample_rate());
        if coarse_axis[self.band_count + 1] <= coarse_axis[self.band_count] {
            return Err(SynthesisError::Configuration(format!(
                "{} aperiodicity bands do not fit below Nyquist at {} Hz",
                self.band_count,
                params.sample_rate()
            )));
        }
        let frequency_axis = params.frequency_axis();

        let mut coarse = vec![0.0; self.band_count + 2];
        coarse[0] = APERIODICITY_FLOOR_DB;
        coarse[self.band_count + 1] = APERIODICITY_CEILING_DB;

        for frame in 0..self.frame_count {
            coarse[1..=self.band_count].copy_from_slice(self.frame(frame));
            let decibels = interp1(&coarse_axis, &coarse, &frequency_axis);
            for (bin, db) in params.aperiodicity_frame_mut(frame).iter_mut().zip(decibels) {
                *bin = 10.0f64.powf(db / 20.0);
            }
        }
        Ok(())
    }

    /// 0 Hz, one point per band edge, then Nyquist.
    fn coarse_frequency_axis(&self, sample_rate: usize) -> Vec<f64> {
        let mut axis: Vec<f64> = (0..=self.band_count)
            .map(|i| i as f64 * FREQUENCY_INTERVAL)
            .collect();
        axis.push(sample_rate as f64 / 2.0);
        axis
    }
}

//! In-memory parameter store for one utterance.

use crate::error::SynthesisError;

/// Analysis-domain parameters of one utterance.
///
/// `frame_period`, `sample_rate`, `fft_size` and `frame_count` are fixed at
/// construction; every array field is sized from them and writes that would
/// change a dimension are rejected. The spectral envelope and aperiodicity
/// are flat row-major buffers of `frame_count * (fft_size / 2 + 1)` values,
/// indexed by `(frame, bin)`.
#[derive(Debug, Clone)]
pub struct WorldParameters {
    frame_period: f64,
    sample_rate: usize,
    fft_size: usize,
    frame_count: usize,
    f0: Vec<f64>,
    time_axis: Vec<f64>,
    spectral_envelope: Vec<f64>,
    aperiodicity: Vec<f64>,
}

impl WorldParameters {
    /// Allocate a store for `frame_count` frames.
    ///
    /// F0 and both spectra start zeroed; the time axis is filled with frame
    /// centers at `frame_period` spacing. A `frame_count` of zero is
    /// representable (an empty F0 stream produces it) and is rejected later
    /// by the synthesis driver.
    pub fn new(
        sample_rate: usize,
        fft_size: usize,
        frame_period: f64,
        frame_count: usize,
    ) -> Result<Self, SynthesisError> {
        if sample_rate == 0 {
            return Err(SynthesisError::Configuration(
                "sampling rate must be positive".into(),
            ));
        }
        if fft_size == 0 || !fft_size.is_power_of_two() {
            return Err(SynthesisError::Configuration(format!(
                "FFT size must be a power of two, got {fft_size}"
            )));
        }
        if !frame_period.is_finite() || frame_period <= 0.0 {
            return Err(SynthesisError::Configuration(format!(
                "frame period must be positive, got {frame_period}"
            )));
        }

        let bins = fft_size / 2 + 1;
        Ok(Self {
            frame_period,
            sample_rate,
            fft_size,
            frame_count,
            f0: vec![0.0; frame_count],
            time_axis: (0..frame_count)
                .map(|i| i as f64 * frame_period / 1000.0)
                .collect(),
            spectral_envelope: vec![0.0; frame_count * bins],
            aperiodicity: vec![0.0; frame_count * bins],
        })
    }

    /// Frame shift [ms].
    pub fn frame_period(&self) -> f64 {
        self.frame_period
    }
    /// Sampling rate [Hz].
    pub fn sample_rate(&self) -> usize {
        self.sample_rate
    }
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
    /// Number of bins in one spectral frame (`fft_size / 2 + 1`).
    pub fn spectrum_length(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Per-frame fundamental frequency [Hz], 0 for unvoiced frames.
    pub fn f0(&self) -> &[f64] {
        &self.f0
    }
    pub fn f0_mut(&mut self) -> &mut [f64] {
        &mut self.f0
    }

    /// Frame-center times [sec], monotonically increasing.
    pub fn time_axis(&self) -> &[f64] {
        &self.time_axis
    }

    /// Frequencies of the full linear axis, `k * sample_rate / fft_size`
    /// for `k = 0..=fft_size / 2`.
    pub fn frequency_axis(&self) -> Vec<f64> {
        (0..self.spectrum_length())
            .map(|k| k as f64 * self.sample_rate as f64 / self.fft_size as f64)
            .collect()
    }

    /// Replace the F0 contour.
    pub fn set_f0(&mut self, f0: &[f64]) -> Result<(), SynthesisError> {
        if f0.len() != self.frame_count {
            return Err(SynthesisError::ShapeMismatch {
                expected: self.frame_count,
                actual: f0.len(),
            });
        }
        self.f0.copy_from_slice(f0);
        Ok(())
    }

    /// Replace the whole spectral envelope from a row-major slice of
    /// `frame_count * (fft_size / 2 + 1)` linear magnitudes.
    pub fn set_spectral_envelope(&mut self, values: &[f64]) -> Result<(), SynthesisError> {
        if values.len() != self.spectral_envelope.len() {
            return Err(SynthesisError::ShapeMismatch {
                expected: self.spectral_envelope.len(),
                actual: values.len(),
            });
        }
        self.spectral_envelope.copy_from_slice(values);
        Ok(())
    }

    pub fn spectral_envelope(&self) -> &[f64] {
        &self.spectral_envelope
    }
    pub fn spectral_envelope_frame(&self, frame: usize) -> &[f64] {
        let bins = self.spectrum_length();
        &self.spectral_envelope[frame * bins..(frame + 1) * bins]
    }
    pub fn spectral_envelope_frame_mut(&mut self, frame: usize) -> &mut [f64] {
        let bins = self.spectrum_length();
        &mut self.spectral_envelope[frame * bins..(frame + 1) * bins]
    }

    pub fn aperiodicity(&self) -> &[f64] {
        &self.aperiodicity
    }
    pub fn aperiodicity_frame(&self, frame: usize) -> &[f64] {
        let bins = self.spectrum_length();
        &self.aperiodicity[frame * bins..(frame + 1) * bins]
    }
    pub fn aperiodicity_frame_mut(&mut self, frame: usize) -> &mut [f64] {
        let bins = self.spectrum_length();
        &mut self.aperiodicity[frame * bins..(frame + 1) * bins]
    }
}

#[cfg(test)]
mod tests {
    use super::WorldParameters;
    use crate::error::SynthesisError;

    #[test]
    fn construction_fixes_dimensions() {
        let params = WorldParameters::new(16000, 1024, 5.0, 3).unwrap();

        assert_eq!(params.spectrum_length(), 513);
        assert_eq!(params.f0().len(), 3);
        assert_eq!(params.spectral_envelope().len(), 3 * 513);
        assert_eq!(params.aperiodicity().len(), 3 * 513);
    }

    #[test]
    fn time_axis_spacing_follows_frame_period() {
        let params = WorldParameters::new(16000, 1024, 5.0, 4).unwrap();

        let axis = params.time_axis();
        approx::assert_abs_diff_eq!(axis[0], 0.0);
        approx::assert_abs_diff_eq!(axis[3], 0.015);
        assert!(axis.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn rejects_non_power_of_two_fft_size() {
        assert!(matches!(
            WorldParameters::new(16000, 1000, 5.0, 3),
            Err(SynthesisError::Configuration(_))
        ));
        assert!(matches!(
            WorldParameters::new(16000, 0, 5.0, 3),
            Err(SynthesisError::Configuration(_))
        ));
    }

    #[test]
    fn rejects_degenerate_rate_and_period() {
        assert!(matches!(
            WorldParameters::new(0, 1024, 5.0, 3),
            Err(SynthesisError::Configuration(_))
        ));
        assert!(matches!(
            WorldParameters::new(16000, 1024, 0.0, 3),
            Err(SynthesisError::Configuration(_))
        ));
    }

    #[test]
    fn writes_with_the_wrong_shape_are_rejected() {
        let mut params = WorldParameters::new(16000, 1024, 5.0, 3).unwrap();

        let err = params.set_f0(&[100.0, 120.0]).unwrap_err();
        assert!(matches!(
            err,
            SynthesisError::ShapeMismatch {
                expected: 3,
                actual: 2
            }
        ));

        let err = params.set_spectral_envelope(&vec![1.0; 3 * 513 - 1]).unwrap_err();
        assert!(matches!(err, SynthesisError::ShapeMismatch { .. }));
    }

    #[test]
    fn frequency_axis_reaches_nyquist() {
        let params = WorldParameters::new(16000, 1024, 5.0, 1).unwrap();

        let axis = params.frequency_axis();
        approx::assert_abs_diff_eq!(axis[0], 0.0);
        approx::assert_abs_diff_eq!(axis[1], 15.625);
        approx::assert_abs_diff_eq!(axis[512], 8000.0);
    }
}

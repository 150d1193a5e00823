//! Optional in-place parameter modification: F0 scaling and formant
//! stretching. Neither transform keeps a copy of the pre-transform values.

use crate::error::SynthesisError;
use crate::interpolation::interp1;
use crate::parameters::WorldParameters;

/// Multiply every F0 value by `shift`. Purely elementwise.
pub fn scale_f0(params: &mut WorldParameters, shift: f64) -> Result<(), SynthesisError> {
    if !shift.is_finite() || shift <= 0.0 {
        return Err(SynthesisError::Configuration(format!(
            "F0 shift must be positive, got {shift}"
        )));
    }
    for f in params.f0_mut() {
        *f *= shift;
    }
    Ok(())
}

/// Warp the spectral envelope's frequency axis by `ratio`.
///
/// Each frame is resampled in the log-magnitude domain from the warped axis
/// `ratio * k / fft_size * sample_rate` onto the unwarped bin frequencies.
/// For `ratio < 1.0` the region above the warped Nyquist is filled with the
/// magnitude of the last valid bin, so compression never introduces silence
/// at the top of the spectrum.
pub fn stretch_spectral_envelope(
    params: &mut WorldParameters,
    ratio: f64,
) -> Result<(), SynthesisError> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(SynthesisError::Configuration(format!(
            "formant stretch ratio must be positive, got {ratio}"
        )));
    }
    let half = params.fft_size() / 2;
    let cutoff = (half as f64 * ratio) as usize;
    if ratio < 1.0 && cutoff < 1 {
        return Err(SynthesisError::Configuration(format!(
            "stretch ratio {ratio} leaves no spectrum below the warped Nyquist"
        )));
    }

    // the warp runs in the log domain, so reject bad magnitudes before
    // touching any frame
    for frame in 0..params.frame_count() {
        for (bin, &value) in params.spectral_envelope_frame(frame).iter().enumerate() {
            if !(value > 0.0) {
                return Err(SynthesisError::InvalidSpectrum { frame, bin });
            }
        }
    }

    let sample_rate = params.sample_rate() as f64;
    let fft_size = params.fft_size() as f64;
    let warped_axis: Vec<f64> = (0..=half)
        .map(|k| ratio * k as f64 / fft_size * sample_rate)
        .collect();
    let target_axis: Vec<f64> = (0..=half)
        .map(|k| k as f64 / fft_size * sample_rate)
        .collect();

    let mut log_magnitude = vec![0.0; half + 1];
    for frame in 0..params.frame_count() {
        let row = params.spectral_envelope_frame_mut(frame);
        for (bin, &value) in row.iter().enumerate() {
            log_magnitude[bin] = value.ln();
        }

        let warped = interp1(&warped_axis, &log_magnitude, &target_axis);
        for (value, log) in row.iter_mut().zip(&warped) {
            *value = log.exp();
        }

        if ratio < 1.0 {
            let hold = row[cutoff - 1];
            for value in &mut row[cutoff..] {
                *value = hold;
            }
        }
    }
    Ok(())
}

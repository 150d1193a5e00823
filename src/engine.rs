//! Waveform generation from a prepared parameter set.

use std::f64::consts::PI;

use crate::error::SynthesisError;
use crate::parameters::WorldParameters;

/// Capability interface of the sample-generating engine.
///
/// Implementations must be deterministic: the same parameter set always
/// yields the same samples. `output` is allocated and sized by the caller;
/// the engine fills all of it.
pub trait SynthesisEngine {
    fn synthesize(
        &mut self,
        params: &WorldParameters,
        output: &mut [f64],
    ) -> Result<(), SynthesisError>;
}

/// Harmonic-plus-noise engine.
///
/// Voiced frames are rendered as a bank of F0 harmonics, each weighted by
/// the spectral envelope and attenuated by the periodic share of the
/// frame's aperiodicity; the aperiodic share becomes envelope-scaled
/// Gaussian noise. The fundamental phase is carried across frame
/// boundaries and reset on unvoiced frames.
#[derive(Debug, Clone)]
pub struct HarmonicNoiseEngine {
    random: Random,
    phase: f64,
}

impl HarmonicNoiseEngine {
    pub fn new() -> Self {
        Self {
            random: Random::new(),
            phase: 0.0,
        }
    }
}

impl Default for HarmonicNoiseEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SynthesisEngine for HarmonicNoiseEngine {
    fn synthesize(
        &mut self,
        params: &WorldParameters,
        output: &mut [f64],
    ) -> Result<(), SynthesisError> {
        let frame_start = |frame: usize| {
            (frame as f64 * params.frame_period() / 1000.0 * params.sample_rate() as f64) as usize
        };
        for frame in 0..params.frame_count() {
            let start = frame_start(frame).min(output.len());
            let end = frame_start(frame + 1).min(output.len());
            self.render_frame(params, frame, &mut output[start..end]);
        }
        Ok(())
    }
}

impl HarmonicNoiseEngine {
    fn render_frame(&mut self, params: &WorldParameters, frame: usize, output: &mut [f64]) {
        let sample_rate = params.sample_rate() as f64;
        let f0 = params.f0()[frame];
        let envelope = params.spectral_envelope_frame(frame);
        let aperiodicity = params.aperiodicity_frame(frame);

        let noise_power = envelope
            .iter()
            .zip(aperiodicity)
            .map(|(power, ap)| power * ap * ap)
            .sum::<f64>()
            / envelope.len() as f64;
        let noise_gain = noise_power.sqrt();

        if f0 <= 0.0 {
            self.phase = 0.0;
            for sample in output.iter_mut() {
                *sample = noise_gain * self.random.normal();
            }
            return;
        }

        // per-harmonic amplitudes sampled off the envelope; each harmonic
        // carries the periodic power of one F0-wide slice of the spectrum
        let bin_width = sample_rate / params.fft_size() as f64;
        let harmonic_count = (sample_rate / 2.0 / f0) as usize;
        let scale = (f0 / sample_rate).sqrt();
        let amplitudes: Vec<f64> = (1..=harmonic_count)
            .map(|harmonic| {
                let position = harmonic as f64 * f0 / bin_width;
                let power = sample_at(envelope, position);
                let ap = sample_at(aperiodicity, position).min(1.0);
                (power * (1.0 - ap * ap)).max(0.0).sqrt() * scale
            })
            .collect();

        let increment = 2.0 * PI * f0 / sample_rate;
        for sample in output.iter_mut() {
            let mut value = 0.0;
            for (h, &amplitude) in amplitudes.iter().enumerate() {
                value += amplitude * ((h + 1) as f64 * self.phase).sin();
            }
            *sample = value + noise_gain * self.random.normal();

            self.phase += increment;
            if self.phase > 2.0 * PI {
                self.phase -= 2.0 * PI;
            }
        }
    }
}

/// Linear interpolation in index space with flat hold at both edges.
fn sample_at(values: &[f64], position: f64) -> f64 {
    let last = values.len() - 1;
    if position <= 0.0 {
        return values[0];
    }
    if position >= last as f64 {
        return values[last];
    }
    let index = position as usize;
    let t = position - index as f64;
    values[index] + t * (values[index + 1] - values[index])
}

#[derive(Debug, Clone)]
struct Random {
    carry: Option<f64>,
    state: u64,
}

impl Random {
    fn new() -> Self {
        Self {
            carry: None,
            state: 1,
        }
    }

    /// Standard normal deviate (polar Box-Muller over a fixed-seed LCG).
    fn normal(&mut self) -> f64 {
        if let Some(value) = self.carry.take() {
            return value;
        }
        loop {
            let u = 2.0 * self.uniform() - 1.0;
            let v = 2.0 * self.uniform() - 1.0;
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                let scale = (-2.0 * s.ln() / s).sqrt();
                self.carry = Some(v * scale);
                return u * scale;
            }
        }
    }

    fn uniform(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
        ((self.state / 65536) % 32768) as f64 / 32767.0
    }
}

#[cfg(test)]
mod tests {
    use super::{HarmonicNoiseEngine, Random, SynthesisEngine, sample_at};
    use crate::parameters::WorldParameters;

    fn uniform_utterance(f0: f64) -> WorldParameters {
        let mut params = WorldParameters::new(16000, 1024, 5.0, 3).unwrap();
        params.set_f0(&[f0; 3]).unwrap();
        let len = 3 * params.spectrum_length();
        params.set_spectral_envelope(&vec![1.0; len]).unwrap();
        for frame in 0..3 {
            params.aperiodicity_frame_mut(frame).fill(0.1);
        }
        params
    }

    #[test]
    fn deterministic_across_fresh_engines() {
        let params = uniform_utterance(150.0);
        let mut a = vec![0.0; 161];
        let mut b = vec![0.0; 161];

        HarmonicNoiseEngine::new().synthesize(&params, &mut a).unwrap();
        HarmonicNoiseEngine::new().synthesize(&params, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn voiced_output_is_finite_and_nonzero() {
        let params = uniform_utterance(150.0);
        let mut output = vec![0.0; 161];
        HarmonicNoiseEngine::new()
            .synthesize(&params, &mut output)
            .unwrap();

        assert!(output.iter().all(|s| s.is_finite()));
        assert!(output.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn unvoiced_frames_are_noise_only() {
        let params = uniform_utterance(0.0);
        let mut output = vec![0.0; 161];
        HarmonicNoiseEngine::new()
            .synthesize(&params, &mut output)
            .unwrap();

        assert!(output.iter().all(|s| s.is_finite()));
        assert!(output.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn silent_envelope_produces_silence() {
        let mut params = WorldParameters::new(16000, 1024, 5.0, 3).unwrap();
        params.set_f0(&[150.0; 3]).unwrap();
        for frame in 0..3 {
            params.aperiodicity_frame_mut(frame).fill(1.0);
        }

        let mut output = vec![1.0; 161];
        HarmonicNoiseEngine::new()
            .synthesize(&params, &mut output)
            .unwrap();
        assert!(output.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn index_sampling_holds_flat_at_the_edges() {
        let values = [1.0, 2.0, 4.0];
        assert_eq!(sample_at(&values, -1.0), 1.0);
        assert_eq!(sample_at(&values, 0.5), 1.5);
        assert_eq!(sample_at(&values, 1.5), 3.0);
        assert_eq!(sample_at(&values, 9.0), 4.0);
    }

    #[test]
    fn normal_deviates_have_sane_moments() {
        let mut random = Random::new();
        let samples: Vec<f64> = (0..20000).map(|_| random.normal()).collect();

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let variance =
            samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / samples.len() as f64;
        approx::assert_abs_diff_eq!(mean, 0.0, epsilon = 0.05);
        approx::assert_abs_diff_eq!(variance, 1.0, epsilon = 0.05);
    }
}

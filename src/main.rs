use parawave::aperiodicity::{CoarseAperiodicity, band_count};
use parawave::constants::DEFAULT_FRAME_PERIOD;
use parawave::engine::HarmonicNoiseEngine;
use parawave::modify::{scale_f0, stretch_spectral_envelope};
use parawave::parameters::WorldParameters;
use parawave::reader;
use parawave::synthesis::Synthesizer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 7 || args.len() > 9 {
        eprintln!(
            "command: parawave FFT_length sampling_rate F0_file spectrogram_file \
             aperiodicity_file output_waveform [F0_shift] [formant_ratio]"
        );
        std::process::exit(2);
    }

    let fft_size: usize = args[1].parse()?;
    let sample_rate: usize = args[2].parse()?;

    let f0 = reader::read_f0(&args[3])?;
    let frame_count = f0.len();
    let mut params = WorldParameters::new(sample_rate, fft_size, DEFAULT_FRAME_PERIOD, frame_count)?;
    params.set_f0(&f0)?;

    let envelope = reader::read_matrix(
        &args[4],
        "spectral envelope",
        frame_count,
        params.spectrum_length(),
    )?;
    params.set_spectral_envelope(&envelope)?;

    let bands = band_count(sample_rate);
    let coarse_values = reader::read_matrix(&args[5], "coarse aperiodicity", frame_count, bands)?;
    let coarse = CoarseAperiodicity::new(frame_count, bands, coarse_values)?;
    coarse.expand_into(&mut params)?;

    if let Some(shift) = args.get(7) {
        scale_f0(&mut params, shift.parse()?)?;
    }
    if let Some(ratio) = args.get(8) {
        stretch_spectral_envelope(&mut params, ratio.parse()?)?;
    }

    let mut synthesizer = Synthesizer::new(HarmonicNoiseEngine::new());
    let samples = synthesizer.synthesize(&params)?;

    let mut writer = hound::WavWriter::create(
        &args[6],
        hound::WavSpec {
            channels: 1,
            sample_rate: sample_rate as u32,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        },
    )?;
    for &sample in &samples {
        let value = (sample * 32767.0).round().clamp(-32768.0, 32767.0) as i16;
        writer.write_sample(value)?;
    }
    writer.finalize()?;

    println!("File information");
    println!("Sampling : {} Hz 16 Bit", sample_rate);
    println!("Length {} [sample]", samples.len());
    println!(
        "Length {} [sec]",
        samples.len() as f64 / sample_rate as f64
    );
    println!("complete {}.", args[6]);
    Ok(())
}

use std::fmt;
use std::sync::Arc;

use realfft::{num_complex::Complex64, ComplexToReal, RealFftPlanner};

use super::{linspace, Harmonic, HarmonicSet};
use crate::plot::Series;
use crate::Result;

/// Builds waveforms from harmonic sets, keeping the inverse FFT plan for the
/// last output length around between calls.
pub struct WaveformSynth {
    planner: RealFftPlanner<f64>,
    fft: Option<InverseResources>,
}

impl WaveformSynth {
    pub fn new() -> Self {
        Self {
            planner: RealFftPlanner::new(),
            fft: None,
        }
    }

    /// Time-domain samples of `harmonics` on top of a constant `dc` term.
    ///
    /// Produces `n` samples, or `2 * harmonics.len()` when `n` is `None`.
    /// Harmonics above the Nyquist bin of the output length are dropped. The
    /// inverse transform is unnormalised, so a harmonic of magnitude `m`
    /// comes out with amplitude `m`.
    pub fn irdft_from_polar(
        &mut self,
        dc: f64,
        harmonics: &[Harmonic],
        n: Option<usize>,
    ) -> Result<Vec<f64>> {
        let n = n.unwrap_or(2 * harmonics.len());
        if n == 0 {
            return Ok(Vec::new());
        }

        let fft = self.prepare_fft(n);
        fft.spectrum.fill(Complex64::new(0.0, 0.0));
        fft.spectrum[0] = Complex64::new(dc, 0.0);
        let bins = fft.spectrum.len();
        for (bin, harmonic) in fft.spectrum[1..].iter_mut().zip(harmonics) {
            *bin = Complex64::from_polar(harmonic.magnitude / 2.0, harmonic.phase);
        }
        // Only the real part of the Nyquist bin contributes for even lengths.
        if n % 2 == 0 {
            fft.spectrum[bins - 1].im = 0.0;
        }

        fft.plan
            .process_with_scratch(&mut fft.spectrum, &mut fft.output, &mut fft.scratch)?;
        Ok(fft.output.clone())
    }

    /// Composite waveform of `harmonics` over `n` samples.
    ///
    /// The time axis spans [-0.5, 0.5] and the samples are rotated right by
    /// `n / 2` so the waveform is centred on t = 0.
    pub fn composite(&mut self, harmonics: &HarmonicSet, n: usize) -> Result<Series> {
        let mut samples = self.irdft_from_polar(0.0, harmonics.as_slice(), Some(n))?;
        let ts = linspace(-0.5, 0.5, samples.len());
        if !samples.is_empty() {
            let shift = (n / 2) % samples.len();
            samples.rotate_right(shift);
        }
        tracing::trace!(harmonics = harmonics.len(), samples = samples.len(), "composite computed");
        Ok(Series::new(ts, samples))
    }

    fn prepare_fft(&mut self, size: usize) -> &mut InverseResources {
        let planner = &mut self.planner;
        let fft = self
            .fft
            .get_or_insert_with(|| InverseResources::plan(planner, size));
        if fft.size != size {
            *fft = InverseResources::plan(planner, size);
        }
        fft
    }
}

impl Default for WaveformSynth {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WaveformSynth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaveformSynth")
            .field("size", &self.fft.as_ref().map(|fft| fft.size))
            .finish()
    }
}

struct InverseResources {
    size: usize,
    plan: Arc<dyn ComplexToReal<f64>>,
    scratch: Vec<Complex64>,
    spectrum: Vec<Complex64>,
    output: Vec<f64>,
}

impl InverseResources {
    fn plan(planner: &mut RealFftPlanner<f64>, size: usize) -> Self {
        let plan = planner.plan_fft_inverse(size);
        Self {
            size,
            scratch: plan.make_scratch_vec(),
            spectrum: plan.make_input_vec(),
            output: plan.make_output_vec(),
            plan,
        }
    }
}

/// One-shot form of [`WaveformSynth::irdft_from_polar`].
pub fn irdft_from_polar(dc: f64, harmonics: &[Harmonic], n: Option<usize>) -> Result<Vec<f64>> {
    WaveformSynth::new().irdft_from_polar(dc, harmonics, n)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{PI, TAU};

    use approx::assert_relative_eq;

    use super::*;
    use crate::harmonics::DEFAULT_SAMPLES;

    #[test]
    fn fundamental_has_unit_amplitude() {
        let series = HarmonicSet::fundamental()
            .composite(DEFAULT_SAMPLES)
            .unwrap();
        assert_eq!(series.len(), DEFAULT_SAMPLES);
        assert_relative_eq!(series.max_y().unwrap(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(series.x[0], -0.5);
        assert_relative_eq!(series.x[DEFAULT_SAMPLES - 1], 0.5);
    }

    #[test]
    fn composite_is_centred_cosine() {
        let series = HarmonicSet::fundamental().composite(8).unwrap();
        // Unrotated sample k is cos(2πk/8); rotating by 4 puts k = 0 in the
        // middle of the axis.
        assert_relative_eq!(series.y[4], 1.0, epsilon = 1e-12);
        assert_relative_eq!(series.y[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(series.y[6], (PI / 2.0).cos(), epsilon = 1e-12);
    }

    #[test]
    fn recovers_magnitude_and_phase() {
        let harmonics = [Harmonic::new(0.0, 0.0), Harmonic::new(0.5, 1.0)];
        let samples = irdft_from_polar(0.25, &harmonics, Some(64)).unwrap();
        for (k, value) in samples.iter().enumerate() {
            let t = k as f64 / 64.0;
            let expected = 0.25 + 0.5 * (2.0 * TAU * t + 1.0).cos();
            assert_relative_eq!(*value, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn default_length_is_twice_the_harmonic_count() {
        let harmonics = [Harmonic::new(1.0, 0.0), Harmonic::new(1.0, 0.0)];
        assert_eq!(irdft_from_polar(0.0, &harmonics, None).unwrap().len(), 4);
        assert!(irdft_from_polar(0.0, &[], None).unwrap().is_empty());
    }

    #[test]
    fn empty_set_is_silence() {
        let series = HarmonicSet::default().composite(16).unwrap();
        assert_eq!(series.len(), 16);
        assert!(series.y.iter().all(|y| y.abs() < 1e-15));
    }

    #[test]
    fn reuses_plan_for_same_length() {
        let mut synth = WaveformSynth::new();
        let a = synth.composite(&HarmonicSet::fundamental(), 32).unwrap();
        let b = synth.composite(&HarmonicSet::fundamental(), 32).unwrap();
        assert_eq!(a, b);
        let c = synth.composite(&HarmonicSet::fundamental(), 16).unwrap();
        assert_eq!(c.len(), 16);
    }
}

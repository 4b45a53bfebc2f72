//! Harmonic sets and the waveforms derived from them.

mod synth;

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use synth::{irdft_from_polar, WaveformSynth};

use crate::plot::Series;
use crate::{HarmonicError, Result};

/// Number of samples used for plotted waveforms.
pub const DEFAULT_SAMPLES: usize = 1000;

/// One sinusoid at an integer multiple of the fundamental.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Harmonic {
    pub magnitude: f64,
    /// Phase in radians.
    pub phase: f64,
}

impl Harmonic {
    pub const SILENT: Harmonic = Harmonic {
        magnitude: 0.0,
        phase: 0.0,
    };

    pub fn new(magnitude: f64, phase: f64) -> Self {
        Self { magnitude, phase }
    }
}

/// Ordered harmonics; index `i` is the `(i + 1)`-th multiple of the
/// fundamental. May be empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HarmonicSet(Vec<Harmonic>);

impl HarmonicSet {
    pub fn new(harmonics: Vec<Harmonic>) -> Self {
        Self(harmonics)
    }

    /// A single harmonic of magnitude 1 and phase 0.
    pub fn fundamental() -> Self {
        Self(vec![Harmonic::new(1.0, 0.0)])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Harmonic> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Harmonic> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Harmonic] {
        &self.0
    }

    /// Copy with a silent harmonic appended.
    pub fn with_added(&self) -> Self {
        let mut next = self.clone();
        next.0.push(Harmonic::SILENT);
        next
    }

    /// Copy without the last harmonic; an empty set stays empty.
    pub fn with_last_removed(&self) -> Self {
        let mut next = self.clone();
        next.0.pop();
        next
    }

    /// Copy with the harmonic at `index` replaced, or `None` when `index` is
    /// out of range.
    pub fn with_replaced(&self, index: usize, harmonic: Harmonic) -> Option<Self> {
        let mut next = self.clone();
        *next.0.get_mut(index)? = harmonic;
        Some(next)
    }

    /// Sum of all harmonics sampled `n` times over one period, centred on
    /// t = 0.
    pub fn composite(&self, n: usize) -> Result<Series> {
        WaveformSynth::new().composite(self, n)
    }

    /// One cosine series per harmonic over `n` points in [-0.5, 0.5].
    ///
    /// Series are computed as the iterator is advanced.
    pub fn components(&self, n: usize) -> impl Iterator<Item = Series> + '_ {
        let ts = linspace(-0.5, 0.5, n);
        self.0.iter().enumerate().map(move |(index, harmonic)| {
            let order = (index + 1) as f64;
            let ys = ts
                .iter()
                .map(|t| harmonic.magnitude * (order * TAU * t + harmonic.phase).cos())
                .collect();
            Series::new(ts.clone(), ys)
        })
    }
}

impl From<Vec<Harmonic>> for HarmonicSet {
    fn from(harmonics: Vec<Harmonic>) -> Self {
        Self(harmonics)
    }
}

impl<'a> IntoIterator for &'a HarmonicSet {
    type Item = &'a Harmonic;
    type IntoIter = std::slice::Iter<'a, Harmonic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parses `"magnitude:phase,magnitude:phase"`; the phase may be omitted.
impl FromStr for HarmonicSet {
    type Err = HarmonicError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }

        s.split(',')
            .map(|entry| -> Result<Harmonic> {
                let entry = entry.trim();
                let (magnitude, phase) = entry.split_once(':').unwrap_or((entry, "0"));
                let parse = |value: &str| {
                    value.trim().parse::<f64>().map_err(|_| {
                        HarmonicError::argument(format!("invalid harmonic `{entry}`"))
                    })
                };
                Ok(Harmonic::new(parse(magnitude)?, parse(phase)?))
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl fmt::Display for HarmonicSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, harmonic) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", harmonic.magnitude, harmonic.phase)?;
        }
        Ok(())
    }
}

/// `num` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            (0..num).map(|i| start + step * i as f64).collect()
        }
    }
}

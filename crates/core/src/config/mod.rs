use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::harmonics::{HarmonicSet, DEFAULT_SAMPLES};
use crate::{HarmonicError, Result};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub composition: CompositionConfig,
    pub plot: PlotConfig,
}

impl AppConfig {
    /// Loads a JSON configuration file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.composition.samples == 0 {
            return Err(HarmonicError::argument("composition.samples must be positive"));
        }
        if let Some(harmonic) = self
            .composition
            .harmonics
            .iter()
            .find(|h| !(h.magnitude.is_finite() && h.magnitude >= 0.0 && h.phase.is_finite()))
        {
            return Err(HarmonicError::argument(format!(
                "harmonic {}:{} needs a finite, non-negative magnitude and a finite phase",
                harmonic.magnitude, harmonic.phase
            )));
        }
        if self.plot.width < 2 || self.plot.height < 2 {
            return Err(HarmonicError::argument(
                "plot.width and plot.height must be at least 2",
            ));
        }
        if self.plot.image_width == 0 || self.plot.image_height == 0 {
            return Err(HarmonicError::argument(
                "plot.image_width and plot.image_height must be positive",
            ));
        }
        Ok(())
    }
}

/// Initial state of the composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    /// Samples per plotted waveform.
    pub samples: usize,
    pub harmonics: HarmonicSet,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            harmonics: HarmonicSet::fundamental(),
        }
    }
}

/// Which plot description the composition emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotBackend {
    /// Literal series, updated in place between renders.
    #[default]
    Series,
    /// Drawing functions, cleared and redrawn on every change.
    Function,
}

/// Terminal rendering of the plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub backend: PlotBackend,
    /// Text preview size in characters.
    pub width: usize,
    pub height: usize,
    /// SVG figure size in pixels.
    pub image_width: u32,
    pub image_height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            backend: PlotBackend::default(),
            width: 72,
            height: 16,
            image_width: 640,
            image_height: 480,
        }
    }
}

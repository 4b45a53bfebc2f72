//! Application shell: owns the configuration and the host running the
//! harmonic composition.

use std::f64::consts::TAU;

use crate::composition::{CompositionProps, HARMONICS_STATE, HARMONIC_COMPOSITION};
use crate::config::AppConfig;
use crate::harmonics::HarmonicSet;
use crate::host::{Host, SliderInfo};
use crate::plot::{render_svg, render_text};
use crate::{HarmonicError, Result};

const FIGURE_TITLES: [&str; 2] = ["composite", "components"];

pub struct App {
    config: AppConfig,
    host: Host,
}

impl App {
    /// Builds the application without rendering anything.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            host: Host::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Mounts the composition and runs the first render.
    pub fn start(&mut self) -> Result<()> {
        self.config.validate()?;
        let props =
            CompositionProps::from_config(&self.config.composition, self.config.plot.backend);
        tracing::info!(
            harmonics = props.initial.len(),
            samples = props.samples,
            backend = ?props.backend,
            "starting harmonic composition"
        );
        self.host.mount(HARMONIC_COMPOSITION.element(props))
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut Host {
        &mut self.host
    }

    /// The committed harmonics, or `None` before [`App::start`].
    pub fn harmonics(&self) -> Option<HarmonicSet> {
        self.host.root_owner()?.peek(HARMONICS_STATE)
    }

    pub fn add_harmonic(&mut self) -> Result<()> {
        self.press("+")
    }

    /// Removes the last harmonic; does nothing once every harmonic is gone.
    pub fn remove_harmonic(&mut self) -> Result<()> {
        self.press("-")
    }

    /// Drags the magnitude slider of harmonic `index` to `value`.
    pub fn set_magnitude(&mut self, index: usize, value: f64) -> Result<()> {
        let slider = self.slider(2 * index)?;
        self.host.slide(&slider.path, value)
    }

    /// Drags the phase slider of harmonic `index` to `turns`, a fraction of a
    /// full turn.
    pub fn set_phase(&mut self, index: usize, turns: f64) -> Result<()> {
        let slider = self.slider(2 * index + 1)?;
        self.host.slide(&slider.path, turns)
    }

    /// Text rendering of both figures followed by the control layout.
    pub fn render_text(&self) -> String {
        let width = self.config.plot.width;
        let height = self.config.plot.height;
        let mut out = String::new();
        for (title, widget) in FIGURE_TITLES.into_iter().zip(self.host.figures()) {
            out.push_str(&format!("{title}:\n"));
            out.push_str(&render_text(widget, width, height));
        }
        if let Some(harmonics) = self.harmonics() {
            out.push_str("harmonics:\n");
            for (index, harmonic) in harmonics.iter().enumerate() {
                out.push_str(&format!(
                    "  {:>2}: magnitude {:.3}, phase {:.3} turns\n",
                    index + 1,
                    harmonic.magnitude,
                    harmonic.phase / TAU
                ));
            }
        }
        if let Some(tree) = self.host.tree() {
            out.push_str("layout:\n");
            out.push_str(&tree.outline());
        }
        out
    }

    /// Both figures as SVG documents, paired with their titles.
    pub fn render_svg(&self) -> Result<Vec<(&'static str, String)>> {
        let size = (self.config.plot.image_width, self.config.plot.image_height);
        FIGURE_TITLES
            .into_iter()
            .zip(self.host.figures())
            .map(|(title, widget)| Ok((title, render_svg(widget, title, size)?)))
            .collect()
    }

    fn press(&mut self, label: &str) -> Result<()> {
        match self.host.buttons().into_iter().find(|b| b.label == label) {
            Some(button) => self.host.click(&button.path),
            None => {
                tracing::debug!(label, "button not shown, ignoring press");
                Ok(())
            }
        }
    }

    fn slider(&self, position: usize) -> Result<SliderInfo> {
        self.host.sliders().into_iter().nth(position).ok_or_else(|| {
            HarmonicError::argument(format!(
                "no harmonic {} to edit",
                position / 2 + 1
            ))
        })
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

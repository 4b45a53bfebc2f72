//! The harmonic composition screen: plots of the composite waveform and its
//! components, one magnitude/phase control per harmonic, and buttons to add
//! or remove harmonics.

mod control;

use std::cell::RefCell;
use std::rc::Rc;

pub use control::{ControlProps, MAGNITUDE_AND_PHASE_CONTROL};

use crate::component::FunctionComponent;
use crate::config::{CompositionConfig, PlotBackend};
use crate::harmonics::{Harmonic, HarmonicSet, WaveformSynth};
use crate::hooks::{Hooks, StateCell};
use crate::plot::{PlotExtra, PlotFn, PlotSurface, Series, SeriesData};
use crate::view::{Callback, Orientation, View};
use crate::Result;

/// Name of the state cell holding the committed harmonics.
pub const HARMONICS_STATE: &str = "harmonics";

pub const HARMONIC_COMPOSITION: FunctionComponent<CompositionProps> =
    FunctionComponent::new("HarmonicComposition", render_composition);

#[derive(Debug, Clone, PartialEq)]
pub struct CompositionProps {
    /// Harmonics used on the first render only.
    pub initial: HarmonicSet,
    pub samples: usize,
    pub backend: PlotBackend,
}

impl CompositionProps {
    pub fn from_config(config: &CompositionConfig, backend: PlotBackend) -> Self {
        Self {
            initial: config.harmonics.clone(),
            samples: config.samples,
            backend,
        }
    }
}

impl Default for CompositionProps {
    fn default() -> Self {
        Self::from_config(&CompositionConfig::default(), PlotBackend::default())
    }
}

/// Operations on the committed harmonic set.
///
/// Every operation writes a fresh copy of the set back into the cell, which
/// schedules a render of the composition.
#[derive(Debug, Clone)]
pub struct CompositionState {
    harmonics: StateCell<HarmonicSet>,
}

impl CompositionState {
    pub fn declare(hooks: &mut Hooks<'_>, initial: &HarmonicSet) -> Result<Self> {
        let harmonics = hooks.use_named_state(HARMONICS_STATE, initial.clone())?;
        Ok(Self { harmonics })
    }

    pub fn harmonics(&self) -> HarmonicSet {
        self.harmonics.value()
    }

    pub fn add_harmonic(&self) -> HarmonicSet {
        self.harmonics.map(|set| set.with_added())
    }

    /// Drops the last harmonic; does nothing on an empty set.
    pub fn remove_harmonic(&self) -> HarmonicSet {
        self.harmonics.map(|set| set.with_last_removed())
    }

    /// Setter for the harmonic at `index`.
    ///
    /// The setter reads the set current at call time. Once the harmonic has
    /// been removed, calls are ignored.
    pub fn set_ith_harmonic(&self, index: usize) -> impl Fn(f64, f64) + 'static {
        let harmonics = self.harmonics.clone();
        move |magnitude, phase| {
            let current = harmonics.value();
            match current.with_replaced(index, Harmonic::new(magnitude, phase)) {
                Some(next) => {
                    harmonics.set(next);
                }
                None => tracing::warn!(
                    index,
                    len = current.len(),
                    "ignoring edit of a harmonic that no longer exists"
                ),
            }
        }
    }
}

fn render_composition(hooks: &mut Hooks<'_>, props: &CompositionProps) -> Result<View> {
    let state = CompositionState::declare(hooks, &props.initial)?;
    let synth = hooks.use_state_with(|| Rc::new(RefCell::new(WaveformSynth::new())))?;

    let harmonics = state.harmonics();
    let composite = synth.value().borrow_mut().composite(&harmonics, props.samples)?;
    let components: Vec<Series> = harmonics.components(props.samples).collect();
    tracing::debug!(harmonics = harmonics.len(), "rendering composition");

    let plots = match props.backend {
        PlotBackend::Series => View::row([
            View::figure(SeriesData::new(vec![composite])),
            View::figure(SeriesData::new(components)),
        ]),
        PlotBackend::Function => View::row([
            View::figure(PlotFn::figure(
                move |surface| surface.plot(&composite.x, &composite.y),
                [PlotExtra::Grid],
            )),
            View::figure(PlotFn::figure(
                move |surface| plot_all(surface, &components),
                [PlotExtra::Grid],
            )),
        ]),
    };

    let controls = View::row(harmonics.iter().enumerate().map(|(index, harmonic)| {
        let set = state.set_ith_harmonic(index);
        View::column([
            View::centered_label(format!("{} harmonic", ordinal(index + 1))),
            MAGNITUDE_AND_PHASE_CONTROL.element(ControlProps {
                on_change: Callback::new(move |(magnitude, phase): (f64, f64)| {
                    set(magnitude, phase)
                }),
                magnitude: harmonic.magnitude,
                phase: harmonic.phase,
                orientation: Orientation::Vertical,
            }),
        ])
    }));

    let mut buttons = vec![View::button("+", {
        let state = state.clone();
        move || {
            state.add_harmonic();
        }
    })];
    if !harmonics.is_empty() {
        buttons.push(View::button("-", move || {
            state.remove_harmonic();
        }));
    }

    Ok(View::column([plots, controls, View::column(buttons)]))
}

fn plot_all(surface: &mut dyn PlotSurface, series: &[Series]) -> Result<()> {
    for line in series {
        surface.plot(&line.x, &line.y)?;
    }
    Ok(())
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

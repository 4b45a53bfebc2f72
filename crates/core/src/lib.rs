//! Core library for the harmonic composer.
//!
//! A small hook runtime ([`hooks`]) backs function components
//! ([`component`]) that describe their UI as a [`view::View`] tree. The
//! [`host`] mounts those components, serialises their renders and keeps plot
//! widgets ([`plot`]) alive between renders. [`composition`] is the screen
//! itself: a Fourier series built from editable harmonics ([`harmonics`]).

pub mod app;
pub mod component;
pub mod composition;
pub mod config;
pub mod error;
pub mod harmonics;
pub mod hooks;
pub mod host;
pub mod plot;
pub mod view;

pub use app::App;
pub use component::{Component, FunctionComponent, Props};
pub use composition::{CompositionProps, CompositionState, HARMONIC_COMPOSITION};
pub use config::{AppConfig, CompositionConfig, PlotBackend, PlotConfig};
pub use error::{HarmonicError, Result};
pub use harmonics::{Harmonic, HarmonicSet, WaveformSynth, DEFAULT_SAMPLES};
pub use hooks::{Hooks, StateCell, StateDecl};
pub use host::Host;
pub use plot::{PlotDescription, PlotFn, PlotWidget, Series, SeriesData};
pub use view::View;

use std::f64::consts::TAU;

use crate::component::FunctionComponent;
use crate::hooks::Hooks;
use crate::view::{Callback, Orientation, Slider, View};
use crate::Result;

pub const MAGNITUDE_AND_PHASE_CONTROL: FunctionComponent<ControlProps> =
    FunctionComponent::new("MagnitudeAndPhaseControl", render_control);

#[derive(Debug, Clone, PartialEq)]
pub struct ControlProps {
    /// Receives `(magnitude, phase in radians)` after every drag.
    pub on_change: Callback<(f64, f64)>,
    pub magnitude: f64,
    pub phase: f64,
    pub orientation: Orientation,
}

/// Two sliders editing one harmonic.
///
/// Magnitude and phase live in local state seeded from the props on the
/// first render; the phase slider edits the fraction of a full turn.
fn render_control(hooks: &mut Hooks<'_>, props: &ControlProps) -> Result<View> {
    let magnitude = hooks.use_state(props.magnitude)?;
    let turns = hooks.use_state(props.phase / TAU)?;
    // Seeds above one widen the magnitude range instead of being clamped.
    let magnitude_max = hooks.use_state(props.magnitude.max(1.0))?;

    let magnitude_slider = Slider::new(magnitude.value(), 0.0..=magnitude_max.value())
        .orientation(props.orientation)
        .on_change({
            let (magnitude, turns) = (magnitude.clone(), turns.clone());
            let on_change = props.on_change.clone();
            move |value| on_change.call((magnitude.set(value), turns.value() * TAU))
        });

    let phase_slider = Slider::new(turns.value(), 0.0..=1.0)
        .orientation(props.orientation)
        .on_change({
            let on_change = props.on_change.clone();
            move |value| on_change.call((magnitude.value(), turns.set(value) * TAU))
        });

    let children: [View; 2] = [magnitude_slider.into(), phase_slider.into()];
    Ok(match props.orientation {
        Orientation::Vertical => View::row(children),
        Orientation::Horizontal => View::column(children),
    })
}

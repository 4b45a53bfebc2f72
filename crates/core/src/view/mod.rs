//! Declarative UI tree returned by render functions.

use std::fmt::{self, Write};
use std::ops::RangeInclusive;
use std::rc::Rc;

use crate::component::ComponentElement;
use crate::hooks::OwnerId;
use crate::plot::PlotDescription;

/// Shared event handler. Two callbacks are equal only when they are the same
/// allocation.
pub struct Callback<A> {
    f: Rc<dyn Fn(A)>,
}

impl<A> Callback<A> {
    pub fn new(f: impl Fn(A) + 'static) -> Self {
        Self { f: Rc::new(f) }
    }

    pub fn call(&self, arg: A) {
        (self.f)(arg)
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self { f: self.f.clone() }
    }
}

impl<A> PartialEq for Callback<A> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.f, &other.f)
    }
}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Row,
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub on_click: Callback<()>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub orientation: Orientation,
    pub on_change: Option<Callback<f64>>,
}

impl Slider {
    pub fn new(value: f64, range: RangeInclusive<f64>) -> Self {
        Self {
            value,
            min: *range.start(),
            max: *range.end(),
            orientation: Orientation::default(),
            on_change: None,
        }
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn on_change(mut self, f: impl Fn(f64) + 'static) -> Self {
        self.on_change = Some(Callback::new(f));
        self
    }

    /// Clamps a dragged value into the slider range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min.min(self.max), self.max.max(self.min))
    }
}

impl From<Slider> for View {
    fn from(slider: Slider) -> Self {
        View::Slider(slider)
    }
}

/// A node of the UI tree.
///
/// Render functions produce `Component` nodes for nested function
/// components; the host replaces each of them with a `Mounted` node holding
/// the component's rendered body.
#[derive(Debug)]
pub enum View {
    Stack { layout: Layout, children: Vec<View> },
    Label(Label),
    Button(Button),
    Slider(Slider),
    Figure(PlotDescription),
    Component(ComponentElement),
    Mounted {
        name: &'static str,
        owner: OwnerId,
        body: Box<View>,
    },
}

impl View {
    pub fn row(children: impl IntoIterator<Item = View>) -> Self {
        View::Stack {
            layout: Layout::Row,
            children: children.into_iter().collect(),
        }
    }

    pub fn column(children: impl IntoIterator<Item = View>) -> Self {
        View::Stack {
            layout: Layout::Column,
            children: children.into_iter().collect(),
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        View::Label(Label {
            text: text.into(),
            align: Align::Start,
        })
    }

    pub fn centered_label(text: impl Into<String>) -> Self {
        View::Label(Label {
            text: text.into(),
            align: Align::Center,
        })
    }

    pub fn button(label: impl Into<String>, on_click: impl Fn() + 'static) -> Self {
        View::Button(Button {
            label: label.into(),
            on_click: Callback::new(move |()| on_click()),
        })
    }

    pub fn figure(plot: impl Into<PlotDescription>) -> Self {
        View::Figure(plot.into())
    }

    /// Indented one-line-per-node description of the tree.
    pub fn outline(&self) -> String {
        self.to_string()
    }

    fn write_outline(&self, out: &mut impl Write, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            View::Stack { layout, children } => {
                writeln!(out, "{indent}{layout:?}")?;
                for child in children {
                    child.write_outline(out, depth + 1)?;
                }
                Ok(())
            }
            View::Label(label) => writeln!(out, "{indent}Label \"{}\"", label.text),
            View::Button(button) => writeln!(out, "{indent}Button [{}]", button.label),
            View::Slider(slider) => writeln!(
                out,
                "{indent}Slider {:.3} in [{}, {}] {:?}",
                slider.value, slider.min, slider.max, slider.orientation
            ),
            View::Figure(plot) => writeln!(out, "{indent}Figure ({})", plot.kind()),
            View::Component(element) => writeln!(out, "{indent}<{}> (unmounted)", element.name()),
            View::Mounted { name, body, .. } => {
                writeln!(out, "{indent}<{name}>")?;
                body.write_outline(out, depth + 1)
            }
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn callbacks_compare_by_identity() {
        let a = Callback::new(|_: i32| {});
        let b = Callback::new(|_: i32| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn button_invokes_handler() {
        let clicks = Rc::new(Cell::new(0));
        let view = View::button("+", {
            let clicks = clicks.clone();
            move || clicks.set(clicks.get() + 1)
        });

        let View::Button(button) = view else {
            panic!("expected a button");
        };
        button.on_click.call(());
        button.on_click.call(());
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn slider_clamps_into_range() {
        let slider = Slider::new(0.5, 0.0..=1.0);
        assert_eq!(slider.clamp(1.5), 1.0);
        assert_eq!(slider.clamp(-0.2), 0.0);
        assert_eq!(slider.clamp(0.25), 0.25);
    }

    #[test]
    fn outline_lists_nodes() {
        let view = View::column([
            View::centered_label("1st harmonic"),
            Slider::new(0.25, 0.0..=1.0).into(),
        ]);
        let outline = view.outline();
        assert!(outline.starts_with("Column\n"));
        assert!(outline.contains("  Label \"1st harmonic\""));
        assert!(outline.contains("  Slider 0.250 in [0, 1] Vertical"));
    }

    #[test]
    fn display_indents_nested_stacks() {
        let view = View::row([View::column([View::button("+", || {})])]);
        assert_eq!(format!("{view}"), "Row\n  Column\n    Button [+]\n");
    }
}

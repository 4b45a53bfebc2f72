//! Headless host that mounts function components and serialises renders.
//!
//! Component instances and figure slots are keyed by their path in the view
//! tree. A path is built from child indices (`0.2.1`) and, below a mounted
//! component, the component name (`0/HarmonicComposition.1`).

use std::collections::HashMap;
use std::fmt;

use crate::component::Component;
use crate::hooks::{Owner, RenderRequests};
use crate::plot::{FigureSlot, PaintOutcome, PlotWidget};
use crate::view::{Button, Orientation, Slider, View};
use crate::{HarmonicError, Result};

const ROOT_PATH: &str = "0";

/// Upper bound on render passes per flush; a render that keeps writing state
/// would otherwise never settle.
const MAX_PASSES_PER_FLUSH: usize = 32;

/// A button in the current tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonInfo {
    pub path: String,
    pub label: String,
}

/// A slider in the current tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderInfo {
    pub path: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub orientation: Orientation,
}

pub struct Host {
    requests: RenderRequests,
    root: Option<Box<dyn Component>>,
    instances: HashMap<String, Box<dyn Component>>,
    figures: HashMap<String, FigureSlot>,
    tree: Option<View>,
    passes: u64,
}

impl Host {
    pub fn new() -> Self {
        Self {
            requests: RenderRequests::new(),
            root: None,
            instances: HashMap::new(),
            figures: HashMap::new(),
            tree: None,
            passes: 0,
        }
    }

    /// Mounts `element` as the root and runs the first render pass.
    ///
    /// `element` must be a component element, as produced by
    /// [`FunctionComponent::element`](crate::component::FunctionComponent::element).
    pub fn mount(&mut self, element: View) -> Result<()> {
        let View::Component(element) = element else {
            return Err(HarmonicError::argument("the root view must be a component"));
        };

        self.instances.clear();
        self.figures.clear();
        self.tree = None;
        self.root = Some(element.mount(self.requests.clone()));
        self.render_pass()?;
        // State written while mounting is already reflected in the first pass.
        self.requests.drain();
        self.flush()
    }

    /// Renders again while any owner has asked for it.
    pub fn flush(&mut self) -> Result<()> {
        let mut passes = 0;
        while !self.requests.is_empty() {
            if passes == MAX_PASSES_PER_FLUSH {
                return Err(HarmonicError::msg(format!(
                    "state kept changing after {MAX_PASSES_PER_FLUSH} render passes"
                )));
            }
            let owners = self.requests.drain();
            tracing::trace!(owners = owners.len(), "flushing render requests");
            self.render_pass()?;
            passes += 1;
        }
        Ok(())
    }

    /// Clicks the button at `path`, then flushes the resulting renders.
    pub fn click(&mut self, path: &str) -> Result<()> {
        let button = self
            .find(path, |view| match view {
                View::Button(button) => Some(button.clone()),
                _ => None,
            })
            .ok_or_else(|| HarmonicError::argument(format!("no button at `{path}`")))?;

        tracing::debug!(path, label = %button.label, "button clicked");
        button.on_click.call(());
        self.flush()
    }

    /// Drags the slider at `path` to `value` (clamped into its range), then
    /// flushes the resulting renders.
    pub fn slide(&mut self, path: &str, value: f64) -> Result<()> {
        let slider = self
            .find(path, |view| match view {
                View::Slider(slider) => Some(slider.clone()),
                _ => None,
            })
            .ok_or_else(|| HarmonicError::argument(format!("no slider at `{path}`")))?;

        let value = slider.clamp(value);
        tracing::debug!(path, value, "slider moved");
        if let Some(on_change) = &slider.on_change {
            on_change.call(value);
        }
        self.flush()
    }

    pub fn tree(&self) -> Option<&View> {
        self.tree.as_ref()
    }

    pub fn root_owner(&self) -> Option<&Owner> {
        self.root.as_ref().map(|root| root.owner())
    }

    pub fn requests(&self) -> &RenderRequests {
        &self.requests
    }

    /// Number of render passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Number of mounted components below the root.
    pub fn mounted_children(&self) -> usize {
        self.instances.len()
    }

    pub fn buttons(&self) -> Vec<ButtonInfo> {
        let mut buttons = Vec::new();
        self.visit(|path, view| {
            if let View::Button(Button { label, .. }) = view {
                buttons.push(ButtonInfo {
                    path: path.to_string(),
                    label: label.clone(),
                });
            }
        });
        buttons
    }

    pub fn sliders(&self) -> Vec<SliderInfo> {
        let mut sliders = Vec::new();
        self.visit(|path, view| {
            if let View::Slider(Slider {
                value,
                min,
                max,
                orientation,
                ..
            }) = view
            {
                sliders.push(SliderInfo {
                    path: path.to_string(),
                    value: *value,
                    min: *min,
                    max: *max,
                    orientation: *orientation,
                });
            }
        });
        sliders
    }

    /// Paths of every figure, in tree order.
    pub fn figure_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.visit(|path, view| {
            if let View::Figure(_) = view {
                paths.push(path.to_string());
            }
        });
        paths
    }

    pub fn figure(&self, path: &str) -> Option<&PlotWidget> {
        self.figures.get(path).and_then(FigureSlot::widget)
    }

    /// Widgets of every figure, in tree order.
    pub fn figures(&self) -> Vec<&PlotWidget> {
        self.figure_paths()
            .iter()
            .filter_map(|path| self.figure(path))
            .collect()
    }

    fn render_pass(&mut self) -> Result<()> {
        let Some(mut root) = self.root.take() else {
            return Ok(());
        };

        let mut reconciler = Reconciler {
            previous: std::mem::take(&mut self.instances),
            next: HashMap::new(),
            requests: &self.requests,
        };
        let body = root.render().and_then(|body| {
            let path = format!("{ROOT_PATH}/{}", root.name());
            reconciler.resolve(body, &path)
        });
        let Reconciler { previous, next, .. } = reconciler;
        let name = root.name();
        let owner = root.owner().id();
        self.root = Some(root);

        let body = match body {
            Ok(body) => body,
            Err(err) => {
                // Keep every instance, including the one that failed, so the
                // next pass fails the same way instead of remounting it.
                let mut instances = previous;
                instances.extend(next);
                self.instances = instances;
                return Err(err);
            }
        };
        for (path, instance) in previous {
            tracing::debug!(%path, component = instance.name(), "unmounting component");
        }
        self.instances = next;
        let tree = View::Mounted {
            name,
            owner,
            body: Box::new(body),
        };
        self.passes += 1;
        tracing::debug!(pass = self.passes, "render pass complete");

        self.paint_figures(&tree)?;
        self.tree = Some(tree);
        Ok(())
    }

    fn paint_figures(&mut self, tree: &View) -> Result<()> {
        let mut previous = std::mem::take(&mut self.figures);
        let mut painted = HashMap::new();
        let mut result = Ok(());
        walk(tree, ROOT_PATH, &mut |path: &str, view: &View| {
            let View::Figure(plot) = view else {
                return;
            };
            if result.is_err() {
                return;
            }
            let mut slot = previous.remove(path).unwrap_or_default();
            match slot.paint(plot.clone()) {
                Ok(PaintOutcome::Skipped) => tracing::trace!(path, "figure unchanged"),
                Ok(PaintOutcome::Rendered(outcome)) => {
                    tracing::trace!(path, ?outcome, "figure rendered")
                }
                Err(err) => result = Err(err),
            }
            painted.insert(path.to_string(), slot);
        });
        self.figures = painted;
        result
    }

    fn visit(&self, mut f: impl FnMut(&str, &View)) {
        if let Some(tree) = &self.tree {
            walk(tree, ROOT_PATH, &mut f);
        }
    }

    fn find<T>(&self, path: &str, f: impl Fn(&View) -> Option<T>) -> Option<T> {
        let mut found = None;
        self.visit(|candidate, view| {
            if found.is_none() && candidate == path {
                found = f(view);
            }
        });
        found
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("root", &self.root.as_ref().map(|root| root.name()))
            .field("instances", &self.instances.len())
            .field("figures", &self.figures.len())
            .field("passes", &self.passes)
            .finish()
    }
}

struct Reconciler<'a> {
    previous: HashMap<String, Box<dyn Component>>,
    next: HashMap<String, Box<dyn Component>>,
    requests: &'a RenderRequests,
}

impl Reconciler<'_> {
    /// Mounts or updates every component below `view`, replacing each
    /// component element with its rendered body.
    fn resolve(&mut self, view: View, path: &str) -> Result<View> {
        match view {
            View::Stack { layout, children } => {
                let children = children
                    .into_iter()
                    .enumerate()
                    .map(|(index, child)| self.resolve(child, &format!("{path}.{index}")))
                    .collect::<Result<Vec<_>>>()?;
                Ok(View::Stack { layout, children })
            }
            View::Component(element) => {
                let mut instance = match self.previous.remove(path) {
                    Some(mut existing) if element.matches(existing.as_ref()) => {
                        if let Err(err) = existing.receive(element.into_props()) {
                            self.next.insert(path.to_string(), existing);
                            return Err(err);
                        }
                        existing
                    }
                    stale => {
                        if let Some(stale) = stale {
                            tracing::debug!(path, component = stale.name(), "unmounting component");
                        }
                        element.mount(self.requests.clone())
                    }
                };

                let rendered = instance.render();
                let name = instance.name();
                let owner = instance.owner().id();
                self.next.insert(path.to_string(), instance);
                let body = self.resolve(rendered?, &format!("{path}/{name}"))?;
                Ok(View::Mounted {
                    name,
                    owner,
                    body: Box::new(body),
                })
            }
            other => Ok(other),
        }
    }
}

/// Visits every node of `view` with the path the host assigns to it.
fn walk(view: &View, path: &str, f: &mut dyn FnMut(&str, &View)) {
    f(path, view);
    match view {
        View::Stack { children, .. } => {
            for (index, child) in children.iter().enumerate() {
                walk(child, &format!("{path}.{index}"), f);
            }
        }
        View::Mounted { name, body, .. } => walk(body, &format!("{path}/{name}"), f),
        _ => {}
    }
}

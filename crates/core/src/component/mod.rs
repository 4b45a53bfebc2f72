//! Function components: plain render functions turned into stateful
//! component instances.

mod props;

use std::any::{Any, TypeId};
use std::fmt;

pub use props::Props;

use crate::hooks::{Hooks, Owner, RenderRequests};
use crate::view::View;
use crate::{HarmonicError, Result};

/// Signature of a function component's render function.
pub type RenderFn<P> = fn(&mut Hooks<'_>, &P) -> Result<View>;

/// Contract the host relies on to render mounted components.
pub trait Component {
    fn name(&self) -> &'static str;

    /// Type of the props this component accepts.
    fn props_type(&self) -> TypeId;

    fn owner(&self) -> &Owner;

    fn render(&mut self) -> Result<View>;

    /// Replaces the stored props, reporting whether they changed.
    fn receive(&mut self, props: Box<dyn Any>) -> Result<bool>;
}

/// Definition of a function component: a name plus a render function.
pub struct FunctionComponent<P> {
    name: &'static str,
    render: RenderFn<P>,
}

impl<P> FunctionComponent<P> {
    pub const fn new(name: &'static str, render: RenderFn<P>) -> Self {
        Self { name, render }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<P: PartialEq + 'static> FunctionComponent<P> {
    /// Creates a live instance with its own state owner.
    pub fn instantiate(&self, props: P, requests: RenderRequests) -> Instance<P> {
        Instance {
            def: *self,
            props,
            owner: Owner::new(requests),
            first_render: true,
        }
    }

    /// Describes this component in a view tree; the host mounts it.
    pub fn element(&self, props: P) -> View {
        View::Component(ComponentElement::new(*self, props))
    }
}

impl<P> Clone for FunctionComponent<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for FunctionComponent<P> {}

impl<P> fmt::Debug for FunctionComponent<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionComponent")
            .field("name", &self.name)
            .finish()
    }
}

/// A mounted function component.
pub struct Instance<P> {
    def: FunctionComponent<P>,
    props: P,
    owner: Owner,
    first_render: bool,
}

impl<P: PartialEq + 'static> Instance<P> {
    pub fn set_props(&mut self, props: P) -> bool {
        let changed = self.props != props;
        self.props = props;
        changed
    }
}

impl<P: PartialEq + 'static> Component for Instance<P> {
    fn name(&self) -> &'static str {
        self.def.name
    }

    fn props_type(&self) -> TypeId {
        TypeId::of::<P>()
    }

    fn owner(&self) -> &Owner {
        &self.owner
    }

    fn render(&mut self) -> Result<View> {
        let mut hooks = Hooks::new(&self.owner, self.first_render);
        let view = (self.def.render)(&mut hooks, &self.props)?;
        self.first_render = false;
        Ok(view)
    }

    fn receive(&mut self, props: Box<dyn Any>) -> Result<bool> {
        let props = props.downcast::<P>().map_err(|_| {
            HarmonicError::msg(format!(
                "component `{}` received props of another type",
                self.def.name
            ))
        })?;
        Ok(self.set_props(*props))
    }
}

impl<P> fmt::Debug for Instance<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("name", &self.def.name)
            .field("owner", &self.owner.id())
            .field("first_render", &self.first_render)
            .finish()
    }
}

trait PendingComponent {
    fn mount(self: Box<Self>, requests: RenderRequests) -> Box<dyn Component>;
    fn into_props(self: Box<Self>) -> Box<dyn Any>;
}

struct Pending<P> {
    def: FunctionComponent<P>,
    props: P,
}

impl<P: PartialEq + 'static> PendingComponent for Pending<P> {
    fn mount(self: Box<Self>, requests: RenderRequests) -> Box<dyn Component> {
        Box::new(self.def.instantiate(self.props, requests))
    }

    fn into_props(self: Box<Self>) -> Box<dyn Any> {
        Box::new(self.props)
    }
}

/// A component that appears in a view tree but has not been mounted yet.
pub struct ComponentElement {
    name: &'static str,
    props_type: TypeId,
    pending: Box<dyn PendingComponent>,
}

impl ComponentElement {
    pub fn new<P: PartialEq + 'static>(def: FunctionComponent<P>, props: P) -> Self {
        Self {
            name: def.name,
            props_type: TypeId::of::<P>(),
            pending: Box::new(Pending { def, props }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn props_type(&self) -> TypeId {
        self.props_type
    }

    /// Whether an already mounted component can take this element's props.
    pub fn matches(&self, component: &dyn Component) -> bool {
        self.name == component.name() && self.props_type == component.props_type()
    }

    pub fn mount(self, requests: RenderRequests) -> Box<dyn Component> {
        tracing::debug!(component = self.name, "mounting component");
        self.pending.mount(requests)
    }

    pub fn into_props(self) -> Box<dyn Any> {
        self.pending.into_props()
    }
}

impl fmt::Debug for ComponentElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentElement")
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn counter(hooks: &mut Hooks<'_>, props: &Props) -> Result<View> {
        let first = hooks.first_call();
        let start = props.arg(0).and_then(|v| v.as_i64()).unwrap_or(0);
        let count = hooks.use_state(start)?;
        let step = props.kwarg("step").and_then(|v| v.as_i64()).unwrap_or(1);
        let label = format!("{} first={first}", count.value());
        Ok(View::column([
            View::label(label),
            View::button("+", move || {
                count.map(|c| c + step);
            }),
        ]))
    }

    const COUNTER: FunctionComponent<Props> = FunctionComponent::new("Counter", counter);

    fn label_of(view: &View) -> String {
        match view {
            View::Stack { children, .. } => match &children[0] {
                View::Label(label) => label.text.clone(),
                other => panic!("unexpected node {other:?}"),
            },
            other => panic!("unexpected node {other:?}"),
        }
    }

    fn click(view: &View) {
        let View::Stack { children, .. } = view else {
            panic!("expected a stack");
        };
        let View::Button(button) = &children[1] else {
            panic!("expected a button");
        };
        button.on_click.call(());
    }

    #[test]
    fn first_call_flag_only_set_on_first_render() {
        let requests = RenderRequests::new();
        let mut instance = COUNTER.instantiate(Props::new(), requests);

        assert_eq!(label_of(&instance.render().unwrap()), "0 first=true");
        assert_eq!(label_of(&instance.render().unwrap()), "0 first=false");
    }

    #[test]
    fn events_update_state_and_request_render() {
        let requests = RenderRequests::new();
        let props = Props::new().with_kwarg("step", json!(5));
        let mut instance = COUNTER.instantiate(props, requests.clone());

        let view = instance.render().unwrap();
        click(&view);
        assert!(requests.is_scheduled(instance.owner().id()));
        assert_eq!(label_of(&instance.render().unwrap()), "5 first=false");
    }

    #[test]
    fn positional_argument_seeds_state_once() {
        let mut instance = COUNTER.instantiate(Props::new().with_arg(7), RenderRequests::new());
        assert_eq!(label_of(&instance.render().unwrap()), "7 first=true");

        instance.set_props(Props::new().with_arg(9));
        assert_eq!(label_of(&instance.render().unwrap()), "7 first=false");
    }

    #[test]
    fn receive_reports_prop_changes() {
        let props = Props::new().with_kwarg("step", json!(1));
        let mut instance = COUNTER.instantiate(props, RenderRequests::new());

        let same = Props::new().with_kwarg("step", json!(1));
        assert!(!instance.receive(Box::new(same)).unwrap());
        let other = Props::new().with_kwarg("step", json!(2));
        assert!(instance.receive(Box::new(other)).unwrap());
        assert!(instance.receive(Box::new(3_u8)).is_err());
    }

    #[test]
    fn element_mounts_matching_component() {
        let View::Component(element) = COUNTER.element(Props::new()) else {
            panic!("expected a component element");
        };
        let mounted = COUNTER.instantiate(Props::new(), RenderRequests::new());
        assert!(element.matches(&mounted));
        assert_eq!(element.name(), "Counter");

        let mut component = element.mount(RenderRequests::new());
        assert_eq!(component.name(), "Counter");
        assert!(component.render().is_ok());
    }
}

use std::fmt;

use super::{Owner, StateCell};
use crate::{HarmonicError, Result};

/// Declaration of a state hook: how to initialise it and what to call it.
///
/// Exactly one of [`StateDecl::default`] or [`StateDecl::getter`] must be
/// supplied.
pub struct StateDecl<T> {
    default: Option<T>,
    getter: Option<Box<dyn FnOnce() -> T>>,
    name: Option<String>,
}

impl<T> StateDecl<T> {
    pub fn new() -> Self {
        Self {
            default: None,
            getter: None,
            name: None,
        }
    }

    pub fn default(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    /// The getter only runs when the cell is created.
    pub fn getter(mut self, get: impl FnOnce() -> T + 'static) -> Self {
        self.getter = Some(Box::new(get));
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn initial_value(self) -> Result<T> {
        match (self.default, self.getter) {
            (Some(value), None) => Ok(value),
            (None, Some(get)) => Ok(get()),
            _ => Err(HarmonicError::argument(
                "either a single default value or a getter function must be provided",
            )),
        }
    }
}

impl<T> Default for StateDecl<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-render hook bookkeeping handed to a function component.
///
/// Unnamed cells are identified by call order, so a component must declare
/// the same cells in the same order on every render.
pub struct Hooks<'a> {
    owner: &'a Owner,
    first_call: bool,
    use_state_count: usize,
}

impl<'a> Hooks<'a> {
    pub fn new(owner: &'a Owner, first_call: bool) -> Self {
        Self {
            owner,
            first_call,
            use_state_count: 0,
        }
    }

    pub fn first_call(&self) -> bool {
        self.first_call
    }

    pub fn use_state<T: Clone + 'static>(&mut self, default: T) -> Result<StateCell<T>> {
        self.use_state_decl(StateDecl::new().default(default))
    }

    pub fn use_state_with<T: Clone + 'static>(
        &mut self,
        get: impl FnOnce() -> T + 'static,
    ) -> Result<StateCell<T>> {
        self.use_state_decl(StateDecl::new().getter(get))
    }

    pub fn use_named_state<T: Clone + 'static>(
        &mut self,
        name: impl Into<String>,
        default: T,
    ) -> Result<StateCell<T>> {
        self.use_state_decl(StateDecl::new().default(default).name(name))
    }

    pub fn use_state_decl<T: Clone + 'static>(
        &mut self,
        decl: StateDecl<T>,
    ) -> Result<StateCell<T>> {
        let name = decl
            .name
            .clone()
            .unwrap_or_else(|| format!("state_{}", self.use_state_count));

        let slot = match self.owner.slot::<T>(&name) {
            Some(Some(slot)) => {
                // Validate the declaration even when the value is not needed.
                if decl.default.is_some() == decl.getter.is_some() {
                    return Err(HarmonicError::argument(
                        "either a single default value or a getter function must be provided",
                    ));
                }
                slot
            }
            Some(None) => return Err(HarmonicError::StateType { name }),
            None => {
                if !self.first_call {
                    return Err(HarmonicError::UninitializedState { name });
                }
                let value = decl.initial_value()?;
                tracing::trace!(owner = %self.owner.id(), %name, "state initialised");
                self.owner.insert_slot(&name, value)
            }
        };

        self.use_state_count += 1;
        Ok(StateCell::new(
            &name,
            self.owner.id(),
            slot,
            self.owner.requests().clone(),
        ))
    }
}

impl fmt::Debug for Hooks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("owner", &self.owner.id())
            .field("first_call", &self.first_call)
            .field("use_state_count", &self.use_state_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::RenderRequests;

    fn owner() -> Owner {
        Owner::new(RenderRequests::new())
    }

    #[test]
    fn second_render_reads_values_written_during_first() {
        let owner = owner();

        let mut first = Hooks::new(&owner, true);
        let count = first.use_state(0_i32).unwrap();
        let label = first.use_named_state("label", String::from("a")).unwrap();
        let items = first.use_state_with(|| vec![1_u8]).unwrap();
        count.set(3);
        label.set("b".to_string());
        items.map(|mut v| {
            v.push(2);
            v
        });

        let mut second = Hooks::new(&owner, false);
        assert_eq!(second.use_state(0_i32).unwrap().value(), 3);
        assert_eq!(
            second.use_named_state("label", String::new()).unwrap().value(),
            "b"
        );
        assert_eq!(second.use_state_with(Vec::<u8>::new).unwrap().value(), vec![1, 2]);
    }

    #[test]
    fn unnamed_cells_are_numbered_by_call_order() {
        let owner = owner();
        let mut hooks = Hooks::new(&owner, true);
        let a = hooks.use_state(1.0_f64).unwrap();
        let named = hooks.use_named_state("x", 0_u8).unwrap();
        let b = hooks.use_state(2.0_f64).unwrap();

        assert_eq!(a.name(), "state_0");
        assert_eq!(named.name(), "x");
        assert_eq!(b.name(), "state_2");
    }

    #[test]
    fn both_default_and_getter_is_an_argument_error() {
        let owner = owner();
        let mut hooks = Hooks::new(&owner, true);
        let err = hooks
            .use_state_decl(StateDecl::new().default(1).getter(|| 2))
            .unwrap_err();
        assert!(matches!(err, HarmonicError::Argument(_)));
    }

    #[test]
    fn neither_default_nor_getter_is_an_argument_error() {
        let owner = owner();
        let mut hooks = Hooks::new(&owner, true);
        let err = hooks.use_state_decl(StateDecl::<i32>::new()).unwrap_err();
        assert!(matches!(err, HarmonicError::Argument(_)));
    }

    #[test]
    fn later_render_rejects_undeclared_state() {
        let owner = owner();
        Hooks::new(&owner, true).use_state(1_i32).unwrap();

        let mut hooks = Hooks::new(&owner, false);
        hooks.use_state(1_i32).unwrap();
        let err = hooks.use_state(2_i32).unwrap_err();
        match err {
            HarmonicError::UninitializedState { name } => assert_eq!(name, "state_1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn redeclaring_with_another_type_fails() {
        let owner = owner();
        Hooks::new(&owner, true).use_state(1_i32).unwrap();

        let err = Hooks::new(&owner, false).use_state("x").unwrap_err();
        assert!(matches!(err, HarmonicError::StateType { .. }));
    }

    #[test]
    fn getter_only_runs_on_creation() {
        let owner = owner();
        Hooks::new(&owner, true).use_state_with(|| 10_i32).unwrap();

        let cell = Hooks::new(&owner, false)
            .use_state_with(|| -> i32 { panic!("getter must not run again") })
            .unwrap();
        assert_eq!(cell.value(), 10);
    }
}

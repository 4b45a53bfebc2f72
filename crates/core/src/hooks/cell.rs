use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::{OwnerId, RenderRequests};

/// Handle to a single named piece of component state.
///
/// Cloning the handle is cheap; every clone reads and writes the same slot.
/// Writes go through [`StateCell::set`] or [`StateCell::map`], both of which
/// schedule a render of the owning component.
pub struct StateCell<T> {
    name: Rc<str>,
    owner: OwnerId,
    slot: Rc<RefCell<T>>,
    requests: RenderRequests,
}

impl<T: Clone + 'static> StateCell<T> {
    pub(crate) fn new(
        name: &str,
        owner: OwnerId,
        slot: Rc<RefCell<T>>,
        requests: RenderRequests,
    ) -> Self {
        Self {
            name: Rc::from(name),
            owner,
            slot,
            requests,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns a copy of the current value.
    pub fn value(&self) -> T {
        self.slot.borrow().clone()
    }

    /// Overwrites the value, schedules a render of the owner and returns the
    /// value that was written.
    pub fn set(&self, value: T) -> T {
        *self.slot.borrow_mut() = value.clone();
        self.requests.schedule(self.owner);
        value
    }

    /// Reads the value, applies `f` and writes the result back.
    ///
    /// Not atomic: the read and the write are two separate steps.
    pub fn map(&self, f: impl FnOnce(T) -> T) -> T {
        let value = f(self.value());
        self.set(value)
    }

    /// Splits the cell into its current value, a setter and a mapper.
    pub fn as_tuple(&self) -> (T, impl Fn(T) -> T, impl Fn(&dyn Fn(T) -> T) -> T) {
        let setter = self.clone();
        let mapper = self.clone();
        (
            self.value(),
            move |value| setter.set(value),
            move |f: &dyn Fn(T) -> T| mapper.map(f),
        )
    }
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            owner: self.owner,
            slot: self.slot.clone(),
            requests: self.requests.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("value", &*self.slot.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::Owner;
    use super::*;

    fn cell(owner: &Owner, value: i32) -> StateCell<i32> {
        let slot = owner.insert_slot("state_0", value);
        StateCell::new("state_0", owner.id(), slot, owner.requests().clone())
    }

    #[test]
    fn set_returns_value_and_schedules_render() {
        let owner = Owner::new(RenderRequests::new());
        let cell = cell(&owner, 1);

        assert_eq!(cell.set(5), 5);
        assert_eq!(cell.value(), 5);
        assert!(owner.is_render_scheduled());
    }

    #[test]
    fn map_applies_function_to_current_value() {
        let owner = Owner::new(RenderRequests::new());
        let cell = cell(&owner, 4);

        assert_eq!(cell.map(|x| x * 3), 12);
        assert_eq!(cell.value(), 12);
    }

    #[test]
    fn clones_share_the_same_slot() {
        let owner = Owner::new(RenderRequests::new());
        let a = cell(&owner, 0);
        let b = a.clone();
        b.set(9);
        assert_eq!(a.value(), 9);
    }

    #[test]
    fn tuple_accessors_write_through() {
        let owner = Owner::new(RenderRequests::new());
        let cell = cell(&owner, 2);
        let (value, set, map) = cell.as_tuple();

        assert_eq!(value, 2);
        assert_eq!(set(7), 7);
        assert_eq!(map(&|x: i32| x + 1), 8);
        assert_eq!(cell.value(), 8);
    }
}

use std::any::Any;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a component instance that owns state cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(u64);

static NEXT_OWNER_ID: AtomicU64 = AtomicU64::new(1);

impl OwnerId {
    fn next() -> Self {
        Self(NEXT_OWNER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owner#{}", self.0)
    }
}

/// Shared queue of owners that asked to be rendered again.
///
/// Every owner created by a host shares the same queue; the host drains it
/// after each event so renders stay serialised.
#[derive(Clone, Default)]
pub struct RenderRequests {
    pending: Rc<RefCell<BTreeSet<OwnerId>>>,
}

impl RenderRequests {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&self, owner: OwnerId) {
        tracing::trace!(%owner, "render scheduled");
        self.pending.borrow_mut().insert(owner);
    }

    pub fn is_scheduled(&self, owner: OwnerId) -> bool {
        self.pending.borrow().contains(&owner)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Removes and returns every pending owner.
    pub fn drain(&self) -> Vec<OwnerId> {
        std::mem::take(&mut *self.pending.borrow_mut())
            .into_iter()
            .collect()
    }
}

impl fmt::Debug for RenderRequests {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderRequests")
            .field("pending", &self.pending.borrow().len())
            .finish()
    }
}

/// Per-component storage: maps a cell name to its type-erased slot.
///
/// Slots are stored as `Rc<RefCell<T>>` boxed behind `dyn Any`, so a cell
/// handed out once keeps pointing at the same value for the owner's lifetime.
pub struct Owner {
    id: OwnerId,
    slots: RefCell<HashMap<String, Box<dyn Any>>>,
    requests: RenderRequests,
}

impl Owner {
    pub fn new(requests: RenderRequests) -> Self {
        Self {
            id: OwnerId::next(),
            slots: RefCell::new(HashMap::new()),
            requests,
        }
    }

    pub fn id(&self) -> OwnerId {
        self.id
    }

    pub fn requests(&self) -> &RenderRequests {
        &self.requests
    }

    /// Asks the host to render this owner again.
    pub fn schedule_render(&self) {
        self.requests.schedule(self.id);
    }

    pub fn is_render_scheduled(&self) -> bool {
        self.requests.is_scheduled(self.id)
    }

    /// Copy of the value held by the cell `name`, if it exists with type `T`.
    pub fn peek<T: Clone + 'static>(&self, name: &str) -> Option<T> {
        self.slot::<T>(name)
            .flatten()
            .map(|slot| slot.borrow().clone())
    }

    /// Returns the slot stored under `name`.
    ///
    /// `None` means no slot exists; `Some(None)` means a slot exists but holds
    /// another type.
    pub(crate) fn slot<T: 'static>(&self, name: &str) -> Option<Option<Rc<RefCell<T>>>> {
        self.slots
            .borrow()
            .get(name)
            .map(|slot| slot.downcast_ref::<Rc<RefCell<T>>>().cloned())
    }

    pub(crate) fn insert_slot<T: 'static>(&self, name: &str, value: T) -> Rc<RefCell<T>> {
        let slot = Rc::new(RefCell::new(value));
        self.slots
            .borrow_mut()
            .insert(name.to_string(), Box::new(slot.clone()));
        slot
    }
}

impl fmt::Debug for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Owner")
            .field("id", &self.id)
            .field("slots", &self.slots.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owners_get_distinct_ids() {
        let requests = RenderRequests::new();
        let a = Owner::new(requests.clone());
        let b = Owner::new(requests);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn schedules_and_drains_requests() {
        let requests = RenderRequests::new();
        let owner = Owner::new(requests.clone());
        assert!(!owner.is_render_scheduled());

        owner.schedule_render();
        owner.schedule_render();
        assert!(owner.is_render_scheduled());
        assert_eq!(requests.drain(), vec![owner.id()]);
        assert!(requests.is_empty());
    }

    #[test]
    fn slot_lookup_distinguishes_missing_and_mistyped() {
        let owner = Owner::new(RenderRequests::new());
        owner.insert_slot("count", 3_u32);

        assert!(owner.slot::<u32>("missing").is_none());
        assert!(matches!(owner.slot::<String>("count"), Some(None)));
        let slot = owner.slot::<u32>("count").unwrap().unwrap();
        assert_eq!(*slot.borrow(), 3);
    }

    #[test]
    fn peek_reads_without_a_hook_call() {
        let owner = Owner::new(RenderRequests::new());
        owner.insert_slot("label", String::from("1st"));

        assert_eq!(owner.peek::<String>("label").as_deref(), Some("1st"));
        assert_eq!(owner.peek::<u8>("label"), None);
        assert_eq!(owner.peek::<String>("other"), None);
    }
}

use crate::domain::logging::{LogComponent, get_logger};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`ChangeFeed::subscribe`]; pass it back to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerHandle(u64);

/// Explicit publish/subscribe list for "the product collection changed"
/// notifications. Listeners are registered with handles instead of living in
/// ambient global state, so every observing view detaches on teardown.
/// Single-threaded by design: the wasm event loop never runs listeners
/// concurrently.
pub struct ChangeFeed {
    listeners: RefCell<Vec<(ListenerHandle, Rc<dyn Fn()>)>>,
    next_id: Cell<u64>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn() + 'static,
    {
        let handle = ListenerHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);
        self.listeners
            .borrow_mut()
            .push((handle, Rc::new(listener)));
        handle
    }

    /// Returns whether the handle was still registered
    pub fn unsubscribe(&self, handle: ListenerHandle) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != handle);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Fan the notification out to every registered listener. The list is
    /// snapshotted first so a listener may subscribe or unsubscribe while the
    /// notification is being delivered.
    pub fn notify(&self) {
        let snapshot: Vec<Rc<dyn Fn()>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        get_logger().debug(
            LogComponent::Application("ChangeFeed"),
            &format!("Notifying {} listener(s) of a data change", snapshot.len()),
        );
        for listener in snapshot {
            listener();
        }
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

use std::{
    cell::RefCell,
    collections::BTreeMap,
    fmt,
    panic::{AssertUnwindSafe, catch_unwind},
    rc::Rc,
};

use crate::monitoring::{Monitor, MonitorHandle, MonitorId};

struct MonitorEntry {
    monitor: Rc<dyn Monitor>,
    paused: bool,
}

#[derive(Default)]
pub(crate) struct RegistryState {
    monitors: BTreeMap<MonitorId, MonitorEntry>,
    last_id: MonitorId,
}

impl RegistryState {
    pub(crate) fn remove(&mut self, id: MonitorId) {
        self.monitors.remove(&id);
    }

    pub(crate) fn set_paused(&mut self, id: MonitorId, paused: bool) {
        if let Some(entry) = self.monitors.get_mut(&id) {
            entry.paused = paused;
        }
    }

    fn is_active(&self, id: MonitorId) -> bool {
        self.monitors.get(&id).is_some_and(|entry| !entry.paused)
    }

    fn set_paused_to_all(&mut self, paused: bool) {
        for entry in self.monitors.values_mut() {
            entry.paused = paused;
        }
    }
}

/// Registry for managing monitors attached to a scheduler.
///
/// Access via [`TestScheduler::monitors()`](crate::TestScheduler::monitors).
/// Monitors are notified in registration order. A monitor that panics is
/// removed and the run continues.
///
/// The registry is not borrowed while a callback runs, so a monitor may
/// pause, resume or remove itself (or others) and add new monitors from
/// inside a callback. Monitors added during a notification first hear the
/// next one.
///
/// # Example
///
/// ```rust
/// use marbletest::{TestScheduler, monitors::Tracer};
///
/// let scheduler = TestScheduler::default();
/// let registry = scheduler.monitors();
///
/// let handle = registry.add(Tracer);
/// registry.pause();
/// registry.resume();
/// handle.remove();
/// ```
#[derive(Clone, Default)]
pub struct MonitorRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl fmt::Debug for MonitorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MonitorRegistry")
            .field("monitors.len()", &state.monitors.len())
            .field("last_id", &state.last_id)
            .finish()
    }
}

impl MonitorRegistry {
    /// Register a new monitor and return a handle for controlling it.
    ///
    /// The monitor starts in the active (non-paused) state.
    pub fn add<M: Monitor + 'static>(&self, monitor: M) -> MonitorHandle {
        let mut state = self.state.borrow_mut();
        let id = state.last_id;
        state.monitors.insert(
            id,
            MonitorEntry {
                monitor: Rc::new(monitor),
                paused: false,
            },
        );
        state.last_id = state.last_id.wrapping_add(1);
        MonitorHandle::new(id, Rc::downgrade(&self.state))
    }

    /// Remove a monitor by its ID.
    ///
    /// Prefer using [`MonitorHandle::remove()`] instead.
    pub fn remove(&self, id: MonitorId) {
        self.state.borrow_mut().remove(id);
    }

    /// Pause all registered monitors.
    pub fn pause(&self) {
        self.state.borrow_mut().set_paused_to_all(true);
    }

    /// Resume all registered monitors.
    pub fn resume(&self) {
        self.state.borrow_mut().set_paused_to_all(false);
    }

    /// Returns the number of registered monitors, paused or not.
    pub fn len(&self) -> usize {
        self.state.borrow().monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn notify(&self, f: impl Fn(&dyn Monitor)) {
        let snapshot: Vec<(MonitorId, Rc<dyn Monitor>)> = self
            .state
            .borrow()
            .monitors
            .iter()
            .filter(|(_, entry)| !entry.paused)
            .map(|(id, entry)| (*id, Rc::clone(&entry.monitor)))
            .collect();

        let mut panicked = Vec::new();
        for (id, monitor) in snapshot {
            // An earlier callback may have paused or removed this one.
            if !self.state.borrow().is_active(id) {
                continue;
            }
            let result = catch_unwind(AssertUnwindSafe(|| f(monitor.as_ref())));
            if result.is_err() {
                tracing::error!(monitor_id = %id, "Monitor panicked, removing");
                panicked.push(id);
            }
        }

        if !panicked.is_empty() {
            let mut state = self.state.borrow_mut();
            for id in panicked {
                state.remove(id);
            }
        }
    }
}

use std::{cell::RefCell, fmt, rc::Weak};

use crate::monitoring::{MonitorId, registry::RegistryState};

/// Handle for controlling a single registered monitor.
///
/// Returned by [`MonitorRegistry::add`](crate::monitoring::MonitorRegistry::add).
/// Operations are no-ops once the owning scheduler is dropped.
pub struct MonitorHandle {
    id: MonitorId,
    registry: Weak<RefCell<RegistryState>>,
}

impl fmt::Debug for MonitorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl MonitorHandle {
    pub(crate) fn new(id: MonitorId, registry: Weak<RefCell<RegistryState>>) -> Self {
        Self { id, registry }
    }

    /// Returns the monitor's ID.
    pub fn id(&self) -> MonitorId {
        self.id
    }

    /// Stop delivering callbacks to this monitor until [`resume`](Self::resume).
    pub fn pause(&self) {
        if let Some(state) = self.registry.upgrade() {
            state.borrow_mut().set_paused(self.id, true);
        }
    }

    pub fn resume(&self) {
        if let Some(state) = self.registry.upgrade() {
            state.borrow_mut().set_paused(self.id, false);
        }
    }

    /// Unregister the monitor.
    pub fn remove(self) {
        if let Some(state) = self.registry.upgrade() {
            state.borrow_mut().remove(self.id);
        }
    }
}

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use crate::{
    Observer, Recorded, Signal, Subscription, Timeline, VirtualTime, monitoring::MonitorRegistry,
};

/// An observer that logs every signal it receives with the virtual time of
/// arrival.
///
/// Created by [`TestScheduler::record`](crate::TestScheduler::record) (already
/// subscribed to a source) or [`TestScheduler::observer`](crate::TestScheduler::observer)
/// (a bare sink). Clones share the same log.
///
/// The log keeps the stream contract: once an `Error` or `Completed` is
/// recorded, later signals are dropped with a warning, so
/// [`events`](Self::events) always yields a valid [`Timeline`].
pub struct Recorder<T, E> {
    inner: Rc<RecorderInner<T, E>>,
}

struct RecorderInner<T, E> {
    events: RefCell<Vec<Recorded<T, E>>>,
    terminated: Cell<bool>,
    clock: Rc<Cell<VirtualTime>>,
    monitors: MonitorRegistry,
    subscription: RefCell<Option<Subscription>>,
}

impl<T, E> Clone for Recorder<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, E> fmt::Debug for Recorder<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("events", &self.inner.events.borrow().len())
            .field("terminated", &self.inner.terminated.get())
            .finish_non_exhaustive()
    }
}

impl<T, E> Recorder<T, E> {
    pub(crate) fn new(clock: Rc<Cell<VirtualTime>>, monitors: MonitorRegistry) -> Self {
        Self {
            inner: Rc::new(RecorderInner {
                events: RefCell::new(Vec::new()),
                terminated: Cell::new(false),
                clock,
                monitors,
                subscription: RefCell::new(None),
            }),
        }
    }

    pub(crate) fn as_observer(&self) -> Rc<dyn Observer<T, E>>
    where
        T: 'static,
        E: 'static,
    {
        self.inner.clone()
    }

    pub(crate) fn set_subscription(&self, subscription: Subscription) {
        *self.inner.subscription.borrow_mut() = Some(subscription);
    }

    /// Returns a frozen snapshot of everything recorded so far.
    pub fn events(&self) -> Timeline<T, E>
    where
        T: Clone,
        E: Clone,
    {
        Timeline::from_validated(self.inner.events.borrow().clone())
    }

    /// Returns the number of recorded signals.
    pub fn len(&self) -> usize {
        self.inner.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true once a terminal signal has been recorded.
    pub fn is_terminated(&self) -> bool {
        self.inner.terminated.get()
    }

    /// Stop recording: disposes the source subscription, if any.
    pub fn dispose(&self) {
        if let Some(subscription) = self.inner.subscription.borrow().as_ref() {
            subscription.dispose();
        }
    }
}

impl<T, E> Observer<T, E> for RecorderInner<T, E> {
    fn on_signal(&self, signal: Signal<T, E>) {
        let at = self.clock.get();
        let kind = signal.kind();
        if self.terminated.get() {
            tracing::warn!(at, kind = %kind, "signal after terminal dropped by recorder");
            return;
        }
        if signal.is_terminal() {
            self.terminated.set(true);
        }
        self.events.borrow_mut().push(Recorded::new(at, signal));
        self.monitors.notify(|m| m.on_signal_recorded(at, kind));
    }
}

impl<T, E> Observer<T, E> for Recorder<T, E> {
    fn on_signal(&self, signal: Signal<T, E>) {
        self.inner.on_signal(signal);
    }
}

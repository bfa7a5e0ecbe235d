use std::{cell::Cell, fmt, rc::Rc};

use crate::Signal;

/// Receives the signals of a stream.
///
/// Implement [`on_signal`](Self::on_signal); the `on_next`, `on_error` and
/// `on_completed` helpers forward to it. Observers take `&self` because they
/// are shared behind `Rc` with the stream that drives them: use interior
/// mutability for state.
pub trait Observer<T, E> {
    fn on_signal(&self, signal: Signal<T, E>);

    fn on_next(&self, value: T) {
        self.on_signal(Signal::Next(value));
    }

    fn on_error(&self, err: E) {
        self.on_signal(Signal::Error(err));
    }

    fn on_completed(&self) {
        self.on_signal(Signal::Completed);
    }
}

/// A stream that observers can subscribe to.
pub trait Observable<T, E> {
    /// Attach `observer`; it receives signals until the returned
    /// [`Subscription`] is disposed or the stream terminates.
    fn subscribe(&self, observer: Rc<dyn Observer<T, E>>) -> Subscription;
}

/// Handle returned by [`Observable::subscribe`].
///
/// Dropping the handle does not unsubscribe; call [`dispose`](Self::dispose).
#[derive(Clone, Default)]
pub struct Subscription {
    disposed: Rc<Cell<bool>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.disposed.get())
            .finish()
    }
}

impl Subscription {
    pub fn new() -> Self {
        Self::default()
    }

    /// A subscription that is already disposed (e.g. for a stream that
    /// terminated before the observer arrived).
    pub fn disposed() -> Self {
        let subscription = Self::new();
        subscription.dispose();
        subscription
    }

    /// Stop delivering signals to the observer.
    pub fn dispose(&self) {
        self.disposed.set(true);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

/// Adapts a closure into an [`Observer`].
pub struct FnObserver<F>(F);

impl<F> FnObserver<F> {
    pub fn new<T, E>(f: F) -> Rc<Self>
    where
        F: Fn(Signal<T, E>),
    {
        Rc::new(Self(f))
    }
}

impl<T, E, F> Observer<T, E> for FnObserver<F>
where
    F: Fn(Signal<T, E>),
{
    fn on_signal(&self, signal: Signal<T, E>) {
        (self.0)(signal)
    }
}

impl<F> fmt::Debug for FnObserver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnObserver").finish_non_exhaustive()
    }
}

/// Subscriber list shared by the subjects.
pub(crate) struct Observers<T, E> {
    entries: Vec<(Subscription, Rc<dyn Observer<T, E>>)>,
}

impl<T, E> Default for Observers<T, E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T, E> Observers<T, E> {
    pub(crate) fn add(&mut self, observer: Rc<dyn Observer<T, E>>) -> Subscription {
        let subscription = Subscription::new();
        self.entries.push((subscription.clone(), observer));
        subscription
    }

    /// Live observers, pruning disposed ones.
    ///
    /// Returned as an owned list so callers can release their borrow of the
    /// subject before delivering (observers may re-enter the subject).
    pub(crate) fn snapshot(&mut self) -> Vec<(Subscription, Rc<dyn Observer<T, E>>)> {
        self.entries.retain(|(subscription, _)| !subscription.is_disposed());
        self.entries.clone()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|(subscription, _)| !subscription.is_disposed())
            .count()
    }
}

/// Deliver `signal` to every observer whose subscription is still live at
/// delivery time.
pub(crate) fn deliver<T: Clone, E: Clone>(
    observers: Vec<(Subscription, Rc<dyn Observer<T, E>>)>,
    signal: &Signal<T, E>,
) {
    for (subscription, observer) in observers {
        if !subscription.is_disposed() {
            observer.on_signal(signal.clone());
        }
    }
}

use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    Observable, Observer, Signal, Subscription,
    observer::{Observers, deliver},
};

/// A stream that is also an observer: signals pushed in are multicast to all
/// current subscribers.
///
/// After a terminal signal the subject is stopped. Later signals are dropped
/// and late subscribers immediately receive the terminal signal.
///
/// Clones share the same subject.
pub struct PublishSubject<T, E> {
    state: Rc<RefCell<SubjectState<T, E>>>,
}

struct SubjectState<T, E> {
    observers: Observers<T, E>,
    stopped: Option<Signal<T, E>>,
}

impl<T, E> SubjectState<T, E> {
    fn new() -> Self {
        Self {
            observers: Observers::default(),
            stopped: None,
        }
    }
}

impl<T, E> Clone for PublishSubject<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T, E> Default for PublishSubject<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for PublishSubject<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("PublishSubject")
            .field("observers", &state.observers.len())
            .field("stopped", &state.stopped.is_some())
            .finish()
    }
}

impl<T, E> PublishSubject<T, E> {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(SubjectState::new())),
        }
    }

    /// Returns the number of live subscriptions.
    pub fn observer_count(&self) -> usize {
        self.state.borrow().observers.len()
    }

    /// Returns true once an `Error` or `Completed` has been pushed.
    pub fn is_stopped(&self) -> bool {
        self.state.borrow().stopped.is_some()
    }
}

impl<T: Clone, E: Clone> Observer<T, E> for PublishSubject<T, E> {
    fn on_signal(&self, signal: Signal<T, E>) {
        let observers = {
            let mut state = self.state.borrow_mut();
            if state.stopped.is_some() {
                tracing::debug!(kind = %signal.kind(), "subject stopped, signal dropped");
                return;
            }
            let observers = state.observers.snapshot();
            if signal.is_terminal() {
                state.stopped = Some(signal.clone());
                state.observers.clear();
            }
            observers
        };
        deliver(observers, &signal);
    }
}

impl<T: Clone, E: Clone> Observable<T, E> for PublishSubject<T, E> {
    fn subscribe(&self, observer: Rc<dyn Observer<T, E>>) -> Subscription {
        let mut state = self.state.borrow_mut();
        let Some(terminal) = state.stopped.clone() else {
            return state.observers.add(observer);
        };
        drop(state);
        observer.on_signal(terminal);
        Subscription::disposed()
    }
}

/// A [`PublishSubject`] that remembers its latest value and replays it to
/// every new subscriber.
pub struct BehaviorSubject<T, E> {
    inner: PublishSubject<T, E>,
    current: Rc<RefCell<T>>,
}

impl<T, E> Clone for BehaviorSubject<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            current: self.current.clone(),
        }
    }
}

impl<T: fmt::Debug, E> fmt::Debug for BehaviorSubject<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorSubject")
            .field("current", &self.current.borrow())
            .field("inner", &self.inner)
            .finish()
    }
}

impl<T, E> BehaviorSubject<T, E> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: PublishSubject::new(),
            current: Rc::new(RefCell::new(initial)),
        }
    }

    /// Returns a copy of the latest value.
    pub fn value(&self) -> T
    where
        T: Clone,
    {
        self.current.borrow().clone()
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observer_count()
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.is_stopped()
    }
}

impl<T: Clone, E: Clone> Observer<T, E> for BehaviorSubject<T, E> {
    fn on_signal(&self, signal: Signal<T, E>) {
        if let Signal::Next(value) = &signal {
            if !self.inner.is_stopped() {
                *self.current.borrow_mut() = value.clone();
            }
        }
        self.inner.on_signal(signal);
    }
}

impl<T: Clone, E: Clone> Observable<T, E> for BehaviorSubject<T, E> {
    fn subscribe(&self, observer: Rc<dyn Observer<T, E>>) -> Subscription {
        if self.inner.is_stopped() {
            return self.inner.subscribe(observer);
        }
        let subscription = self.inner.subscribe(observer.clone());
        observer.on_next(self.value());
        subscription
    }
}

use std::{convert::Infallible, fmt, rc::Rc};

use crate::{BehaviorSubject, Observable, Observer, PublishSubject, Signal, Subscription};

/// A subject that never terminates.
///
/// Relays only carry values: their error type is [`Infallible`], and
/// `Error`/`Completed` signals pushed into them (for example by
/// [`TestScheduler::bind`](crate::TestScheduler::bind) replaying a script
/// that ends with a completion) are ignored. Any script error type can be
/// bound to a relay.
pub struct PublishRelay<T> {
    subject: PublishSubject<T, Infallible>,
}

impl<T> Clone for PublishRelay<T> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject.clone(),
        }
    }
}

impl<T> Default for PublishRelay<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PublishRelay<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishRelay")
            .field("observers", &self.subject.observer_count())
            .finish()
    }
}

impl<T> PublishRelay<T> {
    pub fn new() -> Self {
        Self {
            subject: PublishSubject::new(),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.subject.observer_count()
    }
}

impl<T: Clone> PublishRelay<T> {
    /// Push a value to all subscribers.
    pub fn accept(&self, value: T) {
        self.subject.on_signal(Signal::Next(value));
    }
}

impl<T: Clone, E> Observer<T, E> for PublishRelay<T> {
    fn on_signal(&self, signal: Signal<T, E>) {
        match signal {
            Signal::Next(value) => self.accept(value),
            other => tracing::debug!(kind = %other.kind(), "relay ignores terminal signal"),
        }
    }
}

impl<T: Clone> Observable<T, Infallible> for PublishRelay<T> {
    fn subscribe(&self, observer: Rc<dyn Observer<T, Infallible>>) -> Subscription {
        self.subject.subscribe(observer)
    }
}

/// A relay holding a current value, replayed to each new subscriber.
pub struct BehaviorRelay<T> {
    subject: BehaviorSubject<T, Infallible>,
}

impl<T> Clone for BehaviorRelay<T> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BehaviorRelay<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorRelay")
            .field("subject", &self.subject)
            .finish()
    }
}

impl<T> BehaviorRelay<T> {
    pub fn new(initial: T) -> Self {
        Self {
            subject: BehaviorSubject::new(initial),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.subject.observer_count()
    }
}

impl<T: Clone> BehaviorRelay<T> {
    /// Replace the current value and push it to all subscribers.
    pub fn accept(&self, value: T) {
        self.subject.on_signal(Signal::Next(value));
    }

    /// Returns a copy of the current value.
    pub fn value(&self) -> T {
        self.subject.value()
    }
}

impl<T: Clone, E> Observer<T, E> for BehaviorRelay<T> {
    fn on_signal(&self, signal: Signal<T, E>) {
        match signal {
            Signal::Next(value) => self.accept(value),
            other => tracing::debug!(kind = %other.kind(), "relay ignores terminal signal"),
        }
    }
}

impl<T: Clone> Observable<T, Infallible> for BehaviorRelay<T> {
    fn subscribe(&self, observer: Rc<dyn Observer<T, Infallible>>) -> Subscription {
        self.subject.subscribe(observer)
    }
}

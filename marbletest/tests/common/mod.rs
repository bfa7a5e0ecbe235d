#![allow(dead_code)]

use std::{borrow::Cow, convert::Infallible, fmt};

use marbletest::{
    BehaviorRelay, FnObserver, Label, Observable, Observer, PublishRelay, PublishSubject, Signal,
    TestScheduler,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TestError {
    pub message: String,
}

impl TestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error({})", self.message)
    }
}

impl Label for TestError {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("TestError")
    }
}

/// A view model exposing one input and one output stream per flavour:
/// a plain subject, a publish relay and a behavior relay seeded with
/// `"start"`. Outputs mirror their inputs.
pub struct ViewModel {
    pub input: PublishSubject<&'static str, TestError>,
    pub elements: PublishSubject<&'static str, TestError>,
    pub publish_relay_input: PublishRelay<&'static str>,
    pub publish_relay_elements: PublishRelay<&'static str>,
    pub behavior_relay_input: BehaviorRelay<&'static str>,
}

impl ViewModel {
    pub fn new() -> Self {
        let input = PublishSubject::new();
        let elements = PublishSubject::new();
        let forward = elements.clone();
        input.subscribe(FnObserver::new(
            move |signal: Signal<&'static str, TestError>| forward.on_signal(signal),
        ));

        let publish_relay_input = PublishRelay::new();
        let publish_relay_elements = PublishRelay::new();
        let forward = publish_relay_elements.clone();
        publish_relay_input.subscribe(FnObserver::new(
            move |signal: Signal<&'static str, Infallible>| forward.on_signal(signal),
        ));

        Self {
            input,
            elements,
            publish_relay_input,
            publish_relay_elements,
            behavior_relay_input: BehaviorRelay::new("start"),
        }
    }

    pub fn behavior_relay_elements(&self) -> &BehaviorRelay<&'static str> {
        &self.behavior_relay_input
    }
}

pub fn setup() -> (ViewModel, TestScheduler) {
    (ViewModel::new(), TestScheduler::with_initial_clock(0))
}

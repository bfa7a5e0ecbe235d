use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    fmt,
    rc::Rc,
};

use crate::{
    Error, Observable, Observer, Recorded, Recorder, Result, SchedulerConfig, VirtualTime,
    monitoring::MonitorRegistry,
};

type Action = Box<dyn FnOnce()>;

struct SchedulerState {
    queue: BTreeMap<(VirtualTime, u64), Action>,
    next_seq: u64,
    started: bool,
}

/// Deterministic virtual-time scheduler for driving reactive tests.
///
/// The scheduler provides:
/// - Input scripting via [`bind`](Self::bind) and [`schedule_at`](Self::schedule_at)
/// - Output capture via [`record`](Self::record) and [`observer`](Self::observer)
/// - Execution via [`start`](Self::start) or stepwise [`advance_to`](Self::advance_to)
///
/// Nothing runs until the clock is driven. All actions execute on the
/// calling thread in timestamp order; actions sharing a timestamp run in the
/// order they were scheduled. Each test constructs its own scheduler, so
/// tests never share a clock.
///
/// # Example
///
/// ```rust
/// use marbletest::{PublishSubject, Recorded, TestScheduler, assert_that};
///
/// let scheduler = TestScheduler::default();
/// let input: PublishSubject<&str, String> = PublishSubject::new();
///
/// let output = scheduler.record(&input);
/// scheduler.bind(
///     [Recorded::next(10, "alpha"), Recorded::next(12, "bravo"), Recorded::completed(15)],
///     &input,
/// );
/// scheduler.start()?;
///
/// assert_that(&output).first_next_eq("alpha").assert();
/// assert_that(&output).complete_at(15).assert();
/// # Ok::<(), marbletest::Error>(())
/// ```
///
/// # Note
///
/// The scheduler and everything it records use `Rc` internally and are
/// `!Send`. They are meant for single-threaded test bodies only.
#[derive(Clone)]
pub struct TestScheduler {
    state: Rc<RefCell<SchedulerState>>,
    clock: Rc<Cell<VirtualTime>>,
    monitors: MonitorRegistry,
    config: SchedulerConfig,
}

impl fmt::Debug for TestScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("TestScheduler")
            .field("clock", &self.clock.get())
            .field("queued", &state.queue.len())
            .field("started", &state.started)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for TestScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl TestScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(SchedulerState {
                queue: BTreeMap::new(),
                next_seq: 0,
                started: false,
            })),
            clock: Rc::new(Cell::new(config.initial_clock())),
            monitors: MonitorRegistry::default(),
            config,
        }
    }

    /// Shorthand for a default configuration starting at `clock`.
    pub fn with_initial_clock(clock: VirtualTime) -> Self {
        Self::new(SchedulerConfig::default().with_initial_clock(clock))
    }

    /// Returns the current virtual time.
    pub fn clock(&self) -> VirtualTime {
        self.clock.get()
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Returns the number of actions waiting to run.
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Returns the registry of monitors notified during runs.
    pub fn monitors(&self) -> &MonitorRegistry {
        &self.monitors
    }

    // ==================== Scheduling ====================

    /// Queue `action` to run when the clock reaches `time`.
    ///
    /// Actions scheduled for a time that has already passed run at the
    /// current clock, after everything already queued for it.
    pub fn schedule_at(&self, time: VirtualTime, action: impl FnOnce() + 'static) {
        let now = self.clock.get();
        let at = time.max(now);
        if at != time {
            tracing::trace!(requested = time, now, "action scheduled in the past");
        }
        {
            let mut state = self.state.borrow_mut();
            let seq = state.next_seq;
            state.next_seq += 1;
            state.queue.insert((at, seq), Box::new(action));
        }
        self.monitors.notify(|m| m.on_action_scheduled(at));
    }

    /// Queue `action` to run `delay` ticks from now.
    pub fn schedule_after(&self, delay: VirtualTime, action: impl FnOnce() + 'static) {
        self.schedule_at(self.clock.get().saturating_add(delay), action);
    }

    /// Feed a scripted sequence of signals into `sink`, each at its timestamp.
    ///
    /// ```rust
    /// # use marbletest::{PublishRelay, Recorded, TestScheduler};
    /// let scheduler = TestScheduler::default();
    /// let input = PublishRelay::new();
    /// scheduler.bind(vec![Recorded::<_, ()>::next(10, "alpha")], &input);
    /// assert_eq!(scheduler.pending(), 1);
    /// ```
    pub fn bind<T, E, S>(&self, events: impl IntoIterator<Item = Recorded<T, E>>, sink: &S)
    where
        T: 'static,
        E: 'static,
        S: Observer<T, E> + Clone + 'static,
    {
        for recorded in events {
            let sink = sink.clone();
            let (time, signal) = recorded.into_parts();
            self.schedule_at(time, move || sink.on_signal(signal));
        }
    }

    // ==================== Recording ====================

    /// Create a recorder that stamps every signal it receives with this
    /// scheduler's clock. Use it directly as a sink, or see [`record`](Self::record).
    pub fn observer<T, E>(&self) -> Recorder<T, E> {
        Recorder::new(self.clock.clone(), self.monitors.clone())
    }

    /// Subscribe a new recorder to `source` right away, at the current clock.
    ///
    /// Read the captured timeline with [`Recorder::events`] after the run.
    pub fn record<T, E, O>(&self, source: &O) -> Recorder<T, E>
    where
        T: 'static,
        E: 'static,
        O: Observable<T, E> + ?Sized,
    {
        let recorder = self.observer();
        let subscription = source.subscribe(recorder.as_observer());
        recorder.set_subscription(subscription);
        recorder
    }

    // ==================== Running ====================

    /// Run every queued action in virtual-time order until the queue is empty.
    ///
    /// May be called once per scheduler.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyStarted`] on a second call
    /// - [`Error::ActionLimitExceeded`] if the run exceeds
    ///   [`SchedulerConfig::max_actions`]. The action that would have
    ///   exceeded it is left queued, and monitors still get
    ///   `on_run_finished`.
    pub fn start(&self) -> Result {
        {
            let mut state = self.state.borrow_mut();
            if state.started {
                return Err(Error::AlreadyStarted);
            }
            state.started = true;
        }
        tracing::debug!(clock = self.clock.get(), queued = self.pending(), "run started");
        self.run_until(None)
    }

    /// Run every action due at or before `time`, then set the clock to `time`.
    ///
    /// Moving backwards is a no-op. Unlike [`start`](Self::start), this may be
    /// called repeatedly.
    pub fn advance_to(&self, time: VirtualTime) -> Result {
        if time < self.clock.get() {
            tracing::debug!(time, clock = self.clock.get(), "advance_to in the past ignored");
            return Ok(());
        }
        self.run_until(Some(time))?;
        self.set_clock(time);
        Ok(())
    }

    fn run_until(&self, limit: Option<VirtualTime>) -> Result {
        let max_actions = self.config.max_actions();
        let mut executed = 0usize;

        loop {
            let due = self
                .state
                .borrow()
                .queue
                .first_key_value()
                .is_some_and(|(&(time, _), _)| limit.is_none_or(|limit| time <= limit));
            if !due {
                break;
            }

            // The over-limit action stays queued.
            if executed >= max_actions {
                let clock = self.clock.get();
                tracing::warn!(max_actions, clock, "action limit exceeded");
                self.monitors.notify(|m| m.on_run_finished(clock, executed));
                return Err(Error::ActionLimitExceeded(max_actions));
            }

            let Some(((time, _), action)) = self.state.borrow_mut().queue.pop_first() else {
                break;
            };
            self.set_clock(time);
            action();
            executed += 1;
            self.monitors.notify(|m| m.on_action_executed(time));
        }

        let clock = self.clock.get();
        self.monitors.notify(|m| m.on_run_finished(clock, executed));
        tracing::debug!(clock, executed, "run finished");
        Ok(())
    }

    fn set_clock(&self, time: VirtualTime) {
        let now = self.clock.get();
        if time > now {
            self.clock.set(time);
            self.monitors.notify(|m| m.on_clock_advanced(now, time));
        }
    }
}

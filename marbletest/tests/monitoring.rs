use std::{cell::RefCell, rc::Rc};

use marbletest::{
    PublishSubject, Recorded, SchedulerConfig, SignalKind, TestScheduler, VirtualTime,
    assert_that, monitoring::Monitor, monitors::Tracer,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[derive(Clone, Default)]
struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl Monitor for Journal {
    fn on_signal_recorded(&self, at: VirtualTime, kind: SignalKind) {
        self.0.borrow_mut().push(format!("{kind}@{at}"));
    }

    fn on_run_finished(&self, clock: VirtualTime, executed: usize) {
        self.0.borrow_mut().push(format!("finished@{clock} ({executed})"));
    }
}

#[test]
fn tracer_and_custom_monitor_observe_run() {
    init_tracing();
    let scheduler = TestScheduler::default();
    let journal = Journal::default();
    scheduler.monitors().add(Tracer);
    scheduler.monitors().add(journal.clone());

    let subject: PublishSubject<&str, ()> = PublishSubject::new();
    scheduler.bind(
        vec![Recorded::next(10, "alpha"), Recorded::completed(15)],
        &subject,
    );
    let output = scheduler.record(&subject);
    scheduler.start().unwrap();

    assert_that(&output).complete_at(15).assert();
    assert_eq!(
        journal.entries(),
        ["next@10", "completed@15", "finished@15 (2)"]
    );
}

#[test]
fn paused_monitor_misses_signals() {
    init_tracing();
    let scheduler = TestScheduler::default();
    let journal = Journal::default();
    let handle = scheduler.monitors().add(journal.clone());

    let subject: PublishSubject<i32, ()> = PublishSubject::new();
    scheduler.bind(
        vec![
            Recorded::next(1, 1),
            Recorded::next(2, 2),
            Recorded::next(3, 3),
        ],
        &subject,
    );
    let output = scheduler.record(&subject);

    handle.pause();
    scheduler.advance_to(2).unwrap();
    handle.resume();
    scheduler.advance_to(3).unwrap();

    assert_eq!(output.len(), 3);
    assert_eq!(
        journal.entries(),
        ["next@3", "finished@3 (1)"]
    );
}

#[test]
fn initial_clock_offsets_recording() {
    init_tracing();
    let scheduler = TestScheduler::new(SchedulerConfig::default().with_initial_clock(100));
    let subject: PublishSubject<&str, ()> = PublishSubject::new();
    scheduler.bind(
        vec![Recorded::next(50, "late"), Recorded::next(120, "on time")],
        &subject,
    );
    let output = scheduler.record(&subject);
    scheduler.start().unwrap();

    assert_that(&output)
        .match_timeline(&[Recorded::next(100, "late"), Recorded::next(120, "on time")])
        .assert();
}

use std::cell::Cell;

use marbletest::{monitoring::Monitor, *};

// Custom monitor demonstrating the Monitor trait.
// For simple tracing, consider using `marbletest::monitors::Tracer` instead.
#[derive(Default)]
struct Printer {
    signals: Cell<usize>,
}

impl Monitor for Printer {
    fn on_clock_advanced(&self, from: VirtualTime, to: VirtualTime) {
        println!("clock {from} -> {to}");
    }

    fn on_signal_recorded(&self, at: VirtualTime, kind: SignalKind) {
        self.signals.set(self.signals.get() + 1);
        println!("  recorded {kind} at {at} (#{})", self.signals.get());
    }

    fn on_run_finished(&self, clock: VirtualTime, executed: usize) {
        println!("finished at {clock} after {executed} actions");
    }
}

fn main() -> Result {
    let scheduler = TestScheduler::default();
    let handle = scheduler.monitors().add(Printer::default());

    let ticks: PublishSubject<u32, ()> = PublishSubject::new();
    scheduler.bind(
        (1..=3u32)
            .map(|n| Recorded::next(u64::from(n) * 5, n))
            .chain([Recorded::completed(20)]),
        &ticks,
    );
    let output = scheduler.record(&ticks);

    // Keep the run quiet until the second tick.
    handle.pause();
    scheduler.advance_to(7)?;
    handle.resume();
    scheduler.advance_to(20)?;

    println!("recorded {}", output.events());
    Ok(())
}

use crate::{SignalKind, VirtualTime, monitoring::Monitor};

/// A monitor that logs the run lifecycle to the `tracing` crate.
///
/// Provides visibility into a virtual-time run without custom code. Log levels:
/// - `trace` - action scheduled/executed, clock advanced (high volume)
/// - `debug` - signal recorded
/// - `info` - run finished
///
/// # Example
///
/// ```rust
/// use marbletest::{TestScheduler, monitors::Tracer};
///
/// let scheduler = TestScheduler::default();
/// scheduler.monitors().add(Tracer);
/// ```
#[derive(Debug)]
pub struct Tracer;

impl Monitor for Tracer {
    fn on_action_scheduled(&self, at: VirtualTime) {
        tracing::trace!(at, "action scheduled");
    }

    fn on_clock_advanced(&self, from: VirtualTime, to: VirtualTime) {
        tracing::trace!(from, to, "clock advanced");
    }

    fn on_action_executed(&self, at: VirtualTime) {
        tracing::trace!(at, "action executed");
    }

    fn on_signal_recorded(&self, at: VirtualTime, kind: SignalKind) {
        tracing::debug!(at, kind = %kind, "signal recorded");
    }

    fn on_run_finished(&self, clock: VirtualTime, executed: usize) {
        tracing::info!(clock, executed, "run finished");
    }
}

use crate::{SignalKind, VirtualTime};

/// Trait for observing a virtual-time run.
///
/// Implement this trait to receive callbacks as the scheduler works through
/// its queue. All methods have default no-op implementations, so you only
/// need to override the ones you care about.
///
/// # Example
///
/// ```rust
/// use marbletest::{SignalKind, VirtualTime, monitoring::Monitor};
///
/// struct SignalLogger;
///
/// impl Monitor for SignalLogger {
///     fn on_signal_recorded(&self, at: VirtualTime, kind: SignalKind) {
///         println!("[recorded] {kind} at {at}");
///     }
/// }
/// ```
///
/// # Run Lifecycle
///
/// 1. **Scheduled**  - `bind` or `schedule_at` queues an action
/// 2. **Advanced**  - `start` moves the clock to the next due action
/// 3. **Executed**  - the action runs; recorders may capture signals
/// 4. **Finished**  - the queue is empty and `start` returns
pub trait Monitor {
    /// Called when an action is queued for virtual time `at`.
    fn on_action_scheduled(&self, at: VirtualTime) {
        let _a = at;
    }

    /// Called when the clock moves forward.
    ///
    /// Does not fire for actions due at the current time.
    fn on_clock_advanced(&self, from: VirtualTime, to: VirtualTime) {
        let _f = from;
        let _t = to;
    }

    /// Called after an action due at `at` has run.
    fn on_action_executed(&self, at: VirtualTime) {
        let _a = at;
    }

    /// Called when a recorder created by this scheduler captures a signal.
    fn on_signal_recorded(&self, at: VirtualTime, kind: SignalKind) {
        let _a = at;
        let _k = kind;
    }

    /// Called once the queue is drained.
    fn on_run_finished(&self, clock: VirtualTime, executed: usize) {
        let _c = clock;
        let _e = executed;
    }
}

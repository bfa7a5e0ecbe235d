use crate::VirtualTime;

/// Configuration for a [`TestScheduler`](crate::TestScheduler).
///
/// Use the builder methods to customize, or [`Default`] for a clock starting
/// at zero.
///
/// # Examples
///
/// ```rust
/// use marbletest::SchedulerConfig;
///
/// let config = SchedulerConfig::default()
///     .with_initial_clock(200)     // Start the clock later
///     .with_max_actions(1_000);    // Fail fast on runaway rescheduling
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerConfig {
    /// Virtual time the clock shows before `start()`.
    /// Default: 0
    initial_clock: VirtualTime,

    /// Upper bound on actions executed by a single `start()`.
    /// An action that keeps rescheduling itself would otherwise never let
    /// the run finish.
    /// Default: 100_000
    max_actions: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            initial_clock: 0,
            max_actions: 100_000,
        }
    }
}

impl SchedulerConfig {
    /// Set the virtual time the clock starts at.
    pub fn with_initial_clock(mut self, clock: VirtualTime) -> Self {
        self.initial_clock = clock;
        self
    }

    /// Returns the virtual time the clock starts at.
    pub fn initial_clock(&self) -> VirtualTime {
        self.initial_clock
    }

    /// Set the maximum number of actions a run may execute.
    pub fn with_max_actions(mut self, limit: usize) -> Self {
        self.max_actions = limit;
        self
    }

    /// Returns the maximum number of actions a run may execute.
    pub fn max_actions(&self) -> usize {
        self.max_actions
    }
}

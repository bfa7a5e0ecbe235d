//! Timeline assertions.
//!
//! Every assertion starts with [`assert_that`] on a recorder or timeline and
//! ends in a [`Verdict`]. Assertions only read the captured timeline: they
//! never touch the scheduler, so a verdict can be computed, negated with
//! [`not`] and reported without re-running anything.
//!
//! Failure diagnostics show the observed stream as a marble diagram inside
//! angle brackets, e.g. `<alpha-bravo-|>`.

mod next;
mod shape;
mod terminal;
mod verdict;

pub use verdict::{Outcome, Verdict, not};

use std::fmt;

use crate::{Recorded, Recorder, Signal, Timeline, VirtualTime};

/// Anything a timeline can be read from.
pub trait AsTimeline<T, E> {
    fn as_timeline(&self) -> Timeline<T, E>;
}

impl<T: Clone, E: Clone> AsTimeline<T, E> for Recorder<T, E> {
    fn as_timeline(&self) -> Timeline<T, E> {
        self.events()
    }
}

impl<T, E> AsTimeline<T, E> for Timeline<T, E> {
    fn as_timeline(&self) -> Timeline<T, E> {
        self.clone()
    }
}

/// Slices are inspected as given; build a [`Timeline`] first to have the
/// ordering checked.
impl<T: Clone, E: Clone> AsTimeline<T, E> for [Recorded<T, E>] {
    fn as_timeline(&self) -> Timeline<T, E> {
        Timeline::from_validated(self.to_vec())
    }
}

impl<T: Clone, E: Clone> AsTimeline<T, E> for Vec<Recorded<T, E>> {
    fn as_timeline(&self) -> Timeline<T, E> {
        self.as_slice().as_timeline()
    }
}

/// Start an assertion over the signals captured so far.
///
/// The timeline is snapshotted here; signals recorded afterwards are not
/// seen by the returned [`Assertion`].
///
/// ```rust
/// use marbletest::{PublishSubject, Recorded, TestScheduler, assert_that};
///
/// let scheduler = TestScheduler::default();
/// let subject: PublishSubject<&str, ()> = PublishSubject::new();
/// scheduler.bind(
///     vec![Recorded::next(10, "alpha"), Recorded::completed(15)],
///     &subject,
/// );
/// let output = scheduler.record(&subject);
/// scheduler.start()?;
///
/// assert_that(&output).just("alpha").assert();
/// assert_that(&output).complete_at(15).assert();
/// # Ok::<(), marbletest::Error>(())
/// ```
pub fn assert_that<T, E, S>(source: &S) -> Assertion<T, E>
where
    S: AsTimeline<T, E> + ?Sized,
{
    Assertion {
        timeline: source.as_timeline(),
    }
}

/// A pending assertion over one captured timeline.
///
/// Each method consumes the assertion and evaluates one condition. Start a
/// new one with [`assert_that`] for every check.
#[must_use = "an assertion does nothing until a condition is evaluated"]
pub struct Assertion<T, E> {
    timeline: Timeline<T, E>,
}

impl<T, E> fmt::Debug for Assertion<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assertion")
            .field("signals", &self.timeline.len())
            .finish()
    }
}

impl<T, E> Assertion<T, E> {
    /// The captured timeline under test.
    pub fn timeline(&self) -> &Timeline<T, E> {
        &self.timeline
    }

    /// Describes where the stream ended, e.g. `completed at 15`.
    fn terminal_at(&self) -> String {
        match self.timeline.terminal() {
            Some(rec) => format!("{} at {}", rec.kind(), rec.time()),
            None => "no terminal signal".to_string(),
        }
    }

    /// Describes how many signals preceded the end, e.g. `error after 2 signals`.
    fn terminal_after(&self) -> String {
        match (self.timeline.terminal(), self.timeline.terminal_index()) {
            (Some(rec), Some(index)) => format!("{} after {} signals", rec.kind(), index),
            _ => "no terminal signal".to_string(),
        }
    }

    fn next_times_list(&self) -> Vec<VirtualTime> {
        self.timeline.nexts().map(|(time, _)| time).collect()
    }

    /// Projects every `Next` payload through `f`, keeping timestamps and
    /// terminal signals.
    ///
    /// Diagram-based assertions need displayable payloads; map a payload
    /// without [`Display`](fmt::Display) to one that has it first.
    ///
    /// ```rust
    /// use marbletest::{Recorded, assert_that};
    ///
    /// #[derive(Clone)]
    /// struct Point(i32, i32);
    ///
    /// let events: Vec<Recorded<Point, ()>> = vec![Recorded::next(1, Point(2, 3))];
    /// assert_that(&events).map(|p| p.0 + p.1).first_next_eq(5).assert();
    /// ```
    pub fn map<U>(self, f: impl Fn(&T) -> U) -> Assertion<U, E>
    where
        E: Clone,
    {
        let events = self
            .timeline
            .iter()
            .map(|rec| {
                let signal = match rec.signal() {
                    Signal::Next(value) => Signal::Next(f(value)),
                    Signal::Error(err) => Signal::Error(err.clone()),
                    Signal::Completed => Signal::Completed,
                };
                Recorded::new(rec.time(), signal)
            })
            .collect();
        Assertion {
            timeline: Timeline::from_validated(events),
        }
    }
}

impl<T: fmt::Display, E> Assertion<T, E> {
    /// The observed stream as `<marble>`.
    fn diagram(&self) -> String {
        self.timeline.to_string()
    }

    /// Custom predicate over the whole timeline.
    ///
    /// `description` should read as a condition after "expected to".
    ///
    /// ```rust
    /// use marbletest::{Recorded, Timeline, assert_that};
    ///
    /// let timeline: Timeline<i32, ()> =
    ///     Timeline::new(vec![Recorded::next(1, 2), Recorded::next(2, 4)])?;
    /// assert_that(&timeline)
    ///     .satisfies("emit only even numbers", |t| t.nexts().all(|(_, v)| v % 2 == 0))
    ///     .assert();
    /// # Ok::<(), marbletest::Error>(())
    /// ```
    pub fn satisfies(
        self,
        description: impl Into<String>,
        predicate: impl FnOnce(&Timeline<T, E>) -> bool,
    ) -> Verdict {
        let holds = predicate(&self.timeline);
        Verdict::new(holds, description, self.diagram())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_slices_vectors_and_timelines() {
        let events: Vec<Recorded<&str, ()>> =
            vec![Recorded::next(1, "a"), Recorded::completed(2)];
        let timeline = Timeline::new(events.clone()).unwrap();

        assert!(assert_that(&events).complete().holds());
        assert!(assert_that(events.as_slice()).complete().holds());
        assert!(assert_that(&timeline).complete().holds());
    }

    #[test]
    fn snapshot_ignores_later_signals() {
        use crate::{Observer, TestScheduler};

        let scheduler = TestScheduler::default();
        let recorder = scheduler.observer::<i32, ()>();
        recorder.on_next(1);

        let assertion = assert_that(&recorder);
        recorder.on_next(2);

        assert_eq!(assertion.timeline().len(), 1);
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Frame {
        width: u32,
    }

    fn frames() -> Vec<Recorded<Frame, String>> {
        vec![
            Recorded::next(10, Frame { width: 4 }),
            Recorded::next(20, Frame { width: 8 }),
            Recorded::error(30, "lost".to_string()),
        ]
    }

    #[test]
    fn counting_assertions_accept_undisplayable_payloads() {
        let events = frames();

        assert!(!assert_that(&events).be_never().holds());
        assert!(assert_that(&events).next_times(2).holds());
        assert!(assert_that(&events).next_at(20).holds());
        assert!(assert_that(&events).error_after(2).holds());
        assert!(assert_that(&events).error_at(30).holds());
        assert!(assert_that(&events).error_eq("lost".to_string()).holds());

        let verdict = assert_that(&events).complete_at(30);
        assert_eq!(
            verdict.to_string(),
            "expected to complete at 30, got error at 30"
        );
    }

    #[test]
    fn map_projects_payloads_for_diagrams() {
        let events = frames();
        let verdict = assert_that(&events).map(|frame| frame.width).complete();
        assert_eq!(verdict.to_string(), "expected to complete, got <4-8-x>");

        assert_that(&events)
            .map(|frame| frame.width)
            .match_timeline(&[
                Recorded::next(10, 4),
                Recorded::next(20, 8),
                Recorded::error(30, "lost".to_string()),
            ])
            .assert();
    }

    #[test]
    fn satisfies_reports_diagram_on_failure() {
        let timeline: Timeline<i32, ()> =
            Timeline::new(vec![Recorded::next(1, 3), Recorded::completed(2)]).unwrap();
        let verdict = assert_that(&timeline).satisfies("emit only even numbers", |t| {
            t.nexts().all(|(_, v)| v % 2 == 0)
        });
        assert_eq!(
            verdict.to_string(),
            "expected to emit only even numbers, got <3-|>"
        );
    }
}

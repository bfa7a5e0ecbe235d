use std::fmt;

use super::{Assertion, Verdict};
use crate::{Label, VirtualTime};

// ==================== Error ====================

impl<T: fmt::Display, E> Assertion<T, E> {
    /// Holds if the stream terminated with an error.
    pub fn error(self) -> Verdict {
        let holds = self.timeline.error().is_some();
        Verdict::new(holds, "error", self.diagram())
    }
}

impl<T, E> Assertion<T, E> {
    /// Holds if the stream errored exactly at `time`.
    pub fn error_at(self, time: VirtualTime) -> Verdict {
        let holds = self.timeline.error().is_some_and(|(at, _)| at == time);
        Verdict::new(holds, format!("error at {time}"), self.terminal_at())
    }

    /// Holds if the error is preceded by exactly `count` signals.
    pub fn error_after(self, count: usize) -> Verdict {
        let holds =
            self.timeline.error().is_some() && self.timeline.terminal_index() == Some(count);
        Verdict::new(
            holds,
            format!("error after {count} signals"),
            self.terminal_after(),
        )
    }

    /// Holds if the error's [`Label`] equals `label`.
    ///
    /// ```rust
    /// use std::borrow::Cow;
    /// use marbletest::{Label, Recorded, assert_that};
    ///
    /// #[derive(Clone)]
    /// struct Timeout;
    ///
    /// impl Label for Timeout {
    ///     fn label(&self) -> Cow<'static, str> {
    ///         Cow::Borrowed("Timeout")
    ///     }
    /// }
    ///
    /// let events: Vec<Recorded<i32, Timeout>> = vec![Recorded::error(5, Timeout)];
    /// assert_that(&events).error_kind("Timeout").assert();
    /// ```
    pub fn error_kind(self, label: &str) -> Verdict
    where
        E: Label,
    {
        let observed = self.timeline.error().map(|(_, err)| err.label());
        let holds = observed.as_deref() == Some(label);
        let actual = match observed {
            Some(observed) => format!("error with {observed}"),
            None => self.terminal_at(),
        };
        Verdict::new(holds, format!("error with {label}"), actual)
    }

    /// Holds if the error satisfies `discriminator`. `category` names what
    /// the discriminator accepts, for diagnostics.
    pub fn error_where(self, category: &str, discriminator: impl FnOnce(&E) -> bool) -> Verdict {
        let (holds, actual) = match self.timeline.error() {
            Some((_, err)) => (discriminator(err), "error of another kind".to_string()),
            None => (false, self.terminal_at()),
        };
        Verdict::new(holds, format!("error with {category}"), actual)
    }

    /// Holds if the error equals `expected`.
    pub fn error_eq(self, expected: E) -> Verdict
    where
        E: PartialEq + fmt::Debug,
    {
        self.error_eq_by(expected, |a, b| a == b)
    }

    /// Holds if the error equals `expected` under a custom comparison.
    pub fn error_eq_by(self, expected: E, eq: impl FnOnce(&E, &E) -> bool) -> Verdict
    where
        E: fmt::Debug,
    {
        let (holds, actual) = match self.timeline.error() {
            Some((_, err)) => (eq(err, &expected), format!("error {err:?}")),
            None => (false, self.terminal_at()),
        };
        Verdict::new(holds, format!("error {expected:?}"), actual)
    }
}

// ==================== Completion ====================

impl<T: fmt::Display, E> Assertion<T, E> {
    /// Holds if the stream completed.
    pub fn complete(self) -> Verdict {
        let holds = self.timeline.completed_at().is_some();
        Verdict::new(holds, "complete", self.diagram())
    }
}

impl<T, E> Assertion<T, E> {
    /// Holds if the stream completed exactly at `time`.
    pub fn complete_at(self, time: VirtualTime) -> Verdict {
        let holds = self.timeline.completed_at() == Some(time);
        Verdict::new(holds, format!("complete at {time}"), self.terminal_at())
    }

    /// Holds if the completion is preceded by exactly `count` signals.
    pub fn complete_after(self, count: usize) -> Verdict {
        let holds = self.timeline.completed_at().is_some()
            && self.timeline.terminal_index() == Some(count);
        Verdict::new(
            holds,
            format!("complete after {count} signals"),
            self.terminal_after(),
        )
    }
}

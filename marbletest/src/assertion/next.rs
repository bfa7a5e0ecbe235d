use std::fmt;

use super::{Assertion, Verdict};
use crate::VirtualTime;

impl<T, E> Assertion<T, E> {
    /// Holds if some `Next` was emitted exactly at `time`.
    pub fn next_at(self, time: VirtualTime) -> Verdict {
        let times = self.next_times_list();
        Verdict::new(
            times.contains(&time),
            format!("emit next at {time}"),
            format!("next at {times:?}"),
        )
    }

    /// Holds if exactly `count` `Next` signals were emitted.
    pub fn next_times(self, count: usize) -> Verdict {
        let actual = self.timeline.next_count();
        Verdict::new(
            actual == count,
            format!("emit next {count} times"),
            format!("{actual} times"),
        )
    }
}

impl<T: fmt::Display, E> Assertion<T, E> {
    /// Holds if at least one `Next` was emitted.
    pub fn next(self) -> Verdict {
        let holds = self.timeline.next_count() > 0;
        Verdict::new(holds, "emit next", self.diagram())
    }

    /// Holds if the `Next` at ordinal position `index` (0-indexed) equals `value`.
    ///
    /// Non-`Next` signals are skipped when counting.
    pub fn nth_next_eq(self, index: usize, value: T) -> Verdict
    where
        T: PartialEq,
    {
        let holds = self.timeline.nth_next(index) == Some(&value);
        Verdict::new(
            holds,
            format!("emit {value} as next #{index}"),
            self.diagram(),
        )
    }

    /// Holds if the first `Next` equals `value`.
    pub fn first_next_eq(self, value: T) -> Verdict
    where
        T: PartialEq,
    {
        let holds = self.timeline.first_next() == Some(&value);
        Verdict::new(holds, format!("emit {value} first"), self.diagram())
    }

    /// Holds if the last `Next` equals `value`.
    pub fn last_next_eq(self, value: T) -> Verdict
    where
        T: PartialEq,
    {
        let holds = self.timeline.last_next() == Some(&value);
        Verdict::new(holds, format!("emit {value} last"), self.diagram())
    }

    /// Runs a custom check over the first `Next` payload (`None` if there
    /// was none).
    ///
    /// The check returns whether it passed and a description of the
    /// condition, phrased to follow "expected to".
    ///
    /// ```rust
    /// use marbletest::{Recorded, assert_that};
    ///
    /// let events: Vec<Recorded<&str, ()>> = vec![Recorded::next(10, "alpha")];
    /// assert_that(&events)
    ///     .first_next_matches(|first| {
    ///         (first.is_some_and(|v| v.starts_with('a')), "start with an 'a'")
    ///     })
    ///     .assert();
    /// ```
    pub fn first_next_matches<S: Into<String>>(
        self,
        check: impl FnOnce(Option<&T>) -> (bool, S),
    ) -> Verdict {
        let (holds, description) = check(self.timeline.first_next());
        Verdict::new(holds, description, self.diagram())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Recorded, assert_that, not};

    fn letters() -> Vec<Recorded<&'static str, ()>> {
        vec![
            Recorded::next(10, "alpha"),
            Recorded::next(12, "bravo"),
            Recorded::next(12, "charlie"),
            Recorded::completed(20),
        ]
    }

    #[test]
    fn next_presence() {
        let events = letters();
        assert!(assert_that(&events).next().holds());

        let completed: Vec<Recorded<&str, ()>> = vec![Recorded::completed(1)];
        let verdict = assert_that(&completed).next();
        assert_eq!(verdict.to_string(), "expected to emit next, got <|>");
        not(assert_that(&completed).next()).assert();
    }

    #[test]
    fn next_at_lists_observed_times() {
        let events = letters();
        assert!(assert_that(&events).next_at(12).holds());

        let verdict = assert_that(&events).next_at(11);
        assert_eq!(
            verdict.to_string(),
            "expected to emit next at 11, got next at [10, 12, 12]"
        );
    }

    #[test]
    fn next_at_ignores_terminal_time() {
        let events = letters();
        assert!(!assert_that(&events).next_at(20).holds());
    }

    #[test]
    fn next_times_counts_only_values() {
        let events = letters();
        assert!(assert_that(&events).next_times(3).holds());

        let verdict = assert_that(&events).next_times(4);
        assert_eq!(verdict.to_string(), "expected to emit next 4 times, got 3 times");
    }

    #[test]
    fn ordinal_value_checks() {
        let events = letters();
        assert!(assert_that(&events).first_next_eq("alpha").holds());
        assert!(assert_that(&events).nth_next_eq(1, "bravo").holds());
        assert!(assert_that(&events).last_next_eq("charlie").holds());

        assert!(!assert_that(&events).nth_next_eq(3, "delta").holds());
        let verdict = assert_that(&events).first_next_eq("bravo");
        assert_eq!(
            verdict.to_string(),
            "expected to emit bravo first, got <alpha-bravo-charlie-|>"
        );
    }

    #[test]
    fn value_checks_fail_without_values() {
        let silent: Vec<Recorded<&str, ()>> = Vec::new();
        assert!(!assert_that(&silent).first_next_eq("alpha").holds());
        assert!(!assert_that(&silent).last_next_eq("alpha").holds());
    }

    #[test]
    fn custom_first_value_check() {
        let events = letters();
        let verdict = assert_that(&events).first_next_matches(|first| {
            (first.is_some_and(|v| v.len() == 5), "emit a five-letter word first")
        });
        assert!(verdict.holds());

        let silent: Vec<Recorded<&str, ()>> = Vec::new();
        let verdict = assert_that(&silent)
            .first_next_matches(|first| (first.is_some(), "emit anything"));
        assert_eq!(verdict.to_string(), "expected to emit anything, got <>");
    }
}

use std::fmt;

use super::{Assertion, Verdict};
use crate::{Recorded, Signal, timeline::marble};

impl<T, E> Assertion<T, E> {
    /// Holds if nothing at all was recorded.
    pub fn be_never(self) -> Verdict {
        let count = self.timeline.len();
        Verdict::new(count == 0, "never emit", format!("{count} signals"))
    }
}

impl<T: fmt::Display, E> Assertion<T, E> {
    /// Holds if the timeline equals `expected` element by element.
    ///
    /// Timestamps and signal kinds must match at every position, and both
    /// `Next` and `Error` payloads must be equal.
    pub fn match_timeline(self, expected: &[Recorded<T, E>]) -> Verdict
    where
        T: PartialEq,
        E: PartialEq,
    {
        self.match_timeline_exact(expected, |a, b| a == b, |a, b| a == b)
    }

    /// Like [`match_timeline`](Self::match_timeline) with a custom `Next`
    /// payload comparison. Errors compare by timestamp only, so this also
    /// serves error types without [`PartialEq`].
    pub fn match_timeline_by(
        self,
        expected: &[Recorded<T, E>],
        eq: impl Fn(&T, &T) -> bool,
    ) -> Verdict {
        self.match_timeline_exact(expected, eq, |_, _| true)
    }

    /// Element-wise match with custom `Next` and `Error` payload comparisons.
    pub fn match_timeline_exact(
        self,
        expected: &[Recorded<T, E>],
        eq_next: impl Fn(&T, &T) -> bool,
        eq_error: impl Fn(&E, &E) -> bool,
    ) -> Verdict {
        let actual = self.timeline.as_slice();
        let holds = actual.len() == expected.len()
            && actual.iter().zip(expected).all(|(a, e)| {
                a.time == e.time
                    && match (&a.signal, &e.signal) {
                        (Signal::Next(x), Signal::Next(y)) => eq_next(x, y),
                        (Signal::Error(x), Signal::Error(y)) => eq_error(x, y),
                        (Signal::Completed, Signal::Completed) => true,
                        _ => false,
                    }
            });
        Verdict::new(
            holds,
            format!("match <{}>", marble(expected)),
            self.diagram(),
        )
    }

    /// Holds if the only signal is a completion.
    pub fn be_empty(self) -> Verdict {
        let holds = matches!(
            self.timeline.as_slice(),
            [only] if only.signal.is_completed()
        );
        Verdict::new(holds, "only complete", self.diagram())
    }

    /// Holds if the timeline is exactly one `Next(value)` then completion.
    pub fn just(self, value: T) -> Verdict
    where
        T: PartialEq,
    {
        let holds = match self.timeline.as_slice() {
            [first, last] => first.signal.value() == Some(&value) && last.signal.is_completed(),
            _ => false,
        };
        Verdict::new(
            holds,
            format!("emit just {value} then complete"),
            self.diagram(),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{Recorded, Timeline, assert_that};

    fn greeting() -> Vec<Recorded<&'static str, String>> {
        vec![
            Recorded::next(10, "alpha"),
            Recorded::next(12, "bravo"),
            Recorded::completed(15),
        ]
    }

    #[test]
    fn matches_identical_timeline() {
        let actual = greeting();
        let verdict = assert_that(&actual).match_timeline(&greeting());
        assert!(verdict.holds());
        assert_eq!(verdict.condition(), "match <alpha-bravo-|>");
    }

    #[test]
    fn timestamp_mismatch_fails() {
        let actual = greeting();
        let expected = vec![
            Recorded::next(10, "alpha"),
            Recorded::next(13, "bravo"),
            Recorded::completed(15),
        ];
        assert!(!assert_that(&actual).match_timeline(&expected).holds());
    }

    #[test]
    fn length_mismatch_reports_both_diagrams() {
        let actual = greeting();
        let expected = vec![Recorded::next(10, "alpha"), Recorded::completed(15)];
        let verdict = assert_that(&actual).match_timeline(&expected);
        assert_eq!(
            verdict.to_string(),
            "expected to match <alpha-|>, got <alpha-bravo-|>"
        );
    }

    #[test]
    fn kinds_must_match() {
        let actual: Vec<Recorded<&str, String>> = vec![Recorded::completed(10)];
        let expected = vec![Recorded::error(10, "boom".to_string())];
        assert!(!assert_that(&actual).match_timeline(&expected).holds());
    }

    #[test]
    fn error_payloads_must_match() {
        let actual: Vec<Recorded<&str, String>> =
            vec![Recorded::next(10, "alpha"), Recorded::error(20, "x".to_string())];
        let expected = vec![Recorded::next(10, "alpha"), Recorded::error(20, "y".to_string())];

        let verdict = assert_that(&actual).match_timeline(&expected);
        assert!(!verdict.holds());
        assert_eq!(verdict.to_string(), "expected to match <alpha-x>, got <alpha-x>");
        assert!(
            !assert_that(&actual)
                .match_timeline_exact(&expected, |a, b| a == b, |a, b| a == b)
                .holds()
        );

        let same = vec![Recorded::next(10, "alpha"), Recorded::error(20, "x".to_string())];
        assert!(assert_that(&actual).match_timeline(&same).holds());
    }

    #[test]
    fn custom_next_comparison_ignores_error_payloads() {
        let actual: Vec<Recorded<&str, String>> = vec![Recorded::error(10, "boom".to_string())];
        let expected = vec![Recorded::error(10, "other".to_string())];

        assert!(
            assert_that(&actual)
                .match_timeline_by(&expected, |a, b| a == b)
                .holds()
        );
    }

    #[test]
    fn custom_payload_equality() {
        let actual: Vec<Recorded<&str, ()>> = vec![Recorded::next(1, "Alpha")];
        let expected = vec![Recorded::next(1, "alpha")];
        let verdict = assert_that(&actual)
            .match_timeline_by(&expected, |a, b| a.eq_ignore_ascii_case(b));
        assert!(verdict.holds());
    }

    #[test]
    fn never_counts_signals() {
        let silent: Timeline<i32, ()> = Timeline::empty();
        assert!(assert_that(&silent).be_never().holds());

        let actual = greeting();
        let verdict = assert_that(&actual).be_never();
        assert_eq!(verdict.to_string(), "expected to never emit, got 3 signals");
    }

    #[test]
    fn empty_means_completion_only() {
        let completed: Vec<Recorded<i32, ()>> = vec![Recorded::completed(5)];
        let silent: Vec<Recorded<i32, ()>> = Vec::new();
        let failed: Vec<Recorded<i32, ()>> = vec![Recorded::error(5, ())];

        assert!(assert_that(&completed).be_empty().holds());
        assert!(!assert_that(&silent).be_empty().holds());
        assert!(!assert_that(&failed).be_empty().holds());
    }

    #[test]
    fn just_requires_single_value_then_completion() {
        let single: Vec<Recorded<&str, ()>> =
            vec![Recorded::next(10, "alpha"), Recorded::completed(10)];
        let open: Vec<Recorded<&str, ()>> = vec![Recorded::next(10, "alpha")];

        assert!(assert_that(&single).just("alpha").holds());
        assert!(!assert_that(&single).just("bravo").holds());

        let verdict = assert_that(&open).just("alpha");
        assert_eq!(
            verdict.to_string(),
            "expected to emit just alpha then complete, got <alpha>"
        );
    }
}

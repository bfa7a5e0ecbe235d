use std::fmt;

use crate::{Error, Result};

/// Final result of an assertion, as handed to a test reporter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The assertion held; carries a short confirmation.
    Success(String),
    /// The assertion failed; carries what was expected and what was observed
    /// (usually a marble diagram).
    Failure { expected: String, actual: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success(message) => write!(f, "{message}"),
            Outcome::Failure { expected, actual } => {
                write!(f, "expected to {expected}, got {actual}")
            }
        }
    }
}

/// An evaluated assertion: whether `condition` holds over the recorded
/// timeline, plus a description of what was actually observed.
///
/// A verdict is plain data. Report it with [`assert`](Self::assert) (panics
/// on failure, for `#[test]` bodies), [`into_result`](Self::into_result)
/// (for tests returning `Result`), or inspect [`outcome`](Self::outcome).
///
/// # Example
///
/// ```rust
/// use marbletest::{Recorded, Timeline, assert_that, not};
///
/// let timeline: Timeline<&str, ()> =
///     Timeline::new(vec![Recorded::next(10, "alpha"), Recorded::completed(10)])?;
///
/// let verdict = assert_that(&timeline).next_times(2);
/// assert!(!verdict.holds());
/// assert_eq!(verdict.to_string(), "expected to emit next 2 times, got 1 times");
///
/// not(assert_that(&timeline).next_times(2)).assert();
/// # Ok::<(), marbletest::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[must_use = "a verdict does nothing unless it is asserted or inspected"]
pub struct Verdict {
    holds: bool,
    condition: String,
    actual: String,
}

impl Verdict {
    pub(crate) fn new(holds: bool, condition: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            holds,
            condition: condition.into(),
            actual: actual.into(),
        }
    }

    /// Returns true if the condition held.
    pub fn holds(&self) -> bool {
        self.holds
    }

    /// The expected condition, phrased to follow "expected to".
    pub fn condition(&self) -> &str {
        &self.condition
    }

    /// What was observed.
    pub fn actual(&self) -> &str {
        &self.actual
    }

    /// The logical negation of this verdict.
    ///
    /// Flips the result and toggles a leading `not ` on the condition, so
    /// negating twice gives back the same verdict.
    pub fn negate(self) -> Self {
        let condition = match self.condition.strip_prefix("not ") {
            Some(rest) => rest.to_string(),
            None => format!("not {}", self.condition),
        };
        Self {
            holds: !self.holds,
            condition,
            actual: self.actual,
        }
    }

    pub fn outcome(&self) -> Outcome {
        if self.holds {
            Outcome::Success(self.condition.clone())
        } else {
            Outcome::Failure {
                expected: self.condition.clone(),
                actual: self.actual.clone(),
            }
        }
    }

    /// Panics with the diagnostic if the condition does not hold.
    #[track_caller]
    pub fn assert(self) {
        if !self.holds {
            panic!("expected to {}, got {}", self.condition, self.actual);
        }
    }

    /// Returns the confirmation message, or [`Error::Mismatch`].
    pub fn into_result(self) -> Result<String> {
        if self.holds {
            Ok(self.condition)
        } else {
            Err(Error::mismatch(self.condition, self.actual))
        }
    }
}

impl From<Verdict> for Outcome {
    fn from(verdict: Verdict) -> Self {
        verdict.outcome()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.outcome().fmt(f)
    }
}

/// Negates an evaluated assertion. See [`Verdict::negate`].
///
/// ```rust
/// use marbletest::{Recorded, Timeline, assert_that, not};
///
/// let timeline: Timeline<&str, ()> = Timeline::new(vec![Recorded::completed(10)])?;
/// not(assert_that(&timeline).next()).assert();
/// # Ok::<(), marbletest::Error>(())
/// ```
pub fn not(verdict: Verdict) -> Verdict {
    verdict.negate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_reflects_holds() {
        let pass = Verdict::new(true, "complete", "<a-|>");
        let fail = Verdict::new(false, "complete", "<a>");

        assert_eq!(pass.outcome(), Outcome::Success("complete".into()));
        assert_eq!(
            fail.outcome(),
            Outcome::Failure {
                expected: "complete".into(),
                actual: "<a>".into()
            }
        );
    }

    #[test]
    fn negation_flips_and_rephrases() {
        let negated = not(Verdict::new(true, "emit next", "<a>"));
        assert!(!negated.holds());
        assert_eq!(negated.to_string(), "expected to not emit next, got <a>");
    }

    #[test]
    fn double_negation_is_identity() {
        let verdict = Verdict::new(false, "error at 20", "completed at 10");
        assert_eq!(not(not(verdict.clone())), verdict);

        let already_negative = Verdict::new(true, "not complete", "<a>");
        assert_eq!(not(not(already_negative.clone())), already_negative);
    }

    #[test]
    fn into_result_maps_failure_to_mismatch() {
        assert_eq!(
            Verdict::new(true, "be empty", "<|>").into_result(),
            Ok("be empty".to_string())
        );
        assert_eq!(
            Verdict::new(false, "be empty", "<a-|>").into_result(),
            Err(Error::mismatch("be empty", "<a-|>"))
        );
    }

    #[test]
    #[should_panic(expected = "expected to complete at 15, got <alpha>")]
    fn assert_panics_with_diagnostic() {
        Verdict::new(false, "complete at 15", "<alpha>").assert();
    }

    #[test]
    fn assert_passes_silently() {
        Verdict::new(true, "complete", "<|>").assert();
    }
}

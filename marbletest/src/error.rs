#[cfg(feature = "serde")]
use std::sync::Arc;

use crate::VirtualTime;

/// The single error type for all marbletest operations.
///
/// Every fallible API returns `marbletest::Result<T>` (alias for
/// `Result<T, marbletest::Error>`). Assertion mismatches only become an
/// `Error` when a [`Verdict`](crate::Verdict) is explicitly converted with
/// [`Verdict::into_result`](crate::Verdict::into_result); otherwise they are
/// plain data.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("expected to {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },

    #[error("terminal signal at index {0} is not the last signal of the timeline")]
    TerminalNotLast(usize),

    #[error("signal at index {index} (t={time}) is earlier than its predecessor")]
    UnorderedTimestamps { index: usize, time: VirtualTime },

    #[error("Scheduler has already started.")]
    AlreadyStarted,

    #[error("Scheduler executed {0} actions without draining its queue")]
    ActionLimitExceeded(usize),

    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[source] Arc<serde_json::Error>),
}

impl Error {
    pub(crate) fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Error::Mismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Mismatch {
                    expected: e1,
                    actual: a1,
                },
                Self::Mismatch {
                    expected: e2,
                    actual: a2,
                },
            ) => e1 == e2 && a1 == a2,
            (Self::TerminalNotLast(a), Self::TerminalNotLast(b)) => a == b,
            (
                Self::UnorderedTimestamps { index: i1, time: t1 },
                Self::UnorderedTimestamps { index: i2, time: t2 },
            ) => i1 == i2 && t1 == t2,
            (Self::AlreadyStarted, Self::AlreadyStarted) => true,
            (Self::ActionLimitExceeded(a), Self::ActionLimitExceeded(b)) => a == b,
            #[cfg(feature = "serde")]
            (Self::Json(a), Self::Json(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Error {}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(Arc::new(e))
    }
}

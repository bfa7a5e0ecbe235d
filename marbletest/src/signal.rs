use std::fmt;

/// One notification emitted by a stream.
///
/// A stream emits any number of `Next` values followed by at most one
/// terminal signal (`Error` or `Completed`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Signal<T, E> {
    Next(T),
    Error(E),
    Completed,
}

/// Payload-free discriminant of a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalKind {
    Next,
    Error,
    Completed,
}

impl<T, E> Signal<T, E> {
    /// Returns the kind of this signal.
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::Next(_) => SignalKind::Next,
            Signal::Error(_) => SignalKind::Error,
            Signal::Completed => SignalKind::Completed,
        }
    }

    /// Returns `true` for `Error` and `Completed`.
    pub fn is_terminal(&self) -> bool {
        !self.is_next()
    }

    pub fn is_next(&self) -> bool {
        matches!(self, Signal::Next(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Signal::Error(_))
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Signal::Completed)
    }

    /// Returns the `Next` payload, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Signal::Next(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the `Error` payload, if any.
    pub fn error(&self) -> Option<&E> {
        match self {
            Signal::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Marble token for this signal: the value itself, `x` or `|`.
    pub fn marble(&self) -> String
    where
        T: fmt::Display,
    {
        match self {
            Signal::Next(value) => value.to_string(),
            Signal::Error(_) => "x".to_string(),
            Signal::Completed => "|".to_string(),
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Next => write!(f, "next"),
            SignalKind::Error => write!(f, "error"),
            SignalKind::Completed => write!(f, "completed"),
        }
    }
}

use crate::{Signal, SignalKind, VirtualTime};

/// A signal stamped with the virtual time it was emitted (or is scripted) at.
///
/// # Example
///
/// ```rust
/// use marbletest::Recorded;
///
/// let script: Vec<Recorded<&str, String>> = vec![
///     Recorded::next(10, "alpha"),
///     Recorded::next(12, "bravo"),
///     Recorded::completed(15),
/// ];
/// assert_eq!(script[1].time(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recorded<T, E> {
    pub(crate) time: VirtualTime,
    pub(crate) signal: Signal<T, E>,
}

impl<T, E> Recorded<T, E> {
    pub fn new(time: VirtualTime, signal: Signal<T, E>) -> Self {
        Self { time, signal }
    }

    /// A `Next(value)` signal at `time`.
    pub fn next(time: VirtualTime, value: T) -> Self {
        Self::new(time, Signal::Next(value))
    }

    /// An `Error(err)` signal at `time`.
    pub fn error(time: VirtualTime, err: E) -> Self {
        Self::new(time, Signal::Error(err))
    }

    /// A `Completed` signal at `time`.
    pub fn completed(time: VirtualTime) -> Self {
        Self::new(time, Signal::Completed)
    }

    /// Returns the virtual timestamp.
    #[inline]
    pub fn time(&self) -> VirtualTime {
        self.time
    }

    /// Returns the recorded signal.
    #[inline]
    pub fn signal(&self) -> &Signal<T, E> {
        &self.signal
    }

    #[inline]
    pub fn kind(&self) -> SignalKind {
        self.signal.kind()
    }

    /// Splits into timestamp and signal.
    pub fn into_parts(self) -> (VirtualTime, Signal<T, E>) {
        (self.time, self.signal)
    }
}

impl<T, E> From<(VirtualTime, Signal<T, E>)> for Recorded<T, E> {
    fn from((time, signal): (VirtualTime, Signal<T, E>)) -> Self {
        Recorded::new(time, signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_time_and_kind() {
        let next: Recorded<i32, ()> = Recorded::next(10, 7);
        let error: Recorded<i32, ()> = Recorded::error(20, ());
        let done: Recorded<i32, ()> = Recorded::completed(30);

        assert_eq!((next.time(), next.kind()), (10, SignalKind::Next));
        assert_eq!((error.time(), error.kind()), (20, SignalKind::Error));
        assert_eq!((done.time(), done.kind()), (30, SignalKind::Completed));
        assert_eq!(next.signal().value(), Some(&7));
    }

    #[test]
    fn from_tuple() {
        let rec: Recorded<&str, ()> = (5, Signal::Next("a")).into();
        assert_eq!(rec, Recorded::next(5, "a"));
        assert_eq!(rec.into_parts(), (5, Signal::Next("a")));
    }
}

use std::{fmt, ops::Index, sync::Arc};

use crate::{Error, Recorded, Result, Signal, VirtualTime};

/// An ordered, frozen log of timestamped signals for one stream over one run.
///
/// Invariants, checked by [`Timeline::new`]:
/// - timestamps never decrease (equal timestamps keep their insertion order)
/// - at most one terminal signal, and if present it is the last element
///
/// Cloning is cheap: the signals live behind an `Arc` and are never mutated
/// once the timeline exists.
pub struct Timeline<T, E> {
    events: Arc<Vec<Recorded<T, E>>>,
}

impl<T, E> Clone for Timeline<T, E> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Timeline<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.events.iter()).finish()
    }
}

impl<T: PartialEq, E: PartialEq> PartialEq for Timeline<T, E> {
    fn eq(&self, other: &Self) -> bool {
        self.events == other.events
    }
}

impl<T: Eq, E: Eq> Eq for Timeline<T, E> {}

impl<T, E> Default for Timeline<T, E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, E> Timeline<T, E> {
    /// Build a timeline from scripted or captured signals, validating ordering
    /// and terminal placement.
    ///
    /// # Errors
    ///
    /// - [`Error::UnorderedTimestamps`] if a signal is earlier than its predecessor
    /// - [`Error::TerminalNotLast`] if anything follows an `Error` or `Completed`
    pub fn new(events: Vec<Recorded<T, E>>) -> Result<Self> {
        for (index, pair) in events.windows(2).enumerate() {
            if pair[0].signal.is_terminal() {
                return Err(Error::TerminalNotLast(index));
            }
            if pair[1].time < pair[0].time {
                return Err(Error::UnorderedTimestamps {
                    index: index + 1,
                    time: pair[1].time,
                });
            }
        }
        Ok(Self::from_validated(events))
    }

    /// A timeline with no signals.
    pub fn empty() -> Self {
        Self::from_validated(Vec::new())
    }

    /// Callers guarantee the invariants (the recorder enforces them on append).
    pub(crate) fn from_validated(events: Vec<Recorded<T, E>>) -> Self {
        Self {
            events: Arc::new(events),
        }
    }

    /// Returns the number of recorded signals.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recorded<T, E>> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[Recorded<T, E>] {
        &self.events
    }

    pub fn get(&self, index: usize) -> Option<&Recorded<T, E>> {
        self.events.get(index)
    }

    // ==================== Next Subsequence ====================

    /// Iterates over the `Next` payloads with their timestamps, in order.
    pub fn nexts(&self) -> impl Iterator<Item = (VirtualTime, &T)> {
        self.events
            .iter()
            .filter_map(|rec| rec.signal.value().map(|value| (rec.time, value)))
    }

    /// Returns the number of `Next` signals.
    pub fn next_count(&self) -> usize {
        self.nexts().count()
    }

    /// Returns the first `Next` payload, if any.
    pub fn first_next(&self) -> Option<&T> {
        self.nexts().next().map(|(_, value)| value)
    }

    /// Returns the last `Next` payload, if any.
    pub fn last_next(&self) -> Option<&T> {
        self.nexts().last().map(|(_, value)| value)
    }

    /// Returns the `Next` payload at ordinal position `index` (0-indexed).
    pub fn nth_next(&self, index: usize) -> Option<&T> {
        self.nexts().nth(index).map(|(_, value)| value)
    }

    // ==================== Terminal Signal ====================

    /// Returns the terminal signal (`Error` or `Completed`), if the stream ended.
    pub fn terminal(&self) -> Option<&Recorded<T, E>> {
        self.events.last().filter(|rec| rec.signal.is_terminal())
    }

    /// Returns the position of the terminal signal, i.e. how many signals
    /// preceded it.
    pub fn terminal_index(&self) -> Option<usize> {
        self.terminal().map(|_| self.events.len() - 1)
    }

    /// Returns the terminal error payload with its timestamp, if the stream failed.
    pub fn error(&self) -> Option<(VirtualTime, &E)> {
        self.terminal()
            .and_then(|rec| rec.signal.error().map(|err| (rec.time, err)))
    }

    /// Returns the completion timestamp, if the stream completed.
    pub fn completed_at(&self) -> Option<VirtualTime> {
        self.terminal()
            .filter(|rec| matches!(rec.signal, Signal::Completed))
            .map(|rec| rec.time)
    }

    // ==================== Diagnostics ====================

    /// Renders the timeline as a marble diagram: values, `x` for an error and
    /// `|` for completion, joined with `-`.
    ///
    /// ```rust
    /// use marbletest::{Recorded, Timeline};
    ///
    /// let timeline: Timeline<&str, ()> = Timeline::new(vec![
    ///     Recorded::next(10, "alpha"),
    ///     Recorded::next(12, "bravo"),
    ///     Recorded::completed(15),
    /// ])
    /// .unwrap();
    /// assert_eq!(timeline.marble(), "alpha-bravo-|");
    /// ```
    pub fn marble(&self) -> String
    where
        T: fmt::Display,
    {
        marble(&self.events)
    }

    /// Print all recorded signals to stdout for debugging.
    pub fn dump(&self)
    where
        T: fmt::Debug,
        E: fmt::Debug,
    {
        if self.events.is_empty() {
            println!("(no signals recorded)");
            return;
        }
        println!("Recorded timeline ({} signals):", self.events.len());
        for (i, rec) in self.events.iter().enumerate() {
            println!("  {}: t={:<6} {:?}", i, rec.time, rec.signal);
        }
    }
}

/// Renders any run of signals as a marble diagram, without validating it.
pub fn marble<T: fmt::Display, E>(events: &[Recorded<T, E>]) -> String {
    events
        .iter()
        .map(|rec| rec.signal.marble())
        .collect::<Vec<_>>()
        .join("-")
}

impl<T, E> Index<usize> for Timeline<T, E> {
    type Output = Recorded<T, E>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.events[index]
    }
}

impl<'a, T, E> IntoIterator for &'a Timeline<T, E> {
    type Item = &'a Recorded<T, E>;
    type IntoIter = std::slice::Iter<'a, Recorded<T, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Display, E> fmt::Display for Timeline<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.marble())
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize, E: serde::Serialize> serde::Serialize for Timeline<T, E> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.events.as_slice().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, E> serde::Deserialize<'de> for Timeline<T, E>
where
    T: serde::Deserialize<'de>,
    E: serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let events = Vec::<Recorded<T, E>>::deserialize(deserializer)?;
        Timeline::new(events).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl<T: serde::Serialize, E: serde::Serialize> Timeline<T, E> {
    /// Serializes the timeline as a JSON array of `{ time, signal }` objects.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Timeline<&'static str, String> {
        Timeline::new(vec![
            Recorded::next(10, "alpha"),
            Recorded::next(12, "bravo"),
            Recorded::next(12, "charlie"),
            Recorded::error(20, "boom".to_string()),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_signal_after_terminal() {
        let result: Result<Timeline<&str, ()>> =
            Timeline::new(vec![Recorded::completed(10), Recorded::next(11, "late")]);
        assert_eq!(result.unwrap_err(), Error::TerminalNotLast(0));
    }

    #[test]
    fn rejects_decreasing_timestamps() {
        let result: Result<Timeline<&str, ()>> =
            Timeline::new(vec![Recorded::next(10, "a"), Recorded::next(5, "b")]);
        assert_eq!(
            result.unwrap_err(),
            Error::UnorderedTimestamps { index: 1, time: 5 }
        );
    }

    #[test]
    fn equal_timestamps_keep_insertion_order() {
        let timeline = sample();
        let values: Vec<_> = timeline.nexts().map(|(_, v)| *v).collect();
        assert_eq!(values, ["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn next_queries() {
        let timeline = sample();
        assert_eq!(timeline.next_count(), 3);
        assert_eq!(timeline.first_next(), Some(&"alpha"));
        assert_eq!(timeline.last_next(), Some(&"charlie"));
        assert_eq!(timeline.nth_next(1), Some(&"bravo"));
        assert_eq!(timeline.nth_next(3), None);
    }

    #[test]
    fn terminal_queries() {
        let timeline = sample();
        assert_eq!(timeline.terminal_index(), Some(3));
        assert_eq!(timeline.error(), Some((20, &"boom".to_string())));
        assert_eq!(timeline.completed_at(), None);
    }

    #[test]
    fn open_timeline_has_no_terminal() {
        let timeline: Timeline<i32, ()> = Timeline::new(vec![Recorded::next(1, 1)]).unwrap();
        assert!(timeline.terminal().is_none());
        assert!(timeline.terminal_index().is_none());
    }

    #[test]
    fn marble_and_display() {
        let timeline = sample();
        assert_eq!(timeline.marble(), "alpha-bravo-charlie-x");
        assert_eq!(timeline.to_string(), "<alpha-bravo-charlie-x>");
        assert_eq!(Timeline::<i32, ()>::empty().to_string(), "<>");
    }

    #[test]
    fn clones_share_storage() {
        let timeline = sample();
        let copy = timeline.clone();
        assert!(Arc::ptr_eq(&timeline.events, &copy.events));
        assert_eq!(timeline, copy);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip_keeps_signals() {
        let timeline = sample();
        let json = timeline.to_json().unwrap();
        assert!(json.contains("alpha"));
        let back: Timeline<String, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 4);
        assert_eq!(back.last_next().map(String::as_str), Some("charlie"));
    }
}

use std::time::Duration;

use futures_util::{Stream, StreamExt, pin_mut};
use tokio::time::Instant;

use crate::{Recorded, Timeline, VirtualTime};

/// Drive a fallible stream to its end and capture it as a [`Timeline`].
///
/// Each item is stamped with the tokio time elapsed since the call, in units
/// of `resolution`. `Ok` items become `Next`. The first `Err` becomes the
/// terminal `Error` and the stream is dropped without further polling. A
/// stream that simply ends is recorded as `Completed`.
///
/// Run it under a paused tokio clock (`#[tokio::test(start_paused = true)]`)
/// to get deterministic timestamps.
///
/// ```rust
/// use std::time::Duration;
/// use futures_util::stream;
/// use marbletest::{assert_that, record_stream};
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let items = stream::iter(vec![Ok::<_, ()>("alpha"), Ok("bravo")]);
/// let timeline = record_stream(items, Duration::from_millis(1)).await;
///
/// assert_that(&timeline).next_times(2).assert();
/// assert_that(&timeline).complete_at(0).assert();
/// # }
/// ```
pub async fn record_stream<S, T, E>(stream: S, resolution: Duration) -> Timeline<T, E>
where
    S: Stream<Item = Result<T, E>>,
{
    let started = Instant::now();
    let unit = resolution.as_nanos().max(1);
    let now = || -> VirtualTime {
        let ticks = started.elapsed().as_nanos() / unit;
        VirtualTime::try_from(ticks).unwrap_or(VirtualTime::MAX)
    };

    pin_mut!(stream);
    let mut events = Vec::new();
    while let Some(item) = stream.next().await {
        match item {
            Ok(value) => events.push(Recorded::next(now(), value)),
            Err(err) => {
                let at = now();
                tracing::debug!(at, signals = events.len(), "stream failed");
                events.push(Recorded::error(at, err));
                return Timeline::from_validated(events);
            }
        }
    }

    let at = now();
    tracing::debug!(at, signals = events.len(), "stream completed");
    events.push(Recorded::completed(at));
    Timeline::from_validated(events)
}

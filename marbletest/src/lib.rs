#![cfg_attr(docsrs, feature(doc_cfg))]
//! # marbletest
//!
//! Marble-diagram assertions for reactive streams on a virtual clock.
//!
//! Script the inputs of the code under test as timestamped signals, bind them
//! to subjects, record the outputs, run the virtual clock to completion and
//! assert on the captured timelines. Failures read as marble diagrams:
//!
//! ```text
//! expected to complete, got <alpha-bravo>
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use marbletest::*;
//!
//! let scheduler = TestScheduler::default();
//! let input: PublishSubject<&str, ()> = PublishSubject::new();
//!
//! scheduler.bind(
//!     vec![
//!         Recorded::next(10, "alpha"),
//!         Recorded::next(12, "bravo"),
//!         Recorded::completed(15),
//!     ],
//!     &input,
//! );
//! let output = scheduler.record(&input);
//! scheduler.start()?;
//!
//! assert_that(&output).first_next_eq("alpha").assert();
//! assert_that(&output).last_next_eq("bravo").assert();
//! assert_that(&output).next_times(2).assert();
//! assert_that(&output).complete_at(15).assert();
//! not(assert_that(&output).error()).assert();
//! # Ok::<(), marbletest::Error>(())
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Signal`] | `Next`, `Error` or `Completed` |
//! | [`Recorded`] | A signal stamped with its [`VirtualTime`] |
//! | [`Timeline`] | Ordered, validated log of recorded signals |
//! | [`TestScheduler`] | Virtual clock: binds scripts, records outputs, runs actions |
//! | [`Recorder`] | Observer capturing a stream into a timeline |
//! | [`PublishSubject`], [`BehaviorSubject`] | Multicast streams to drive code under test |
//! | [`PublishRelay`], [`BehaviorRelay`] | Subjects that never terminate |
//! | [`Assertion`] | Named conditions over one captured timeline |
//! | [`Verdict`], [`Outcome`] | Evaluated assertion and its reportable result |
//!
//! ## Negation
//!
//! Every assertion can be inverted with [`not`]; the diagnostic is rephrased
//! (`expected to not complete, ...`) and `not(not(v))` is `v` again.
//!
//! ## Async Streams
//!
//! [`record_stream`] captures a `futures` stream of `Result`s under the tokio
//! clock, so the same assertions apply to async code.
//!
//! ## Features
//!
//! - **`serde`** - Serialization of signals, timelines and config, plus
//!   `Timeline::to_json()`
//!
//! ## Examples
//!
//! See the [`examples/`](https://github.com/marbletest-rs/marbletest/tree/main/marbletest/examples) directory:
//!
//! - `view_model.rs` - A search-box view model driven by subjects and relays

mod assertion;
mod config;
mod error;
mod label;
mod observer;
mod recorded;
mod recorder;
mod relay;
mod scheduler;
mod signal;
mod stream;
mod subject;
mod timeline;

pub mod monitoring;
pub mod monitors;

pub use assertion::{AsTimeline, Assertion, Outcome, Verdict, assert_that, not};
pub use config::SchedulerConfig;
pub use error::Error;
pub use label::Label;
pub use observer::{FnObserver, Observable, Observer, Subscription};
pub use recorded::Recorded;
pub use recorder::Recorder;
pub use relay::{BehaviorRelay, PublishRelay};
pub use scheduler::TestScheduler;
pub use signal::{Signal, SignalKind};
pub use stream::record_stream;
pub use subject::{BehaviorSubject, PublishSubject};
pub use timeline::{Timeline, marble};

/// A point on the virtual clock, in abstract ticks.
pub type VirtualTime = u64;

/// Convenience alias for `Result<T, marbletest::Error>`.
pub type Result<T = ()> = std::result::Result<T, Error>;

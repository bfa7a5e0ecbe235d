//! A search-box view model tested on a virtual clock.
//!
//! The view model turns typed queries into a status line. The test script
//! types two queries, clears the box and then fails the query stream; the
//! recorded status timeline is asserted with marble diagrams.
//!
//! Run with `RUST_LOG=trace cargo run --example view_model` to see the
//! scheduler lifecycle logged by the `Tracer` monitor.

use std::{borrow::Cow, fmt};

use marbletest::{monitors::Tracer, *};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq)]
enum SearchError {
    Offline,
}

impl Label for SearchError {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(match self {
            SearchError::Offline => "Offline",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Status {
    Idle,
    Searching(String),
    Failed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "idle"),
            Status::Searching(query) => write!(f, "searching:{query}"),
            Status::Failed => write!(f, "failed"),
        }
    }
}

struct SearchViewModel {
    query: PublishSubject<&'static str, SearchError>,
    status: BehaviorRelay<Status>,
}

impl SearchViewModel {
    fn new() -> Self {
        let query = PublishSubject::new();
        let status = BehaviorRelay::new(Status::Idle);

        let sink = status.clone();
        query.subscribe(FnObserver::new(
            move |signal: Signal<&'static str, SearchError>| match signal {
                Signal::Next("") => sink.accept(Status::Idle),
                Signal::Next(query) => sink.accept(Status::Searching(query.to_string())),
                Signal::Error(_) => sink.accept(Status::Failed),
                Signal::Completed => {}
            },
        ));

        Self { query, status }
    }
}

fn report(name: &str, verdict: Verdict) {
    match verdict.outcome() {
        Outcome::Success(message) => println!("ok   {name}: {message}"),
        Outcome::Failure { expected, actual } => {
            println!("FAIL {name}: expected to {expected}, got {actual}")
        }
    }
}

fn main() -> Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let view_model = SearchViewModel::new();
    let scheduler = TestScheduler::default();
    scheduler.monitors().add(Tracer);

    let queries = vec![
        Recorded::next(10, "rust"),
        Recorded::next(20, "marbles"),
        Recorded::next(30, ""),
        Recorded::error(40, SearchError::Offline),
    ];
    scheduler.bind(queries.clone(), &view_model.query);

    let query_log = scheduler.record(&view_model.query);
    let status_log = scheduler.record(&view_model.status);
    scheduler.start()?;

    println!("queries: {}", query_log.events());
    println!("status:  {}", status_log.events());

    report("query fails offline", assert_that(&query_log).error_kind("Offline"));
    report("query fails at 40", assert_that(&query_log).error_at(40));
    report(
        "query matches script",
        assert_that(&query_log).match_timeline(&queries),
    );
    report("status starts idle", assert_that(&status_log).first_next_eq(Status::Idle));
    report(
        "status searches rust",
        assert_that(&status_log).nth_next_eq(1, Status::Searching("rust".into())),
    );
    report("status ends failed", assert_that(&status_log).last_next_eq(Status::Failed));
    report("status never errors", not(assert_that(&status_log).error()));
    report("status never completes", not(assert_that(&status_log).complete()));

    // Deliberately wrong: the status emitted five values.
    report("status changes twice", assert_that(&status_log).next_times(2));

    Ok(())
}

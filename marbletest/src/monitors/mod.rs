//! Ready-to-use monitor implementations.
//!
//! # Available Monitors
//!
//! - [`Tracer`] - Logs the run lifecycle via `tracing` crate
//!
//! # Example
//!
//! ```rust
//! use marbletest::{TestScheduler, monitors::Tracer};
//!
//! let scheduler = TestScheduler::default();
//! scheduler.monitors().add(Tracer);
//! ```

mod tracer;
pub use tracer::Tracer;

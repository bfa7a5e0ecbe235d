//! Monitoring API for observing a virtual-time run.
//!
//! # Overview
//!
//! The monitoring system provides hooks into the scheduler lifecycle:
//! - Actions scheduled and executed
//! - Virtual clock advancing
//! - Signals captured by recorders
//! - Run completion
//!
//! # Example
//!
//! ```rust
//! use marbletest::{TestScheduler, VirtualTime, monitoring::Monitor};
//!
//! struct ClockLogger;
//!
//! impl Monitor for ClockLogger {
//!     fn on_clock_advanced(&self, from: VirtualTime, to: VirtualTime) {
//!         println!("[clock] {from} -> {to}");
//!     }
//! }
//!
//! let scheduler = TestScheduler::default();
//! let handle = scheduler.monitors().add(ClockLogger);
//! handle.pause();
//! ```

mod monitor;
mod monitor_handle;
mod registry;

/// Unique identifier for a registered monitor.
pub type MonitorId = u16;

pub use monitor::Monitor;
pub use monitor_handle::MonitorHandle;
pub use registry::MonitorRegistry;

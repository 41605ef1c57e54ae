//! Logging facilities for Horizon Choice.
//!
//! Horizon Choice uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("horizon_choice=debug"))
//!     .init();
//! ```
//!
//! Selection mutations log at `debug`, guarded no-ops at `trace`.

/// Span names used throughout Horizon Choice for tracing.
pub mod span_names {
    /// Selection mutation span.
    pub const SELECTION: &str = "horizon_choice::selection";
    /// Modal close span.
    pub const CLOSE_MODAL: &str = "horizon_choice::close_modal";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_choice_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_choice_core::signal";
    /// Selection controller target.
    pub const SELECTION: &str = "horizon_choice::selection";
    /// Filter controller target.
    pub const FILTER: &str = "horizon_choice::filter";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_choice::config";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to measure how long a mutation, including its notification fan-out,
/// takes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "horizon_choice::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

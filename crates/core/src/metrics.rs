//! Prometheus metrics for core components.

use once_cell::sync::Lazy;
use prometheus::{IntCounterVec, Opts};

/// Commands processed, by result.
pub static COMMANDS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("showrunner_commands_total", "Total commands processed"),
        &["result"], // "ok", "translate_error", "dispatch_error"
    )
    .unwrap()
});

/// Catalog refresh cycles, by result.
pub static CATALOG_REFRESHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "showrunner_catalog_refreshes_total",
            "Total catalog refresh cycles",
        ),
        &["result"], // "ok", "failed"
    )
    .unwrap()
});

/// Readiness runs, by terminal state.
pub static READINESS_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "showrunner_readiness_outcomes_total",
            "Hardware readiness terminal states",
        ),
        &["outcome"], // "ready", "timed_out"
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(COMMANDS_TOTAL.clone()),
        Box::new(CATALOG_REFRESHES.clone()),
        Box::new(READINESS_OUTCOMES.clone()),
    ]
}

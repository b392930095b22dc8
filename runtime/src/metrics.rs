//! Metric names recorded by the store.
//!
//! Recording goes through the `metrics` facade; without an installed
//! recorder the calls are no-ops. Call [`describe_metrics`] once after
//! installing a recorder to attach units and help text.

use metrics::{describe_counter, describe_histogram, Unit};

/// Counter: actions applied by any store (dispatched and follow-up)
pub const ACTIONS_TOTAL: &str = "store.actions.total";

/// Counter: actions produced by `Effect::Future` and fed back
pub const FOLLOW_UP_ACTIONS_TOTAL: &str = "store.actions.follow_up_total";

/// Histogram: time spent inside the reducer per action
pub const REDUCER_DURATION_SECONDS: &str = "store.reducer.duration_seconds";

/// Register descriptions for all store metrics
pub fn describe_metrics() {
    describe_counter!(ACTIONS_TOTAL, Unit::Count, "Actions applied by the store");
    describe_counter!(
        FOLLOW_UP_ACTIONS_TOTAL,
        Unit::Count,
        "Actions produced by effects and dispatched back into the store"
    );
    describe_histogram!(
        REDUCER_DURATION_SECONDS,
        Unit::Seconds,
        "Reducer execution time per action"
    );
}

//! Structured query tracing for matcher entry points.
//!
//! Events use target `pyty::query_json` and are intended to be consumed with:
//! `PYTY_LOG=pyty::query_json=trace PYTY_LOG_FORMAT=json`.
//!
//! Environment:
//! - `PYTY_QUERY_RUN_ID`: optional run identifier attached to every event.

use crate::TypeId;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Level, trace};

static NEXT_QUERY_ID: AtomicU64 = AtomicU64::new(1);
static QUERY_RUN_ID: OnceLock<String> = OnceLock::new();

#[inline]
pub(crate) fn enabled() -> bool {
    tracing::enabled!(target: "pyty::query_json", Level::TRACE)
}

#[inline]
pub(crate) fn next_query_id() -> u64 {
    NEXT_QUERY_ID.fetch_add(1, Ordering::Relaxed)
}

#[inline]
fn run_id() -> &'static str {
    QUERY_RUN_ID
        .get_or_init(|| {
            std::env::var("PYTY_QUERY_RUN_ID").unwrap_or_else(|_| "default".to_string())
        })
        .as_str()
}

/// Raw id of a type slot for logging; unknown is logged as -1.
#[inline]
fn slot_id(ty: Option<TypeId>) -> i64 {
    ty.map_or(-1, |id| i64::from(id.0))
}

#[inline]
pub(crate) fn relation_start(
    query_id: u64,
    op: &'static str,
    expected: Option<TypeId>,
    actual: Option<TypeId>,
) {
    trace!(
        target: "pyty::query_json",
        event = "query",
        phase = "start",
        run_id = run_id(),
        query_id,
        op,
        expected_type_id = slot_id(expected),
        actual_type_id = slot_id(actual)
    );
}

#[inline]
pub(crate) fn relation_end(query_id: u64, op: &'static str, result: bool) {
    trace!(
        target: "pyty::query_json",
        event = "query",
        phase = "end",
        run_id = run_id(),
        query_id,
        op,
        result
    );
}

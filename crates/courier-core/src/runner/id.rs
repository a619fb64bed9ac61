use std::sync::atomic::{AtomicU64, Ordering};

/// Global monotonically increasing sequence for run identifiers.
///
/// Local to the current process.
static RUN_SEQ: AtomicU64 = AtomicU64::new(1);

fn next_seq() -> u64 {
    RUN_SEQ.fetch_add(1, Ordering::Relaxed)
}

/// Build a human-readable run id used as task name for taskvisor.
///
/// Format: `{runner}-{variant}-{seq:x}`.
/// - `runner`: Runner::name()
/// - `variant`: TaskVariant::name()
/// - `seq`: per-process hex sequence
pub fn make_run_id(runner_name: &str, variant: &str) -> String {
    format!("{runner_name}-{variant}-{seq:x}", seq = next_seq())
}

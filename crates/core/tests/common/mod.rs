use std::sync::Once;

use chrono::{Duration, TimeZone, Utc};
use record_import_core::types::Timestamp;
use record_import_core::verification::record::{CandidateRecord, RecordKind};

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// Honours `RUST_LOG`; defaults to debug output for this crate.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "record_import_core=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Fixed evaluation instant shared by all scenarios.
pub fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn days(n: i64) -> Duration {
    Duration::days(n)
}

/// A windowed insert whose window and effective date are all in the future.
pub fn valid_windowed() -> CandidateRecord {
    CandidateRecord::new(RecordKind::Windowed)
        .with_effective_date(now() + days(1))
        .with_available_date(now() + days(1))
        .with_window(now() + days(2), now() + days(9))
}

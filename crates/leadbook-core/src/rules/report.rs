use chrono::Duration;

pub const CLOSED_WINDOW_DAYS: i64 = 7;

/// Inclusive `[start, end]` bounds of the trailing closed-lead window ending
/// at `now_utc`.
pub fn closed_window(now_utc: i64) -> (i64, i64) {
    let span = Duration::days(CLOSED_WINDOW_DAYS).num_seconds();
    (now_utc - span, now_utc)
}

// src/domain/playback.rs
//
// Playhead arithmetic shared by the playback session and its views.

/// Step used by the skip-forward / skip-back controls.
pub const SEEK_STEP_MS: i64 = 10_000;

/// Apply `delta_ms` to `position_ms`, clamped to `[0, duration_ms]`.
pub fn clamp_seek(position_ms: u64, delta_ms: i64, duration_ms: u64) -> u64 {
    let target = i128::from(position_ms) + i128::from(delta_ms);
    let clamped = target.clamp(0, i128::from(duration_ms));
    // within [0, duration_ms] so it fits in u64
    u64::try_from(clamped).unwrap_or(duration_ms)
}

/// Render milliseconds as `m:ss` (minutes are not wrapped into hours).
pub fn format_time(millis: u64) -> String {
    let total_seconds = millis / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Fraction of the runtime played, for the progress bar.
pub fn progress_ratio(position_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 0.0;
    }
    (position_ms as f64 / duration_ms as f64).clamp(0.0, 1.0)
}

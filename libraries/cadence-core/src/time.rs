//! Playback time formatting

use std::time::Duration;

/// Format a playback time as `m:ss`
///
/// Minutes are not wrapped into hours and sub-second parts are truncated,
/// so 65.9 seconds renders as `1:05` and an hour as `60:00`.
pub fn format_time(time: Duration) -> String {
    let total_seconds = time.as_secs();
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

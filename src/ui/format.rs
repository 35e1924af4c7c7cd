use std::time::Duration;

/// Format a playback time as `m:ss`.
///
/// Whole seconds come from integer division of the milliseconds, so partial
/// seconds are dropped, and minutes are not capped at 59.
pub fn format_clock(time: Duration) -> String {
    let secs = time.as_millis() / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

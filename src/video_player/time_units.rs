// SPDX-License-Identifier: MPL-2.0
//! Time formatting for the transport bar.

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;

/// Formats a play time as `m:ss`, or `h:mm:ss` from one hour on.
///
/// Negative and non-finite inputs format as `0:00`.
///
/// # Examples
///
/// ```
/// use streamlens::video_player::time_units::format_timestamp;
///
/// assert_eq!(format_timestamp(75.4), "1:15");
/// assert_eq!(format_timestamp(3_725.0), "1:02:05");
/// ```
#[must_use]
pub fn format_timestamp(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    let hours = total / SECS_PER_HOUR;
    let minutes = (total % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = total % SECS_PER_MINUTE;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

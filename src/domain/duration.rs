/// Format a second count as a compact duration string.
///
/// The most significant non-zero unit leads and subordinate units are
/// zero-padded to two digits: `3661` becomes `"1h01m01s"`, `65` becomes
/// `"1m05s"`, `5` becomes `"5s"`. Zero seconds formats as the empty string
/// so idle tasks render without a duration at all.
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h{:02}m{:02}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{:02}s", minutes, seconds)
    } else if seconds > 0 {
        format!("{}s", seconds)
    } else {
        String::new()
    }
}

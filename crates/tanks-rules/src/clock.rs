//! Round clock display.

use tanks_core::state::TimerView;

/// Format seconds as `mm:ss`, flooring partial seconds. Negative input shows `00:00`.
pub fn format_clock(secs: f64) -> String {
    let total = secs.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Timer as the presentation layer shows it.
pub fn timer_view(remaining_secs: f64, critical_secs: f64) -> TimerView {
    let remaining_secs = remaining_secs.max(0.0);
    TimerView {
        text: format_clock(remaining_secs),
        remaining_secs,
        critical: remaining_secs <= critical_secs,
    }
}

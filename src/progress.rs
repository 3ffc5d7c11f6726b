//! Rate-limited progress reporting for long batch operations.

use std::time::{Duration, Instant};

/// Minimum time between two progress lines.
pub const REPORT_INTERVAL: Duration = Duration::from_secs(10);

const SECONDS_IN_MINUTE: u64 = 60;
const SECONDS_IN_HOUR: u64 = 60 * SECONDS_IN_MINUTE;
const SECONDS_IN_DAY: u64 = 24 * SECONDS_IN_HOUR;

/// Formats a duration as `1d 2h 3m 4s`, omitting leading zero units.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (d, remainder) = (total / SECONDS_IN_DAY, total % SECONDS_IN_DAY);
    let (h, remainder) = (remainder / SECONDS_IN_HOUR, remainder % SECONDS_IN_HOUR);
    let (m, s) = (remainder / SECONDS_IN_MINUTE, remainder % SECONDS_IN_MINUTE);

    if d > 0 {
        format!("{}d {}h {}m {}s", d, h, m, s)
    } else if h > 0 {
        format!("{}h {}m {}s", h, m, s)
    } else if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    }
}

/// Produces a status line at most once per [`REPORT_INTERVAL`].
///
/// Remaining and total time are extrapolated linearly from the items completed
/// so far.
pub struct ProgressTimer {
    total: usize,
    completed: usize,
    start: Instant,
    last_report: Instant,
    interval: Duration,
}

impl ProgressTimer {
    pub fn new(total: usize) -> Self {
        Self::starting_at(total, Instant::now())
    }

    pub fn starting_at(total: usize, start: Instant) -> Self {
        Self {
            total,
            completed: 0,
            start,
            last_report: start,
            interval: REPORT_INTERVAL,
        }
    }

    /// Records the number of completed items; returns a status line when one is due.
    pub fn progress(&mut self, completed: usize) -> Option<String> {
        self.progress_at(completed, Instant::now())
    }

    pub fn progress_at(&mut self, completed: usize, now: Instant) -> Option<String> {
        self.completed = completed;
        if now.saturating_duration_since(self.last_report) < self.interval {
            return None;
        }
        self.last_report = now;

        let elapsed = now.saturating_duration_since(self.start);
        if self.completed == 0 {
            return Some(format!(
                "{}/{} ({})",
                self.completed,
                self.total,
                format_duration(elapsed)
            ));
        }

        let per_item = elapsed.as_secs_f64() / self.completed as f64;
        let total_time = Duration::from_secs_f64(per_item * self.total as f64);
        let remaining = total_time.saturating_sub(elapsed);

        Some(format!(
            "{}/{} ({} / {} / {})",
            self.completed,
            self.total,
            format_duration(elapsed),
            format_duration(remaining),
            format_duration(total_time)
        ))
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

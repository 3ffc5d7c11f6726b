use std::time::{Duration, Instant};

use tunesync::progress::*;

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_secs(0)), "0s");
    assert_eq!(format_duration(Duration::from_secs(59)), "59s");
    assert_eq!(format_duration(Duration::from_secs(61)), "1m 1s");
    assert_eq!(format_duration(Duration::from_secs(3723)), "1h 2m 3s");
    assert_eq!(format_duration(Duration::from_secs(90061)), "1d 1h 1m 1s");
    assert_eq!(format_duration(Duration::from_secs(86400)), "1d 0h 0m 0s");
}

#[test]
fn test_no_report_before_interval() {
    let start = Instant::now();
    let mut timer = ProgressTimer::starting_at(10, start);

    assert_eq!(timer.progress_at(1, start + Duration::from_secs(1)), None);
    assert_eq!(timer.progress_at(2, start + Duration::from_secs(9)), None);
    assert_eq!(timer.completed(), 2);
}

#[test]
fn test_report_after_interval() {
    let start = Instant::now();
    let mut timer = ProgressTimer::starting_at(10, start);

    let line = timer.progress_at(2, start + Duration::from_secs(20));
    assert_eq!(line.as_deref(), Some("2/10 (20s / 1m 20s / 1m 40s)"));
}

#[test]
fn test_reports_are_rate_limited() {
    let start = Instant::now();
    let mut timer = ProgressTimer::starting_at(100, start);

    assert!(timer.progress_at(1, start + REPORT_INTERVAL).is_some());
    assert!(timer.progress_at(2, start + REPORT_INTERVAL + Duration::from_secs(5)).is_none());
    assert!(timer.progress_at(3, start + REPORT_INTERVAL * 2).is_some());
}

#[test]
fn test_zero_completed_has_no_estimate() {
    let start = Instant::now();
    let mut timer = ProgressTimer::starting_at(5, start);

    let line = timer.progress_at(0, start + Duration::from_secs(15));
    assert_eq!(line.as_deref(), Some("0/5 (15s)"));
}

#[test]
fn test_finished_has_nothing_remaining() {
    let start = Instant::now();
    let mut timer = ProgressTimer::starting_at(4, start);

    let line = timer.progress_at(4, start + Duration::from_secs(40));
    assert_eq!(line.as_deref(), Some("4/4 (40s / 0s / 40s)"));
    assert_eq!(timer.total(), 4);
}

//! Builder — dual-rule record selection around one failure.

use std::sync::Arc;
use chrono::TimeDelta;

use crate::parser::LogRecord;
use super::gap::{compress, merge, Selected};
use super::{ContextWindow, WindowConfig};

/// Builds context windows against a complete, already assembled sequence.
///
/// The two sides are deliberately asymmetric:
///
/// | side   | immediate band          | severe extension scan        |
/// |--------|-------------------------|------------------------------|
/// | before | same thread only        | whole prefix, no early exit  |
/// | after  | every thread            | stops past the time window   |
pub struct ContextWindowBuilder<'a> {
    records: &'a [Arc<LogRecord>],
    line_window: usize,
    time_window: TimeDelta,
}

impl<'a> ContextWindowBuilder<'a> {
    pub fn new(records: &'a [Arc<LogRecord>], config: &WindowConfig) -> Self {
        Self {
            records,
            line_window: config.line_window,
            time_window: config.time_window(),
        }
    }

    /// Window for the record at `error_index`, or `None` if out of range.
    pub fn build(&self, id: usize, error_index: usize) -> Option<ContextWindow> {
        let target = self.records.get(error_index)?;

        let before = compress(&self.select_before(error_index, target), self.records);
        let after = compress(&self.select_after(error_index, target), self.records);

        tracing::trace!(
            id,
            index = error_index,
            before = before.len(),
            after = after.len(),
            "built context window"
        );

        Some(ContextWindow {
            id,
            target: Arc::clone(target),
            before,
            after,
        })
    }

    fn select_before(&self, error_index: usize, target: &LogRecord) -> Vec<Selected> {
        let band_start = error_index.saturating_sub(self.line_window);

        let immediate: Vec<Selected> = (band_start..error_index)
            .filter(|&i| self.records[i].thread_id == target.thread_id)
            .map(Selected::immediate)
            .collect();

        // Whole prefix: an old record may still be close in time.
        let severe: Vec<Selected> = self.records[..band_start]
            .iter()
            .enumerate()
            .filter(|(_, r)| {
                r.thread_id == target.thread_id
                    && r.level.is_severe()
                    && time_between(r, target).is_some_and(|d| d <= self.time_window)
            })
            .map(|(i, _)| Selected::severe(i))
            .collect();

        merge(immediate, severe)
    }

    fn select_after(&self, error_index: usize, target: &LogRecord) -> Vec<Selected> {
        let band_end = error_index
            .saturating_add(self.line_window)
            .saturating_add(1)
            .min(self.records.len());

        let immediate: Vec<Selected> = (error_index + 1..band_end)
            .map(Selected::immediate)
            .collect();

        let mut severe = Vec::new();
        for (i, r) in self.records.iter().enumerate().skip(band_end) {
            // no instant on either side: neither inside nor past the window
            let Some(distance) = time_between(target, r) else {
                continue;
            };
            if distance > self.time_window {
                break;
            }
            if r.thread_id == target.thread_id && r.level.is_severe() {
                severe.push(Selected::severe(i));
            }
        }

        merge(immediate, severe)
    }
}

/// Signed distance `to - from`, or `None` when either record has no timestamp.
fn time_between(from: &LogRecord, to: &LogRecord) -> Option<TimeDelta> {
    Some(to.timestamp?.signed_duration_since(from.timestamp?))
}

/// One window per ERROR/FATAL record, in document order, ids `0..n`.
pub fn build_windows(records: &[Arc<LogRecord>], config: &WindowConfig) -> Vec<ContextWindow> {
    let builder = ContextWindowBuilder::new(records, config);

    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.level.is_failure())
        .map(|(index, _)| index)
        .enumerate()
        .filter_map(|(id, index)| builder.build(id, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use crate::parser::LogLevel;
    use crate::window::{InclusionReason, WindowItem};

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    /// (thread, level, seconds after base)
    fn sequence(layout: &[(&str, LogLevel, i64)]) -> Vec<Arc<LogRecord>> {
        layout.iter()
            .enumerate()
            .map(|(i, (thread, level, secs))| {
                Arc::new(LogRecord {
                    timestamp: Some(base() + TimeDelta::seconds(*secs)),
                    thread_id: thread.to_string(),
                    level: level.clone(),
                    logger: "App".into(),
                    line_number: None,
                    context: String::new(),
                    message: format!("m{}", i),
                    raw: String::new(),
                    sequence_index: i,
                })
            })
            .collect()
    }

    fn shape(items: &[WindowItem]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                WindowItem::Record { record, .. } => record.sequence_index.to_string(),
                WindowItem::Gap { count } => format!("gap{}", count),
            })
            .collect()
    }

    fn window_at(records: &[Arc<LogRecord>], index: usize) -> ContextWindow {
        ContextWindowBuilder::new(records, &WindowConfig::default())
            .build(0, index)
            .unwrap()
    }

    // ── Before side ──────────────────────────────────────────────

    #[test]
    fn test_before_same_thread_contiguous() {
        let mut layout: Vec<(&str, LogLevel, i64)> = (0..5).map(|i| ("1", LogLevel::Info, i)).collect();
        layout.push(("1", LogLevel::Error, 5));
        let records = sequence(&layout);

        let window = window_at(&records, 5);
        assert_eq!(shape(&window.before), vec!["0", "1", "2", "3", "4"]);
        assert!(window.after.is_empty());
    }

    #[test]
    fn test_before_other_threads_become_gap() {
        let records = sequence(&[
            ("1", LogLevel::Info, 0),
            ("2", LogLevel::Info, 1),
            ("2", LogLevel::Info, 2),
            ("2", LogLevel::Info, 3),
            ("1", LogLevel::Info, 4),
            ("1", LogLevel::Error, 5),
        ]);

        let window = window_at(&records, 5);
        assert_eq!(shape(&window.before), vec!["0", "gap3", "4"]);
        assert_eq!(window.skipped_before(), 3);
    }

    #[test]
    fn test_before_band_limited_to_line_window() {
        let mut layout: Vec<(&str, LogLevel, i64)> = (0..30).map(|i| ("1", LogLevel::Info, i)).collect();
        layout.push(("1", LogLevel::Error, 30));
        let records = sequence(&layout);

        let window = window_at(&records, 30);
        assert_eq!(window.shown_before(), 20);
        assert_eq!(window.before.first().and_then(|i| i.record()).map(|r| r.sequence_index), Some(10));
    }

    #[test]
    fn test_before_severe_extension_reaches_past_band() {
        let mut layout: Vec<(&str, LogLevel, i64)> = vec![("1", LogLevel::Warn, 0)];
        layout.extend((1..30).map(|i| ("2", LogLevel::Info, i)));
        layout.push(("1", LogLevel::Error, 60));
        let records = sequence(&layout);

        let window = window_at(&records, 30);
        assert_eq!(shape(&window.before), vec!["0"]);
        assert!(matches!(
            window.before[0],
            WindowItem::Record { reason: InclusionReason::Severe, .. }
        ));
    }

    #[test]
    fn test_before_severe_extension_skips_old_and_foreign() {
        let mut layout: Vec<(&str, LogLevel, i64)> = vec![
            ("1", LogLevel::Error, 0),  // too old: 200s before
            ("2", LogLevel::Warn, 150), // other thread
            ("1", LogLevel::Info, 150), // not severe
        ];
        layout.extend((3..30).map(|i| ("3", LogLevel::Info, 150 + i)));
        layout.push(("1", LogLevel::Fatal, 200));
        let records = sequence(&layout);

        let window = window_at(&records, 30);
        assert!(window.before.is_empty());
    }

    #[test]
    fn test_before_scan_has_no_early_exit() {
        // index 1 is out of time range, index 2 is back inside; both outside the band
        let mut layout: Vec<(&str, LogLevel, i64)> = vec![
            ("1", LogLevel::Warn, 100),
            ("1", LogLevel::Warn, -500),
            ("1", LogLevel::Warn, 110),
        ];
        layout.extend((3..40).map(|_| ("9", LogLevel::Debug, 120)));
        layout.push(("1", LogLevel::Error, 180));
        let records = sequence(&layout);

        let window = window_at(&records, 40);
        assert_eq!(shape(&window.before), vec!["0", "gap1", "2"]);
    }

    #[test]
    fn test_before_severe_and_band_joined_by_gap() {
        let mut layout: Vec<(&str, LogLevel, i64)> = vec![("1", LogLevel::Warn, 0)];
        layout.extend((1..25).map(|i| ("2", LogLevel::Info, i)));
        layout.push(("1", LogLevel::Info, 25));
        layout.push(("1", LogLevel::Error, 26));
        let records = sequence(&layout);

        let window = window_at(&records, 26);
        assert_eq!(shape(&window.before), vec!["0", "gap24", "25"]);
    }

    #[test]
    fn test_target_at_start_has_empty_before() {
        let records = sequence(&[("1", LogLevel::Error, 0), ("1", LogLevel::Info, 1)]);
        let window = window_at(&records, 0);
        assert!(window.before.is_empty());
        assert_eq!(shape(&window.after), vec!["1"]);
    }

    // ── After side ───────────────────────────────────────────────

    #[test]
    fn test_after_band_ignores_thread() {
        let records = sequence(&[
            ("1", LogLevel::Error, 0),
            ("2", LogLevel::Info, 1),
            ("3", LogLevel::Debug, 2),
            ("1", LogLevel::Info, 3),
        ]);

        let window = window_at(&records, 0);
        assert_eq!(shape(&window.after), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_after_band_limited_to_line_window() {
        let mut layout: Vec<(&str, LogLevel, i64)> = vec![("1", LogLevel::Error, 0)];
        layout.extend((1..40).map(|i| ("1", LogLevel::Info, i)));
        let records = sequence(&layout);

        let window = window_at(&records, 0);
        assert_eq!(window.shown_after(), 20);
        assert_eq!(window.after.last().and_then(|i| i.record()).map(|r| r.sequence_index), Some(20));
    }

    #[test]
    fn test_after_severe_extension_with_gap() {
        // ERROR at 10, WARN at 50 on the same thread 90s later
        let mut layout: Vec<(&str, LogLevel, i64)> = (0..10).map(|i| ("1", LogLevel::Info, i)).collect();
        layout.push(("1", LogLevel::Error, 10));
        layout.extend((11..50).map(|i| ("2", LogLevel::Info, 10 + i)));
        layout.push(("1", LogLevel::Warn, 100));
        let records = sequence(&layout);

        let window = window_at(&records, 10);
        let after = shape(&window.after);
        assert_eq!(after.len(), 22);
        assert_eq!(after[19], "30");
        assert_eq!(after[20], "gap19");
        assert_eq!(after[21], "50");
        assert!(matches!(
            window.after.last(),
            Some(WindowItem::Record { reason: InclusionReason::Severe, .. })
        ));
    }

    #[test]
    fn test_after_severe_extension_adjacent_to_band_has_no_gap() {
        let mut layout: Vec<(&str, LogLevel, i64)> = vec![("1", LogLevel::Error, 0)];
        layout.extend((1..21).map(|i| ("2", LogLevel::Info, i)));
        layout.push(("1", LogLevel::Error, 30));
        let records = sequence(&layout);

        let window = window_at(&records, 0);
        assert_eq!(window.shown_after(), 21);
        assert!(window.after.iter().all(|item| !item.is_gap()));
    }

    #[test]
    fn test_after_scan_stops_past_time_window() {
        let mut layout: Vec<(&str, LogLevel, i64)> = vec![("1", LogLevel::Error, 0)];
        layout.extend((1..21).map(|i| ("2", LogLevel::Info, i)));
        layout.push(("1", LogLevel::Info, 500)); // beyond 2 minutes: scan stops here
        layout.push(("1", LogLevel::Warn, 30));  // back in range, but never reached
        let records = sequence(&layout);

        let window = window_at(&records, 0);
        assert_eq!(window.shown_after(), 20);
    }

    #[test]
    fn test_after_scan_continues_over_non_matching() {
        let mut layout: Vec<(&str, LogLevel, i64)> = vec![("1", LogLevel::Error, 0)];
        layout.extend((1..21).map(|i| ("2", LogLevel::Info, i)));
        layout.push(("2", LogLevel::Warn, 40)); // other thread
        layout.push(("1", LogLevel::Info, 50)); // not severe
        layout.push(("1", LogLevel::Fatal, 120)); // exactly at the edge
        let records = sequence(&layout);

        let window = window_at(&records, 0);
        let after = shape(&window.after);
        assert_eq!(&after[20..], &["gap2".to_string(), "23".to_string()]);
    }

    #[test]
    fn test_target_at_end_has_empty_after() {
        let records = sequence(&[("1", LogLevel::Info, 0), ("1", LogLevel::Error, 1)]);
        let window = window_at(&records, 1);
        assert!(window.after.is_empty());
        assert_eq!(shape(&window.before), vec!["0"]);
    }

    // ── Undated records ──────────────────────────────────────────

    fn undate(records: &mut [Arc<LogRecord>], index: usize) {
        Arc::make_mut(&mut records[index]).timestamp = None;
    }

    #[test]
    fn test_undated_severe_record_outside_before_time_window() {
        let mut layout: Vec<(&str, LogLevel, i64)> = vec![("1", LogLevel::Warn, 0)];
        layout.extend((1..30).map(|i| ("2", LogLevel::Info, i)));
        layout.push(("1", LogLevel::Error, 30));
        let mut records = sequence(&layout);
        undate(&mut records, 0);

        let window = window_at(&records, 30);
        assert!(window.before.is_empty());
    }

    #[test]
    fn test_undated_record_neither_included_nor_stops_after_scan() {
        let mut layout: Vec<(&str, LogLevel, i64)> = vec![("1", LogLevel::Error, 0)];
        layout.extend((1..21).map(|i| ("2", LogLevel::Info, i)));
        layout.push(("1", LogLevel::Warn, 25));
        layout.push(("1", LogLevel::Warn, 30));
        let mut records = sequence(&layout);
        undate(&mut records, 21);

        let window = window_at(&records, 0);
        let after = shape(&window.after);
        assert_eq!(&after[20..], &["gap1".to_string(), "22".to_string()]);
    }

    #[test]
    fn test_undated_target_keeps_immediate_bands_only() {
        let mut layout: Vec<(&str, LogLevel, i64)> = vec![("1", LogLevel::Warn, 0)];
        layout.extend((1..25).map(|i| ("1", LogLevel::Info, i)));
        layout.push(("1", LogLevel::Error, 25));
        layout.extend((26..50).map(|i| ("1", LogLevel::Info, i)));
        layout.push(("1", LogLevel::Warn, 50));
        let mut records = sequence(&layout);
        undate(&mut records, 25);

        let window = window_at(&records, 25);
        assert_eq!(window.shown_before(), 20);
        assert_eq!(window.shown_after(), 20);
        assert!(window.before.iter().chain(&window.after).all(|item| !item.is_gap()));
    }

    // ── build / build_windows ────────────────────────────────────

    #[test]
    fn test_build_out_of_range_is_none() {
        let records = sequence(&[("1", LogLevel::Error, 0)]);
        let builder = ContextWindowBuilder::new(&records, &WindowConfig::default());
        assert!(builder.build(0, 1).is_none());
    }

    #[test]
    fn test_build_windows_ids_in_document_order() {
        let records = sequence(&[
            ("1", LogLevel::Info, 0),
            ("1", LogLevel::Fatal, 1),
            ("1", LogLevel::Warn, 2),
            ("2", LogLevel::Error, 3),
        ]);

        let windows = build_windows(&records, &WindowConfig::default());
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].id, 0);
        assert_eq!(windows[0].target.sequence_index, 1);
        assert_eq!(windows[1].id, 1);
        assert_eq!(windows[1].target.sequence_index, 3);
    }

    #[test]
    fn test_build_windows_respects_config() {
        let mut layout: Vec<(&str, LogLevel, i64)> = (0..10).map(|i| ("1", LogLevel::Info, i)).collect();
        layout.push(("1", LogLevel::Error, 10));
        let records = sequence(&layout);

        let config = WindowConfig { line_window: 3, time_window_secs: 120 };
        let windows = build_windows(&records, &config);
        assert_eq!(shape(&windows[0].before), vec!["7", "8", "9"]);
    }

    #[test]
    fn test_earlier_window_sees_later_records() {
        let records = sequence(&[
            ("1", LogLevel::Error, 0),
            ("1", LogLevel::Info, 1),
            ("1", LogLevel::Error, 2),
        ]);

        let windows = build_windows(&records, &WindowConfig::default());
        assert_eq!(shape(&windows[0].after), vec!["1", "2"]);
        assert_eq!(shape(&windows[1].before), vec!["0", "1"]);
    }
}

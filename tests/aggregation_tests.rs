//! End-to-end checks of the aggregation engine: bucket boundaries, total
//! conservation, day-edge handling, and the weekly series.

use chrono::NaiveDate;
use waterlog::journal::{group_by_day, total_for, week_totals, DayBucket, Entry};

fn entry_at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32, amount: f64) -> Entry {
    let timestamp = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, min, sec)
        .unwrap();
    Entry::new(amount, Some(timestamp))
}

fn flatten(buckets: &[DayBucket]) -> Vec<Entry> {
    buckets
        .iter()
        .flat_map(|bucket| bucket.entries.iter().cloned())
        .collect()
}

#[test]
fn grouping_is_stable_over_a_flatten_round_trip() {
    let entries = vec![
        entry_at(2024, 3, 1, 8, 0, 0, 8.0),
        entry_at(2024, 3, 1, 12, 0, 0, 17.0),
        entry_at(2024, 3, 2, 9, 0, 0, 23.0),
        entry_at(2024, 3, 4, 7, 0, 0, 8.0),
    ];
    let grouped = group_by_day(&entries);

    // Flattening most-recent-first and regrouping walks the days in the
    // opposite direction, so the bucket list comes back reversed with
    // identical boundaries and per-bucket contents.
    let mut regrouped = group_by_day(&flatten(&grouped));
    regrouped.reverse();
    assert_eq!(regrouped, grouped);
}

#[test]
fn bucket_totals_conserve_the_entry_sum() {
    let entries = vec![
        entry_at(2024, 3, 1, 8, 0, 0, 8.0),
        entry_at(2024, 3, 3, 9, 0, 0, 17.0),
        entry_at(2024, 3, 1, 20, 0, 0, 23.0), // backfilled, splits day 1
        entry_at(2024, 3, 5, 11, 0, 0, 12.5),
    ];
    let entry_sum: f64 = entries.iter().map(|entry| entry.amount).sum();
    let bucket_sum: f64 = group_by_day(&entries)
        .iter()
        .map(|bucket| bucket.total())
        .sum();
    assert!((entry_sum - bucket_sum).abs() < f64::EPSILON);
}

#[test]
fn daily_total_ignores_adjacent_days() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
    let entries = vec![
        entry_at(2024, 3, 1, 23, 59, 59, 8.0),  // just before midnight
        entry_at(2024, 3, 2, 0, 0, 0, 17.0),    // first second of the day
        entry_at(2024, 3, 2, 23, 59, 59, 23.0), // last second of the day
        entry_at(2024, 3, 3, 0, 0, 1, 12.0),    // just after midnight
    ];
    assert_eq!(total_for(&entries, day), 40.0);
}

#[test]
fn non_contiguous_same_day_entries_stay_split() {
    let entries = vec![
        entry_at(2024, 3, 1, 8, 0, 0, 8.0),
        entry_at(2024, 3, 2, 9, 0, 0, 17.0),
        entry_at(2024, 3, 1, 20, 0, 0, 23.0),
    ];
    let buckets = group_by_day(&entries);

    assert_eq!(buckets.len(), 3);
    let day1 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let day2 = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
    // Most recently closed run first: the second day-1 run, then day 2,
    // then the first day-1 run.
    assert_eq!(buckets[0].date, day1);
    assert_eq!(buckets[0].entries[0].amount, 23.0);
    assert_eq!(buckets[1].date, day2);
    assert_eq!(buckets[2].date, day1);
    assert_eq!(buckets[2].entries[0].amount, 8.0);
}

#[test]
fn week_totals_zero_fill_days_without_entries() {
    // Reference week: Sunday 2023-06-11 through Saturday 2023-06-17.
    let entries = vec![
        entry_at(2023, 6, 12, 9, 0, 0, 10.0), // Monday
        entry_at(2023, 6, 16, 9, 0, 0, 20.0), // Friday
    ];
    let reference = NaiveDate::from_ymd_opt(2023, 6, 14).unwrap();
    assert_eq!(
        week_totals(&entries, reference),
        [0.0, 10.0, 0.0, 0.0, 0.0, 20.0, 0.0]
    );
}

#[test]
fn week_totals_accumulate_split_same_day_buckets() {
    let entries = vec![
        entry_at(2023, 6, 12, 8, 0, 0, 5.0),  // Monday
        entry_at(2023, 6, 13, 9, 0, 0, 7.0),  // Tuesday
        entry_at(2023, 6, 12, 21, 0, 0, 6.0), // Monday again, split run
    ];
    let reference = NaiveDate::from_ymd_opt(2023, 6, 14).unwrap();
    let totals = week_totals(&entries, reference);

    assert_eq!(totals[1], 11.0);
    assert_eq!(totals[2], 7.0);
}

#[test]
fn empty_input_yields_empty_results() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    assert!(group_by_day(&[]).is_empty());
    assert_eq!(total_for(&[], today), 0.0);
    assert_eq!(week_totals(&[], today), [0.0; 7]);
}

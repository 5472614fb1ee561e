//! Aggregation engine: daily totals, day bucketing, and the rolling week
//! series. Every function here is pure over an entry slice snapshot.

use chrono::{Datelike, Duration, NaiveDate};

use super::{bucket::DayBucket, entry::Entry};

/// Controls how [`group_by_day_with`] buckets same-date entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingMode {
    /// Contiguous runs only: same-date entries separated by another date
    /// produce separate buckets. A backfilled import between two current
    /// entries therefore splits that day in the history list.
    #[default]
    ContiguousRuns,
    /// All entries for a date collapse into one bucket, ordered most
    /// recent date first.
    MergeByDate,
}

/// Total amount logged on `day`. Calendar-date match, not a rolling
/// 24-hour window; `0.0` when nothing matches.
pub fn total_for(entries: &[Entry], day: NaiveDate) -> f64 {
    entries
        .iter()
        .filter(|entry| entry.date() == day)
        .map(|entry| entry.amount)
        .sum()
}

/// Partitions entries into day buckets, most recently closed bucket first.
/// Uses the default contiguous-run mode.
pub fn group_by_day(entries: &[Entry]) -> Vec<DayBucket> {
    group_by_day_with(entries, GroupingMode::default())
}

pub fn group_by_day_with(entries: &[Entry], mode: GroupingMode) -> Vec<DayBucket> {
    match mode {
        GroupingMode::ContiguousRuns => group_contiguous(entries),
        GroupingMode::MergeByDate => group_merged(entries),
    }
}

fn group_contiguous(entries: &[Entry]) -> Vec<DayBucket> {
    let mut buckets: Vec<DayBucket> = Vec::new();
    let mut open: Option<DayBucket> = None;

    for entry in entries {
        let date = entry.date();
        let same_day = open
            .as_ref()
            .map(|bucket| bucket.date == date)
            .unwrap_or(false);
        if same_day {
            if let Some(bucket) = open.as_mut() {
                bucket.entries.push(entry.clone());
            }
        } else {
            // A date change closes the open bucket; closed buckets go to
            // the front so the one closed last ends up first.
            if let Some(closed) = open.take() {
                buckets.insert(0, closed);
            }
            open = Some(DayBucket {
                date,
                entries: vec![entry.clone()],
            });
        }
    }
    if let Some(closed) = open.take() {
        buckets.insert(0, closed);
    }
    buckets
}

fn group_merged(entries: &[Entry]) -> Vec<DayBucket> {
    let mut buckets: Vec<DayBucket> = Vec::new();
    for entry in entries {
        let date = entry.date();
        match buckets.iter_mut().find(|bucket| bucket.date == date) {
            Some(bucket) => bucket.entries.push(entry.clone()),
            None => buckets.push(DayBucket {
                date,
                entries: vec![entry.clone()],
            }),
        }
    }
    buckets.sort_by(|a, b| b.date.cmp(&a.date));
    buckets
}

/// Sunday anchoring the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Totals for the calendar week containing `reference`, indexed
/// 0 = Sunday .. 6 = Saturday. Days without entries stay at zero.
///
/// Buckets are walked from the most recent; because they run backward in
/// time, the first bucket outside the reference week ends the scan. Two
/// dates share a week iff they share an anchor Sunday, which also holds
/// across year boundaries.
pub fn week_totals(entries: &[Entry], reference: NaiveDate) -> [f64; 7] {
    let mut totals = [0.0; 7];
    let reference_week = week_start(reference);

    for bucket in group_by_day(entries) {
        if week_start(bucket.date) != reference_week {
            break;
        }
        let weekday = bucket.date.weekday().num_days_from_sunday() as usize;
        totals[weekday] += bucket.total();
    }
    totals
}

//! Read-side summaries derived from the entry store. Everything here
//! recomputes from the current entry sequence; with a personal log of at
//! most a few thousand entries there is nothing worth caching.

use chrono::{Local, NaiveDate};

use crate::journal::{aggregate, DayBucket, User};

pub struct SummaryService;

impl SummaryService {
    /// Amount logged today, on the local calendar day.
    pub fn today_total(user: &User) -> f64 {
        aggregate::total_for(&user.entries, Local::now().date_naive())
    }

    pub fn total_for_day(user: &User, day: NaiveDate) -> f64 {
        aggregate::total_for(&user.entries, day)
    }

    /// Day-grouped history, most recent bucket first.
    pub fn history(user: &User) -> Vec<DayBucket> {
        aggregate::group_by_day(&user.entries)
    }

    /// Seven totals for the week containing `reference`, Sunday first.
    pub fn week_totals(user: &User, reference: NaiveDate) -> [f64; 7] {
        aggregate::week_totals(&user.entries, reference)
    }

    /// Fraction of `goal` reached today, clamped to 1.0. Goal comparison
    /// is the caller's concern; this helper only does the gauge math.
    pub fn today_progress(user: &User, goal: f64) -> f64 {
        if goal <= 0.0 {
            return 0.0;
        }
        (Self::today_total(user) / goal).min(1.0)
    }
}

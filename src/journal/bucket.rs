use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entry::Entry;

/// A run of entries sharing one calendar date. Derived from the user's
/// entry sequence, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub entries: Vec<Entry>,
}

impl DayBucket {
    /// Sum of entry amounts in this bucket.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.amount).sum()
    }
}

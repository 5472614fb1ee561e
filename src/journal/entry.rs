use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single timestamped water-volume record, in fluid ounces.
///
/// Entries are immutable once created; the only lifecycle event after
/// creation is removal from the owning [`User`](super::User).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub amount: f64,
    pub timestamp: NaiveDateTime,
}

impl Entry {
    /// Creates a new entry. `timestamp` defaults to the current local time,
    /// which is the normal logging path; imports pass historical values.
    pub fn new(amount: f64, timestamp: Option<NaiveDateTime>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            timestamp: timestamp.unwrap_or_else(|| Local::now().naive_local()),
        }
    }

    /// Calendar date the entry belongs to for grouping purposes.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

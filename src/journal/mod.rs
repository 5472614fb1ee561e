//! Domain model for the water log: entries, the user aggregate that owns
//! them, and the aggregation engine deriving totals and day buckets.

pub mod aggregate;
pub mod bucket;
pub mod entry;
pub mod user;

pub use aggregate::{group_by_day, group_by_day_with, total_for, week_totals, GroupingMode};
pub use bucket::DayBucket;
pub use entry::Entry;
pub use user::User;

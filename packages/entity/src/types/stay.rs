use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A calendar booking: one member staying at the house over an inclusive
/// date range. Overlapping stays are allowed — the calendar shows them side
/// by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stay {
    pub stay_id: String,
    pub house_id: String,
    pub user_id: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Stay {
    pub fn new(
        stay_id: String,
        house_id: String,
        user_id: String,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
        note: Option<String>,
    ) -> Self {
        Self {
            stay_id,
            house_id,
            user_id,
            starts_on,
            ends_on,
            note,
            created_at: Utc::now(),
        }
    }
}

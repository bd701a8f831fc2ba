use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A shared cost fronted by one member. Amounts are integer cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub expense_id: String,
    pub house_id: String,
    pub paid_by: String,
    pub description: String,
    pub amount_cents: i64,
    pub spent_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        expense_id: String,
        house_id: String,
        paid_by: String,
        description: String,
        amount_cents: i64,
        spent_on: NaiveDate,
    ) -> Self {
        Self {
            expense_id,
            house_id,
            paid_by,
            description,
            amount_cents,
            spent_on,
            created_at: Utc::now(),
        }
    }
}

use crate::repository::error::RepositoryError;
use chrono::NaiveDate;
use mokki_entity::types::Expense;
use serde::{Deserialize, Serialize};
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

/// One member's position in the house ledger. The fair share is
/// `total / member count`, floored in integer cents; the division remainder
/// stays unassigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberBalance {
    pub user_id: String,
    pub paid_cents: i64,
    pub share_cents: i64,
    pub net_cents: i64,
}

pub struct ExpenseRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> ExpenseRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        house_id: &str,
        paid_by: &str,
        description: &str,
        amount_cents: i64,
        spent_on: NaiveDate,
    ) -> Result<Expense, RepositoryError> {
        if amount_cents <= 0 {
            return Err(RepositoryError::Validation {
                field: "amount_cents".to_string(),
                message: "amount must be positive".to_string(),
            });
        }
        if description.trim().is_empty() {
            return Err(RepositoryError::Validation {
                field: "description".to_string(),
                message: "description must not be empty".to_string(),
            });
        }
        let expense = Expense::new(
            Uuid::new_v4().to_string(),
            house_id.to_string(),
            paid_by.to_string(),
            description.trim().to_string(),
            amount_cents,
            spent_on,
        );
        let created: Option<Expense> = self
            .db
            .create(("expense", expense.expense_id.as_str()))
            .content(expense.clone())
            .await?;

        created.ok_or_else(|| RepositoryError::DatabaseError {
            message: "Failed to create expense".to_string(),
            operation: "create".to_string(),
        })
    }

    pub async fn list_for_house(
        &self,
        house_id: &str,
    ) -> Result<Vec<Expense>, RepositoryError> {
        let mut result = self
            .db
            .query("SELECT * FROM expense WHERE house_id = $house_id ORDER BY spent_on DESC")
            .bind(("house_id", house_id.to_string()))
            .await?;
        let expenses: Vec<Expense> = result.take(0)?;
        Ok(expenses)
    }

    /// Split the house total equally across `member_ids` and report each
    /// member's paid / share / net position.
    pub async fn balances(
        &self,
        house_id: &str,
        member_ids: &[String],
    ) -> Result<Vec<MemberBalance>, RepositoryError> {
        if member_ids.is_empty() {
            return Ok(Vec::new());
        }
        let expenses = self.list_for_house(house_id).await?;
        let total: i64 = expenses.iter().map(|expense| expense.amount_cents).sum();
        let share = total / member_ids.len() as i64;

        Ok(member_ids
            .iter()
            .map(|user_id| {
                let paid: i64 = expenses
                    .iter()
                    .filter(|expense| &expense.paid_by == user_id)
                    .map(|expense| expense.amount_cents)
                    .sum();
                MemberBalance {
                    user_id: user_id.clone(),
                    paid_cents: paid,
                    share_cents: share,
                    net_cents: paid - share,
                }
            })
            .collect())
    }
}

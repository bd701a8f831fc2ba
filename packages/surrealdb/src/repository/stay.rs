use crate::repository::error::RepositoryError;
use chrono::NaiveDate;
use mokki_entity::types::Stay;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

pub struct StayRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> StayRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        house_id: &str,
        user_id: &str,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
        note: Option<String>,
    ) -> Result<Stay, RepositoryError> {
        if ends_on < starts_on {
            return Err(RepositoryError::Validation {
                field: "ends_on".to_string(),
                message: "stay must end on or after its start date".to_string(),
            });
        }
        let stay = Stay::new(
            Uuid::new_v4().to_string(),
            house_id.to_string(),
            user_id.to_string(),
            starts_on,
            ends_on,
            note,
        );
        let created: Option<Stay> = self
            .db
            .create(("stay", stay.stay_id.as_str()))
            .content(stay.clone())
            .await?;

        created.ok_or_else(|| RepositoryError::DatabaseError {
            message: "Failed to create stay".to_string(),
            operation: "create".to_string(),
        })
    }

    pub async fn get(&self, stay_id: &str) -> Result<Option<Stay>, RepositoryError> {
        let stay: Option<Stay> = self.db.select(("stay", stay_id)).await?;
        Ok(stay)
    }

    pub async fn list_for_house(&self, house_id: &str) -> Result<Vec<Stay>, RepositoryError> {
        let mut result = self
            .db
            .query("SELECT * FROM stay WHERE house_id = $house_id ORDER BY starts_on")
            .bind(("house_id", house_id.to_string()))
            .await?;
        let stays: Vec<Stay> = result.take(0)?;
        Ok(stays)
    }

    pub async fn delete(&self, stay_id: &str) -> Result<(), RepositoryError> {
        let _: Option<Stay> = self.db.delete(("stay", stay_id)).await?;
        Ok(())
    }
}

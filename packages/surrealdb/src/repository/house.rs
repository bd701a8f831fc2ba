use crate::repository::error::RepositoryError;
use mokki_entity::types::House;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

pub struct HouseRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> HouseRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        name: &str,
        owner_id: &str,
        coordinates: Option<(f64, f64)>,
    ) -> Result<House, RepositoryError> {
        let mut house = House::new(
            Uuid::new_v4().to_string(),
            name.to_string(),
            owner_id.to_string(),
        );
        if let Some((latitude, longitude)) = coordinates {
            house = house.with_coordinates(latitude, longitude);
        }
        let created: Option<House> = self
            .db
            .create(("house", house.house_id.as_str()))
            .content(house.clone())
            .await?;

        created.ok_or_else(|| RepositoryError::DatabaseError {
            message: "Failed to create house".to_string(),
            operation: "create".to_string(),
        })
    }

    pub async fn get(&self, house_id: &str) -> Result<Option<House>, RepositoryError> {
        let house: Option<House> = self.db.select(("house", house_id)).await?;
        Ok(house)
    }

    /// Houses the user belongs to: owned, plus joined via an accepted
    /// invitation.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<House>, RepositoryError> {
        let user_id_owned = user_id.to_string();
        let mut result = self
            .db
            .query("SELECT * FROM house WHERE owner_id = $user_id ORDER BY created_at")
            .bind(("user_id", user_id_owned.clone()))
            .await?;
        let mut houses: Vec<House> = result.take(0)?;

        let mut result = self
            .db
            .query(
                "SELECT * FROM invitation WHERE user_id = $user_id AND invite_status = 'accepted'",
            )
            .bind(("user_id", user_id_owned))
            .await?;
        let accepted: Vec<mokki_entity::types::Invitation> = result.take(0)?;

        let joined_ids: Vec<String> = accepted
            .into_iter()
            .map(|invitation| invitation.house_id)
            .filter(|house_id| !houses.iter().any(|h| &h.house_id == house_id))
            .collect();
        if !joined_ids.is_empty() {
            let mut result = self
                .db
                .query("SELECT * FROM house WHERE house_id INSIDE $house_ids ORDER BY created_at")
                .bind(("house_ids", joined_ids))
                .await?;
            let joined: Vec<House> = result.take(0)?;
            houses.extend(joined);
        }

        Ok(houses)
    }
}

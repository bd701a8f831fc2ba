use crate::repository::error::RepositoryError;
use mokki_entity::types::User;
use mokki_entity::utils::normalize_email;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

pub struct UserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> UserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        email: &str,
        display_name: &str,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let user = User::new(
            Uuid::new_v4().to_string(),
            normalize_email(email),
            display_name.to_string(),
            password_hash.to_string(),
        );
        let created: Option<User> = self
            .db
            .create(("user", user.user_id.as_str()))
            .content(user.clone())
            .await?;

        created.ok_or_else(|| RepositoryError::DatabaseError {
            message: "Failed to create user".to_string(),
            operation: "create".to_string(),
        })
    }

    pub async fn get_by_id(&self, user_id: &str) -> Result<Option<User>, RepositoryError> {
        let user: Option<User> = self.db.select(("user", user_id)).await?;
        Ok(user)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let email = normalize_email(email);
        let mut result = self
            .db
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    pub async fn mark_email_verified(&self, user_id: &str) -> Result<(), RepositoryError> {
        self.db
            .query("UPDATE user SET email_verified = true WHERE user_id = $user_id")
            .bind(("user_id", user_id.to_string()))
            .await?;
        Ok(())
    }
}

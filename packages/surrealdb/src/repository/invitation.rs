use crate::repository::error::RepositoryError;
use chrono::Utc;
use mokki_entity::types::Invitation;
use mokki_entity::utils::normalize_email;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

pub struct InvitationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> InvitationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        house_id: &str,
        invited_email: &str,
        invited_by: &str,
    ) -> Result<Invitation, RepositoryError> {
        let invitation = Invitation::new(
            Uuid::new_v4().to_string(),
            house_id.to_string(),
            normalize_email(invited_email),
            invited_by.to_string(),
        );
        let created: Option<Invitation> = self
            .db
            .create(("invitation", invitation.invitation_id.as_str()))
            .content(invitation.clone())
            .await?;

        created.ok_or_else(|| RepositoryError::DatabaseError {
            message: "Failed to create invitation".to_string(),
            operation: "create".to_string(),
        })
    }

    pub async fn get(&self, invitation_id: &str) -> Result<Option<Invitation>, RepositoryError> {
        let invitation: Option<Invitation> =
            self.db.select(("invitation", invitation_id)).await?;
        Ok(invitation)
    }

    /// The invite matcher: at most one pending invitation for the given
    /// house/email pair. Zero matches is an expected, silent outcome. When
    /// several pending rows exist for the same pair, the most recently
    /// created one wins.
    pub async fn find_pending(
        &self,
        house_id: &str,
        email: &str,
    ) -> Result<Option<Invitation>, RepositoryError> {
        let email = normalize_email(email);
        let mut result = self
            .db
            .query(
                "SELECT * FROM invitation \
                 WHERE house_id = $house_id AND invited_email = $email \
                   AND invite_status = 'pending' \
                 ORDER BY created_at DESC LIMIT 1",
            )
            .bind(("house_id", house_id.to_string()))
            .bind(("email", email))
            .await?;
        let invitations: Vec<Invitation> = result.take(0)?;
        Ok(invitations.into_iter().next())
    }

    /// The invite acceptor: stamp `user_id`/`joined_at` and flip the status,
    /// conditional on the row still being pending. Returns `None` when zero
    /// rows were affected — another path already accepted the invitation,
    /// which callers treat as "already accepted", not an error.
    pub async fn accept(
        &self,
        invitation_id: &str,
        user_id: &str,
    ) -> Result<Option<Invitation>, RepositoryError> {
        let mut result = self
            .db
            .query(
                "UPDATE invitation \
                 SET user_id = $user_id, invite_status = 'accepted', joined_at = $joined_at \
                 WHERE invitation_id = $invitation_id AND invite_status = 'pending' \
                 RETURN AFTER",
            )
            .bind(("invitation_id", invitation_id.to_string()))
            .bind(("user_id", user_id.to_string()))
            .bind(("joined_at", Utc::now()))
            .await?;
        let accepted: Vec<Invitation> = result.take(0)?;
        Ok(accepted.into_iter().next())
    }

    pub async fn list_for_house(
        &self,
        house_id: &str,
    ) -> Result<Vec<Invitation>, RepositoryError> {
        let mut result = self
            .db
            .query("SELECT * FROM invitation WHERE house_id = $house_id ORDER BY created_at DESC")
            .bind(("house_id", house_id.to_string()))
            .await?;
        let invitations: Vec<Invitation> = result.take(0)?;
        Ok(invitations)
    }

    pub async fn accepted_for_house(
        &self,
        house_id: &str,
    ) -> Result<Vec<Invitation>, RepositoryError> {
        let mut result = self
            .db
            .query(
                "SELECT * FROM invitation \
                 WHERE house_id = $house_id AND invite_status = 'accepted' \
                 ORDER BY joined_at",
            )
            .bind(("house_id", house_id.to_string()))
            .await?;
        let invitations: Vec<Invitation> = result.take(0)?;
        Ok(invitations)
    }
}

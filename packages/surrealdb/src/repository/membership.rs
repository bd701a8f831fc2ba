use crate::repository::error::RepositoryError;
use crate::repository::house::HouseRepository;
use crate::repository::invitation::InvitationRepository;
use crate::repository::user::UserRepository;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::{Connection, Surreal};

/// One row of a house's member list. Membership is derived, not stored: the
/// members of a house are its owner plus every user holding an accepted
/// invitation for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseMember {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub is_owner: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
}

pub struct MembershipRepository<C: Connection> {
    houses: HouseRepository<C>,
    invitations: InvitationRepository<C>,
    users: UserRepository<C>,
}

impl<C: Connection> MembershipRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            houses: HouseRepository::new(db.clone()),
            invitations: InvitationRepository::new(db.clone()),
            users: UserRepository::new(db),
        }
    }

    pub async fn is_member(
        &self,
        house_id: &str,
        user_id: &str,
    ) -> Result<bool, RepositoryError> {
        let Some(house) = self.houses.get(house_id).await? else {
            return Ok(false);
        };
        if house.owner_id == user_id {
            return Ok(true);
        }
        let accepted = self.invitations.accepted_for_house(house_id).await?;
        Ok(accepted
            .iter()
            .any(|invitation| invitation.user_id.as_deref() == Some(user_id)))
    }

    pub async fn members_of(
        &self,
        house_id: &str,
    ) -> Result<Vec<HouseMember>, RepositoryError> {
        let house = self.houses.get(house_id).await?.ok_or_else(|| {
            RepositoryError::NotFound {
                entity_type: "house".to_string(),
                id: house_id.to_string(),
            }
        })?;

        let mut members = Vec::new();
        if let Some(owner) = self.users.get_by_id(&house.owner_id).await? {
            members.push(HouseMember {
                user_id: owner.user_id,
                email: owner.email,
                display_name: owner.display_name,
                is_owner: true,
                joined_at: Some(house.created_at),
            });
        }

        for invitation in self.invitations.accepted_for_house(house_id).await? {
            let Some(user_id) = invitation.user_id else {
                continue;
            };
            if members.iter().any(|member| member.user_id == user_id) {
                continue;
            }
            let Some(user) = self.users.get_by_id(&user_id).await? else {
                continue;
            };
            members.push(HouseMember {
                user_id: user.user_id,
                email: user.email,
                display_name: user.display_name,
                is_owner: false,
                joined_at: invitation.joined_at,
            });
        }

        Ok(members)
    }

    pub async fn member_ids(&self, house_id: &str) -> Result<Vec<String>, RepositoryError> {
        let members = self.members_of(house_id).await?;
        Ok(members.into_iter().map(|member| member.user_id).collect())
    }
}

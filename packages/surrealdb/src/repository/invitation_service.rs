use crate::repository::error::RepositoryError;
use crate::repository::invitation::InvitationRepository;
use surrealdb::{Connection, Surreal};
use tracing::{debug, info};

/// Result of one reconciliation pass for a `(house, email, user)` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A pending invitation was matched and accepted.
    Accepted(String),
    /// A pending invitation was matched but a concurrent path accepted it
    /// between the lookup and the conditional update. Success-shaped.
    AlreadyAccepted,
    /// No pending invitation for this house/email pair.
    NoMatch,
}

/// The one place that matches a pending invitation to an authenticated
/// identity and marks it accepted. Both the sign-in confirmation handler and
/// the pending-invite recovery endpoint delegate here; neither duplicates
/// the matcher-then-acceptor sequence.
pub struct InvitationService<C: Connection> {
    invitations: InvitationRepository<C>,
}

impl<C: Connection> InvitationService<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            invitations: InvitationRepository::new(db),
        }
    }

    pub async fn reconcile(
        &self,
        house_id: &str,
        email: &str,
        user_id: &str,
    ) -> Result<ReconcileOutcome, RepositoryError> {
        let Some(invitation) = self.invitations.find_pending(house_id, email).await? else {
            debug!("no pending invitation for house {house_id}");
            return Ok(ReconcileOutcome::NoMatch);
        };

        match self
            .invitations
            .accept(&invitation.invitation_id, user_id)
            .await?
        {
            Some(accepted) => {
                info!(
                    "user {user_id} joined house {house_id} via invitation {}",
                    accepted.invitation_id
                );
                Ok(ReconcileOutcome::Accepted(accepted.invitation_id))
            },
            None => {
                debug!(
                    "invitation {} was accepted by a concurrent request",
                    invitation.invitation_id
                );
                Ok(ReconcileOutcome::AlreadyAccepted)
            },
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Pending,
    Accepted,
}

/// An outstanding or fulfilled offer for a specific email address to join a
/// specific house.
///
/// Matchable for acceptance iff `invite_status` is `pending`, `invited_email`
/// equals the authenticating user's normalized email, and `house_id` equals
/// the target house. Mutated exactly once, by acceptance: `user_id` and
/// `joined_at` are stamped and the status flips to `accepted`. Never deleted,
/// never reverted — an accepted row doubles as the membership record, with
/// `joined_at` as the join timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub invitation_id: String,
    pub house_id: String,

    /// Normalized (lower-cased, trimmed) email the invite was sent to.
    pub invited_email: String,
    pub invite_status: InviteStatus,

    /// Set only once accepted: the account that claimed the invite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,

    pub invited_by: String,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    pub fn new(
        invitation_id: String,
        house_id: String,
        invited_email: String,
        invited_by: String,
    ) -> Self {
        Self {
            invitation_id,
            house_id,
            invited_email,
            invite_status: InviteStatus::Pending,
            user_id: None,
            joined_at: None,
            invited_by,
            created_at: Utc::now(),
        }
    }
}

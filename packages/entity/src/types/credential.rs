use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The flavor of a one-time verification token, carried as the `type` query
/// parameter of emailed confirmation links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpKind {
    Signup,
    Login,
    Recovery,
}

impl OtpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpKind::Signup => "signup",
            OtpKind::Login => "login",
            OtpKind::Recovery => "recovery",
        }
    }
}

impl std::str::FromStr for OtpKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(OtpKind::Signup),
            "login" => Ok(OtpKind::Login),
            "recovery" => Ok(OtpKind::Recovery),
            _ => Err(()),
        }
    }
}

/// A short-lived, single-use authorization code. Produced by the magic-link
/// flow, consumed by the sign-in confirmation handler's code-exchange path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthCode {
    pub code: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
}

impl AuthCode {
    pub fn new(code: String, user_id: String, ttl_secs: u64) -> Self {
        let now = Utc::now();
        Self {
            code,
            user_id,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_secs as i64),
            consumed: false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

/// A single-use emailed verification token. Only the SHA-256 of the raw
/// token is stored; the confirmation link carries the same hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneTimeCode {
    pub token_hash: String,
    pub kind: OtpKind,
    pub user_id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
}

impl OneTimeCode {
    pub fn new(
        token_hash: String,
        kind: OtpKind,
        user_id: String,
        email: String,
        ttl_secs: u64,
    ) -> Self {
        let now = Utc::now();
        Self {
            token_hash,
            kind,
            user_id,
            email,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_secs as i64),
            consumed: false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

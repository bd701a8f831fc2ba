use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A housemate account. `email` is always stored normalized
/// (see [`crate::utils::normalize_email`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        user_id: String,
        email: String,
        display_name: String,
        password_hash: String,
    ) -> Self {
        Self {
            user_id,
            email,
            display_name,
            password_hash,
            email_verified: false,
            created_at: Utc::now(),
        }
    }

    pub fn hash_password(plain: &str) -> Result<String, bcrypt::BcryptError> {
        bcrypt::hash(plain, bcrypt::DEFAULT_COST)
    }

    pub fn verify_password(&self, plain: &str) -> bool {
        bcrypt::verify(plain, &self.password_hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::User;

    #[test]
    fn test_password_round_trip() {
        let hash = User::hash_password("hunter2hunter2").unwrap();
        let user = User::new(
            "u1".to_string(),
            "a@x.com".to_string(),
            "Antti".to_string(),
            hash,
        );
        assert!(user.verify_password("hunter2hunter2"));
        assert!(!user.verify_password("wrong"));
    }
}

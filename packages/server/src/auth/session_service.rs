use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use mokki_entity::types::{AuthCode, OneTimeCode, OtpKind, User};
use mokki_surrealdb::repository::{CredentialRepository, UserRepository};
use serde::{Deserialize, Serialize};
use surrealdb::{Connection, Surreal};

use crate::auth::errors::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Session issuing and the three authentication completion mechanisms:
/// HS256 JWT sessions, authorization-code exchange, and one-time token-hash
/// verification. Every mechanism resolves to a concrete [`User`].
pub struct SessionService<C: Connection> {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_ttl_secs: i64,
    users: UserRepository<C>,
    credentials: CredentialRepository<C>,
}

impl<C: Connection> SessionService<C> {
    pub fn new(secret: &[u8], session_ttl_secs: i64, db: Surreal<C>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            session_ttl_secs,
            users: UserRepository::new(db.clone()),
            credentials: CredentialRepository::new(db),
        }
    }

    pub fn create_session_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.user_id.clone(),
            email: user.email.clone(),
            iat: now,
            exp: now + self.session_ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Jwt(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::Jwt(e.to_string()))
    }

    /// Exchange a single-use authorization code for its account. A consumed,
    /// unknown, or expired code is one terminal failure — no retries.
    pub async fn exchange_code(&self, code: &str) -> Result<User, AuthError> {
        let auth_code = self
            .credentials
            .consume_auth_code(code)
            .await?
            .ok_or(AuthError::InvalidCode)?;
        if auth_code.is_expired() {
            return Err(AuthError::InvalidCode);
        }
        self.users
            .get_by_id(&auth_code.user_id)
            .await?
            .ok_or(AuthError::InvalidCode)
    }

    /// Verify a one-time token hash of the given kind. A `signup` token also
    /// marks the account's email verified.
    pub async fn verify_one_time(
        &self,
        token_hash: &str,
        kind: OtpKind,
    ) -> Result<User, AuthError> {
        let one_time = self
            .credentials
            .consume_one_time_code(token_hash, kind)
            .await?
            .ok_or(AuthError::InvalidToken)?;
        if one_time.is_expired() {
            return Err(AuthError::InvalidToken);
        }
        if kind == OtpKind::Signup {
            self.users.mark_email_verified(&one_time.user_id).await?;
        }
        self.users
            .get_by_id(&one_time.user_id)
            .await?
            .ok_or(AuthError::InvalidToken)
    }

    pub async fn issue_auth_code(
        &self,
        user_id: &str,
        ttl_secs: u64,
    ) -> Result<AuthCode, AuthError> {
        Ok(self.credentials.create_auth_code(user_id, ttl_secs).await?)
    }

    /// Mint a one-time code for the user; returns the stored record whose
    /// `token_hash` goes into the confirmation link.
    pub async fn issue_one_time_code(
        &self,
        kind: OtpKind,
        user: &User,
        ttl_secs: u64,
    ) -> Result<OneTimeCode, AuthError> {
        let (_raw, stored) = self
            .credentials
            .create_one_time_code(kind, &user.user_id, &user.email, ttl_secs)
            .await?;
        Ok(stored)
    }
}

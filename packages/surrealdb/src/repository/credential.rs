use crate::repository::error::RepositoryError;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use mokki_entity::types::{AuthCode, OneTimeCode, OtpKind};
use mokki_entity::utils::normalize_email;
use rand::RngCore;
use sha2::{Digest, Sha256};
use surrealdb::{Connection, Surreal};

/// SHA-256 of a raw token, hex-encoded — the form stored in the database and
/// carried by emailed confirmation links.
pub fn hash_token(raw: &str) -> String {
    format!("{:x}", Sha256::digest(raw.as_bytes()))
}

fn random_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Single-use sign-in credentials: authorization codes (magic-link exchange)
/// and one-time email verification tokens. Consumption is a conditional
/// update on `consumed = false`, so each credential is redeemable exactly
/// once; expiry is the caller's check, after the swap.
pub struct CredentialRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> CredentialRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    pub async fn create_auth_code(
        &self,
        user_id: &str,
        ttl_secs: u64,
    ) -> Result<AuthCode, RepositoryError> {
        let auth_code = AuthCode::new(random_token(), user_id.to_string(), ttl_secs);
        let created: Option<AuthCode> = self
            .db
            .create(("auth_code", auth_code.code.as_str()))
            .content(auth_code.clone())
            .await?;

        created.ok_or_else(|| RepositoryError::DatabaseError {
            message: "Failed to create auth code".to_string(),
            operation: "create".to_string(),
        })
    }

    /// Redeem an authorization code. `None` when the code is unknown or was
    /// already consumed.
    pub async fn consume_auth_code(
        &self,
        code: &str,
    ) -> Result<Option<AuthCode>, RepositoryError> {
        let mut result = self
            .db
            .query(
                "UPDATE auth_code SET consumed = true \
                 WHERE code = $code AND consumed = false \
                 RETURN AFTER",
            )
            .bind(("code", code.to_string()))
            .await?;
        let consumed: Vec<AuthCode> = result.take(0)?;
        Ok(consumed.into_iter().next())
    }

    /// Mint a one-time code; returns the raw token alongside the stored
    /// record (only the hash is persisted).
    pub async fn create_one_time_code(
        &self,
        kind: OtpKind,
        user_id: &str,
        email: &str,
        ttl_secs: u64,
    ) -> Result<(String, OneTimeCode), RepositoryError> {
        let raw = random_token();
        let one_time = OneTimeCode::new(
            hash_token(&raw),
            kind,
            user_id.to_string(),
            normalize_email(email),
            ttl_secs,
        );
        let created: Option<OneTimeCode> = self
            .db
            .create(("one_time_code", one_time.token_hash.as_str()))
            .content(one_time.clone())
            .await?;

        created
            .map(|stored| (raw, stored))
            .ok_or_else(|| RepositoryError::DatabaseError {
                message: "Failed to create one-time code".to_string(),
                operation: "create".to_string(),
            })
    }

    /// Redeem a one-time code by token hash and kind. `None` when unknown,
    /// of a different kind, or already consumed.
    pub async fn consume_one_time_code(
        &self,
        token_hash: &str,
        kind: OtpKind,
    ) -> Result<Option<OneTimeCode>, RepositoryError> {
        let mut result = self
            .db
            .query(
                "UPDATE one_time_code SET consumed = true \
                 WHERE token_hash = $token_hash AND kind = $kind AND consumed = false \
                 RETURN AFTER",
            )
            .bind(("token_hash", token_hash.to_string()))
            .bind(("kind", kind.as_str()))
            .await?;
        let consumed: Vec<OneTimeCode> = result.take(0)?;
        Ok(consumed.into_iter().next())
    }
}

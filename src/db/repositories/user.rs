use anyhow::Context;
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Serialize;
use tokio::task;

use crate::config::SecurityConfig;
use crate::db::error::{StoreError, StoreResult, is_unique_violation};
use crate::domain::UserId;
use crate::entities::users;

/// User data returned from repository (without the password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub created_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::new(model.id),
            email: model.email,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await?;

        Ok(user.map(User::from))
    }

    /// Get user by email together with the stored hash, for login checks.
    pub async fn get_by_email_with_password(
        &self,
        email: &str,
    ) -> StoreResult<Option<(User, String)>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await?;

        Ok(user.map(|u| {
            let password_hash = u.password_hash.clone();
            (User::from(u), password_hash)
        }))
    }

    pub async fn get_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let user = users::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await?;

        Ok(user.map(User::from))
    }

    /// Hashes `password` and inserts a new user.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] when the email is taken; the
    /// unique index guarantees no second row is written.
    pub async fn create(
        &self,
        email: &str,
        password: &str,
        name: &str,
        config: &SecurityConfig,
    ) -> StoreResult<User> {
        let password = password.to_string();
        let config = config.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, Some(&config)))
            .await
            .context("Password hashing task panicked")??;

        let active = users::ActiveModel {
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        match active.insert(&self.conn).await {
            Ok(model) => Ok(User::from(model)),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateEmail(email.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, the crate's default params are used.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Checks `password` against a stored PHC hash string.
///
/// Runs on the blocking pool because Argon2 is CPU-intensive. Params are read
/// from the hash itself, so hashes made with older settings still verify.
pub async fn verify_password(password_hash: String, password: &str) -> anyhow::Result<bool> {
    let password = password.to_string();

    task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&password_hash)
            .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

        Ok::<bool, anyhow::Error>(
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok(),
        )
    })
    .await
    .context("Password verification task panicked")?
}

//! `SeaORM` implementation of the `AuthService` trait.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::repositories::user::verify_password;
use crate::db::{Store, User};
use crate::domain::UserId;
use crate::services::auth_service::{AuthError, AuthService, Registration};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    fn validate(&self, form: &Registration) -> Result<(), AuthError> {
        if !is_valid_email(&form.email) {
            return Err(AuthError::Validation("Invalid email address".to_string()));
        }

        if form.password.chars().count() < self.security.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.security.min_password_length
            )));
        }

        if form.password != form.confirm_password {
            return Err(AuthError::Validation("Passwords must match".to_string()));
        }

        if form.name.trim().is_empty() {
            return Err(AuthError::Validation("Name is required".to_string()));
        }

        Ok(())
    }
}

fn is_valid_email(email: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern defined in code")
    })
    .is_match(email)
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, registration: &Registration) -> Result<User, AuthError> {
        self.validate(registration)?;

        self.create_user(
            &registration.email,
            &registration.password,
            registration.name.trim(),
        )
        .await
    }

    async fn create_user(&self, email: &str, password: &str, name: &str) -> Result<User, AuthError> {
        let user = self
            .store
            .create_user(email, password, name, &self.security)
            .await?;

        info!(user_id = %user.id, "Registered new user");
        Ok(user)
    }

    async fn verify_login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let (user, password_hash) = self
            .store
            .get_user_by_email_with_password(email)
            .await?
            .ok_or(AuthError::InvalidEmail)?;

        if verify_password(password_hash, password).await? {
            Ok(user)
        } else {
            Err(AuthError::InvalidPassword)
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_user_by_email(email).await?)
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_user(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::store;

    async fn service() -> SeaOrmAuthService {
        SeaOrmAuthService::new(
            store().await,
            SecurityConfig {
                argon2_memory_cost_kib: 1024,
                argon2_time_cost: 1,
                ..SecurityConfig::default()
            },
        )
    }

    fn form(email: &str, password: &str, confirm: &str, name: &str) -> Registration {
        Registration {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn email_syntax() {
        assert!(is_valid_email("cook@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
        assert!(!is_valid_email("cook@example"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("spa ce@example.com"));
        assert!(!is_valid_email(""));
    }

    #[tokio::test]
    async fn verify_login_outcomes() {
        let service = service().await;
        let created = service
            .create_user("chef@example.com", "secret-pass", "Chef")
            .await
            .unwrap();

        let user = service
            .verify_login("chef@example.com", "secret-pass")
            .await
            .unwrap();
        assert_eq!(user.id, created.id);

        assert!(matches!(
            service.verify_login("chef@example.com", "wrong-pass").await,
            Err(AuthError::InvalidPassword)
        ));
        assert!(matches!(
            service.verify_login("nobody@example.com", "secret-pass").await,
            Err(AuthError::InvalidEmail)
        ));
    }

    #[tokio::test]
    async fn register_validates_form() {
        let service = service().await;

        let cases = [
            form("bad-email", "password1", "password1", "Name"),
            form("a@b.co", "short", "short", "Name"),
            form("a@b.co", "password1", "password2", "Name"),
            form("a@b.co", "password1", "password1", "   "),
        ];
        for case in &cases {
            assert!(matches!(
                service.register(case).await,
                Err(AuthError::Validation(_))
            ));
        }

        assert!(service.find_user_by_email("a@b.co").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let service = service().await;
        let registration = form("dup@example.com", "password1", "password1", "Dup");

        let user = service.register(&registration).await.unwrap();
        assert_eq!(user.name, "Dup");
        assert!(matches!(
            service.register(&registration).await,
            Err(AuthError::DuplicateEmail(ref e)) if e == "dup@example.com"
        ));

        let found = service.find_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.email, "dup@example.com");
    }
}

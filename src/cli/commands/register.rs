//! Create a user from the command line

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthError, AuthService, Registration, SeaOrmAuthService};

pub async fn cmd_register(
    config: &Config,
    email: &str,
    name: &str,
    password: &str,
) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let auth = SeaOrmAuthService::new(store, config.security.clone());

    let registration = Registration {
        email: email.to_string(),
        password: password.to_string(),
        confirm_password: password.to_string(),
        name: name.to_string(),
    };

    match auth.register(&registration).await {
        Ok(user) => {
            println!("✓ Registered {} (ID: {})", user.email, user.id);
            Ok(())
        }
        Err(AuthError::DuplicateEmail(email)) => {
            println!("An account for {email} already exists.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

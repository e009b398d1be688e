//! Account registration and login.

use chrono::Utc;
use uuid::Uuid;

use crate::auth::password;
use crate::auth::token::{TokenIssuer, TokenPair};
use crate::error::{ServiceError, ServiceResult};
use cadence_core::store::UserStore;
use cadence_core::user::User;

pub const USERNAME_TAKEN: &str = "Username already exists.";
pub const EMAIL_TAKEN: &str = "Email already registered.";

/// ## Summary
/// Registers a new account with a hashed password.
///
/// Username and email uniqueness are checked up front so the caller gets
/// a specific message; the unique constraints remain the backstop.
///
/// ## Errors
/// Returns `DuplicateAccount` when the username or email is taken, or a
/// store error if persistence fails.
#[tracing::instrument(skip(store, password))]
pub async fn register(
    store: &dyn UserStore,
    username: &str,
    email: &str,
    password: &str,
) -> ServiceResult<User> {
    if store.username_exists(username).await? {
        return Err(ServiceError::DuplicateAccount(USERNAME_TAKEN.to_string()));
    }
    if store.email_exists(email).await? {
        return Err(ServiceError::DuplicateAccount(EMAIL_TAKEN.to_string()));
    }

    let password_hash = password::hash_password(password)?;
    let user = User {
        id: Uuid::now_v7(),
        username: username.to_string(),
        email: email.to_string(),
        password_hash,
        created_at: Utc::now(),
    };
    store.insert(&user).await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(user)
}

/// ## Summary
/// Verifies credentials and mints an access/refresh token pair.
///
/// ## Errors
/// Returns `InvalidCredentials` when the username is unknown or the
/// password does not match; never reveals which.
#[tracing::instrument(skip(store, issuer, password))]
pub async fn login(
    store: &dyn UserStore,
    issuer: &TokenIssuer,
    username: &str,
    password: &str,
) -> ServiceResult<TokenPair> {
    let Some(user) = store.find_by_username(username).await? else {
        tracing::debug!("Login attempt for unknown username");
        return Err(ServiceError::InvalidCredentials);
    };

    password::verify_password(password, &user.password_hash)?;

    issuer.mint_pair(user.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::store::memory::MemoryUserStore;

    #[tokio::test]
    async fn register_then_login_yields_a_token_pair() {
        let store = MemoryUserStore::new();
        let issuer = TokenIssuer::new("test-secret".to_string(), 900, 86_400);

        let user = register(&store, "alice", "alice@example.com", "hunter2xyz")
            .await
            .expect("register");
        assert_eq!(user.username, "alice");

        let pair = login(&store, &issuer, "alice", "hunter2xyz")
            .await
            .expect("login");
        assert_eq!(issuer.verify_access(&pair.access).expect("verify"), user.id);
    }

    #[tokio::test]
    async fn duplicate_username_is_reported_with_the_exact_message() {
        let store = MemoryUserStore::new();
        register(&store, "alice", "alice@example.com", "hunter2xyz")
            .await
            .expect("register");

        let result = register(&store, "alice", "new@example.com", "hunter2xyz").await;
        match result {
            Err(ServiceError::DuplicateAccount(message)) => {
                assert_eq!(message, USERNAME_TAKEN);
            }
            other => panic!("expected DuplicateAccount, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_reported_with_the_exact_message() {
        let store = MemoryUserStore::new();
        register(&store, "alice", "alice@example.com", "hunter2xyz")
            .await
            .expect("register");

        let result = register(&store, "bob", "alice@example.com", "hunter2xyz").await;
        match result {
            Err(ServiceError::DuplicateAccount(message)) => {
                assert_eq!(message, EMAIL_TAKEN);
            }
            other => panic!("expected DuplicateAccount, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_both_yield_invalid_credentials() {
        let store = MemoryUserStore::new();
        let issuer = TokenIssuer::new("test-secret".to_string(), 900, 86_400);
        register(&store, "alice", "alice@example.com", "hunter2xyz")
            .await
            .expect("register");

        let wrong = login(&store, &issuer, "alice", "wrong").await;
        assert!(matches!(wrong, Err(ServiceError::InvalidCredentials)));

        let unknown = login(&store, &issuer, "mallory", "hunter2xyz").await;
        assert!(matches!(unknown, Err(ServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn stored_passwords_are_hashed() {
        let store = MemoryUserStore::new();
        register(&store, "alice", "alice@example.com", "hunter2xyz")
            .await
            .expect("register");

        let user = store
            .find_by_username("alice")
            .await
            .expect("find")
            .expect("present");
        assert_ne!(user.password_hash, "hunter2xyz");
        assert!(user.password_hash.starts_with("$argon2"));
    }
}

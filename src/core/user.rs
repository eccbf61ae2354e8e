//! Account business logic - registration, credential checks and the admin view.
//!
//! Sessions and cookies belong to the web layer; this module only answers
//! "who is this" and "may they do that".

use crate::{
    config::settings::AdminSettings,
    entities::{User, Wedding, user, wedding},
    errors::{Error, Result},
};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use serde::Serialize;
use tracing::{info, warn};

/// Hashes a password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Checks a password against a stored PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Looks up an account by email (case-insensitive).
pub async fn get_user_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Email.eq(normalize_email(email)))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Looks up an account by id.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

async fn insert_user(
    db: &DatabaseConnection,
    email: &str,
    name: Option<String>,
    password: &str,
    is_admin: bool,
) -> Result<user::Model> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(Error::Validation {
            message: "Email and password are required".to_string(),
        });
    }

    if get_user_by_email(db, &email).await?.is_some() {
        return Err(Error::EmailTaken { email });
    }

    let account = user::ActiveModel {
        email: Set(email),
        name: Set(name),
        password_hash: Set(hash_password(password)?),
        is_admin: Set(is_admin),
        ..Default::default()
    };
    account.insert(db).await.map_err(Into::into)
}

/// Registers a regular (non-admin) account.
///
/// # Errors
/// - `Validation` if email or password is empty
/// - `EmailTaken` if the email already has an account
pub async fn register_user(
    db: &DatabaseConnection,
    email: &str,
    name: Option<&str>,
    password: &str,
) -> Result<user::Model> {
    let name = crate::core::input::non_empty(name);
    let account = insert_user(db, email, name, password, false).await?;
    info!("Registered user {} ({})", account.id, account.email);
    Ok(account)
}

/// Checks credentials and returns the account on success.
///
/// Unknown emails, wrong passwords and unreadable stored hashes all give
/// `InvalidCredentials`.
pub async fn authenticate(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<user::Model> {
    let account = get_user_by_email(db, email)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    match verify_password(password, &account.password_hash) {
        Ok(true) => Ok(account),
        Ok(false) => Err(Error::InvalidCredentials),
        Err(e) => {
            warn!("Stored password hash of user {} is unreadable: {e}", account.id);
            Err(Error::InvalidCredentials)
        }
    }
}

/// Creates the administrator account unless an account with that email
/// already exists. Returns the account either way.
pub async fn ensure_admin(db: &DatabaseConnection, admin: &AdminSettings) -> Result<user::Model> {
    if let Some(existing) = get_user_by_email(db, &admin.email).await? {
        return Ok(existing);
    }

    let account = insert_user(
        db,
        &admin.email,
        Some(admin.name.clone()),
        &admin.password,
        true,
    )
    .await?;
    info!("Created admin account {}", account.email);
    Ok(account)
}

/// One row of the admin user list.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    /// The account
    pub user: user::Model,
    /// Number of weddings it owns
    pub wedding_count: u64,
}

/// Lists every account with the number of weddings it owns, ordered by id.
pub async fn list_users_with_wedding_counts(db: &DatabaseConnection) -> Result<Vec<UserSummary>> {
    let users = User::find().order_by_asc(user::Column::Id).all(db).await?;

    let mut summaries = Vec::with_capacity(users.len());
    for account in users {
        let wedding_count = Wedding::find()
            .filter(wedding::Column::UserId.eq(account.id))
            .count(db)
            .await?;
        summaries.push(UserSummary {
            user: account,
            wedding_count,
        });
    }
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_hash_and_verify() -> Result<()> {
        let hash = hash_password("s3cret")?;
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret", &hash)?);
        assert!(!verify_password("wrong", &hash)?);
        Ok(())
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let result = verify_password("s3cret", "not-a-hash");
        assert!(matches!(result, Err(Error::PasswordHash { .. })));
    }

    #[tokio::test]
    async fn test_register_normalizes_email() -> Result<()> {
        let db = setup_test_db().await?;
        let account = register_user(&db, "  Anna@Example.COM ", Some(" Anna "), "pw").await?;
        assert_eq!(account.email, "anna@example.com");
        assert_eq!(account.name.as_deref(), Some("Anna"));
        assert!(!account.is_admin);
        Ok(())
    }

    #[tokio::test]
    async fn test_register_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = register_user(&db, "", None, "pw").await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = register_user(&db, "a@b.c", None, "").await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        register_user(&db, "a@b.c", None, "pw").await?;
        let result = register_user(&db, "A@B.C", None, "other").await;
        assert!(matches!(result, Err(Error::EmailTaken { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate() -> Result<()> {
        let db = setup_test_db().await?;
        let account = register_user(&db, "a@b.c", None, "pw").await?;

        let logged_in = authenticate(&db, "A@b.c", "pw").await?;
        assert_eq!(logged_in.id, account.id);
        assert_eq!(get_user_by_id(&db, account.id).await?, Some(account));

        let wrong = authenticate(&db, "a@b.c", "nope").await;
        assert!(matches!(wrong, Err(Error::InvalidCredentials)));

        let unknown = authenticate(&db, "x@y.z", "pw").await;
        assert!(matches!(unknown, Err(Error::InvalidCredentials)));
        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate_with_corrupted_hash() -> Result<()> {
        let db = setup_test_db().await?;
        let broken = user::ActiveModel {
            email: Set("broken@example.com".to_string()),
            name: Set(None),
            password_hash: Set("not-a-phc-string".to_string()),
            is_admin: Set(false),
            ..Default::default()
        };
        broken.insert(&db).await?;

        let result = authenticate(&db, "broken@example.com", "pw").await;
        assert!(matches!(result, Err(Error::InvalidCredentials)));
        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = AdminSettings::default();

        let first = ensure_admin(&db, &settings).await?;
        assert!(first.is_admin);
        let second = ensure_admin(&db, &settings).await?;
        assert_eq!(first.id, second.id);

        authenticate(&db, &settings.email, &settings.password).await?;
        assert_eq!(User::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_users_with_wedding_counts() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "owner@example.com").await?;
        let other = create_test_user(&db, "other@example.com").await?;
        create_test_wedding(&db, &owner, "First").await?;
        create_test_wedding(&db, &owner, "Second").await?;

        let summaries = list_users_with_wedding_counts(&db).await?;
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].user.id, owner.id);
        assert_eq!(summaries[0].wedding_count, 2);
        assert_eq!(summaries[1].user.id, other.id);
        assert_eq!(summaries[1].wedding_count, 0);
        Ok(())
    }
}

//! Shared test utilities for the wedding planner.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{expense, guest, user, wedding},
    entities,
    errors::Result,
};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Registers a regular account with password `"password"`.
pub async fn create_test_user(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::user::Model> {
    user::register_user(db, email, None, "password").await
}

/// Inserts an admin account directly, skipping the settings plumbing.
///
/// # Defaults
/// * `email`: `"admin@example.com"`
/// * `password`: `"admin"`
pub async fn create_test_admin(db: &DatabaseConnection) -> Result<entities::user::Model> {
    let admin = entities::user::ActiveModel {
        email: Set("admin@example.com".to_string()),
        name: Set(Some("Admin".to_string())),
        password_hash: Set(user::hash_password("admin")?),
        is_admin: Set(true),
        ..Default::default()
    };
    Ok(admin.insert(db).await?)
}

/// Creates an undated wedding owned by `owner`.
pub async fn create_test_wedding(
    db: &DatabaseConnection,
    owner: &entities::user::Model,
    name: &str,
) -> Result<entities::wedding::Model> {
    wedding::create_wedding(db, owner, name, None).await
}

/// Sets up a complete test environment with one owner and one wedding.
/// Returns (db, owner, wedding) for common test scenarios.
pub async fn setup_with_wedding() -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::wedding::Model,
)> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner@example.com").await?;
    let wedding = create_test_wedding(&db, &owner, "Test Wedding").await?;
    Ok((db, owner, wedding))
}

/// Adds a guest. With `family_count` set the guest is a family named `name`,
/// otherwise a single person named `name`.
pub async fn add_test_guest(
    db: &DatabaseConnection,
    wedding_id: i64,
    name: &str,
    family_count: Option<i32>,
) -> Result<entities::guest::Model> {
    let form = match family_count {
        Some(count) => guest::GuestInput {
            family_name: Some(name.to_string()),
            family_count: Some(count.to_string()),
            ..Default::default()
        },
        None => guest::GuestInput {
            name: Some(name.to_string()),
            ..Default::default()
        },
    };
    guest::add_guest(db, wedding_id, &form).await
}

/// Adds an expense from raw quantity and unit price.
///
/// # Defaults
/// * `category`: `"venue"`
/// * `item`: `"Hall"`
/// * no plan, fact or prepayment
pub async fn create_test_expense(
    db: &DatabaseConnection,
    wedding_id: i64,
    quantity: Option<&str>,
    unit_price: Option<&str>,
) -> Result<entities::expense::Model> {
    let form = expense::ExpenseInput {
        category: Some("venue".to_string()),
        item: Some("Hall".to_string()),
        quantity: quantity.map(str::to_string),
        unit_price: unit_price.map(str::to_string),
        ..Default::default()
    };
    expense::add_expense(db, wedding_id, &form).await
}

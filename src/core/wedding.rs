//! Wedding business logic - creation, ownership checks, budget and deletion.
//!
//! Admins see every wedding; other users only see the weddings they own.

use crate::{
    core::input,
    entities::{
        Expense, Guest, SeatingTable, SponsorGift, Task, Wedding, expense, guest, seating_table,
        sponsor_gift, task, user, wedding,
    },
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use std::cmp::Reverse;
use tracing::info;

/// Creates a wedding owned by `owner`. An unparsable date is dropped.
///
/// # Errors
/// `Validation` if the name is empty.
pub async fn create_wedding(
    db: &DatabaseConnection,
    owner: &user::Model,
    name: &str,
    raw_date: Option<&str>,
) -> Result<wedding::Model> {
    let name = input::non_empty(Some(name)).ok_or_else(|| Error::Validation {
        message: "Wedding name cannot be empty".to_string(),
    })?;

    let wedding = wedding::ActiveModel {
        name: Set(name),
        date: Set(input::parse_date(raw_date)),
        user_id: Set(Some(owner.id)),
        budget: Set(None),
        ..Default::default()
    };
    let wedding = wedding.insert(db).await?;
    info!("User {} created wedding {}", owner.id, wedding.id);
    Ok(wedding)
}

/// Loads a wedding or fails with `WeddingNotFound`.
pub async fn get_wedding<C>(db: &C, wedding_id: i64) -> Result<wedding::Model>
where
    C: ConnectionTrait,
{
    Wedding::find_by_id(wedding_id)
        .one(db)
        .await?
        .ok_or(Error::WeddingNotFound { id: wedding_id })
}

/// Whether `account` may see and edit `wedding`.
#[must_use]
pub fn can_access(account: &user::Model, wedding: &wedding::Model) -> bool {
    account.is_admin || wedding.user_id == Some(account.id)
}

/// Loads a wedding on behalf of `account`.
///
/// # Errors
/// - `WeddingNotFound` if it does not exist
/// - `Forbidden` if `account` is neither its owner nor an admin
pub async fn get_wedding_for_user(
    db: &DatabaseConnection,
    wedding_id: i64,
    account: &user::Model,
) -> Result<wedding::Model> {
    let wedding = get_wedding(db, wedding_id).await?;
    if can_access(account, &wedding) {
        Ok(wedding)
    } else {
        Err(Error::Forbidden {
            user_id: account.id,
            wedding_id,
        })
    }
}

/// Weddings visible to `account`, latest date first, undated ones last.
pub async fn list_weddings_for_user(
    db: &DatabaseConnection,
    account: &user::Model,
) -> Result<Vec<wedding::Model>> {
    let mut query = Wedding::find();
    if !account.is_admin {
        query = query.filter(wedding::Column::UserId.eq(account.id));
    }
    let mut weddings = query.all(db).await?;
    // None sorts below Some, so reversing puts undated weddings last
    weddings.sort_by_key(|w| (Reverse(w.date), w.id));
    Ok(weddings)
}

/// Sets the budget from raw form input. Unparsable input sets it to zero.
pub async fn update_budget(
    db: &DatabaseConnection,
    wedding_id: i64,
    raw_budget: Option<&str>,
) -> Result<wedding::Model> {
    let wedding = get_wedding(db, wedding_id).await?;
    let mut active: wedding::ActiveModel = wedding.into();
    active.budget = Set(Some(input::parse_amount(raw_budget).unwrap_or(0.0)));
    active.update(db).await.map_err(Into::into)
}

/// Deletes a wedding together with its gifts, guests, tables, expenses and tasks.
pub async fn delete_wedding(db: &DatabaseConnection, wedding_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let wedding = get_wedding(&txn, wedding_id).await?;

    SponsorGift::delete_many()
        .filter(sponsor_gift::Column::WeddingId.eq(wedding_id))
        .exec(&txn)
        .await?;
    Guest::delete_many()
        .filter(guest::Column::WeddingId.eq(wedding_id))
        .exec(&txn)
        .await?;
    SeatingTable::delete_many()
        .filter(seating_table::Column::WeddingId.eq(wedding_id))
        .exec(&txn)
        .await?;
    Expense::delete_many()
        .filter(expense::Column::WeddingId.eq(wedding_id))
        .exec(&txn)
        .await?;
    Task::delete_many()
        .filter(task::Column::WeddingId.eq(wedding_id))
        .exec(&txn)
        .await?;
    wedding.delete(&txn).await?;

    txn.commit().await?;
    info!("Deleted wedding {wedding_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use chrono::NaiveDate;
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn test_create_wedding() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "owner@example.com").await?;

        let wedding = create_wedding(&db, &owner, "  Anna & Tom ", Some("2026-06-20")).await?;
        assert_eq!(wedding.name, "Anna & Tom");
        assert_eq!(wedding.date, NaiveDate::from_ymd_opt(2026, 6, 20));
        assert_eq!(wedding.user_id, Some(owner.id));
        assert!(wedding.budget.is_none());

        let undated = create_wedding(&db, &owner, "Later", Some("June")).await?;
        assert!(undated.date.is_none());

        let result = create_wedding(&db, &owner, "   ", None).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_access_rules() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "owner@example.com").await?;
        let stranger = create_test_user(&db, "stranger@example.com").await?;
        let admin = create_test_admin(&db).await?;
        let wedding = create_test_wedding(&db, &owner, "Ours").await?;

        assert_eq!(get_wedding_for_user(&db, wedding.id, &owner).await?, wedding);
        assert_eq!(get_wedding_for_user(&db, wedding.id, &admin).await?, wedding);
        assert!(matches!(
            get_wedding_for_user(&db, wedding.id, &stranger).await,
            Err(Error::Forbidden { .. })
        ));
        assert!(matches!(
            get_wedding_for_user(&db, 999, &admin).await,
            Err(Error::WeddingNotFound { id: 999 })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_weddings_ordering_and_visibility() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "owner@example.com").await?;
        let other = create_test_user(&db, "other@example.com").await?;
        let admin = create_test_admin(&db).await?;

        let undated = create_wedding(&db, &owner, "Undated", None).await?;
        let early = create_wedding(&db, &owner, "Early", Some("2026-05-01")).await?;
        let late = create_wedding(&db, &owner, "Late", Some("2026-09-01")).await?;
        let foreign = create_wedding(&db, &other, "Foreign", Some("2027-01-01")).await?;

        let mine: Vec<i64> = list_weddings_for_user(&db, &owner)
            .await?
            .iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(mine, vec![late.id, early.id, undated.id]);

        let all: Vec<i64> = list_weddings_for_user(&db, &admin)
            .await?
            .iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(all, vec![foreign.id, late.id, early.id, undated.id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_budget_tolerates_garbage() -> Result<()> {
        let (db, _owner, wedding) = setup_with_wedding().await?;

        let updated = update_budget(&db, wedding.id, Some("15000")).await?;
        assert_eq!(updated.budget, Some(15000.0));

        let updated = update_budget(&db, wedding.id, Some("lots")).await?;
        assert_eq!(updated.budget, Some(0.0));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_wedding_cascades() -> Result<()> {
        let (db, owner, wedding) = setup_with_wedding().await?;
        let keep = create_test_wedding(&db, &owner, "Keep").await?;
        let guest = add_test_guest(&db, wedding.id, "Anna", None).await?;
        add_test_guest(&db, keep.id, "Bob", None).await?;
        crate::core::seating::new_table(&db, wedding.id, None, None, 12).await?;
        create_test_expense(&db, wedding.id, Some("2"), Some("50")).await?;
        crate::core::task::add_task(&db, wedding.id, "Book venue").await?;
        crate::core::sponsor::add_sponsor_gift(&db, wedding.id, guest.id, Some("100"), None)
            .await?;

        delete_wedding(&db, wedding.id).await?;

        assert!(Wedding::find_by_id(wedding.id).one(&db).await?.is_none());
        assert_eq!(Guest::find().count(&db).await?, 1);
        assert_eq!(SeatingTable::find().count(&db).await?, 0);
        assert_eq!(Expense::find().count(&db).await?, 0);
        assert_eq!(Task::find().count(&db).await?, 0);
        assert_eq!(SponsorGift::find().count(&db).await?, 0);

        let missing = delete_wedding(&db, wedding.id).await;
        assert!(matches!(missing, Err(Error::WeddingNotFound { .. })));
        Ok(())
    }
}

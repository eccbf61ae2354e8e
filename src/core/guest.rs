//! Guest business logic - adding, editing and removing guests.
//!
//! Seating assignment is handled by `core::seating`; editing a guest here
//! never changes where they sit.

use crate::{
    core::{input, wedding::get_wedding},
    entities::{Guest, GuestSide, GuestStatus, SponsorGift, guest, sponsor_gift},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Raw guest form, exactly as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuestInput {
    /// Individual name
    pub name: Option<String>,
    /// Family name
    pub family_name: Option<String>,
    /// Family head-count
    pub family_count: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// `invited`, `confirmed` or `declined`
    pub status: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// `groom`, `bride` or `other`
    pub side: Option<String>,
    /// VIP checkbox
    #[serde(default)]
    pub is_vip: bool,
    /// Child checkbox
    #[serde(default)]
    pub is_child: bool,
    /// Legacy table number
    pub table_no: Option<String>,
}

impl GuestInput {
    fn status(&self) -> Option<GuestStatus> {
        self.status.as_deref().and_then(GuestStatus::parse)
    }

    fn side(&self) -> Option<GuestSide> {
        self.side.as_deref().and_then(GuestSide::parse)
    }

    fn family_count(&self) -> Option<i32> {
        input::parse_count(self.family_count.as_deref())
    }

    fn table_no(&self) -> Option<i32> {
        input::parse_count(self.table_no.as_deref())
    }
}

/// Loads a guest or fails with `GuestNotFound`.
pub async fn get_guest<C>(db: &C, guest_id: i64) -> Result<guest::Model>
where
    C: ConnectionTrait,
{
    Guest::find_by_id(guest_id)
        .one(db)
        .await?
        .ok_or(Error::GuestNotFound { id: guest_id })
}

/// All guests of a wedding, in creation order.
pub async fn list_guests<C>(db: &C, wedding_id: i64) -> Result<Vec<guest::Model>>
where
    C: ConnectionTrait,
{
    Guest::find()
        .filter(guest::Column::WeddingId.eq(wedding_id))
        .order_by_asc(guest::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds a guest. A guest may have neither name nor family name; status
/// defaults to invited. The new guest is unseated.
pub async fn add_guest(
    db: &DatabaseConnection,
    wedding_id: i64,
    form: &GuestInput,
) -> Result<guest::Model> {
    get_wedding(db, wedding_id).await?;

    let guest = guest::ActiveModel {
        wedding_id: Set(wedding_id),
        name: Set(input::non_empty(form.name.as_deref())),
        family_name: Set(input::non_empty(form.family_name.as_deref())),
        family_count: Set(form.family_count()),
        phone: Set(input::non_empty(form.phone.as_deref())),
        status: Set(form.status().unwrap_or_default()),
        notes: Set(input::non_empty(form.notes.as_deref())),
        side: Set(form.side()),
        is_vip: Set(form.is_vip),
        is_child: Set(form.is_child),
        table_no: Set(form.table_no()),
        table_id: Set(None),
        table_seat: Set(None),
        ..Default::default()
    };
    let guest = guest.insert(db).await?;
    info!("Added guest {} to wedding {wedding_id}", guest.id);
    Ok(guest)
}

/// Replaces a guest's details. A missing or unknown status keeps the current one.
pub async fn edit_guest(
    db: &DatabaseConnection,
    guest_id: i64,
    form: &GuestInput,
) -> Result<guest::Model> {
    let guest = get_guest(db, guest_id).await?;
    let status = form.status().unwrap_or(guest.status);

    let mut active: guest::ActiveModel = guest.into();
    active.name = Set(input::non_empty(form.name.as_deref()));
    active.family_name = Set(input::non_empty(form.family_name.as_deref()));
    active.family_count = Set(form.family_count());
    active.phone = Set(input::non_empty(form.phone.as_deref()));
    active.status = Set(status);
    active.notes = Set(input::non_empty(form.notes.as_deref()));
    active.side = Set(form.side());
    active.is_vip = Set(form.is_vip);
    active.is_child = Set(form.is_child);
    active.table_no = Set(form.table_no());
    active.update(db).await.map_err(Into::into)
}

/// Removes a guest and the gifts recorded for them. Their seat is freed.
pub async fn delete_guest(db: &DatabaseConnection, guest_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let guest = get_guest(&txn, guest_id).await?;
    SponsorGift::delete_many()
        .filter(sponsor_gift::Column::GuestId.eq(guest_id))
        .exec(&txn)
        .await?;
    guest.delete(&txn).await?;

    txn.commit().await?;
    info!("Deleted guest {guest_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::PaginatorTrait;

    fn family_form(family_name: &str, count: &str) -> GuestInput {
        GuestInput {
            family_name: Some(family_name.to_string()),
            family_count: Some(count.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_add_guest_defaults() -> Result<()> {
        let (db, _owner, wedding) = setup_with_wedding().await?;

        let form = GuestInput {
            name: Some("  Anna ".to_string()),
            phone: Some(String::new()),
            status: Some("maybe".to_string()),
            side: Some("bride".to_string()),
            is_vip: true,
            ..Default::default()
        };
        let guest = add_guest(&db, wedding.id, &form).await?;

        assert_eq!(guest.name.as_deref(), Some("Anna"));
        assert!(guest.phone.is_none());
        assert_eq!(guest.status, GuestStatus::Invited);
        assert_eq!(guest.side, Some(GuestSide::Bride));
        assert!(guest.is_vip);
        assert!(!guest.is_child);
        assert!(guest.table_id.is_none());
        assert_eq!(guest.persons(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_family_guest() -> Result<()> {
        let (db, _owner, wedding) = setup_with_wedding().await?;

        let guest = add_guest(&db, wedding.id, &family_form("Smiths", "4")).await?;
        assert_eq!(guest.persons(), 4);
        assert_eq!(guest.display_name(), "Smiths");
        assert!(guest.name.is_none());

        let garbled = add_guest(&db, wedding.id, &family_form("Does", "four")).await?;
        assert!(garbled.family_count.is_none());
        assert_eq!(garbled.persons(), 1);

        let anonymous = add_guest(&db, wedding.id, &GuestInput::default()).await?;
        assert_eq!(anonymous.display_name(), "Unnamed guest");
        Ok(())
    }

    #[tokio::test]
    async fn test_add_guest_unknown_wedding() -> Result<()> {
        let db = setup_test_db().await?;
        let result = add_guest(&db, 42, &GuestInput::default()).await;
        assert!(matches!(result, Err(Error::WeddingNotFound { id: 42 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_guest_keeps_status_and_seat() -> Result<()> {
        let (db, _owner, wedding) = setup_with_wedding().await?;
        let table = crate::core::seating::new_table(&db, wedding.id, None, None, 12).await?;
        let guest = add_test_guest(&db, wedding.id, "Anna", None).await?;
        crate::core::seating::assign_guest(&db, guest.id, Some(table.id), Some(2)).await?;

        let form = GuestInput {
            status: Some("confirmed".to_string()),
            ..family_form("Smiths", "3")
        };
        let edited = edit_guest(&db, guest.id, &form).await?;
        assert_eq!(edited.status, GuestStatus::Confirmed);
        assert_eq!(edited.persons(), 3);
        assert!(edited.name.is_none());

        let edited = edit_guest(&db, guest.id, &family_form("Smiths", "3")).await?;
        assert_eq!(edited.status, GuestStatus::Confirmed);
        assert_eq!(edited.table_id, Some(table.id));
        assert_eq!(edited.table_seat, Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_guest_removes_gifts() -> Result<()> {
        let (db, _owner, wedding) = setup_with_wedding().await?;
        let guest = add_test_guest(&db, wedding.id, "Anna", None).await?;
        let other = add_test_guest(&db, wedding.id, "Bob", None).await?;
        crate::core::sponsor::add_sponsor_gift(&db, wedding.id, guest.id, Some("50"), None)
            .await?;
        crate::core::sponsor::add_sponsor_gift(&db, wedding.id, other.id, Some("70"), None)
            .await?;

        delete_guest(&db, guest.id).await?;

        let remaining = list_guests(&db, wedding.id).await?;
        assert_eq!(remaining, vec![other]);
        assert_eq!(SponsorGift::find().count(&db).await?, 1);

        let missing = delete_guest(&db, guest.id).await;
        assert!(matches!(missing, Err(Error::GuestNotFound { .. })));
        Ok(())
    }
}

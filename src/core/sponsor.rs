//! Sponsor gift business logic - gifts received from guests.

use crate::{
    core::{finance, guest::get_guest, input, wedding::get_wedding},
    entities::{SponsorGift, sponsor_gift},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Records a gift from a guest of this wedding. The amount may be absent.
///
/// # Errors
/// - `WeddingNotFound` if the wedding does not exist
/// - `GuestNotFound` if the guest does not exist or belongs to another wedding
pub async fn add_sponsor_gift(
    db: &DatabaseConnection,
    wedding_id: i64,
    guest_id: i64,
    raw_amount: Option<&str>,
    notes: Option<&str>,
) -> Result<sponsor_gift::Model> {
    get_wedding(db, wedding_id).await?;
    let guest = get_guest(db, guest_id).await?;
    if guest.wedding_id != wedding_id {
        return Err(Error::GuestNotFound { id: guest_id });
    }

    let gift = sponsor_gift::ActiveModel {
        wedding_id: Set(wedding_id),
        guest_id: Set(guest_id),
        amount: Set(input::parse_amount(raw_amount)),
        notes: Set(input::non_empty(notes)),
        ..Default::default()
    };
    let gift = gift.insert(db).await?;
    info!("Recorded gift {} from guest {guest_id}", gift.id);
    Ok(gift)
}

/// All gifts of a wedding, in creation order.
pub async fn list_sponsor_gifts<C>(db: &C, wedding_id: i64) -> Result<Vec<sponsor_gift::Model>>
where
    C: ConnectionTrait,
{
    SponsorGift::find()
        .filter(sponsor_gift::Column::WeddingId.eq(wedding_id))
        .order_by_asc(sponsor_gift::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Removes a gift.
pub async fn delete_sponsor_gift(db: &DatabaseConnection, gift_id: i64) -> Result<()> {
    let gift = SponsorGift::find_by_id(gift_id)
        .one(db)
        .await?
        .ok_or(Error::SponsorGiftNotFound { id: gift_id })?;
    gift.delete(db).await?;
    Ok(())
}

/// Sum of a wedding's gift amounts.
pub async fn sponsor_total(db: &DatabaseConnection, wedding_id: i64) -> Result<f64> {
    let gifts = list_sponsor_gifts(db, wedding_id).await?;
    Ok(finance::sponsor_total(&gifts))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_gifts_and_total() -> Result<()> {
        let (db, _owner, wedding) = setup_with_wedding().await?;
        let guest = add_test_guest(&db, wedding.id, "Anna", None).await?;

        add_sponsor_gift(&db, wedding.id, guest.id, Some("100"), Some("envelope")).await?;
        let vase = add_sponsor_gift(&db, wedding.id, guest.id, Some(""), Some("vase")).await?;
        add_sponsor_gift(&db, wedding.id, guest.id, Some("50.5"), None).await?;

        assert!(vase.amount.is_none());
        assert_eq!(sponsor_total(&db, wedding.id).await?, 150.5);

        delete_sponsor_gift(&db, vase.id).await?;
        assert_eq!(list_sponsor_gifts(&db, wedding.id).await?.len(), 2);
        assert!(matches!(
            delete_sponsor_gift(&db, vase.id).await,
            Err(Error::SponsorGiftNotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_gift_from_foreign_guest_rejected() -> Result<()> {
        let (db, owner, wedding) = setup_with_wedding().await?;
        let other = create_test_wedding(&db, &owner, "Other").await?;
        let stranger = add_test_guest(&db, other.id, "Stranger", None).await?;

        let result = add_sponsor_gift(&db, wedding.id, stranger.id, Some("10"), None).await;
        assert!(matches!(result, Err(Error::GuestNotFound { .. })));
        assert_eq!(sponsor_total(&db, wedding.id).await?, 0.0);
        Ok(())
    }
}

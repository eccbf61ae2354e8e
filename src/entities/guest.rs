//! Guest entity - a person or a family unit to be invited and seated.
//!
//! A guest record occupies `persons` seats: its family head-count when that is
//! positive, otherwise one. A guest is either unseated (`table_id` is `None`)
//! or seated at one table of its own wedding, optionally at a seat index.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Invitation status of a guest
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum GuestStatus {
    /// Invitation sent, no answer yet
    #[default]
    #[sea_orm(string_value = "invited")]
    Invited,
    /// Will attend
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Will not attend
    #[sea_orm(string_value = "declined")]
    Declined,
}

impl GuestStatus {
    /// Parses a form value; unknown or empty strings give `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "invited" => Some(Self::Invited),
            "confirmed" => Some(Self::Confirmed),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }
}

/// Which side of the couple a guest belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum GuestSide {
    /// Groom's side
    #[sea_orm(string_value = "groom")]
    Groom,
    /// Bride's side
    #[sea_orm(string_value = "bride")]
    Bride,
    /// Shared friends, colleagues, ...
    #[sea_orm(string_value = "other")]
    Other,
}

impl GuestSide {
    /// Parses a form value; unknown or empty strings give `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "groom" => Some(Self::Groom),
            "bride" => Some(Self::Bride),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Guest database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guests")]
pub struct Model {
    /// Unique identifier for the guest
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Wedding this guest is invited to
    pub wedding_id: i64,
    /// Individual name; may be empty when a family name is given
    pub name: Option<String>,
    /// Family name for a family invitation (e.g. "The Smiths")
    pub family_name: Option<String>,
    /// Family head-count; absent or non-positive means one person
    pub family_count: Option<i32>,
    /// Contact phone
    pub phone: Option<String>,
    /// Invitation status
    pub status: GuestStatus,
    /// Free-text notes
    pub notes: Option<String>,
    /// Groom, bride or other
    pub side: Option<GuestSide>,
    /// VIP flag
    pub is_vip: bool,
    /// Child flag
    pub is_child: bool,
    /// Legacy numbered seating, kept alongside table entities
    pub table_no: Option<i32>,
    /// Table the guest is seated at
    pub table_id: Option<i64>,
    /// Seat index within the table
    pub table_seat: Option<i32>,
}

impl Model {
    /// Seats this record occupies.
    #[must_use]
    pub fn persons(&self) -> u32 {
        crate::core::allocator::persons(self.family_count)
    }

    /// Family name, else individual name, else a placeholder.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.family_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Unnamed guest")
    }
}

/// Defines relationships between Guest and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each guest belongs to one wedding
    #[sea_orm(
        belongs_to = "super::wedding::Entity",
        from = "Column::WeddingId",
        to = "super::wedding::Column::Id",
        on_delete = "Cascade"
    )]
    Wedding,
    /// A guest may be seated at one table
    #[sea_orm(
        belongs_to = "super::seating_table::Entity",
        from = "Column::TableId",
        to = "super::seating_table::Column::Id",
        on_delete = "SetNull"
    )]
    SeatingTable,
    /// Gifts this guest has given
    #[sea_orm(has_many = "super::sponsor_gift::Entity")]
    SponsorGifts,
}

impl Related<super::wedding::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wedding.def()
    }
}

impl Related<super::seating_table::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeatingTable.def()
    }
}

impl Related<super::sponsor_gift::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SponsorGifts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

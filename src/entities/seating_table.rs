//! Seating table entity - a physical table at the venue.
//!
//! The sum of `persons` over the guests seated here must not exceed `seats`
//! when the allocator did the seating. Manual assignment may overbook, which
//! is reported back to the caller as a warning.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Seat capacity used when nothing else is configured
pub const DEFAULT_SEATS: i32 = 12;

/// Seating table database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tables")]
pub struct Model {
    /// Unique identifier for the table
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Wedding this table belongs to
    pub wedding_id: i64,
    /// Display name (e.g. "Table 3")
    pub name: String,
    /// Seat capacity, always positive
    pub seats: i32,
    /// Display position, zero-based
    pub order: i32,
}

/// Defines relationships between `SeatingTable` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each table belongs to one wedding
    #[sea_orm(
        belongs_to = "super::wedding::Entity",
        from = "Column::WeddingId",
        to = "super::wedding::Column::Id",
        on_delete = "Cascade"
    )]
    Wedding,
    /// Guests seated at this table
    #[sea_orm(has_many = "super::guest::Entity")]
    Guests,
}

impl Related<super::wedding::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wedding.def()
    }
}

impl Related<super::guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

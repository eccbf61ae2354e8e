//! Sponsor gift entity - money or a present received from a guest.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sponsor gift database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sponsor_gifts")]
pub struct Model {
    /// Unique identifier for the gift
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Wedding the gift was given for
    pub wedding_id: i64,
    /// Guest who gave it
    pub guest_id: i64,
    /// Monetary value, if known
    pub amount: Option<f64>,
    /// Free-text description
    pub notes: Option<String>,
}

/// Defines relationships between `SponsorGift` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each gift belongs to one wedding
    #[sea_orm(
        belongs_to = "super::wedding::Entity",
        from = "Column::WeddingId",
        to = "super::wedding::Column::Id",
        on_delete = "Cascade"
    )]
    Wedding,
    /// Each gift comes from one guest
    #[sea_orm(
        belongs_to = "super::guest::Entity",
        from = "Column::GuestId",
        to = "super::guest::Column::Id",
        on_delete = "Cascade"
    )]
    Guest,
}

impl Related<super::wedding::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wedding.def()
    }
}

impl Related<super::guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Wedding entity - a single event being planned.
//!
//! Owns expenses, guests, tasks, tables and sponsor gifts. Every child table
//! declares `ON DELETE CASCADE` towards it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Wedding database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weddings")]
pub struct Model {
    /// Unique identifier for the wedding
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, usually the couple's names
    pub name: String,
    /// Date of the celebration, if already fixed
    pub date: Option<Date>,
    /// Owning user; `None` for weddings created before accounts existed
    pub user_id: Option<i64>,
    /// Overall budget
    pub budget: Option<f64>,
}

/// Defines relationships between Wedding and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each wedding belongs to one owner
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    /// Budget line items
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// Guest list
    #[sea_orm(has_many = "super::guest::Entity")]
    Guests,
    /// Checklist
    #[sea_orm(has_many = "super::task::Entity")]
    Tasks,
    /// Seating tables
    #[sea_orm(has_many = "super::seating_table::Entity")]
    Tables,
    /// Gifts received from guests
    #[sea_orm(has_many = "super::sponsor_gift::Entity")]
    SponsorGifts,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::guest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guests.def()
    }
}

impl Related<super::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl Related<super::seating_table::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tables.def()
    }
}

impl Related<super::sponsor_gift::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SponsorGifts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

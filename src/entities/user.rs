//! User entity - an account that owns weddings.
//!
//! Admins can see every wedding; everyone else only the weddings they own.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login email, stored trimmed and lower-cased
    #[sea_orm(unique)]
    pub email: String,
    /// Display name
    pub name: Option<String>,
    /// Argon2 PHC hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether this account can see all users and weddings
    pub is_admin: bool,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user owns many weddings
    #[sea_orm(has_many = "super::wedding::Entity")]
    Weddings,
}

impl Related<super::wedding::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Weddings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Expense entity - one budget line item of a wedding.
//!
//! `total` and `difference` are derived columns. The save hook below runs the
//! expense aggregator on every insert and update, so a stored row is always
//! consistent with its quantity, unit price, plan and fact. Figures left out of
//! a partial update are taken from the stored row.

use crate::core::finance::{self, ExpenseFigures};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Wedding this expense belongs to
    pub wedding_id: i64,
    /// Grouping such as "venue" or "music"
    pub category: String,
    /// What is being paid for
    pub item: String,
    /// Number of units
    pub quantity: Option<f64>,
    /// Price of one unit
    pub unit_price: Option<f64>,
    /// Derived: quantity * unit price, or unit price alone, or zero
    pub total: f64,
    /// Free-text notes
    pub notes: Option<String>,
    /// Budgeted amount
    pub plan: Option<f64>,
    /// Actual spend; when absent the total counts as the actual spend
    pub fact: Option<f64>,
    /// Amount already paid
    pub prepayment: Option<f64>,
    /// Derived: effective fact minus plan
    pub difference: f64,
}

impl Model {
    /// The pricing inputs of this row.
    #[must_use]
    pub const fn figures(&self) -> ExpenseFigures {
        ExpenseFigures {
            quantity: self.quantity,
            unit_price: self.unit_price,
            plan: self.plan,
            fact: self.fact,
        }
    }

    /// Actual spend of this row, falling back to its total.
    #[must_use]
    pub fn effective_fact(&self) -> f64 {
        finance::effective_fact(self.fact, Some(self.total))
    }
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expense belongs to one wedding
    #[sea_orm(
        belongs_to = "super::wedding::Entity",
        from = "Column::WeddingId",
        to = "super::wedding::Column::Id",
        on_delete = "Cascade"
    )]
    Wedding,
}

impl Related<super::wedding::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wedding.def()
    }
}

/// The submitted value of a figure, or the stored one when the column was
/// left out of a partial update.
fn figure(value: &ActiveValue<Option<f64>>, stored: Option<f64>) -> Option<f64> {
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => *v,
        ActiveValue::NotSet => stored,
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let incomplete = self.quantity.is_not_set()
            || self.unit_price.is_not_set()
            || self.plan.is_not_set()
            || self.fact.is_not_set();
        let stored = match &self.id {
            ActiveValue::Set(id) | ActiveValue::Unchanged(id) if !insert && incomplete => {
                Entity::find_by_id(*id).one(db).await?
            }
            _ => None,
        };
        let stored = stored.as_ref();

        let figures = ExpenseFigures {
            quantity: figure(&self.quantity, stored.and_then(|m| m.quantity)),
            unit_price: figure(&self.unit_price, stored.and_then(|m| m.unit_price)),
            plan: figure(&self.plan, stored.and_then(|m| m.plan)),
            fact: figure(&self.fact, stored.and_then(|m| m.fact)),
        };
        let derived = finance::derive(&figures);
        self.total = Set(derived.total);
        self.difference = Set(derived.difference);
        Ok(self)
    }
}

//! Expense business logic - budget line items.
//!
//! `total` and `difference` are never written here; the expense entity's save
//! hook recomputes them from the submitted figures on every insert and update.

use crate::{
    core::{input, wedding::get_wedding},
    entities::{Expense, expense},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Raw expense form, exactly as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseInput {
    /// Grouping such as "venue"
    pub category: Option<String>,
    /// What is being paid for
    pub item: Option<String>,
    /// Number of units
    pub quantity: Option<String>,
    /// Price of one unit
    pub unit_price: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Budgeted amount
    pub plan: Option<String>,
    /// Actual spend
    pub fact: Option<String>,
    /// Amount already paid
    pub prepayment: Option<String>,
}

impl ExpenseInput {
    fn text(raw: Option<&String>) -> String {
        raw.map(|s| s.trim().to_string()).unwrap_or_default()
    }

    fn amount(raw: Option<&String>) -> Option<f64> {
        input::parse_amount(raw.map(String::as_str))
    }

    fn apply(&self, active: &mut expense::ActiveModel) {
        active.category = Set(Self::text(self.category.as_ref()));
        active.item = Set(Self::text(self.item.as_ref()));
        active.quantity = Set(Self::amount(self.quantity.as_ref()));
        active.unit_price = Set(Self::amount(self.unit_price.as_ref()));
        active.notes = Set(input::non_empty(self.notes.as_deref()));
        active.plan = Set(Self::amount(self.plan.as_ref()));
        active.fact = Set(Self::amount(self.fact.as_ref()));
        active.prepayment = Set(Self::amount(self.prepayment.as_ref()));
    }
}

/// Loads an expense or fails with `ExpenseNotFound`.
pub async fn get_expense<C>(db: &C, expense_id: i64) -> Result<expense::Model>
where
    C: ConnectionTrait,
{
    Expense::find_by_id(expense_id)
        .one(db)
        .await?
        .ok_or(Error::ExpenseNotFound { id: expense_id })
}

/// All expenses of a wedding, in creation order.
pub async fn list_expenses<C>(db: &C, wedding_id: i64) -> Result<Vec<expense::Model>>
where
    C: ConnectionTrait,
{
    Expense::find()
        .filter(expense::Column::WeddingId.eq(wedding_id))
        .order_by_asc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds a line item. Unparsable figures are stored as absent.
pub async fn add_expense(
    db: &DatabaseConnection,
    wedding_id: i64,
    form: &ExpenseInput,
) -> Result<expense::Model> {
    get_wedding(db, wedding_id).await?;

    let mut active = expense::ActiveModel {
        wedding_id: Set(wedding_id),
        ..Default::default()
    };
    form.apply(&mut active);
    let expense = active.insert(db).await?;
    info!(
        "Added expense {} to wedding {wedding_id}: total {:.2}",
        expense.id, expense.total
    );
    Ok(expense)
}

/// Replaces every field of a line item with the submitted values.
pub async fn edit_expense(
    db: &DatabaseConnection,
    expense_id: i64,
    form: &ExpenseInput,
) -> Result<expense::Model> {
    let expense = get_expense(db, expense_id).await?;
    let mut active: expense::ActiveModel = expense.into();
    form.apply(&mut active);
    active.update(db).await.map_err(Into::into)
}

/// Removes a line item.
pub async fn delete_expense(db: &DatabaseConnection, expense_id: i64) -> Result<()> {
    let expense = get_expense(db, expense_id).await?;
    expense.delete(db).await?;
    info!("Deleted expense {expense_id}");
    Ok(())
}

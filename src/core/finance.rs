//! Expense aggregation - derived expense fields and per-wedding rollups.
//!
//! Everything here is a pure function over in-memory records. The expense
//! entity's save hook calls [`derive`] on every insert and update; the report
//! layer calls the rollup functions on freshly loaded collections.

use crate::entities::{expense, guest, sponsor_gift};
use serde::Serialize;

/// The caller-supplied pricing inputs of one expense.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpenseFigures {
    /// Number of units
    pub quantity: Option<f64>,
    /// Price of one unit
    pub unit_price: Option<f64>,
    /// Budgeted amount
    pub plan: Option<f64>,
    /// Actual spend, when recorded separately from the total
    pub fact: Option<f64>,
}

/// The derived columns of one expense.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFigures {
    /// Quantity times unit price, or the unit price alone, or zero
    pub total: f64,
    /// Effective fact minus plan
    pub difference: f64,
}

/// Line total: `quantity * unit_price` when both are present, otherwise the
/// unit price alone, otherwise zero. A missing quantity never multiplies.
#[must_use]
pub fn calculate_total(quantity: Option<f64>, unit_price: Option<f64>) -> f64 {
    match (quantity, unit_price) {
        (Some(q), Some(p)) => q * p,
        (None, Some(p)) => p,
        (_, None) => 0.0,
    }
}

/// Actual spend: the explicit fact when recorded, else the total, else zero.
#[must_use]
pub fn effective_fact(fact: Option<f64>, total: Option<f64>) -> f64 {
    fact.or(total).unwrap_or(0.0)
}

/// Computes `total` and `difference` for one expense.
#[must_use]
pub fn derive(figures: &ExpenseFigures) -> DerivedFigures {
    let total = calculate_total(figures.quantity, figures.unit_price);
    let difference = effective_fact(figures.fact, Some(total)) - figures.plan.unwrap_or(0.0);
    DerivedFigures { total, difference }
}

/// Sum of each expense's effective fact.
#[must_use]
pub fn total_expenses(expenses: &[expense::Model]) -> f64 {
    expenses.iter().map(expense::Model::effective_fact).sum()
}

/// Sum of planned amounts, absent plans counting as zero.
#[must_use]
pub fn plan_sum(expenses: &[expense::Model]) -> f64 {
    expenses.iter().filter_map(|e| e.plan).sum()
}

/// Sum of effective facts. Same value as [`total_expenses`], kept as its own
/// column of the finance table.
#[must_use]
pub fn fact_sum(expenses: &[expense::Model]) -> f64 {
    total_expenses(expenses)
}

/// Sum of prepayments, absent prepayments counting as zero.
#[must_use]
pub fn prepayment_sum(expenses: &[expense::Model]) -> f64 {
    expenses.iter().filter_map(|e| e.prepayment).sum()
}

/// Sum of stored differences.
#[must_use]
pub fn difference_sum(expenses: &[expense::Model]) -> f64 {
    expenses.iter().map(|e| e.difference).sum()
}

/// Sum of raw line totals, ignoring recorded facts.
#[must_use]
pub fn line_total_sum(expenses: &[expense::Model]) -> f64 {
    expenses.iter().map(|e| e.total).sum()
}

/// Number of seats the whole guest list needs. Saturates at `u32::MAX`.
#[must_use]
pub fn persons_sum(guests: &[guest::Model]) -> u32 {
    guests
        .iter()
        .map(guest::Model::persons)
        .fold(0, u32::saturating_add)
}

/// Sum of gift amounts, absent amounts counting as zero.
#[must_use]
pub fn sponsor_total(gifts: &[sponsor_gift::Model]) -> f64 {
    gifts.iter().filter_map(|g| g.amount).sum()
}

/// Line totals grouped by category, in first-seen category order.
/// Expenses with an empty category are left out.
#[must_use]
pub fn category_totals(expenses: &[expense::Model]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for e in expenses.iter().filter(|e| !e.category.is_empty()) {
        match totals.iter_mut().find(|(category, _)| *category == e.category) {
            Some((_, sum)) => *sum += e.total,
            None => totals.push((e.category.clone(), e.total)),
        }
    }
    totals
}

/// All per-wedding sums, recomputed on every read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WeddingRollup {
    /// Sum of effective facts
    pub total_expenses: f64,
    /// Sum of plans
    pub plan_sum: f64,
    /// Sum of effective facts
    pub fact_sum: f64,
    /// Sum of prepayments
    pub prepayment_sum: f64,
    /// Sum of differences
    pub difference_sum: f64,
    /// Seats needed for the whole guest list
    pub persons_sum: u32,
}

/// Computes every rollup of one wedding from its expenses and guests.
#[must_use]
pub fn rollup(expenses: &[expense::Model], guests: &[guest::Model]) -> WeddingRollup {
    WeddingRollup {
        total_expenses: total_expenses(expenses),
        plan_sum: plan_sum(expenses),
        fact_sum: fact_sum(expenses),
        prepayment_sum: prepayment_sum(expenses),
        difference_sum: difference_sum(expenses),
        persons_sum: persons_sum(guests),
    }
}

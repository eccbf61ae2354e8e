//! Report generation business logic.
//!
//! This module loads a wedding's collections and hands them to the pure
//! aggregation functions in [`crate::core::finance`]. Nothing computed here is
//! stored; every report reflects the records as they are right now.

use crate::{
    core::{
        expense::list_expenses, finance, guest::list_guests, sponsor::list_sponsor_gifts,
        task::list_tasks, wedding::get_wedding,
    },
    entities::{Wedding, wedding},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde::Serialize;

/// Loads one wedding's expenses and guests and computes its rollups.
pub async fn wedding_rollup(
    db: &DatabaseConnection,
    wedding_id: i64,
) -> Result<finance::WeddingRollup> {
    get_wedding(db, wedding_id).await?;
    let expenses = list_expenses(db, wedding_id).await?;
    let guests = list_guests(db, wedding_id).await?;
    Ok(finance::rollup(&expenses, &guests))
}

/// The finance page of one wedding.
#[derive(Debug, Clone, Serialize)]
pub struct FinanceReport {
    /// The wedding being reported on
    pub wedding: wedding::Model,
    /// Plan, fact, prepayment and difference sums
    pub rollup: finance::WeddingRollup,
    /// Budget, if one was set
    pub budget: Option<f64>,
    /// Budget minus total expenses, if a budget was set
    pub budget_remaining: Option<f64>,
    /// Share of the budget already spent, if a positive budget was set
    pub budget_used_percent: Option<f64>,
    /// Line totals per category, in first-seen order
    pub category_totals: Vec<(String, f64)>,
    /// Sum of sponsor gift amounts
    pub sponsor_total: f64,
}

/// Builds the finance report of a wedding.
pub async fn finance_report(db: &DatabaseConnection, wedding_id: i64) -> Result<FinanceReport> {
    let wedding = get_wedding(db, wedding_id).await?;
    let expenses = list_expenses(db, wedding_id).await?;
    let guests = list_guests(db, wedding_id).await?;
    let gifts = list_sponsor_gifts(db, wedding_id).await?;

    let rollup = finance::rollup(&expenses, &guests);
    let budget = wedding.budget;

    Ok(FinanceReport {
        budget,
        budget_remaining: budget.map(|b| b - rollup.total_expenses),
        budget_used_percent: budget.and_then(|b| calculate_budget_used(rollup.total_expenses, b)),
        category_totals: finance::category_totals(&expenses),
        sponsor_total: finance::sponsor_total(&gifts),
        rollup,
        wedding,
    })
}

/// Percentage of `budget` consumed by `spent`. Above 100 means over budget.
///
/// Returns `None` for a zero or negative budget.
#[must_use]
pub fn calculate_budget_used(spent: f64, budget: f64) -> Option<f64> {
    if budget <= 0.0 {
        return None;
    }

    Some((spent / budget) * 100.0)
}

/// Headline numbers of one wedding's dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct WeddingOverview {
    /// The wedding
    pub wedding: wedding::Model,
    /// Sum of expense line totals
    pub total_expenses: f64,
    /// Tasks marked done
    pub tasks_done: usize,
    /// All tasks
    pub tasks_total: usize,
    /// Seats the whole guest list needs
    pub persons: u32,
}

/// Builds the dashboard numbers of a wedding.
pub async fn wedding_overview(db: &DatabaseConnection, wedding_id: i64) -> Result<WeddingOverview> {
    let wedding = get_wedding(db, wedding_id).await?;
    let expenses = list_expenses(db, wedding_id).await?;
    let tasks = list_tasks(db, wedding_id).await?;
    let guests = list_guests(db, wedding_id).await?;

    Ok(WeddingOverview {
        wedding,
        total_expenses: finance::line_total_sum(&expenses),
        tasks_done: tasks.iter().filter(|t| t.is_done).count(),
        tasks_total: tasks.len(),
        persons: finance::persons_sum(&guests),
    })
}

/// One row of the cross-wedding summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeddingSummary {
    /// Wedding id
    pub id: i64,
    /// Wedding name
    pub name: String,
    /// Wedding date, if set
    pub date: Option<NaiveDate>,
    /// Sum of expense line totals
    pub total: f64,
}

/// Every wedding with the sum of its expense totals, ordered by id.
pub async fn weddings_summary(db: &DatabaseConnection) -> Result<Vec<WeddingSummary>> {
    let weddings = Wedding::find()
        .order_by_asc(wedding::Column::Id)
        .all(db)
        .await?;

    let mut rows = Vec::with_capacity(weddings.len());
    for w in weddings {
        let expenses = list_expenses(db, w.id).await?;
        rows.push(WeddingSummary {
            id: w.id,
            name: w.name,
            date: w.date,
            total: finance::line_total_sum(&expenses),
        });
    }
    Ok(rows)
}

/// Formats an amount with two decimals and a thousands separator, e.g.
/// `12 345.50`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

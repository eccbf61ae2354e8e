//! Seating business logic - tables, manual assignment and auto-seating.
//!
//! Every mutating operation runs in one database transaction, reading the
//! wedding's guests and tables and writing the result as one snapshot.
//! Concurrent seating edits of the same wedding are not coordinated beyond
//! that; the last committed transaction wins.
//!
//! Manual assignment may overbook a table. That is allowed, logged, and
//! reported back in [`AssignOutcome::over_capacity`]; auto-seating never
//! overbooks.

use crate::{
    core::{
        allocator::{self, SeatingPlan},
        guest::{get_guest, list_guests},
        input,
        wedding::get_wedding,
    },
    entities::{Guest, SeatingTable, guest, seating_table},
    errors::{Error, Result},
};
use sea_orm::sea_query::Expr;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Occupancy snapshot of one table, sent back to the UI after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableOccupancy {
    /// Table id, `None` for the "no table" placeholder
    pub table_id: Option<i64>,
    /// Seats taken by the guests at this table
    pub current_persons: u32,
    /// Capacity
    pub seats: u32,
}

impl TableOccupancy {
    /// Placeholder used when a guest had, or now has, no table.
    #[must_use]
    pub const fn unassigned() -> Self {
        Self {
            table_id: None,
            current_persons: 0,
            seats: 0,
        }
    }

    fn of(table: &seating_table::Model, guests: &[guest::Model]) -> Self {
        Self {
            table_id: Some(table.id),
            current_persons: guests
                .iter()
                .filter(|g| g.table_id == Some(table.id))
                .map(guest::Model::persons)
                .fold(0, u32::saturating_add),
            seats: u32::try_from(table.seats).unwrap_or(0),
        }
    }

    /// Whether more persons sit here than there are seats.
    #[must_use]
    pub const fn is_over_capacity(&self) -> bool {
        self.table_id.is_some() && self.current_persons > self.seats
    }
}

/// Result of a manual assignment.
#[derive(Debug, Clone, Serialize)]
pub struct AssignOutcome {
    /// The guest after the change
    pub guest: guest::Model,
    /// Occupancy of the previous table, then of the new table
    pub updated: [TableOccupancy; 2],
    /// Set when the new table now holds more persons than it has seats
    pub over_capacity: Option<TableOccupancy>,
}

/// Summary of an auto-seating run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AutoSeatReport {
    /// Guest records seated
    pub guests_seated: usize,
    /// Persons seated
    pub persons_seated: u32,
    /// Tables holding at least one guest afterwards
    pub tables_used: usize,
    /// Tables opened by this run
    pub tables_created: usize,
}

/// Loads a table or fails with `TableNotFound`.
pub async fn get_table<C>(db: &C, table_id: i64) -> Result<seating_table::Model>
where
    C: ConnectionTrait,
{
    SeatingTable::find_by_id(table_id)
        .one(db)
        .await?
        .ok_or(Error::TableNotFound { id: table_id })
}

/// Loads a table that must belong to `wedding_id`.
async fn get_wedding_table<C>(
    db: &C,
    wedding_id: i64,
    table_id: i64,
) -> Result<seating_table::Model>
where
    C: ConnectionTrait,
{
    let table = get_table(db, table_id).await?;
    if table.wedding_id == wedding_id {
        Ok(table)
    } else {
        Err(Error::TableNotFound { id: table_id })
    }
}

/// Tables of a wedding in display order.
pub async fn list_tables<C>(db: &C, wedding_id: i64) -> Result<Vec<seating_table::Model>>
where
    C: ConnectionTrait,
{
    SeatingTable::find()
        .filter(seating_table::Column::WeddingId.eq(wedding_id))
        .order_by_asc(seating_table::Column::Order)
        .order_by_asc(seating_table::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Current occupancy of a table, or the placeholder for `None`.
pub async fn table_occupancy<C>(db: &C, table_id: Option<i64>) -> Result<TableOccupancy>
where
    C: ConnectionTrait,
{
    let Some(table_id) = table_id else {
        return Ok(TableOccupancy::unassigned());
    };

    let table = get_table(db, table_id).await?;
    let seated = Guest::find()
        .filter(guest::Column::TableId.eq(table_id))
        .all(db)
        .await?;
    Ok(TableOccupancy::of(&table, &seated))
}

async fn next_order<C>(db: &C, wedding_id: i64) -> Result<i32>
where
    C: ConnectionTrait,
{
    Ok(list_tables(db, wedding_id)
        .await?
        .iter()
        .map(|t| t.order + 1)
        .max()
        .unwrap_or(0))
}

/// Appends a table at the next display position.
///
/// A missing or zero seat count uses `default_seats`; a blank name becomes
/// "Table N".
pub async fn new_table(
    db: &DatabaseConnection,
    wedding_id: i64,
    seats: Option<u32>,
    name: Option<&str>,
    default_seats: u32,
) -> Result<seating_table::Model> {
    get_wedding(db, wedding_id).await?;

    let seats = seats.filter(|&s| s > 0).unwrap_or(default_seats).max(1);
    let order = next_order(db, wedding_id).await?;
    let table = seating_table::ActiveModel {
        wedding_id: Set(wedding_id),
        name: Set(input::non_empty(name).unwrap_or_else(|| allocator::table_name(order))),
        seats: Set(i32::try_from(seats).unwrap_or(i32::MAX)),
        order: Set(order),
        ..Default::default()
    };
    let table = table.insert(db).await?;
    debug!("Wedding {wedding_id}: new table {} ({} seats)", table.id, table.seats);
    Ok(table)
}

/// Renames a table. A blank name keeps the current one.
pub async fn rename_table(
    db: &DatabaseConnection,
    wedding_id: i64,
    table_id: i64,
    name: &str,
) -> Result<seating_table::Model> {
    let table = get_wedding_table(db, wedding_id, table_id).await?;
    let Some(name) = input::non_empty(Some(name)) else {
        return Ok(table);
    };

    let mut active: seating_table::ActiveModel = table.into();
    active.name = Set(name);
    active.update(db).await.map_err(Into::into)
}

fn unseat_all() -> sea_orm::UpdateMany<Guest> {
    Guest::update_many()
        .col_expr(guest::Column::TableId, Expr::value(Option::<i64>::None))
        .col_expr(guest::Column::TableSeat, Expr::value(Option::<i32>::None))
}

/// Deletes a table. Guests seated there become unseated; they stay on the
/// guest list. Returns how many guests were freed.
#[instrument(skip(db))]
pub async fn delete_table(db: &DatabaseConnection, wedding_id: i64, table_id: i64) -> Result<u64> {
    let txn = db.begin().await?;

    let table = get_wedding_table(&txn, wedding_id, table_id).await?;
    let freed = unseat_all()
        .filter(guest::Column::TableId.eq(table_id))
        .exec(&txn)
        .await?
        .rows_affected;
    table.delete(&txn).await?;

    txn.commit().await?;
    info!("Deleted table {table_id}, freed {freed} guests");
    Ok(freed)
}

/// Unseats every guest of a wedding. Tables are kept.
#[instrument(skip(db))]
pub async fn clear_all(db: &DatabaseConnection, wedding_id: i64) -> Result<u64> {
    get_wedding(db, wedding_id).await?;
    let cleared = unseat_all()
        .filter(guest::Column::WeddingId.eq(wedding_id))
        .exec(db)
        .await?
        .rows_affected;
    info!("Wedding {wedding_id}: cleared {cleared} seats");
    Ok(cleared)
}

/// Seats one guest at a table, or unseats them when `table_id` is `None`.
///
/// Capacity is not enforced: an overbooked target table is returned in
/// `over_capacity` and logged as a warning.
///
/// # Errors
/// - `GuestNotFound` if the guest does not exist
/// - `TableNotFound` if the table does not exist or belongs to another wedding
///
/// Nothing is written when an error is returned.
#[instrument(skip(db))]
pub async fn assign_guest(
    db: &DatabaseConnection,
    guest_id: i64,
    table_id: Option<i64>,
    seat: Option<i32>,
) -> Result<AssignOutcome> {
    let txn = db.begin().await?;

    let guest = get_guest(&txn, guest_id).await?;
    if let Some(table_id) = table_id {
        get_wedding_table(&txn, guest.wedding_id, table_id).await?;
    }

    let old_table_id = guest.table_id;
    let mut active: guest::ActiveModel = guest.into();
    active.table_id = Set(table_id);
    active.table_seat = Set(table_id.and(seat));
    let guest = active.update(&txn).await?;

    let before = table_occupancy(&txn, old_table_id).await?;
    let after = table_occupancy(&txn, table_id).await?;

    txn.commit().await?;

    let over_capacity = after.is_over_capacity().then_some(after);
    if let Some(occupancy) = &over_capacity {
        warn!(
            "Table {:?} overbooked: {} persons for {} seats",
            occupancy.table_id, occupancy.current_persons, occupancy.seats
        );
    }

    Ok(AssignOutcome {
        guest,
        updated: [before, after],
        over_capacity,
    })
}

/// Writes a plan: opens its new tables, unseats everyone, then seats each
/// guest at its planned table. Must run inside the caller's transaction.
async fn apply_plan<C>(db: &C, wedding_id: i64, plan: &SeatingPlan) -> Result<()>
where
    C: ConnectionTrait,
{
    let mut table_ids = Vec::with_capacity(plan.tables.len());
    for planned in &plan.tables {
        let id = match planned.id {
            Some(id) => id,
            None => {
                let table = seating_table::ActiveModel {
                    wedding_id: Set(wedding_id),
                    name: Set(planned.name.clone()),
                    seats: Set(i32::try_from(planned.seats).unwrap_or(i32::MAX)),
                    order: Set(planned.order),
                    ..Default::default()
                };
                table.insert(db).await?.id
            }
        };
        table_ids.push(id);
    }

    unseat_all()
        .filter(guest::Column::WeddingId.eq(wedding_id))
        .exec(db)
        .await?;

    let mut by_table: HashMap<usize, Vec<i64>> = HashMap::new();
    for assignment in &plan.assignments {
        by_table
            .entry(assignment.table)
            .or_default()
            .push(assignment.guest_id);
    }
    for (index, guest_ids) in by_table {
        Guest::update_many()
            .col_expr(guest::Column::TableId, Expr::value(table_ids[index]))
            .filter(guest::Column::Id.is_in(guest_ids))
            .exec(db)
            .await?;
    }

    Ok(())
}

/// Re-seats every guest of a wedding with the greedy allocator.
///
/// Capacity for newly opened tables is `seats_per_table` when given and
/// positive, else the capacity of the wedding's first table, else
/// `default_seats`. A wedding without guests is left untouched.
#[instrument(skip(db))]
pub async fn auto_seat(
    db: &DatabaseConnection,
    wedding_id: i64,
    seats_per_table: Option<u32>,
    default_seats: u32,
) -> Result<AutoSeatReport> {
    let txn = db.begin().await?;

    get_wedding(&txn, wedding_id).await?;
    let guests = list_guests(&txn, wedding_id).await?;
    if guests.is_empty() {
        txn.commit().await?;
        debug!("Wedding {wedding_id} has no guests, nothing to seat");
        return Ok(AutoSeatReport::default());
    }

    let tables = list_tables(&txn, wedding_id).await?;
    let nominal = seats_per_table
        .filter(|&s| s > 0)
        .or_else(|| tables.first().and_then(|t| u32::try_from(t.seats).ok()))
        .filter(|&s| s > 0)
        .unwrap_or(default_seats);

    let plan = allocator::plan_auto_seat(&guests, &tables, nominal);
    apply_plan(&txn, wedding_id, &plan).await?;
    txn.commit().await?;

    let report = AutoSeatReport {
        guests_seated: plan.assignments.len(),
        persons_seated: plan
            .assignments
            .iter()
            .map(|a| a.persons)
            .fold(0, u32::saturating_add),
        tables_used: plan.tables.iter().filter(|t| t.occupied > 0).count(),
        tables_created: plan.new_tables().count(),
    };
    info!(
        "Wedding {wedding_id}: seated {} guests ({} persons) at {} tables, {} new",
        report.guests_seated, report.persons_seated, report.tables_used, report.tables_created
    );
    Ok(report)
}

/// Sets a guest's legacy table number. Unparsable input clears it.
pub async fn set_table_no(
    db: &DatabaseConnection,
    guest_id: i64,
    raw_table_no: Option<&str>,
) -> Result<guest::Model> {
    let guest = get_guest(db, guest_id).await?;
    let mut active: guest::ActiveModel = guest.into();
    active.table_no = Set(input::parse_count(raw_table_no));
    active.update(db).await.map_err(Into::into)
}

/// Numbers every guest's legacy `table_no` sequentially. Returns how many
/// guests were numbered.
#[instrument(skip(db))]
pub async fn auto_number_guests(
    db: &DatabaseConnection,
    wedding_id: i64,
    seats_per_table: u32,
) -> Result<usize> {
    let txn = db.begin().await?;

    get_wedding(&txn, wedding_id).await?;
    let guests = list_guests(&txn, wedding_id).await?;
    let numbering = allocator::number_tables(&guests, seats_per_table);
    for (guest_id, table_no) in &numbering {
        Guest::update_many()
            .col_expr(guest::Column::TableNo, Expr::value(*table_no))
            .filter(guest::Column::Id.eq(*guest_id))
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;
    Ok(numbering.len())
}

/// One table with the guests seated at it.
#[derive(Debug, Clone, Serialize)]
pub struct TableSeating {
    /// The table
    pub table: seating_table::Model,
    /// Guests at this table, in creation order
    pub guests: Vec<guest::Model>,
    /// Persons and seats
    pub occupancy: TableOccupancy,
}

/// Everything the seating page shows.
#[derive(Debug, Clone, Serialize)]
pub struct SeatingOverview {
    /// Capacity the estimate below is based on
    pub seats_per_table: u32,
    /// Seats the whole guest list needs
    pub total_persons: u32,
    /// Minimum number of tables for `total_persons`
    pub tables_needed: u32,
    /// Tables in display order
    pub tables: Vec<TableSeating>,
    /// Guests without a table, in creation order
    pub unassigned: Vec<guest::Model>,
}

/// Builds the seating page data for a wedding.
pub async fn seating_overview(
    db: &DatabaseConnection,
    wedding_id: i64,
    seats_per_table: u32,
) -> Result<SeatingOverview> {
    get_wedding(db, wedding_id).await?;
    let guests = list_guests(db, wedding_id).await?;
    let tables = list_tables(db, wedding_id).await?;

    let total_persons = crate::core::finance::persons_sum(&guests);
    let tables = tables
        .into_iter()
        .map(|table| TableSeating {
            occupancy: TableOccupancy::of(&table, &guests),
            guests: guests
                .iter()
                .filter(|g| g.table_id == Some(table.id))
                .cloned()
                .collect(),
            table,
        })
        .collect();
    let unassigned = guests.into_iter().filter(|g| g.table_id.is_none()).collect();

    Ok(SeatingOverview {
        seats_per_table,
        total_persons,
        tables_needed: allocator::tables_needed(total_persons, seats_per_table),
        tables,
        unassigned,
    })
}

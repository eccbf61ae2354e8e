//! Seat allocation - greedy largest-first bin packing of guests into tables.
//!
//! The allocator never touches storage. It takes a wedding's guests and tables
//! as plain records and returns a [`SeatingPlan`]: an arena of tables (existing
//! ones carrying their id, new ones not yet persisted) plus one assignment per
//! guest pointing into that arena by index. `core::seating` persists a plan in
//! one transaction.
//!
//! This is a heuristic. It always finds a feasible assignment and avoids
//! opening tables needlessly, but it does not guarantee the minimum number of
//! tables.

use crate::entities::{guest, seating_table};
use std::cmp::Reverse;

/// Seats a guest record occupies: the family head-count when positive,
/// otherwise one. Both allocators and every rollup go through this function.
#[must_use]
pub fn persons(family_count: Option<i32>) -> u32 {
    family_count
        .and_then(|count| u32::try_from(count).ok())
        .filter(|&count| count > 0)
        .unwrap_or(1)
}

/// Minimum number of tables of `seats_per_table` needed for `total_persons`.
#[must_use]
pub fn tables_needed(total_persons: u32, seats_per_table: u32) -> u32 {
    total_persons.div_ceil(seats_per_table.max(1))
}

/// A table inside a [`SeatingPlan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTable {
    /// Database id, `None` for a table the plan opened
    pub id: Option<i64>,
    /// Display name
    pub name: String,
    /// Seat capacity
    pub seats: u32,
    /// Display position
    pub order: i32,
    /// Seats taken by the plan's assignments
    pub occupied: u32,
}

impl PlannedTable {
    fn from_model(table: &seating_table::Model) -> Self {
        Self {
            id: Some(table.id),
            name: table.name.clone(),
            seats: u32::try_from(table.seats).unwrap_or(0),
            order: table.order,
            occupied: 0,
        }
    }

    /// Seats still free.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.seats.saturating_sub(self.occupied)
    }
}

/// One guest placed at one arena table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// Guest being seated
    pub guest_id: i64,
    /// Index into [`SeatingPlan::tables`]
    pub table: usize,
    /// Seats this guest takes
    pub persons: u32,
}

/// Result of an allocation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatingPlan {
    /// Existing tables first (by order, then id), then tables opened by the plan
    pub tables: Vec<PlannedTable>,
    /// One entry per guest, in placement order
    pub assignments: Vec<Assignment>,
}

impl SeatingPlan {
    /// Tables the plan opened that still need to be persisted.
    pub fn new_tables(&self) -> impl Iterator<Item = (usize, &PlannedTable)> {
        self.tables
            .iter()
            .enumerate()
            .filter(|(_, table)| table.id.is_none())
    }

    /// Whether any guest was placed at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Name given to the table at display position `order`.
#[must_use]
pub fn table_name(order: i32) -> String {
    format!("Table {}", order + 1)
}

/// Seats every guest from scratch.
///
/// Guests are taken largest first (ties keep their input order). Each one goes
/// to the least occupied table that still has room for the whole group; when
/// none has room a new table of `seats_per_table` seats is opened. A group
/// larger than `seats_per_table` gets a table sized to the group, so no table
/// is ever over capacity and no group is ever split.
///
/// Current assignments on `guests` are ignored. An empty guest list yields an
/// empty plan that touches no table.
#[must_use]
pub fn plan_auto_seat(
    guests: &[guest::Model],
    tables: &[seating_table::Model],
    seats_per_table: u32,
) -> SeatingPlan {
    if guests.is_empty() {
        return SeatingPlan::default();
    }

    let nominal = seats_per_table.max(1);
    let mut existing: Vec<&seating_table::Model> = tables.iter().collect();
    existing.sort_by_key(|t| (t.order, t.id));
    let mut plan = SeatingPlan {
        tables: existing.into_iter().map(PlannedTable::from_model).collect(),
        assignments: Vec::with_capacity(guests.len()),
    };
    let mut next_order = plan.tables.iter().map(|t| t.order + 1).max().unwrap_or(0);

    let mut groups: Vec<&guest::Model> = guests.iter().collect();
    groups.sort_by_key(|g| Reverse(g.persons()));

    for g in groups {
        let need = g.persons();
        let target = plan
            .tables
            .iter()
            .enumerate()
            .filter(|(_, t)| t.remaining() >= need)
            .min_by_key(|(i, t)| (t.occupied, *i))
            .map(|(i, _)| i);

        let index = target.unwrap_or_else(|| {
            plan.tables.push(PlannedTable {
                id: None,
                name: table_name(next_order),
                seats: nominal.max(need),
                order: next_order,
                occupied: 0,
            });
            next_order += 1;
            plan.tables.len() - 1
        });

        plan.tables[index].occupied += need;
        plan.assignments.push(Assignment {
            guest_id: g.id,
            table: index,
            persons: need,
        });
    }

    plan
}

/// A guest counts as a family for legacy numbering when a family name is set
/// or it stands for more than one person.
fn is_family(g: &guest::Model) -> bool {
    g.family_name.is_some() || g.persons() > 1
}

/// Legacy numbered seating (`table_no`), returning `(guest_id, table_no)`.
///
/// Families first by descending size, then singles in input order, filled
/// sequentially: a group that does not fit the current number moves to the
/// next one, and a number that is exactly full is closed. Numbers start at 1.
/// A group larger than a table gets a number of its own.
#[must_use]
pub fn number_tables(guests: &[guest::Model], seats_per_table: u32) -> Vec<(i64, i32)> {
    let capacity = seats_per_table.max(1);
    let (mut families, singles): (Vec<&guest::Model>, Vec<&guest::Model>) =
        guests.iter().partition(|g| is_family(g));
    families.sort_by_key(|g| Reverse(g.persons()));

    let mut table_no = 1;
    let mut used: u32 = 0;
    let mut numbering = Vec::with_capacity(guests.len());

    for g in families.into_iter().chain(singles) {
        let need = g.persons();
        if used > 0 && used.saturating_add(need) > capacity {
            table_no += 1;
            used = 0;
        }
        numbering.push((g.id, table_no));
        used = used.saturating_add(need);
        if used >= capacity {
            table_no += 1;
            used = 0;
        }
    }

    numbering
}

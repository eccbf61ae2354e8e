//! Entity module - SeaORM definitions for every persisted record.
//!
//! Records reference each other by id only. Derived values (guest persons,
//! expense totals, wedding rollups) are computed by `core`, never cached here,
//! with the exception of the expense `total`/`difference` columns which the
//! expense save hook keeps consistent.

pub mod expense;
pub mod guest;
pub mod seating_table;
pub mod sponsor_gift;
pub mod task;
pub mod user;
pub mod wedding;

// Re-export specific types to avoid conflicts
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use guest::{
    Column as GuestColumn, Entity as Guest, GuestSide, GuestStatus, Model as GuestModel,
};
pub use seating_table::{
    Column as SeatingTableColumn, Entity as SeatingTable, Model as SeatingTableModel,
};
pub use sponsor_gift::{
    Column as SponsorGiftColumn, Entity as SponsorGift, Model as SponsorGiftModel,
};
pub use task::{Column as TaskColumn, Entity as Task, Model as TaskModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
pub use wedding::{Column as WeddingColumn, Entity as Wedding, Model as WeddingModel};

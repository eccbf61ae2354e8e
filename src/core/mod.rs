/// Greedy seating allocator and legacy table numbering (pure)
pub mod allocator;
/// Expense line item maintenance
pub mod expense;
/// Derived expense fields and per-wedding rollups (pure)
pub mod finance;
/// Guest list maintenance
pub mod guest;
/// Tolerant parsing of raw form values
pub mod input;
/// Invitation text and QR payload
pub mod invitation;
/// Finance, dashboard and cross-wedding reports
pub mod report;
/// Tables, manual assignment and auto-seating
pub mod seating;
/// Gifts received from guests
pub mod sponsor;
/// Wedding checklist
pub mod task;
/// Accounts and credentials
pub mod user;
/// Weddings, ownership and budget
pub mod wedding;

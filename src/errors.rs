//! Unified error type for the wedding planner.
//!
//! Malformed numeric form input never reaches this type: it is parsed to `None`
//! by [`crate::core::input`]. Errors here are referential problems, access
//! violations, validation of required text, and storage failures.

use thiserror::Error;

/// All failures surfaced by the core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Storage layer failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Required input was missing or empty
    #[error("Invalid input: {message}")]
    Validation {
        /// What was rejected
        message: String,
    },

    /// No wedding with this id
    #[error("Wedding {id} not found")]
    WeddingNotFound {
        /// Requested wedding id
        id: i64,
    },

    /// No guest with this id (or not part of the expected wedding)
    #[error("Guest {id} not found")]
    GuestNotFound {
        /// Requested guest id
        id: i64,
    },

    /// No table with this id (or not part of the guest's wedding)
    #[error("Table {id} not found")]
    TableNotFound {
        /// Requested table id
        id: i64,
    },

    /// No expense with this id
    #[error("Expense {id} not found")]
    ExpenseNotFound {
        /// Requested expense id
        id: i64,
    },

    /// No task with this id
    #[error("Task {id} not found")]
    TaskNotFound {
        /// Requested task id
        id: i64,
    },

    /// No sponsor gift with this id
    #[error("Sponsor gift {id} not found")]
    SponsorGiftNotFound {
        /// Requested gift id
        id: i64,
    },

    /// The user may not access this wedding
    #[error("User {user_id} may not access wedding {wedding_id}")]
    Forbidden {
        /// Acting user
        user_id: i64,
        /// Wedding they tried to reach
        wedding_id: i64,
    },

    /// Registration with an email that already has an account
    #[error("Email '{email}' is already registered")]
    EmailTaken {
        /// The duplicate email
        email: String,
    },

    /// Login failed; deliberately does not say which part was wrong
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Password hashing or hash parsing failed
    #[error("Password hashing error: {message}")]
    PasswordHash {
        /// Underlying hasher message
        message: String,
    },
}

impl From<argon2::password_hash::Error> for Error {
    fn from(value: argon2::password_hash::Error) -> Self {
        Self::PasswordHash {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

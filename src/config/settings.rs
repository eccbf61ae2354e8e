//! Application settings.
//!
//! Settings come from an optional `config.toml`; every section and field has a
//! default, so a missing file is not an error. A few values can be overridden
//! from the environment (loaded from `.env` by the binary):
//!
//! * `ADMIN_EMAIL`, `ADMIN_PASSWORD` - the seeded administrator account
//! * `SEATS_PER_TABLE` - default capacity for tables opened by auto-seating

use crate::core::input;
use crate::entities::seating_table::DEFAULT_SEATS;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

const DEFAULT_ADMIN_EMAIL: &str = "admin@weddings.local";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Seating defaults
    #[serde(default)]
    pub seating: SeatingSettings,
    /// Seeded administrator account
    #[serde(default)]
    pub admin: AdminSettings,
}

/// Seating defaults
#[derive(Debug, Clone, Deserialize)]
pub struct SeatingSettings {
    /// Capacity of tables created without an explicit seat count
    #[serde(default = "default_seats_per_table")]
    pub seats_per_table: u32,
}

impl Default for SeatingSettings {
    fn default() -> Self {
        Self {
            seats_per_table: default_seats_per_table(),
        }
    }
}

fn default_seats_per_table() -> u32 {
    DEFAULT_SEATS.unsigned_abs()
}

/// The administrator account created on first start
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSettings {
    /// Login email
    #[serde(default = "default_admin_email")]
    pub email: String,
    /// Display name
    #[serde(default = "default_admin_name")]
    pub name: String,
    /// Initial password; only taken from the environment, never from the file
    #[serde(skip)]
    pub password: String,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            email: default_admin_email(),
            name: default_admin_name(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

fn default_admin_email() -> String {
    DEFAULT_ADMIN_EMAIL.to_string()
}

fn default_admin_name() -> String {
    "Admin".to_string()
}

/// Parses settings from TOML text, without environment overrides.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let mut settings: Settings = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    // serde(skip) leaves the password empty
    settings.admin.password = DEFAULT_ADMIN_PASSWORD.to_string();
    if settings.seating.seats_per_table == 0 {
        return Err(Error::Config {
            message: "seating.seats_per_table must be positive".to_string(),
        });
    }
    Ok(settings)
}

/// Loads settings from a TOML file, using defaults when the file is absent.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("No settings file at {path:?}, using defaults");
        return Ok(Settings::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path:?}: {e}"),
    })?;
    parse_settings(&contents)
}

impl Settings {
    /// Applies `ADMIN_EMAIL`, `ADMIN_PASSWORD` and `SEATS_PER_TABLE` from the
    /// environment. An unusable `SEATS_PER_TABLE` is ignored.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(email) = std::env::var("ADMIN_EMAIL") {
            self.admin.email = email;
        }
        if let Ok(password) = std::env::var("ADMIN_PASSWORD") {
            self.admin.password = password;
        }
        if let Ok(raw) = std::env::var("SEATS_PER_TABLE") {
            match input::parse_seats(Some(&raw)) {
                Some(seats) => self.seating.seats_per_table = seats,
                None => warn!("Ignoring SEATS_PER_TABLE={raw:?}: not a positive number"),
            }
        }
        self
    }
}

/// Loads `config.toml` from the working directory and applies environment
/// overrides.
pub fn load_default_settings() -> Result<Settings> {
    load_settings("config.toml").map(Settings::with_env_overrides)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
            [seating]
            seats_per_table = 10

            [admin]
            email = "owner@example.com"
            name = "Owner"
        "#;

        let settings = parse_settings(toml_str).unwrap();
        assert_eq!(settings.seating.seats_per_table, 10);
        assert_eq!(settings.admin.email, "owner@example.com");
        assert_eq!(settings.admin.name, "Owner");
        assert_eq!(settings.admin.password, DEFAULT_ADMIN_PASSWORD);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings.seating.seats_per_table, 12);
        assert_eq!(settings.admin.email, DEFAULT_ADMIN_EMAIL);

        let settings = parse_settings("[admin]\nname = \"Boss\"\n").unwrap();
        assert_eq!(settings.admin.name, "Boss");
        assert_eq!(settings.admin.email, DEFAULT_ADMIN_EMAIL);
    }

    #[test]
    fn test_zero_seats_rejected() {
        let result = parse_settings("[seating]\nseats_per_table = 0\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let result = parse_settings("[seating\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = load_settings("does/not/exist.toml").unwrap();
        assert_eq!(settings.seating.seats_per_table, 12);
        assert_eq!(settings.admin.password, DEFAULT_ADMIN_PASSWORD);
    }
}

//! Gateway configuration from the process environment.

use nailcal_core::{SalonError, SalonResult};

/// Credentials and table names for the Airtable base.
///
/// Table names default to the base's standard layout and can be overridden
/// per deployment.
#[derive(Debug, Clone)]
pub struct AirtableConfig {
    pub api_key: String,
    pub base_id: String,
    pub bookings_table: String,
    pub clients_table: String,
    pub procedures_table: String,
}

impl AirtableConfig {
    pub fn from_env() -> SalonResult<Self> {
        Ok(AirtableConfig {
            api_key: require("AIRTABLE_API_KEY")?,
            base_id: require("AIRTABLE_BASE_ID")?,
            bookings_table: env_or("AIRTABLE_BOOKINGS_TABLE", "Bookings"),
            clients_table: env_or("AIRTABLE_CLIENTS_TABLE", "Clients"),
            procedures_table: env_or("AIRTABLE_PROCEDURES_TABLE", "Procedures"),
        })
    }
}

fn require(name: &str) -> SalonResult<String> {
    std::env::var(name)
        .map_err(|_| SalonError::Config(format!("Missing required environment variable {}", name)))
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

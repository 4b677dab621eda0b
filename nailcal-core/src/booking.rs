//! Store-neutral booking types.
//!
//! The external store returns loosely-typed records with speculative field
//! names; the gateway converts them into these types at its boundary, and
//! everything downstream (grid placement, conflict checks, the feed) works
//! exclusively with them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A service offered by the salon. Read-only from the app's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Procedure {
    pub id: String,
    pub name: String,
    /// Duration in seconds, as stored.
    pub duration_secs: i64,
    pub price: i64,
    /// Inactive procedures stay on old bookings but are hidden from selection.
    pub active: bool,
}

/// A salon client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub birthday: Option<NaiveDate>,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A booking as stored, with references still unresolved.
///
/// A record without a parseable start timestamp never becomes a `Booking`;
/// the gateway drops it during conversion so the grid always renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub start: DateTime<Utc>,
    /// `None` for personal-time blocks.
    pub client_id: Option<String>,
    pub procedure_ids: Vec<String>,
    /// Operator-entered duration override, seconds.
    pub custom_duration_secs: Option<i64>,
    /// Total duration rolled up by the store, seconds.
    pub stored_duration_secs: Option<i64>,
    /// Total price rolled up by the store.
    pub stored_price: Option<i64>,
    /// Client name resolved by the store's lookup field.
    pub client_name_lookup: Option<String>,
    /// Free-text client label, fallback when the lookup is empty.
    pub client_label: Option<String>,
    pub is_me_time: bool,
    pub me_time_title: Option<String>,
}

/// Payload for creating or updating a booking, as sent by the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub client_id: Option<String>,
    #[serde(default)]
    pub procedure_ids: Vec<String>,
    /// Start timestamp, ISO 8601.
    pub date: DateTime<Utc>,
    /// Optional duration override, seconds.
    pub custom_duration: Option<i64>,
    #[serde(default)]
    pub is_me_time: bool,
    pub me_time_title: Option<String>,
}

/// Payload for the client quick-add form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub birthday: Option<NaiveDate>,
}

//! Conversion between raw Airtable records and core types.
//!
//! This is the normalization boundary: the loosely-typed record shapes do
//! not travel past this module. A booking record without a parseable start
//! timestamp converts to `None` and is dropped from list results, since an
//! incomplete upstream record must never take the calendar down.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{json, Map, Value};

use nailcal_core::{Booking, Client, NewBooking, NewClient, Procedure};

use crate::records::{BookingFields, ClientFields, ProcedureFields, Record};

pub fn booking_from_record(record: Record<BookingFields>) -> Option<Booking> {
    let start = parse_datetime(record.fields.date.as_deref()?)?;

    Some(Booking {
        id: record.id,
        start,
        client_id: record.fields.client.into_iter().next(),
        procedure_ids: record.fields.procedures,
        custom_duration_secs: record.fields.custom_duration,
        stored_duration_secs: record.fields.total_duration,
        stored_price: record.fields.total_price,
        client_name_lookup: record.fields.client_name.into_iter().next(),
        client_label: record.fields.client_label,
        is_me_time: record.fields.me_time,
        me_time_title: record.fields.me_time_title,
    })
}

pub fn client_from_record(record: Record<ClientFields>) -> Client {
    Client {
        id: record.id,
        first_name: record.fields.first_name.unwrap_or_default(),
        last_name: record.fields.last_name.unwrap_or_default(),
        phone: record.fields.phone.unwrap_or_default(),
        birthday: record
            .fields
            .birthday
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()),
    }
}

pub fn procedure_from_record(record: Record<ProcedureFields>) -> Procedure {
    Procedure {
        id: record.id,
        name: record.fields.name.unwrap_or_default(),
        duration_secs: record.fields.duration.unwrap_or(0),
        price: record.fields.price.unwrap_or(0),
        active: record.fields.active,
    }
}

/// Write-side field map for a booking create or update.
///
/// Optional fields are written as explicit nulls so an update clears them
/// when the operator removes an override.
pub fn booking_to_fields(new: &NewBooking) -> Value {
    let mut fields = Map::new();
    fields.insert(
        "Date".to_string(),
        json!(new.date.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    fields.insert(
        "Client".to_string(),
        match &new.client_id {
            Some(id) => json!([id]),
            None => json!([]),
        },
    );
    fields.insert("Procedures".to_string(), json!(new.procedure_ids));
    fields.insert(
        "Custom Duration".to_string(),
        new.custom_duration.map_or(Value::Null, |d| json!(d)),
    );
    fields.insert("Me Time".to_string(), json!(new.is_me_time));
    fields.insert(
        "Me Time Title".to_string(),
        new.me_time_title
            .as_ref()
            .map_or(Value::Null, |t| json!(t)),
    );

    json!({ "fields": fields })
}

pub fn client_to_fields(new: &NewClient) -> Value {
    let mut fields = Map::new();
    fields.insert("First Name".to_string(), json!(new.first_name));
    fields.insert("Last Name".to_string(), json!(new.last_name));
    fields.insert("Phone".to_string(), json!(new.phone));
    if let Some(birthday) = new.birthday {
        fields.insert(
            "Birthday".to_string(),
            json!(birthday.format("%Y-%m-%d").to_string()),
        );
    }

    json!({ "fields": fields })
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

//! Normalization of raw bookings into render-ready display records.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::booking::{Booking, Client, Procedure};
use crate::constants::{DEFAULT_ME_TIME_TITLE, UNKNOWN_CLIENT};

/// Read-optimized projection of a booking with resolved names.
///
/// Rebuilt on every fetch, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDisplay {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_secs: i64,
    /// Resolved client name, or the personal-time title.
    pub client_name: String,
    pub client_phone: Option<String>,
    pub procedure_names: Vec<String>,
    pub price: i64,
    pub is_me_time: bool,
    pub title: Option<String>,
}

/// Display duration, by priority: custom override > summed procedure
/// durations > stored rollup > zero.
pub fn resolve_duration_secs(
    booking: &Booking,
    procedures: &HashMap<String, Procedure>,
) -> i64 {
    if let Some(custom) = booking.custom_duration_secs {
        return custom;
    }

    let summed: i64 = booking
        .procedure_ids
        .iter()
        .filter_map(|id| procedures.get(id))
        .map(|p| p.duration_secs)
        .sum();
    if summed > 0 {
        return summed;
    }

    booking.stored_duration_secs.unwrap_or(0)
}

/// Display price: stored rollup > summed procedure prices > zero.
pub fn resolve_price(booking: &Booking, procedures: &HashMap<String, Procedure>) -> i64 {
    if let Some(stored) = booking.stored_price {
        return stored;
    }

    booking
        .procedure_ids
        .iter()
        .filter_map(|id| procedures.get(id))
        .map(|p| p.price)
        .sum()
}

/// Display name: linked client record > lookup field > free-text label >
/// fixed placeholder. Personal-time blocks show their title instead.
fn resolve_client_name(booking: &Booking, clients: &HashMap<String, Client>) -> String {
    if booking.is_me_time {
        return booking
            .me_time_title
            .clone()
            .unwrap_or_else(|| DEFAULT_ME_TIME_TITLE.to_string());
    }

    if let Some(client) = booking.client_id.as_ref().and_then(|id| clients.get(id)) {
        let name = client.full_name();
        if !name.is_empty() {
            return name;
        }
    }

    if let Some(lookup) = booking.client_name_lookup.as_deref() {
        if !lookup.trim().is_empty() {
            return lookup.trim().to_string();
        }
    }

    if let Some(label) = booking.client_label.as_deref() {
        if !label.trim().is_empty() {
            return label.trim().to_string();
        }
    }

    UNKNOWN_CLIENT.to_string()
}

/// Build display records for a set of bookings.
///
/// Lookup tables are the full client/procedure lists as fetched alongside
/// the bookings; a dangling reference degrades to the fallback chain rather
/// than failing.
pub fn build_displays(
    bookings: &[Booking],
    clients: &[Client],
    procedures: &[Procedure],
) -> Vec<BookingDisplay> {
    let clients_by_id: HashMap<String, Client> =
        clients.iter().map(|c| (c.id.clone(), c.clone())).collect();
    let procedures_by_id: HashMap<String, Procedure> =
        procedures.iter().map(|p| (p.id.clone(), p.clone())).collect();

    bookings
        .iter()
        .map(|booking| {
            let duration_secs = resolve_duration_secs(booking, &procedures_by_id);
            let procedure_names = booking
                .procedure_ids
                .iter()
                .filter_map(|id| procedures_by_id.get(id))
                .map(|p| p.name.clone())
                .collect();
            let client_phone = booking
                .client_id
                .as_ref()
                .and_then(|id| clients_by_id.get(id))
                .map(|c| c.phone.clone())
                .filter(|p| !p.is_empty());

            BookingDisplay {
                id: booking.id.clone(),
                start: booking.start,
                end: booking.start + Duration::seconds(duration_secs),
                duration_secs,
                client_name: resolve_client_name(booking, &clients_by_id),
                client_phone,
                procedure_names,
                price: resolve_price(booking, &procedures_by_id),
                is_me_time: booking.is_me_time,
                title: booking.me_time_title.clone(),
            }
        })
        .collect()
}

/// Keep only displays whose interval intersects `[from, to)`.
pub fn filter_window(
    displays: Vec<BookingDisplay>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Vec<BookingDisplay> {
    displays
        .into_iter()
        .filter(|d| d.start < to && d.end > from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_booking() -> Booking {
        Booking {
            id: "recBooking1".to_string(),
            start: Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap(),
            client_id: Some("recClient1".to_string()),
            procedure_ids: vec!["recProc1".to_string(), "recProc2".to_string()],
            custom_duration_secs: None,
            stored_duration_secs: None,
            stored_price: None,
            client_name_lookup: None,
            client_label: None,
            is_me_time: false,
            me_time_title: None,
        }
    }

    fn make_client() -> Client {
        Client {
            id: "recClient1".to_string(),
            first_name: "Anna".to_string(),
            last_name: "Kovacs".to_string(),
            phone: "+36 20 123 4567".to_string(),
            birthday: None,
        }
    }

    fn make_procedures() -> Vec<Procedure> {
        vec![
            Procedure {
                id: "recProc1".to_string(),
                name: "Gel manicure".to_string(),
                duration_secs: 3600,
                price: 9000,
                active: true,
            },
            Procedure {
                id: "recProc2".to_string(),
                name: "Nail repair".to_string(),
                duration_secs: 1800,
                price: 2000,
                active: true,
            },
        ]
    }

    #[test]
    fn test_duration_sums_procedures() {
        let displays = build_displays(&[make_booking()], &[make_client()], &make_procedures());
        assert_eq!(displays.len(), 1);
        assert_eq!(displays[0].duration_secs, 5400);
        assert_eq!(
            displays[0].end,
            Utc.with_ymd_and_hms(2025, 6, 2, 11, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_custom_duration_beats_procedure_sum() {
        let mut booking = make_booking();
        booking.custom_duration_secs = Some(2700);
        booking.stored_duration_secs = Some(7200);

        let displays = build_displays(&[booking], &[make_client()], &make_procedures());
        assert_eq!(displays[0].duration_secs, 2700);
    }

    #[test]
    fn test_stored_duration_is_last_resort_before_zero() {
        let mut booking = make_booking();
        booking.procedure_ids.clear();
        booking.stored_duration_secs = Some(1800);

        let displays = build_displays(&[booking.clone()], &[make_client()], &make_procedures());
        assert_eq!(displays[0].duration_secs, 1800);

        booking.stored_duration_secs = None;
        let displays = build_displays(&[booking], &[make_client()], &make_procedures());
        assert_eq!(displays[0].duration_secs, 0);
    }

    #[test]
    fn test_client_name_fallback_chain() {
        // Linked record wins
        let displays = build_displays(&[make_booking()], &[make_client()], &make_procedures());
        assert_eq!(displays[0].client_name, "Anna Kovacs");

        // Lookup field when the link is dangling
        let mut booking = make_booking();
        booking.client_id = Some("recMissing".to_string());
        booking.client_name_lookup = Some("Anna K.".to_string());
        let displays = build_displays(&[booking], &[], &make_procedures());
        assert_eq!(displays[0].client_name, "Anna K.");

        // Free-text label next
        let mut booking = make_booking();
        booking.client_id = None;
        booking.client_label = Some("walk-in".to_string());
        let displays = build_displays(&[booking], &[], &make_procedures());
        assert_eq!(displays[0].client_name, "walk-in");

        // Placeholder last
        let mut booking = make_booking();
        booking.client_id = None;
        let displays = build_displays(&[booking], &[], &make_procedures());
        assert_eq!(displays[0].client_name, UNKNOWN_CLIENT);
    }

    #[test]
    fn test_me_time_uses_title() {
        let mut booking = make_booking();
        booking.client_id = None;
        booking.procedure_ids.clear();
        booking.is_me_time = true;
        booking.me_time_title = Some("Dentist".to_string());
        booking.custom_duration_secs = Some(3600);

        let displays = build_displays(&[booking], &[], &[]);
        assert_eq!(displays[0].client_name, "Dentist");
        assert!(displays[0].is_me_time);
        assert!(displays[0].client_phone.is_none());
    }

    #[test]
    fn test_price_rollup_beats_sum() {
        let mut booking = make_booking();
        booking.stored_price = Some(12000);
        let displays = build_displays(&[booking], &[make_client()], &make_procedures());
        assert_eq!(displays[0].price, 12000);

        let displays = build_displays(&[make_booking()], &[make_client()], &make_procedures());
        assert_eq!(displays[0].price, 11000);
    }

    #[test]
    fn test_filter_window_uses_half_open_intervals() {
        let displays = build_displays(&[make_booking()], &[make_client()], &make_procedures());
        let from = Utc.with_ymd_and_hms(2025, 6, 2, 11, 30, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 6, 3, 0, 0, 0).unwrap();

        // Booking ends exactly at `from`, so it is outside the window
        assert!(filter_window(displays, from, to).is_empty());
    }
}

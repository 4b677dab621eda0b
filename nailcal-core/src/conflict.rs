//! Overlap detection for booking edits.
//!
//! Detection is advisory: the form shows the warning but the operator can
//! still save. Overlapping on purpose is a real workflow (a drying slot for
//! one client under the start of the next), so a save is never blocked.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::display::BookingDisplay;

/// Find the first existing booking whose interval overlaps `[start, end)`.
///
/// Intervals are half-open, so a booking ending exactly at `start` (or
/// starting exactly at `end`) does not overlap. `exclude_id` skips the
/// booking currently being edited.
pub fn find_conflict<'a>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    existing: &'a [BookingDisplay],
    exclude_id: Option<&str>,
) -> Option<&'a BookingDisplay> {
    existing.iter().find(|b| {
        if exclude_id.is_some_and(|id| id == b.id) {
            return false;
        }
        start < b.end && end > b.start
    })
}

/// Advisory warning naming the conflicting client, with the overlapping
/// booking's local time range.
pub fn conflict_warning(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    existing: &[BookingDisplay],
    exclude_id: Option<&str>,
    tz: Tz,
) -> Option<String> {
    find_conflict(start, end, existing, exclude_id).map(|b| {
        format!(
            "Overlaps with {} ({} to {})",
            b.client_name,
            b.start.with_timezone(&tz).format("%H:%M"),
            b.end.with_timezone(&tz).format("%H:%M"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn display(id: &str, name: &str, start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> BookingDisplay {
        let start = Utc.with_ymd_and_hms(2025, 6, 2, start_h, start_m, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 2, end_h, end_m, 0).unwrap();
        BookingDisplay {
            id: id.to_string(),
            start,
            end,
            duration_secs: (end - start).num_seconds(),
            client_name: name.to_string(),
            client_phone: None,
            procedure_names: vec![],
            price: 0,
            is_me_time: false,
            title: None,
        }
    }

    #[test]
    fn test_back_to_back_is_not_a_conflict() {
        let existing = vec![display("rec1", "Anna", 10, 0, 11, 0)];
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 11, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();

        assert!(find_conflict(start, end, &existing, None).is_none());
    }

    #[test]
    fn test_partial_overlap_is_a_conflict() {
        let existing = vec![display("rec1", "Anna", 10, 0, 11, 0)];
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 10, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 2, 11, 30, 0).unwrap();

        let hit = find_conflict(start, end, &existing, None);
        assert_eq!(hit.map(|b| b.id.as_str()), Some("rec1"));
    }

    #[test]
    fn test_contained_interval_is_a_conflict() {
        let existing = vec![display("rec1", "Anna", 10, 0, 12, 0)];
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 10, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 2, 11, 0, 0).unwrap();

        assert!(find_conflict(start, end, &existing, None).is_some());
    }

    #[test]
    fn test_edited_booking_is_excluded() {
        let existing = vec![display("rec1", "Anna", 10, 0, 11, 0)];
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 2, 11, 0, 0).unwrap();

        assert!(find_conflict(start, end, &existing, Some("rec1")).is_none());
        assert!(find_conflict(start, end, &existing, Some("recOther")).is_some());
    }

    #[test]
    fn test_warning_names_the_client() {
        let existing = vec![display("rec1", "Anna Kovacs", 10, 0, 11, 0)];
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 10, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 2, 11, 30, 0).unwrap();

        let warning = conflict_warning(start, end, &existing, None, chrono_tz::UTC).unwrap();
        assert!(warning.contains("Anna Kovacs"), "warning was: {}", warning);
        assert!(warning.contains("10:00"), "warning was: {}", warning);
    }
}

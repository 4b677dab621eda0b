//! Feed serialization.
//!
//! The feed is assembled as raw content lines rather than through a builder:
//! escaping, folding and the UID scheme are part of the product contract
//! here, and phone-side calendar clients are picky about all three.

use chrono::{DateTime, Utc};

use crate::constants::{DEFAULT_ME_TIME_TITLE, FEED_BOOKING_MARKER, FEED_ME_TIME_MARKER};
use crate::display::BookingDisplay;

/// Maximum octets per content line before folding (RFC 5545 §3.1).
const FOLD_LIMIT: usize = 75;

#[derive(Debug, Clone)]
pub struct FeedOptions {
    /// Host the feed is served from; makes UIDs globally unique.
    pub host: String,
    /// Calendar name shown by subscribing clients.
    pub calendar_name: String,
}

/// Serialize a window of bookings into a complete VCALENDAR document.
///
/// `generated_at` stamps every VEVENT's DTSTAMP; the caller passes the
/// injected clock's current instant so output is deterministic under test.
pub fn generate_feed(
    displays: &[BookingDisplay],
    generated_at: DateTime<Utc>,
    options: &FeedOptions,
) -> String {
    let mut out = String::new();

    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, "PRODID:-//nailcal//booking calendar//EN");
    push_line(&mut out, "METHOD:PUBLISH");
    push_line(
        &mut out,
        &format!("X-WR-CALNAME:{}", escape_text(&options.calendar_name)),
    );

    for display in displays {
        push_event(&mut out, display, generated_at, options);
    }

    push_line(&mut out, "END:VCALENDAR");
    out
}

fn push_event(
    out: &mut String,
    display: &BookingDisplay,
    generated_at: DateTime<Utc>,
    options: &FeedOptions,
) {
    push_line(out, "BEGIN:VEVENT");
    push_line(out, &format!("UID:{}@{}", display.id, options.host));
    push_line(out, &format!("DTSTAMP:{}", format_utc(generated_at)));
    push_line(out, &format!("DTSTART:{}", format_utc(display.start)));
    push_line(out, &format!("DTEND:{}", format_utc(display.end)));
    push_line(out, &format!("SUMMARY:{}", escape_text(&summary(display))));

    let description = description(display);
    if !description.is_empty() {
        push_line(out, &format!("DESCRIPTION:{}", escape_text(&description)));
    }

    push_line(out, "END:VEVENT");
}

/// Emoji-tagged one-liner: client + procedures, or the personal-time title.
fn summary(display: &BookingDisplay) -> String {
    if display.is_me_time {
        let title = display
            .title
            .as_deref()
            .unwrap_or(DEFAULT_ME_TIME_TITLE);
        return format!("{} {}", FEED_ME_TIME_MARKER, title);
    }

    if display.procedure_names.is_empty() {
        format!("{} {}", FEED_BOOKING_MARKER, display.client_name)
    } else {
        format!(
            "{} {} - {}",
            FEED_BOOKING_MARKER,
            display.client_name,
            display.procedure_names.join(", ")
        )
    }
}

/// Multi-line body; newlines become `\n` escapes during text escaping.
fn description(display: &BookingDisplay) -> String {
    let mut lines = Vec::new();

    if let Some(phone) = &display.client_phone {
        lines.push(format!("Phone: {}", phone));
    }
    if !display.procedure_names.is_empty() {
        lines.push(format!("Procedures: {}", display.procedure_names.join(", ")));
    }
    if !display.is_me_time && display.duration_secs > 0 {
        lines.push(format!(
            "Duration: {}",
            crate::duration::seconds_to_hhmm(display.duration_secs)
        ));
    }
    if display.price > 0 {
        lines.push(format!("Price: {}", display.price));
    }

    lines.join("\n")
}

fn format_utc(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escape a TEXT value per RFC 5545 §3.3.11: backslash, comma and semicolon
/// get a backslash prefix, newlines become literal `\n`.
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ',' => escaped.push_str("\\,"),
            ';' => escaped.push_str("\\;"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Append one content line, folded at the 75-octet boundary with a single
/// space on continuation lines. Folds only on UTF-8 character boundaries.
fn push_line(out: &mut String, line: &str) {
    let mut room = FOLD_LIMIT;
    for c in line.chars() {
        let width = c.len_utf8();
        if width > room {
            out.push_str("\r\n ");
            room = FOLD_LIMIT - 1;
        }
        out.push(c);
        room -= width;
    }
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_display() -> BookingDisplay {
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
        BookingDisplay {
            id: "recBooking1".to_string(),
            start,
            end: start + chrono::Duration::seconds(5400),
            duration_secs: 5400,
            client_name: "Anna Kovacs".to_string(),
            client_phone: Some("+36 20 123 4567".to_string()),
            procedure_names: vec!["Gel manicure".to_string(), "Nail repair".to_string()],
            price: 11000,
            is_me_time: false,
            title: None,
        }
    }

    fn options() -> FeedOptions {
        FeedOptions {
            host: "salon.example.com".to_string(),
            calendar_name: "Salon bookings".to_string(),
        }
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    /// Unfold a feed back into logical lines.
    fn logical_lines(feed: &str) -> Vec<String> {
        feed.replace("\r\n ", "")
            .split("\r\n")
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_feed_structure() {
        let feed = generate_feed(&[make_display()], generated_at(), &options());
        let lines = logical_lines(&feed);

        assert_eq!(lines.first().map(String::as_str), Some("BEGIN:VCALENDAR"));
        assert_eq!(lines.last().map(String::as_str), Some("END:VCALENDAR"));
        assert!(lines.contains(&"VERSION:2.0".to_string()));
        assert!(lines.contains(&"BEGIN:VEVENT".to_string()));
        assert!(lines.contains(&"END:VEVENT".to_string()));
        assert!(feed.ends_with("\r\n"));
    }

    #[test]
    fn test_event_fields() {
        let feed = generate_feed(&[make_display()], generated_at(), &options());
        let lines = logical_lines(&feed);

        assert!(lines.contains(&"UID:recBooking1@salon.example.com".to_string()));
        assert!(lines.contains(&"DTSTAMP:20250601T080000Z".to_string()));
        assert!(lines.contains(&"DTSTART:20250602T100000Z".to_string()));
        assert!(lines.contains(&"DTEND:20250602T113000Z".to_string()));
    }

    #[test]
    fn test_summary_is_tagged_and_escaped() {
        let feed = generate_feed(&[make_display()], generated_at(), &options());
        let lines = logical_lines(&feed);

        let summary = lines
            .iter()
            .find(|l| l.starts_with("SUMMARY:"))
            .expect("missing SUMMARY");
        assert_eq!(
            summary,
            "SUMMARY:💅 Anna Kovacs - Gel manicure\\, Nail repair"
        );
    }

    #[test]
    fn test_me_time_summary() {
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 13, 0, 0).unwrap();
        let display = BookingDisplay {
            id: "recMe1".to_string(),
            start,
            end: start + chrono::Duration::seconds(3600),
            duration_secs: 3600,
            client_name: "Dentist".to_string(),
            client_phone: None,
            procedure_names: vec![],
            price: 0,
            is_me_time: true,
            title: Some("Dentist".to_string()),
        };

        let feed = generate_feed(&[display], generated_at(), &options());
        let lines = logical_lines(&feed);

        assert!(lines.contains(&"SUMMARY:🌸 Dentist".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("DESCRIPTION:")));
    }

    #[test]
    fn test_description_newlines_become_escapes() {
        let feed = generate_feed(&[make_display()], generated_at(), &options());
        let lines = logical_lines(&feed);

        let description = lines
            .iter()
            .find(|l| l.starts_with("DESCRIPTION:"))
            .expect("missing DESCRIPTION");
        assert!(
            description.contains("Phone: +36 20 123 4567\\nProcedures:"),
            "description was: {}",
            description
        );
        assert!(description.contains("Duration: 1:30"));
        assert!(description.contains("Price: 11000"));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a,b;c\\d"), "a\\,b\\;c\\\\d");
        assert_eq!(escape_text("line1\nline2"), "line1\\nline2");
        assert_eq!(escape_text("line1\r\nline2"), "line1\\nline2");
        assert_eq!(escape_text("plain"), "plain");
    }

    #[test]
    fn test_long_lines_are_folded_with_leading_space() {
        let mut display = make_display();
        display.client_name = "A".repeat(120);

        let feed = generate_feed(&[display], generated_at(), &options());

        for line in feed.split("\r\n") {
            assert!(
                line.len() <= FOLD_LIMIT,
                "physical line exceeds fold limit: {:?}",
                line
            );
        }

        let folded = feed
            .split("\r\n")
            .any(|l| l.starts_with(' ') && !l.trim().is_empty());
        assert!(folded, "expected at least one continuation line");

        // Unfolding restores the logical content
        let lines = logical_lines(&feed);
        assert!(lines
            .iter()
            .any(|l| l.starts_with("SUMMARY:") && l.contains(&"A".repeat(120))));
    }

    #[test]
    fn test_folding_never_splits_multibyte_chars() {
        let mut display = make_display();
        display.client_name = "ő".repeat(80);

        let feed = generate_feed(&[display], generated_at(), &options());

        // The fold limit is in octets; a 2-byte character must move to the
        // next line as a whole rather than straddle the boundary
        for line in feed.split("\r\n") {
            assert!(line.len() <= FOLD_LIMIT, "line too long: {:?}", line);
        }
        let lines = logical_lines(&feed);
        assert!(lines.iter().any(|l| l.contains(&"ő".repeat(80))));
    }

    #[test]
    fn test_empty_window_is_still_a_valid_calendar() {
        let feed = generate_feed(&[], generated_at(), &options());
        let lines = logical_lines(&feed);

        assert_eq!(lines.first().map(String::as_str), Some("BEGIN:VCALENDAR"));
        assert_eq!(lines.last().map(String::as_str), Some("END:VCALENDAR"));
        assert!(!feed.contains("VEVENT"));
    }
}

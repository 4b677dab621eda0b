//! Shared defaults for the booking calendar.

/// Slot granularity of the calendar grid, in minutes.
pub const DEFAULT_SLOT_MINUTES: u32 = 30;

/// First bookable hour of the working day.
pub const DEFAULT_DAY_START_HOUR: u32 = 9;

/// End of the working day (exclusive).
pub const DEFAULT_DAY_END_HOUR: u32 = 20;

/// Months of history included in the iCalendar feed.
pub const DEFAULT_FEED_MONTHS_BACK: u32 = 1;

/// Months of future bookings included in the iCalendar feed.
pub const DEFAULT_FEED_MONTHS_AHEAD: u32 = 3;

/// Display name used when a booking's client cannot be resolved.
pub const UNKNOWN_CLIENT: &str = "Unknown client";

/// Title used for personal-time blocks saved without one.
pub const DEFAULT_ME_TIME_TITLE: &str = "Personal time";

/// SUMMARY marker for client appointments in the feed.
pub const FEED_BOOKING_MARKER: &str = "💅";

/// SUMMARY marker for personal-time blocks in the feed.
pub const FEED_ME_TIME_MARKER: &str = "🌸";

//! Calendar grid arithmetic: week/month anchors, time slots, navigation.
//!
//! Everything here is pure date arithmetic on calendar components. Inputs are
//! valid by construction in the UI layer, so these functions have no error
//! conditions. Predicates that depend on "now" take the injected [`Clock`].

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Days, Months, NaiveDate, Timelike, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

use crate::clock::Clock;
use crate::constants::{DEFAULT_DAY_END_HOUR, DEFAULT_DAY_START_HOUR, DEFAULT_SLOT_MINUTES};
use crate::display::BookingDisplay;

/// Which day a display week begins on.
///
/// The convention is a parameter, not a hardcoded weekday offset, and is
/// chosen in exactly one place by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

/// One cell of the time axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub hour: u32,
    pub minute: u32,
    /// Zero-padded `HH:MM`.
    pub label: String,
}

/// First day of the week containing `date`.
pub fn week_anchor(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    date.week(week_start.weekday()).first_day()
}

/// The 7 consecutive days starting at `anchor`.
pub fn week_dates(anchor: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| anchor + Days::new(i as u64))
}

/// All days shown on the month view for the month containing `date`:
/// the full month plus padding on both ends to align on week boundaries.
pub fn month_grid_days(date: NaiveDate, week_start: WeekStart) -> Vec<NaiveDate> {
    let first_of_month = date.with_day(1).unwrap();
    let last_of_month = first_of_month + Months::new(1) - Days::new(1);

    let grid_start = week_anchor(first_of_month, week_start);
    let grid_end = week_anchor(last_of_month, week_start) + Days::new(6);

    let mut days = Vec::with_capacity(42);
    let mut day = grid_start;
    while day <= grid_end {
        days.push(day);
        day = day + Days::new(1);
    }
    days
}

pub fn previous_week(anchor: NaiveDate) -> NaiveDate {
    anchor - Days::new(7)
}

pub fn next_week(anchor: NaiveDate) -> NaiveDate {
    anchor + Days::new(7)
}

/// One month back, clamping the day-of-month where the target month is
/// shorter (Mar 31 -> Feb 28/29).
pub fn previous_month(date: NaiveDate) -> NaiveDate {
    date - Months::new(1)
}

pub fn next_month(date: NaiveDate) -> NaiveDate {
    date + Months::new(1)
}

/// Comparisons are on calendar components, never on instants, so a booking
/// at 23:30 does not leak into the next day through timezone conversion.
pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

pub fn is_today(date: NaiveDate, clock: &dyn Clock) -> bool {
    date == clock.today()
}

pub fn is_current_week(date: NaiveDate, week_start: WeekStart, clock: &dyn Clock) -> bool {
    week_anchor(date, week_start) == week_anchor(clock.today(), week_start)
}

/// Ordered time slots covering `[start_hour, end_hour)` at `step_minutes`
/// granularity.
pub fn generate_slots(start_hour: u32, end_hour: u32, step_minutes: u32) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    if step_minutes == 0 {
        return slots;
    }

    let mut minute_of_day = start_hour * 60;
    let end = end_hour * 60;
    while minute_of_day < end {
        let (hour, minute) = (minute_of_day / 60, minute_of_day % 60);
        slots.push(TimeSlot {
            hour,
            minute,
            label: format!("{:02}:{:02}", hour, minute),
        });
        minute_of_day += step_minutes;
    }
    slots
}

/// The salon's standard working-day grid.
pub fn working_day_slots() -> Vec<TimeSlot> {
    generate_slots(
        DEFAULT_DAY_START_HOUR,
        DEFAULT_DAY_END_HOUR,
        DEFAULT_SLOT_MINUTES,
    )
}

/// Key of a grid cell within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub hour: u32,
    pub minute: u32,
}

impl SlotKey {
    fn from_minute_of_day(minute_of_day: u32) -> Self {
        SlotKey {
            hour: minute_of_day / 60,
            minute: minute_of_day % 60,
        }
    }
}

/// A booking anchored to the cell containing its start.
#[derive(Debug, Clone)]
pub struct PlacedBooking {
    pub display: BookingDisplay,
    /// Number of slot cells the booking's visual height spans.
    pub span: u32,
}

/// One day's bookings bucketed into slot cells.
///
/// A booking lives in exactly one cell (its start truncated to slot
/// granularity); the cells covered by the rest of its span are marked
/// occupied and excluded from click-to-create.
#[derive(Debug, Default)]
pub struct DayGrid {
    starts: HashMap<SlotKey, Vec<PlacedBooking>>,
    occupied: HashSet<SlotKey>,
}

impl DayGrid {
    pub fn build(
        displays: &[BookingDisplay],
        date: NaiveDate,
        slot_minutes: u32,
        tz: Tz,
    ) -> DayGrid {
        let mut grid = DayGrid::default();
        let slot_secs = i64::from(slot_minutes) * 60;

        for display in displays {
            let local = display.start.with_timezone(&tz);
            if local.date_naive() != date {
                continue;
            }

            let minute_of_day = local.hour() * 60 + local.minute();
            let start_cell = minute_of_day - minute_of_day % slot_minutes;
            let span = ((display.duration_secs + slot_secs - 1) / slot_secs).max(1) as u32;

            for i in 1..span {
                let covered = start_cell + i * slot_minutes;
                if covered >= 24 * 60 {
                    break;
                }
                grid.occupied.insert(SlotKey::from_minute_of_day(covered));
            }

            grid.starts
                .entry(SlotKey::from_minute_of_day(start_cell))
                .or_default()
                .push(PlacedBooking {
                    display: display.clone(),
                    span,
                });
        }

        grid
    }

    /// Bookings whose start falls in this cell.
    pub fn starting_at(&self, slot: &TimeSlot) -> &[PlacedBooking] {
        self.starts
            .get(&SlotKey {
                hour: slot.hour,
                minute: slot.minute,
            })
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Covered by some booking's span without being its start cell.
    pub fn is_occupied(&self, slot: &TimeSlot) -> bool {
        self.occupied.contains(&SlotKey {
            hour: slot.hour,
            minute: slot.minute,
        })
    }

    /// Valid click-to-create target: neither a start cell nor covered.
    pub fn is_free(&self, slot: &TimeSlot) -> bool {
        let key = SlotKey {
            hour: slot.hour,
            minute: slot.minute,
        };
        !self.occupied.contains(&key) && !self.starts.contains_key(&key)
    }
}

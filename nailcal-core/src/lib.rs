//! Core types and calendar logic for the nailcal booking system.
//!
//! This crate holds everything that does not touch the network: typed domain
//! records, calendar grid arithmetic, duration conversions, booking
//! normalization, conflict detection and the iCalendar feed serializer.
//! The gateway crate converts external-store records into these types, and
//! the server works exclusively with them.

pub mod booking;
pub mod clock;
pub mod conflict;
pub mod constants;
pub mod display;
pub mod duration;
pub mod error;
pub mod grid;
pub mod ics;

// Re-export the main types at crate root for convenience
pub use booking::{Booking, Client, NewBooking, NewClient, Procedure};
pub use clock::{Clock, FixedClock, SystemClock};
pub use display::BookingDisplay;
pub use error::{SalonError, SalonResult};
pub use grid::{TimeSlot, WeekStart};
